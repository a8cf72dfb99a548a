//! # zoneeu-core
//!
//! Core types and contracts for the Zone.EU declarative DNS/domain stack.
//!
//! This crate defines the shared vocabulary of the workspace:
//!
//! - [`error`]: the error taxonomy and its classification predicates
//! - [`config`]: credential resolution (explicit values or environment)
//! - [`types`]: wire types for records, zones, domains and nameservers
//! - [`traits`]: the [`ResourceOps`]/[`DataSourceOps`] lifecycle contracts
//! - [`registry`]: the type-name registry adapters plug into
//!
//! The HTTP transport and the adapters live in `zoneeu-client` and
//! `zoneeu-resources`; this crate stays free of any HTTP dependency.

pub mod config;
pub mod error;
pub mod registry;
pub mod traits;
pub mod types;

pub use config::Credentials;
pub use error::{Error, Result, CONFLICT_SIGNAL};
pub use registry::ResourceRegistry;
pub use traits::{DataSourceOps, ResourceOps};
pub use types::{
    Domain, DomainNameserver, DomainPreferences, DomainUpdate, Record, RecordKind, Zone,
};
