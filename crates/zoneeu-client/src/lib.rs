//! # zoneeu-client
//!
//! Authenticated HTTP client for the Zone.EU API.
//!
//! The [`Client`] owns rate limiting, 429 retry and error classification in
//! [`transport`]; [`records`] and [`domains`] expose the typed CRUD surface
//! on top of it, and [`reconcile`] layers the name-conflict resolution
//! protocol used by the declarative adapters.

mod domains;
mod reconcile;
mod records;
mod transport;

pub use transport::{BASE_URL, Client};
