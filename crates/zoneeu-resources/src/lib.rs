//! # zoneeu-resources
//!
//! Declarative resource and data source adapters for Zone.EU DNS records,
//! domain settings and custom nameservers.
//!
//! [`register`] wires every adapter into a [`ResourceRegistry`] against one
//! shared [`Client`]: one generic record adapter per supported kind, the
//! domain and nameserver adapters, and the read-only data sources.

use std::sync::Arc;

use zoneeu_client::Client;
use zoneeu_core::registry::ResourceRegistry;
use zoneeu_core::types::RecordKind;

pub mod datasource;
pub mod domain;
pub mod nameserver;
pub mod record;

pub use datasource::{DomainDataSource, ZoneDataSource};
pub use domain::{DomainResource, DomainState};
pub use nameserver::{NameserverResource, NameserverState};
pub use record::{RecordResource, RecordState};

/// Register every adapter this crate provides
pub fn register(registry: &ResourceRegistry, client: Arc<Client>) {
    for kind in RecordKind::ALL {
        registry.register_resource(Arc::new(RecordResource::new(client.clone(), kind)));
    }
    registry.register_resource(Arc::new(DomainResource::new(client.clone())));
    registry.register_resource(Arc::new(NameserverResource::new(client.clone())));

    registry.register_data_source(Arc::new(ZoneDataSource::new(client.clone())));
    registry.register_data_source(Arc::new(DomainDataSource::new(client)));
}
