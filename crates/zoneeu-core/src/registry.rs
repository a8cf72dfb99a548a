//! Resource type registry
//!
//! The registry maps resource and data source type names to their adapters,
//! letting a host enumerate and dispatch to them without hardcoded match
//! arms.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use zoneeu_core::registry::ResourceRegistry;
//!
//! let registry = ResourceRegistry::new();
//! registry.register_resource(Arc::new(a_record_adapter));
//!
//! let ops = registry.resource("zoneeu_dns_a_record")?;
//! let recorded = ops.create(desired).await?;
//! ```
//!
//! ## Thread safety
//!
//! Interior mutability with RwLock; concurrent reads, exclusive writes.
//! Adapters are held behind `Arc` so lookups hand out clones without
//! keeping the lock.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{Error, Result};
use crate::traits::{DataSourceOps, ResourceOps};

/// Registry of declarative resource and data source adapters
#[derive(Default)]
pub struct ResourceRegistry {
    resources: RwLock<HashMap<String, Arc<dyn ResourceOps>>>,
    data_sources: RwLock<HashMap<String, Arc<dyn DataSourceOps>>>,
}

impl ResourceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource adapter under its own type name
    pub fn register_resource(&self, ops: Arc<dyn ResourceOps>) {
        let name = ops.type_name().to_string();
        let mut resources = self.resources.write().unwrap();
        resources.insert(name, ops);
    }

    /// Register a data source adapter under its own type name
    pub fn register_data_source(&self, ops: Arc<dyn DataSourceOps>) {
        let name = ops.type_name().to_string();
        let mut sources = self.data_sources.write().unwrap();
        sources.insert(name, ops);
    }

    /// Look up a resource adapter by type name
    pub fn resource(&self, name: &str) -> Result<Arc<dyn ResourceOps>> {
        let resources = self.resources.read().unwrap();
        resources
            .get(name)
            .cloned()
            .ok_or_else(|| Error::config(format!("unknown resource type: {name}")))
    }

    /// Look up a data source adapter by type name
    pub fn data_source(&self, name: &str) -> Result<Arc<dyn DataSourceOps>> {
        let sources = self.data_sources.read().unwrap();
        sources
            .get(name)
            .cloned()
            .ok_or_else(|| Error::config(format!("unknown data source type: {name}")))
    }

    /// All registered resource type names, sorted
    pub fn list_resources(&self) -> Vec<String> {
        let resources = self.resources.read().unwrap();
        let mut names: Vec<String> = resources.keys().cloned().collect();
        names.sort();
        names
    }

    /// All registered data source type names, sorted
    pub fn list_data_sources(&self) -> Vec<String> {
        let sources = self.data_sources.read().unwrap();
        let mut names: Vec<String> = sources.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check whether a resource type is registered
    pub fn has_resource(&self, name: &str) -> bool {
        let resources = self.resources.read().unwrap();
        resources.contains_key(name)
    }
}
