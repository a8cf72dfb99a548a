//! Read-only data sources for zones and domains

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use zoneeu_client::Client;
use zoneeu_core::error::{Error, Result};
use zoneeu_core::traits::DataSourceOps;

pub const ZONE_DATA_SOURCE: &str = "zoneeu_dns_zone";
pub const DOMAIN_DATA_SOURCE: &str = "zoneeu_domain";

#[derive(Deserialize)]
struct ZoneQuery {
    name: String,
}

/// Looks up zone metadata by name
pub struct ZoneDataSource {
    client: Arc<Client>,
}

impl ZoneDataSource {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DataSourceOps for ZoneDataSource {
    fn type_name(&self) -> &str {
        ZONE_DATA_SOURCE
    }

    async fn read(&self, query: Value) -> Result<Value> {
        let query: ZoneQuery = serde_json::from_value(query)?;
        if query.name.is_empty() {
            return Err(Error::invalid_input("name is required"));
        }
        let zone = self.client.get_zone(&query.name).await?;
        Ok(serde_json::json!({
            "id": zone.name,
            "name": zone.name,
            "active": zone.active,
            "ipv6": zone.ipv6,
        }))
    }
}

/// Looks up domain settings by name
pub struct DomainDataSource {
    client: Arc<Client>,
}

impl DomainDataSource {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DataSourceOps for DomainDataSource {
    fn type_name(&self) -> &str {
        DOMAIN_DATA_SOURCE
    }

    async fn read(&self, query: Value) -> Result<Value> {
        let query: ZoneQuery = serde_json::from_value(query)?;
        if query.name.is_empty() {
            return Err(Error::invalid_input("name is required"));
        }
        let domain = self.client.get_domain(&query.name).await?;
        // renewal_notifications lives on the preferences sub-resource
        let prefs = self.client.get_domain_preferences(&query.name).await?;
        Ok(serde_json::json!({
            "id": domain.name,
            "name": domain.name,
            "autorenew": domain.autorenew,
            "dnssec": domain.dnssec,
            "nameservers_custom": domain.nameservers_custom,
            "renewal_notifications": prefs.renewal_notifications,
            "expires": domain.expires,
            "delegated": domain.delegated,
        }))
    }
}
