//! Custom nameserver adapter
//!
//! The API manages nameservers as a full-replace collection; this adapter
//! exposes individual hostnames. Create reads the current set, refuses a
//! duplicate hostname before any write, and posts the extended set back.
//! The identifier is `{domain}/{hostname}`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use zoneeu_client::Client;
use zoneeu_core::error::{Error, Result};
use zoneeu_core::traits::ResourceOps;
use zoneeu_core::types::DomainNameserver;

pub const NAMESERVER_TYPE: &str = "zoneeu_domain_nameserver";

/// Declarative state of one custom nameserver
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NameserverState {
    /// Composite identifier `{domain}/{hostname}`
    #[serde(default)]
    pub id: String,

    pub domain: String,
    pub hostname: String,

    /// Glue addresses, if the hostname sits under the domain itself
    #[serde(default)]
    pub ip: Vec<String>,
}

fn parse_nameserver_id(id: &str) -> Result<(&str, &str)> {
    match id.split_once('/') {
        Some((domain, hostname)) if !domain.is_empty() && !hostname.is_empty() => {
            Ok((domain, hostname))
        }
        _ => Err(Error::InvalidImportId(format!(
            "expected format 'domain/hostname', got: {id}"
        ))),
    }
}

impl NameserverState {
    fn to_nameserver(&self) -> DomainNameserver {
        DomainNameserver {
            hostname: self.hostname.clone(),
            ip: self.ip.clone(),
            ..Default::default()
        }
    }

    fn set_identity(&mut self) {
        self.id = format!("{}/{}", self.domain, self.hostname);
    }
}

pub struct NameserverResource {
    client: Arc<Client>,
}

impl NameserverResource {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceOps for NameserverResource {
    fn type_name(&self) -> &str {
        NAMESERVER_TYPE
    }

    fn validate(&self, desired: &Value) -> Result<()> {
        let state: NameserverState = serde_json::from_value(desired.clone())?;
        if state.domain.is_empty() {
            return Err(Error::invalid_input("domain is required"));
        }
        if state.hostname.is_empty() {
            return Err(Error::invalid_input("hostname is required"));
        }
        Ok(())
    }

    async fn create(&self, desired: Value) -> Result<Value> {
        let mut state: NameserverState = serde_json::from_value(desired)?;
        self.validate(&serde_json::to_value(&state)?)?;

        let mut current = self.client.list_domain_nameservers(&state.domain).await?;

        // Duplicate hostnames are refused before anything is written
        if current.iter().any(|ns| ns.hostname == state.hostname) {
            return Err(Error::invalid_input(format!(
                "nameserver {} already exists for domain {}",
                state.hostname, state.domain
            )));
        }

        current.push(state.to_nameserver());
        self.client
            .replace_domain_nameservers(&state.domain, &current)
            .await?;

        state.set_identity();
        Ok(serde_json::to_value(state)?)
    }

    async fn read(&self, recorded: Value) -> Result<Option<Value>> {
        let mut state: NameserverState = serde_json::from_value(recorded)?;

        let ns = match self
            .client
            .get_domain_nameserver(&state.domain, &state.hostname)
            .await
        {
            Ok(ns) => ns,
            Err(err) if err.is_not_found() => return Ok(None),
            Err(err) => return Err(err),
        };

        state.hostname = ns.hostname;
        state.ip = ns.ip;
        state.set_identity();
        Ok(Some(serde_json::to_value(state)?))
    }

    async fn update(&self, desired: Value, _recorded: Value) -> Result<Value> {
        let mut state: NameserverState = serde_json::from_value(desired)?;
        self.validate(&serde_json::to_value(&state)?)?;

        self.client
            .update_domain_nameserver(&state.domain, &state.hostname, &state.to_nameserver())
            .await?;

        state.set_identity();
        Ok(serde_json::to_value(state)?)
    }

    async fn delete(&self, recorded: Value) -> Result<()> {
        let state: NameserverState = serde_json::from_value(recorded)?;
        match self
            .client
            .delete_domain_nameserver(&state.domain, &state.hostname)
            .await
        {
            Ok(()) => Ok(()),
            Err(err) if err.is_not_found() => Ok(()),
            Err(err) => Err(err),
        }
    }

    async fn import(&self, id: &str) -> Result<Value> {
        let (domain, hostname) = parse_nameserver_id(id)?;
        let ns = self.client.get_domain_nameserver(domain, hostname).await?;

        let mut state = NameserverState {
            domain: domain.to_string(),
            hostname: ns.hostname,
            ip: ns.ip,
            ..Default::default()
        };
        state.set_identity();
        Ok(serde_json::to_value(state)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nameserver_id_requires_both_parts() {
        assert_eq!(
            parse_nameserver_id("example.com/ns1.example.net").unwrap(),
            ("example.com", "ns1.example.net")
        );
        assert!(parse_nameserver_id("example.com").is_err());
        assert!(parse_nameserver_id("/ns1").is_err());
    }
}
