//! Domain, preference and nameserver operations
//!
//! Domains are registry objects, not DNS zones; they cannot be created or
//! destroyed through the API, only adjusted. Nameserver management is a
//! full-replace API at the collection level with per-hostname updates.

use reqwest::Method;

use zoneeu_core::error::{Error, Result};
use zoneeu_core::types::{Domain, DomainNameserver, DomainPreferences, DomainUpdate};

use crate::transport::Client;

impl Client {
    /// List all domains on the account
    pub async fn list_domains(&self) -> Result<Vec<Domain>> {
        let resp = self.request::<()>(Method::GET, "/domain", None).await?;
        Ok(serde_json::from_slice(&resp)?)
    }

    /// Fetch one domain by name
    pub async fn get_domain(&self, name: &str) -> Result<Domain> {
        let resp = self
            .request::<()>(Method::GET, &format!("/domain/{name}"), None)
            .await?;
        let domains: Vec<Domain> = serde_json::from_slice(&resp)?;
        domains
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(format!("domain not found: {name}")))
    }

    /// Apply a partial settings update to a domain
    ///
    /// Fields left as `None` are omitted from the request and keep their
    /// remote value.
    pub async fn update_domain(&self, name: &str, update: &DomainUpdate) -> Result<Domain> {
        let resp = self
            .request(Method::PUT, &format!("/domain/{name}"), Some(update))
            .await?;
        let domains: Vec<Domain> = serde_json::from_slice(&resp)?;
        domains
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(format!("domain not found: {name}")))
    }

    /// Fetch domain preferences
    pub async fn get_domain_preferences(&self, name: &str) -> Result<DomainPreferences> {
        let resp = self
            .request::<()>(Method::GET, &format!("/domain/{name}/preferences"), None)
            .await?;
        let prefs: Vec<DomainPreferences> = serde_json::from_slice(&resp)?;
        prefs
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(format!("domain preferences not found: {name}")))
    }

    /// Replace domain preferences
    pub async fn update_domain_preferences(
        &self,
        name: &str,
        prefs: &DomainPreferences,
    ) -> Result<DomainPreferences> {
        let resp = self
            .request(
                Method::PUT,
                &format!("/domain/{name}/preferences"),
                Some(prefs),
            )
            .await?;
        let updated: Vec<DomainPreferences> = serde_json::from_slice(&resp)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(format!("domain preferences not found: {name}")))
    }

    /// List all custom nameservers for a domain
    pub async fn list_domain_nameservers(&self, domain: &str) -> Result<Vec<DomainNameserver>> {
        let resp = self
            .request::<()>(Method::GET, &format!("/domain/{domain}/nameserver"), None)
            .await?;
        Ok(serde_json::from_slice(&resp)?)
    }

    /// Fetch one nameserver by hostname
    pub async fn get_domain_nameserver(
        &self,
        domain: &str,
        hostname: &str,
    ) -> Result<DomainNameserver> {
        let resp = self
            .request::<()>(
                Method::GET,
                &format!("/domain/{domain}/nameserver/{hostname}"),
                None,
            )
            .await?;
        let nameservers: Vec<DomainNameserver> = serde_json::from_slice(&resp)?;
        nameservers
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(format!("nameserver not found: {hostname}")))
    }

    /// Replace the full nameserver set for a domain
    pub async fn replace_domain_nameservers(
        &self,
        domain: &str,
        nameservers: &[DomainNameserver],
    ) -> Result<Vec<DomainNameserver>> {
        let resp = self
            .request(
                Method::POST,
                &format!("/domain/{domain}/nameserver"),
                Some(nameservers),
            )
            .await?;
        Ok(serde_json::from_slice(&resp)?)
    }

    /// Update one nameserver in place
    pub async fn update_domain_nameserver(
        &self,
        domain: &str,
        hostname: &str,
        nameserver: &DomainNameserver,
    ) -> Result<DomainNameserver> {
        let resp = self
            .request(
                Method::PUT,
                &format!("/domain/{domain}/nameserver/{hostname}"),
                Some(nameserver),
            )
            .await?;
        let updated: Vec<DomainNameserver> = serde_json::from_slice(&resp)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(format!("nameserver not found after update: {hostname}")))
    }

    /// Remove one nameserver by hostname
    pub async fn delete_domain_nameserver(&self, domain: &str, hostname: &str) -> Result<()> {
        self.request::<()>(
            Method::DELETE,
            &format!("/domain/{domain}/nameserver/{hostname}"),
            None,
        )
        .await?;
        Ok(())
    }
}
