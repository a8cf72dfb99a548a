//! Domain settings adapter
//!
//! Domains cannot be registered or dropped through the API; this adapter
//! manages the settings of a domain that already exists on the account.
//! Create therefore verifies existence and applies settings, and delete
//! resets the domain to safe defaults before it is forgotten.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use zoneeu_client::Client;
use zoneeu_core::error::{Error, Result};
use zoneeu_core::traits::ResourceOps;
use zoneeu_core::types::{Domain, DomainPreferences, DomainUpdate};

pub const DOMAIN_TYPE: &str = "zoneeu_domain";

/// Declarative state of a managed domain
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainState {
    /// The domain name doubles as the identifier
    #[serde(default)]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub autorenew: bool,
    #[serde(default)]
    pub dnssec: bool,
    #[serde(default)]
    pub nameservers_custom: bool,
    #[serde(default)]
    pub renewal_notifications: bool,

    /// Expiry date as reported by the registry (read-only)
    #[serde(default)]
    pub expires: String,
    /// Delegation status as reported by the registry (read-only)
    #[serde(default)]
    pub delegated: String,
}

impl DomainState {
    fn absorb(&mut self, domain: &Domain) {
        self.name = domain.name.clone();
        self.autorenew = domain.autorenew;
        self.dnssec = domain.dnssec;
        self.nameservers_custom = domain.nameservers_custom;
        self.expires = domain.expires.clone();
        self.delegated = domain.delegated.clone();
        self.id = domain.name.clone();
    }
}

pub struct DomainResource {
    client: Arc<Client>,
}

impl DomainResource {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    async fn apply_settings(&self, state: &mut DomainState) -> Result<()> {
        let update = DomainUpdate {
            autorenew: Some(state.autorenew),
            dnssec: Some(state.dnssec),
            nameservers_custom: Some(state.nameservers_custom),
        };
        let domain = self.client.update_domain(&state.name, &update).await?;

        let prefs = DomainPreferences {
            renewal_notifications: state.renewal_notifications,
            ..Default::default()
        };
        let prefs = self
            .client
            .update_domain_preferences(&state.name, &prefs)
            .await?;

        let notifications = prefs.renewal_notifications;
        state.absorb(&domain);
        state.renewal_notifications = notifications;
        Ok(())
    }
}

#[async_trait]
impl ResourceOps for DomainResource {
    fn type_name(&self) -> &str {
        DOMAIN_TYPE
    }

    fn validate(&self, desired: &Value) -> Result<()> {
        let state: DomainState = serde_json::from_value(desired.clone())?;
        if state.name.is_empty() {
            return Err(Error::invalid_input("name is required"));
        }
        Ok(())
    }

    async fn create(&self, desired: Value) -> Result<Value> {
        let mut state: DomainState = serde_json::from_value(desired)?;
        self.validate(&serde_json::to_value(&state)?)?;

        // Adoption only: the domain must already exist on the account
        self.client.get_domain(&state.name).await.map_err(|err| {
            Error::Other(format!(
                "could not read domain {}: {err}. This resource manages existing \
                 domains, it does not register new ones",
                state.name
            ))
        })?;

        self.apply_settings(&mut state).await?;
        Ok(serde_json::to_value(state)?)
    }

    async fn read(&self, recorded: Value) -> Result<Option<Value>> {
        let mut state: DomainState = serde_json::from_value(recorded)?;

        let domain = match self.client.get_domain(&state.name).await {
            Ok(domain) => domain,
            Err(err) if err.is_not_found() => return Ok(None),
            Err(err) => return Err(err),
        };
        let prefs = self.client.get_domain_preferences(&state.name).await?;

        state.absorb(&domain);
        state.renewal_notifications = prefs.renewal_notifications;
        Ok(Some(serde_json::to_value(state)?))
    }

    async fn update(&self, desired: Value, _recorded: Value) -> Result<Value> {
        let mut state: DomainState = serde_json::from_value(desired)?;
        self.apply_settings(&mut state).await?;
        Ok(serde_json::to_value(state)?)
    }

    /// The domain itself survives; settings are reset to safe defaults and
    /// failures are ignored because there is nothing left to roll back.
    async fn delete(&self, recorded: Value) -> Result<()> {
        let state: DomainState = serde_json::from_value(recorded)?;
        let update = DomainUpdate {
            autorenew: Some(false),
            dnssec: Some(false),
            nameservers_custom: None,
        };
        if let Err(err) = self.client.update_domain(&state.name, &update).await {
            warn!(domain = %state.name, error = %err, "could not reset domain settings");
        }
        Ok(())
    }

    async fn import(&self, id: &str) -> Result<Value> {
        let domain = self.client.get_domain(id).await?;
        let prefs = self.client.get_domain_preferences(id).await?;

        let mut state = DomainState::default();
        state.absorb(&domain);
        state.renewal_notifications = prefs.renewal_notifications;
        Ok(serde_json::to_value(state)?)
    }
}
