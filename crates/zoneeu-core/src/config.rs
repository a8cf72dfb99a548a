//! Credential configuration for the Zone.EU API
//!
//! Credentials come from explicit configuration or from the
//! `ZONE_EU_USERNAME` / `ZONE_EU_API_KEY` environment variables. A missing
//! credential is a hard configuration error at construction time, never a
//! per-call failure.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable holding the ZoneID username
pub const ENV_USERNAME: &str = "ZONE_EU_USERNAME";

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "ZONE_EU_API_KEY";

/// Authentication material for the Zone.EU API
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// ZoneID username
    pub username: String,

    /// API key paired with the username
    pub api_key: String,
}

// The API key never appears in Debug output.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("api_key", &"<REDACTED>")
            .finish()
    }
}

impl Credentials {
    /// Create credentials from explicit values
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let creds = Self {
            username: username.into(),
            api_key: api_key.into(),
        };
        creds.validate()?;
        Ok(creds)
    }

    /// Resolve credentials, falling back to the environment for any value
    /// not supplied explicitly
    pub fn resolve(username: Option<String>, api_key: Option<String>) -> Result<Self> {
        let username = username
            .filter(|u| !u.is_empty())
            .or_else(|| std::env::var(ENV_USERNAME).ok())
            .unwrap_or_default();
        let api_key = api_key
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(ENV_API_KEY).ok())
            .unwrap_or_default();
        Self::new(username, api_key)
    }

    /// Validate that both credentials are present
    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty() {
            return Err(Error::config(format!(
                "required username could not be found; set it in the provider \
                 configuration or via the {ENV_USERNAME} environment variable"
            )));
        }
        if self.api_key.is_empty() {
            return Err(Error::config(format!(
                "required api_key could not be found; set it in the provider \
                 configuration or via the {ENV_API_KEY} environment variable"
            )));
        }
        Ok(())
    }
}
