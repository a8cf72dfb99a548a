//! Error types for the Zone.EU provider stack
//!
//! The transport layer classifies every failed API call into one of these
//! variants; the reconciliation layer dispatches on the classification
//! predicates (`is_not_found`, `is_conflict`) rather than on message text.

use std::time::Duration;

use thiserror::Error;

/// Signal embedded in the API error body when a record with the same name
/// already exists in the zone.
pub const CONFLICT_SIGNAL: &str = "zone_conflict";

/// Result type alias for Zone.EU operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the Zone.EU provider stack
#[derive(Error, Debug)]
pub enum Error {
    /// Non-2xx API response (other than 429)
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, with the X-Status-Message header appended when present
        message: String,
    },

    /// 429 response; carries the provider-directed backoff
    #[error("rate limit exceeded, retry after {retry_after:?}: {message}")]
    RateLimited {
        /// Backoff duration from the Retry-After header
        retry_after: Duration,
        /// X-Status-Message header value, if any
        message: String,
    },

    /// The 429 retry budget was exhausted
    #[error("max retries exceeded: {0}")]
    MaxRetries(#[source] Box<Error>),

    /// An array-unwrap endpoint returned a zero-length array
    #[error("empty response from API")]
    EmptyResponse,

    /// A lookup came back empty
    #[error("{0}")]
    NotFound(String),

    /// Connection-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON serialization/deserialization errors
    #[error("error parsing response: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors (missing credentials etc.)
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid field value caught before any API call
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Malformed external resource identifier
    #[error("invalid import id: {0}")]
    InvalidImportId(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether the remote object is absent (benign on Read and Delete)
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound(_) => true,
            Error::Api { status: 404, .. } => true,
            Error::Api { message, .. } => message.contains("not found"),
            _ => false,
        }
    }

    /// Whether this is the provider's name-uniqueness conflict signal
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Api { message, .. } if message.contains(CONFLICT_SIGNAL))
    }

    /// Whether this is a rate-limit error (retried by the transport)
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimited { .. })
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
