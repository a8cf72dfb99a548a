//! Resource and data source contracts
//!
//! A declarative resource adapter implements [`ResourceOps`]; the caller
//! drives the lifecycle by comparing desired and recorded state and invoking
//! the matching operation. State crosses the trait boundary as
//! `serde_json::Value` so the registry can hold adapters for heterogeneous
//! state shapes behind one trait object.
//!
//! ## Lifecycle contract
//!
//! - `create` receives the desired state and returns the full recorded state,
//!   including the remote identifier.
//! - `read` receives the recorded state and returns the refreshed state, or
//!   `Ok(None)` when the remote object no longer exists. Absence is not an
//!   error on read.
//! - `update` receives desired and prior state and returns the new recorded
//!   state.
//! - `delete` receives the recorded state. A remote object that is already
//!   gone is success.
//! - `import` turns an external identifier into recorded state.
//!
//! Cancellation is dropping the returned future; no operation requires an
//! explicit cancellation token.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Lifecycle operations for one declarative resource type
///
/// Implementations must be thread-safe and usable across async tasks. They
/// must not retry rate-limited calls themselves; the transport owns retry.
#[async_trait]
pub trait ResourceOps: Send + Sync {
    /// Resource type name, e.g. "zoneeu_dns_a_record"
    fn type_name(&self) -> &str;

    /// Validate desired state before any API call
    ///
    /// Catches malformed field values (bad IP, out-of-range numeric) so the
    /// failure carries the field name instead of a remote 4xx body.
    fn validate(&self, desired: &Value) -> Result<()>;

    /// Create the remote object and return the recorded state
    async fn create(&self, desired: Value) -> Result<Value>;

    /// Refresh recorded state from the remote side
    ///
    /// Returns `Ok(None)` when the remote object is gone, which signals the
    /// caller to forget the resource rather than fail.
    async fn read(&self, recorded: Value) -> Result<Option<Value>>;

    /// Apply desired state on top of the existing remote object
    async fn update(&self, desired: Value, recorded: Value) -> Result<Value>;

    /// Remove the remote object; absence counts as success
    async fn delete(&self, recorded: Value) -> Result<()>;

    /// Resolve an external identifier into recorded state
    async fn import(&self, id: &str) -> Result<Value>;
}

/// Read-only lookups exposed as data sources
#[async_trait]
pub trait DataSourceOps: Send + Sync {
    /// Data source type name, e.g. "zoneeu_dns_zone"
    fn type_name(&self) -> &str;

    /// Fetch the object named by the query state
    async fn read(&self, query: Value) -> Result<Value>;
}
