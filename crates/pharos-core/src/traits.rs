use crate::{error::FetchError, query::Query};
use async_trait::async_trait;
use serde_json::Value;

/// Remote content backend. The only suspension point of the resolver.
///
/// Implementations run one parameterized query and return the raw JSON
/// result. Transport details (HTTP, retries, timeouts) stay behind this trait.
#[async_trait]
pub trait ContentBackend: Send + Sync {
    /// Human-readable backend name.
    fn name(&self) -> &str;

    /// Execute a query and return its `result` payload.
    async fn query(&self, query: &Query) -> Result<Value, FetchError>;
}
