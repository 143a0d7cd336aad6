use crate::shared::errors::AppResult;
use async_trait::async_trait;
use serde_json::Value;

/// The one seam between the engine and the network.
///
/// `path` is relative to the catalog API base. Implementations own the
/// credential injection, so callers never pass the API key.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    async fn get_json(&self, path: &str, query: &[(String, String)]) -> AppResult<Value>;
}
