use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::Result;

/// Variables passed to a paginated query.
pub type Variables = Map<String, Value>;

/// Capability that executes a paginated query.
///
/// Implementations return the full query data object (the `data` member of
/// a GraphQL response). Any `Err` is treated as a rejected fetch.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Executes the query with the given variables.
    async fn fetch_page(&self, variables: Variables) -> Result<Value>;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Arc<T> {
    async fn fetch_page(&self, variables: Variables) -> Result<Value> {
        (**self).fetch_page(variables).await
    }
}
