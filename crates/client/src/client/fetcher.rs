//! GraphQL-backed page fetching.

use async_trait::async_trait;
use orgadmin_core::pagination::{PageFetcher, PaginationError, Variables};
use serde_json::Value;

use super::GraphQlClient;

/// Runs one paginated query against a [`GraphQlClient`].
#[derive(Debug, Clone)]
pub struct GraphQlPageFetcher {
    client: GraphQlClient,
    query: String,
}

impl GraphQlPageFetcher {
    /// The query must declare `$first` and `$after` variables.
    pub fn new(client: GraphQlClient, query: impl Into<String>) -> Self {
        Self {
            client,
            query: query.into(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

#[async_trait]
impl PageFetcher for GraphQlPageFetcher {
    async fn fetch_page(&self, variables: Variables) -> Result<Value, PaginationError> {
        self.client
            .execute(&self.query, &variables)
            .await
            .map_err(PaginationError::from)
    }
}
