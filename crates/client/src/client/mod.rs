//! HTTP client for the orgadmin GraphQL API.

pub mod connection;
pub mod fetcher;

pub use connection::{fetch_connection, ConnectionPage};
pub use fetcher::GraphQlPageFetcher;

use orgadmin_core::pagination::Variables;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Request body of a GraphQL operation.
#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: &'a Variables,
}

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

/// Response envelope of a GraphQL operation.
#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlErrorMessage>>,
}

/// HTTP client for a GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl GraphQlClient {
    /// Create a new client for the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            token: None,
        }
    }

    /// Create a client from configuration, applying its timeout and token.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            client,
            endpoint: config.graphql_url.clone(),
            token: config.token.clone(),
        })
    }

    /// Create from environment (see [`ClientConfig::from_env`]).
    pub fn from_env() -> Result<Self> {
        Self::from_config(&ClientConfig::from_env())
    }

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute a query and return its `data` member.
    ///
    /// A non-empty `errors` array fails the call even when partial data is
    /// present. A response without `data` yields `Value::Null`.
    pub async fn execute(&self, query: &str, variables: &Variables) -> Result<Value> {
        tracing::info!(endpoint = %self.endpoint, "executing GraphQL query");

        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&GraphQlRequest { query, variables });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let body: GraphQlResponse = self.handle_response(response).await?;

        match body.errors {
            Some(errors) if !errors.is_empty() => {
                let message = errors
                    .into_iter()
                    .map(|error| error.message)
                    .collect::<Vec<_>>()
                    .join("; ");
                tracing::info!(endpoint = %self.endpoint, %message, "GraphQL query returned errors");
                Err(ClientError::GraphQl(message))
            }
            _ => Ok(body.data.unwrap_or(Value::Null)),
        }
    }

    /// Handle error responses.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(ClientError::from)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }
}
