use std::{env, time::Duration};

use orgadmin_core::pagination::DEFAULT_PAGE_SIZE;

/// Default GraphQL endpoint.
pub const DEFAULT_GRAPHQL_URL: &str = "http://localhost:4000/graphql";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// GraphQL endpoint (default: "http://localhost:4000/graphql")
    pub graphql_url: String,
    /// Bearer token sent with every request
    pub token: Option<String>,
    /// Items requested per page (default: 10)
    pub page_size: u32,
    /// Request timeout in seconds (default: 30)
    pub timeout_seconds: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ORGADMIN_GRAPHQL_URL` - GraphQL endpoint (default: "http://localhost:4000/graphql")
    /// - `ORGADMIN_TOKEN` - Bearer token (default: none)
    /// - `ORGADMIN_PAGE_SIZE` - Items per page (default: 10)
    /// - `ORGADMIN_TIMEOUT_SECONDS` - Request timeout (default: 30)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            graphql_url: lookup("ORGADMIN_GRAPHQL_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_GRAPHQL_URL.to_string()),
            token: lookup("ORGADMIN_TOKEN").filter(|v| !v.trim().is_empty()),
            page_size: lookup("ORGADMIN_PAGE_SIZE")
                .and_then(|v| v.parse().ok())
                .filter(|size| *size > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            timeout_seconds: lookup("ORGADMIN_TIMEOUT_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = ClientConfig::from_lookup(lookup(&[]));

        assert_eq!(config.graphql_url, "http://localhost:4000/graphql");
        assert_eq!(config.token, None);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_values_from_variables() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("ORGADMIN_GRAPHQL_URL", "https://api.example.org/graphql"),
            ("ORGADMIN_TOKEN", "secret"),
            ("ORGADMIN_PAGE_SIZE", "50"),
            ("ORGADMIN_TIMEOUT_SECONDS", "5"),
        ]));

        assert_eq!(config.graphql_url, "https://api.example.org/graphql");
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.page_size, 50);
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_values_fall_back_to_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("ORGADMIN_TOKEN", "  "),
            ("ORGADMIN_PAGE_SIZE", "0"),
            ("ORGADMIN_TIMEOUT_SECONDS", "soon"),
        ]));

        assert_eq!(config.token, None);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.timeout_seconds, 30);
    }
}
