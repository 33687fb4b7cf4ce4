//! Walking a connection for the `connection list` command.

use orgadmin_core::pagination::{CursorPaginationManager, PageInfo, PaginationOptions};
use serde::Serialize;
use serde_json::Value;

use super::GraphQlPageFetcher;
use crate::error::{ClientError, Result};

/// Nodes collected from a connection plus the last page info.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionPage {
    pub items: Vec<Value>,
    pub page_info: Option<PageInfo>,
}

/// Fetches the first page, or every page when `all` is set.
pub async fn fetch_connection(
    fetcher: GraphQlPageFetcher,
    options: PaginationOptions,
    all: bool,
) -> Result<ConnectionPage> {
    let manager = CursorPaginationManager::<Value>::mount(fetcher, options).await;

    while all && manager.snapshot().has_next_page() && manager.error().is_none() {
        let before = manager.page_info();
        manager.handle_load_more().await;
        if manager.page_info() == before {
            // Server returned the same cursor; stop instead of looping.
            break;
        }
    }

    let state = manager.snapshot();
    if let Some(error) = state.error {
        return Err(ClientError::Pagination(error));
    }

    tracing::info!(
        items = state.items.len(),
        has_next_page = state.has_next_page(),
        "connection fetched"
    );

    Ok(ConnectionPage {
        items: state.items,
        page_info: state.page_info,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{test_server, GraphQlClient};

    const QUERY: &str = "query($orgId: ID!, $first: Int, $after: String) { organization(id: $orgId) { members(first: $first, after: $after) { edges { node { id } } pageInfo { hasNextPage endCursor } } } }";

    async fn fetcher() -> GraphQlPageFetcher {
        let url = test_server::spawn(test_server::members_app()).await;
        GraphQlPageFetcher::new(GraphQlClient::new(url), QUERY)
    }

    fn options() -> PaginationOptions {
        PaginationOptions::new("organization.members")
            .with_page_size(2)
            .with_variable("orgId", "org1")
    }

    #[tokio::test]
    async fn test_first_page_only() {
        let page = fetch_connection(fetcher().await, options(), false).await.unwrap();

        assert_eq!(page.items.len(), 2);
        let page_info = page.page_info.unwrap();
        assert!(page_info.has_next_page);
        assert_eq!(page_info.end_cursor.as_deref(), Some("cursor2"));
    }

    #[tokio::test]
    async fn test_all_pages() {
        let page = fetch_connection(fetcher().await, options(), true).await.unwrap();

        let ids: Vec<&str> = page
            .items
            .iter()
            .filter_map(|item| item["id"].as_str())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
        assert!(!page.page_info.unwrap().has_next_page);
    }

    #[tokio::test]
    async fn test_failure_is_reported() {
        let url = test_server::spawn(test_server::unavailable_app()).await;
        let fetcher = GraphQlPageFetcher::new(GraphQlClient::new(url), QUERY);

        let error = fetch_connection(fetcher, options(), true).await.unwrap_err();

        assert!(matches!(error, ClientError::Pagination(_)));
        assert!(error.to_string().contains("503"));
    }

    #[test]
    fn test_page_serializes_camel_case() {
        let page = ConnectionPage {
            items: vec![],
            page_info: Some(PageInfo::default()),
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["pageInfo"]["hasNextPage"], false);
    }
}
