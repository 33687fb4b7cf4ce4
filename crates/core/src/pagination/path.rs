//! Locating a connection inside a GraphQL response.

use serde_json::Value;

use super::types::{Connection, Edge, PageInfo};

/// Walks a dot-separated path (`"organization.members"`) through the query
/// data and returns the connection found there.
///
/// Returns `None` when the data is null, a segment is missing or null, or
/// the value at the path has no `edges` array. A missing or unreadable
/// `pageInfo` is not an error; the connection simply has no page info.
pub fn extract_connection(data: &Value, data_path: &str) -> Option<Connection<Value>> {
    let target = data_path
        .split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(data, |current, segment| match current.get(segment) {
            Some(Value::Null) | None => None,
            Some(next) => Some(next),
        })?;

    let edges = target
        .get("edges")?
        .as_array()?
        .iter()
        .map(|edge| Edge {
            cursor: edge
                .get("cursor")
                .and_then(Value::as_str)
                .map(str::to_string),
            node: edge.get("node").cloned().unwrap_or(Value::Null),
        })
        .collect();

    let page_info = target
        .get("pageInfo")
        .filter(|info| !info.is_null())
        .and_then(|info| serde_json::from_value::<PageInfo>(info.clone()).ok());

    Some(Connection { edges, page_info })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page_info() -> Value {
        json!({
            "hasNextPage": false,
            "hasPreviousPage": false,
            "startCursor": "cursor1",
            "endCursor": "cursor1"
        })
    }

    #[test]
    fn test_extracts_single_level_path() {
        let data = json!({
            "users": {
                "edges": [{ "cursor": "cursor1", "node": { "id": "1", "name": "User 1" } }],
                "pageInfo": page_info()
            }
        });

        let connection = extract_connection(&data, "users").unwrap();
        assert_eq!(connection.edges.len(), 1);
        assert_eq!(connection.edges[0].cursor.as_deref(), Some("cursor1"));
        assert!(connection.page_info.is_some());
    }

    #[test]
    fn test_extracts_nested_path() {
        let data = json!({
            "organization": {
                "members": {
                    "edges": [{ "cursor": "cursor1", "node": { "id": "1" } }],
                    "pageInfo": page_info()
                }
            }
        });

        let connection = extract_connection(&data, "organization.members").unwrap();
        assert_eq!(connection.edges.len(), 1);
    }

    #[test]
    fn test_extracts_deep_path() {
        let data = json!({
            "level1": { "level2": { "level3": {
                "edges": [{ "cursor": "cursor1", "node": { "id": "1" } }]
            } } }
        });

        let connection = extract_connection(&data, "level1.level2.level3").unwrap();
        assert_eq!(connection.edges.len(), 1);
    }

    #[test]
    fn test_broken_path_returns_none() {
        let data = json!({ "foo": "bar" });
        assert!(extract_connection(&data, "missing.path").is_none());
    }

    #[test]
    fn test_null_data_returns_none() {
        assert!(extract_connection(&Value::Null, "users").is_none());
    }

    #[test]
    fn test_null_intermediate_segment_returns_none() {
        let data = json!({ "organization": null });
        assert!(extract_connection(&data, "organization.members").is_none());
    }

    #[test]
    fn test_non_connection_target_returns_none() {
        let data = json!({ "users": { "name": "John" } });
        assert!(extract_connection(&data, "users").is_none());
    }

    #[test]
    fn test_missing_page_info_is_allowed() {
        let data = json!({
            "users": { "edges": [{ "cursor": "cursor1", "node": { "id": "1" } }] }
        });

        let connection = extract_connection(&data, "users").unwrap();
        assert_eq!(connection.edges.len(), 1);
        assert!(connection.page_info.is_none());
    }

    #[test]
    fn test_edge_without_node_yields_null() {
        let data = json!({ "users": { "edges": [{ "cursor": "c1" }] } });

        let connection = extract_connection(&data, "users").unwrap();
        assert_eq!(connection.edges[0].node, Value::Null);
    }
}
