use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Cursor information returned alongside each page of a connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub has_previous_page: bool,
    #[serde(default)]
    pub start_cursor: Option<String>,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// One entry of a connection: an opaque cursor and the node it points at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<N> {
    #[serde(default)]
    pub cursor: Option<String>,
    pub node: N,
}

/// A GraphQL connection, `{ edges: [{ cursor, node }], pageInfo }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<N> {
    pub edges: Vec<Edge<N>>,
    /// Absent when the query did not select `pageInfo`.
    #[serde(default)]
    pub page_info: Option<PageInfo>,
}

impl<N> Connection<N> {
    /// Consumes the connection, keeping only the nodes in order.
    pub fn into_nodes(self) -> Vec<N> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }
}

/// Returns the `id` of a raw node as a string, if it has one.
///
/// Numeric ids are stringified so `1` and `"1"` compare equal.
pub fn node_id(node: &Value) -> Option<String> {
    match node.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}
