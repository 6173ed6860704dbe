//! Connection (edge) types for workflow graphs.
//!
//! A connection carries flow from one node's output handle to another
//! node's input handle. The curved render path is cached on the
//! connection and must be re-derived by the caller whenever either
//! endpoint node moves.

use cobalt_loom_core::{ConnectionId, NodeId};
use serde::{Deserialize, Serialize};

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Unique identifier for this connection.
    pub id: ConnectionId,
    /// The node the connection originates from.
    pub source_id: NodeId,
    /// The node the connection terminates at.
    pub target_id: NodeId,
    /// Identifier of the source handle, when known.
    pub source_handle: Option<String>,
    /// Identifier of the target handle, when known.
    pub target_handle: Option<String>,
    /// Cached cubic-Bezier render path.
    pub path: String,
}

impl Connection {
    /// Creates a new connection between two nodes with no handle
    /// identifiers and an empty path.
    #[must_use]
    pub fn new(source_id: NodeId, target_id: NodeId) -> Self {
        Self {
            id: ConnectionId::new(),
            source_id,
            target_id,
            source_handle: None,
            target_handle: None,
            path: String::new(),
        }
    }

    /// Sets the source and target handle identifiers.
    #[must_use]
    pub fn with_handles(
        mut self,
        source_handle: impl Into<String>,
        target_handle: impl Into<String>,
    ) -> Self {
        self.source_handle = Some(source_handle.into());
        self.target_handle = Some(target_handle.into());
        self
    }

    /// Sets the cached render path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Returns true if this connection touches the given node.
    #[must_use]
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.source_id == node_id || self.target_id == node_id
    }

    /// Returns the ordered `(source, target)` endpoint pair.
    #[must_use]
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.source_id, self.target_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_handles_and_path() {
        let source = NodeId::new();
        let target = NodeId::new();
        let conn = Connection::new(source, target)
            .with_handles("a:right", "b:left")
            .with_path("M 0 0 C 1 1, 2 2, 3 3");

        assert_eq!(conn.source_handle.as_deref(), Some("a:right"));
        assert_eq!(conn.target_handle.as_deref(), Some("b:left"));
        assert!(conn.path.starts_with("M 0 0"));
    }

    #[test]
    fn involves_node_checks_both_endpoints() {
        let source = NodeId::new();
        let target = NodeId::new();
        let other = NodeId::new();
        let conn = Connection::new(source, target);

        assert!(conn.involves_node(source));
        assert!(conn.involves_node(target));
        assert!(!conn.involves_node(other));
    }

    #[test]
    fn connection_serde_roundtrip() {
        let conn = Connection::new(NodeId::new(), NodeId::new()).with_path("M 1 2 C 3 4, 5 6, 7 8");
        let json = serde_json::to_string(&conn).expect("serialize");
        let parsed: Connection = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(conn, parsed);
    }
}
