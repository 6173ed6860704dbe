//! Error types for the graph crate.
//!
//! Errors are designed for layered context using rootcause: they carry
//! only information available at the graph layer. Workflow-management
//! context (which editor, which user action) is added by callers via
//! `.context()` as errors propagate.

use crate::workflow::WorkflowStatus;
use cobalt_loom_core::{ConnectionId, NodeId};
use std::fmt;

/// Errors from workflow aggregate operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Node with the given ID was not found in the workflow.
    NodeNotFound { node_id: NodeId },
    /// A node with the given ID is already present.
    DuplicateNode { node_id: NodeId },
    /// Connection endpoints refer to the same node.
    SelfLoop { node_id: NodeId },
    /// A connection with the same ordered endpoint pair already exists.
    DuplicateConnection { source_id: NodeId, target_id: NodeId },
    /// Connection with the given ID was not found.
    ConnectionNotFound { connection_id: ConnectionId },
    /// The requested status change is not a legal lifecycle transition.
    InvalidStatusTransition {
        from: WorkflowStatus,
        to: WorkflowStatus,
    },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeNotFound { node_id } => {
                write!(f, "node not found: {node_id}")
            }
            Self::DuplicateNode { node_id } => {
                write!(f, "node already present: {node_id}")
            }
            Self::SelfLoop { node_id } => {
                write!(f, "connection cannot loop back onto node {node_id}")
            }
            Self::DuplicateConnection {
                source_id,
                target_id,
            } => {
                write!(f, "connection already exists: {source_id} -> {target_id}")
            }
            Self::ConnectionNotFound { connection_id } => {
                write!(f, "connection not found: {connection_id}")
            }
            Self::InvalidStatusTransition { from, to } => {
                write!(f, "invalid status transition from {from} to {to}")
            }
        }
    }
}

impl std::error::Error for GraphError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_not_found_display() {
        let node_id = NodeId::new();
        let err = GraphError::NodeNotFound { node_id };
        assert!(err.to_string().contains("node not found"));
        assert!(err.to_string().contains("node_"));
    }

    #[test]
    fn duplicate_connection_display_names_both_endpoints() {
        let source_id = NodeId::new();
        let target_id = NodeId::new();
        let err = GraphError::DuplicateConnection {
            source_id,
            target_id,
        };
        let text = err.to_string();
        assert!(text.contains(&source_id.to_string()));
        assert!(text.contains(&target_id.to_string()));
    }

    #[test]
    fn invalid_transition_display() {
        let err = GraphError::InvalidStatusTransition {
            from: WorkflowStatus::Active,
            to: WorkflowStatus::Active,
        };
        assert!(err.to_string().contains("invalid status transition"));
    }
}
