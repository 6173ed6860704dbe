//! Error types for the canvas crate.
//!
//! Errors are designed for layered context using rootcause: the editor
//! reports what went wrong at the canvas layer and wraps graph-layer
//! failures verbatim. Host shells add presentation context via
//! `.context()`.

use cobalt_loom_core::{ConnectionId, NodeId, WorkflowId};
use cobalt_loom_graph::{GraphError, NodeKind};
use std::fmt;

/// Errors from canvas editor operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    /// The operation needs a selected workflow and none is selected.
    NoWorkflowSelected,
    /// No workflow with the given ID exists in the editor.
    WorkflowNotFound { workflow_id: WorkflowId },
    /// The palette has no descriptor for the dropped kind.
    UnknownNodeKind { kind: NodeKind },
    /// Node with the given ID was not found in the selected workflow.
    NodeNotFound { node_id: NodeId },
    /// Connection with the given ID was not found.
    ConnectionNotFound { connection_id: ConnectionId },
    /// The workflow has no nodes to execute.
    EmptyWorkflow { workflow_id: WorkflowId },
    /// An execution is already in flight for this workflow.
    ExecutionInProgress { workflow_id: WorkflowId },
    /// The execution collaborator failed; the workflow was paused.
    ExecutionFailed { workflow_id: WorkflowId, reason: String },
    /// A graph-layer failure.
    Graph { error: GraphError },
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWorkflowSelected => {
                write!(f, "no workflow is selected")
            }
            Self::WorkflowNotFound { workflow_id } => {
                write!(f, "workflow not found: {workflow_id}")
            }
            Self::UnknownNodeKind { kind } => {
                write!(f, "palette has no descriptor for node kind '{kind}'")
            }
            Self::NodeNotFound { node_id } => {
                write!(f, "node not found: {node_id}")
            }
            Self::ConnectionNotFound { connection_id } => {
                write!(f, "connection not found: {connection_id}")
            }
            Self::EmptyWorkflow { workflow_id } => {
                write!(f, "workflow {workflow_id} has no nodes to execute")
            }
            Self::ExecutionInProgress { workflow_id } => {
                write!(f, "workflow {workflow_id} is already executing")
            }
            Self::ExecutionFailed {
                workflow_id,
                reason,
            } => {
                write!(f, "execution of workflow {workflow_id} failed: {reason}")
            }
            Self::Graph { error } => error.fmt(f),
        }
    }
}

impl std::error::Error for CanvasError {}

impl From<GraphError> for CanvasError {
    fn from(error: GraphError) -> Self {
        Self::Graph { error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_failed_display_carries_reason() {
        let workflow_id = WorkflowId::new();
        let err = CanvasError::ExecutionFailed {
            workflow_id,
            reason: "coordinator unreachable".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains(&workflow_id.to_string()));
        assert!(text.contains("coordinator unreachable"));
    }

    #[test]
    fn graph_errors_pass_through_display() {
        let node_id = NodeId::new();
        let err = CanvasError::from(GraphError::NodeNotFound { node_id });
        assert!(err.to_string().contains("node not found"));
    }
}
