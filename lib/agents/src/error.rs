//! Error types for the agents crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `ExecutorError`: failures binding or running a workflow's agents
//! - `MessengerError`: failures delivering a single agent message
//!
//! Collaborator implementations add transport context via `.context()`
//! as errors propagate.

use cobalt_loom_core::{AgentId, NodeId};
use std::fmt;

/// Errors from workflow execution collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutorError {
    /// The executor rejected the workflow before starting it.
    WorkflowRejected { reason: String },
    /// An agent could not be bound to a node.
    AgentBindingFailed { node_id: NodeId, reason: String },
    /// The execution backend failed mid-run.
    Backend { reason: String },
}

impl fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WorkflowRejected { reason } => {
                write!(f, "workflow rejected by executor: {reason}")
            }
            Self::AgentBindingFailed { node_id, reason } => {
                write!(f, "failed to bind agent for node {node_id}: {reason}")
            }
            Self::Backend { reason } => {
                write!(f, "execution backend failed: {reason}")
            }
        }
    }
}

impl std::error::Error for ExecutorError {}

/// Errors from agent messaging collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessengerError {
    /// The agent is not reachable (unbound, stopped, or expired).
    AgentUnavailable { agent_id: AgentId },
    /// The messaging backend failed to deliver.
    DeliveryFailed { agent_id: AgentId, reason: String },
}

impl fmt::Display for MessengerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AgentUnavailable { agent_id } => {
                write!(f, "agent unavailable: {agent_id}")
            }
            Self::DeliveryFailed { agent_id, reason } => {
                write!(f, "failed to deliver message to agent {agent_id}: {reason}")
            }
        }
    }
}

impl std::error::Error for MessengerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn executor_error_display() {
        let err = ExecutorError::WorkflowRejected {
            reason: "no trigger node".to_string(),
        };
        assert!(err.to_string().contains("rejected"));
        assert!(err.to_string().contains("no trigger node"));
    }

    #[test]
    fn binding_error_names_node() {
        let node_id = NodeId::new();
        let err = ExecutorError::AgentBindingFailed {
            node_id,
            reason: "capacity".to_string(),
        };
        assert!(err.to_string().contains(&node_id.to_string()));
    }

    #[test]
    fn messenger_error_display() {
        let agent_id = AgentId::new();
        let err = MessengerError::AgentUnavailable { agent_id };
        assert!(err.to_string().contains("agent unavailable"));
    }
}
