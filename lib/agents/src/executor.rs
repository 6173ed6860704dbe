//! Workflow execution collaborator interface.
//!
//! Executing a workflow means handing the whole aggregate to a
//! coordinator backend, which binds (or creates) an agent per runnable
//! node and starts the graph. The canvas editor only consumes the
//! report: which node got which agent, and what the agent first said.

use crate::error::ExecutorError;
use async_trait::async_trait;
use cobalt_loom_core::{AgentId, NodeId, Result};
use cobalt_loom_graph::Workflow;
use serde::{Deserialize, Serialize};

/// One node's activation in an execution report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeActivation {
    /// The workflow node that was activated.
    pub node_id: NodeId,
    /// The agent bound to the node.
    pub agent_id: AgentId,
    /// The agent's initial response.
    pub response: String,
}

impl NodeActivation {
    /// Creates a new activation record.
    #[must_use]
    pub fn new(node_id: NodeId, agent_id: AgentId, response: impl Into<String>) -> Self {
        Self {
            node_id,
            agent_id,
            response: response.into(),
        }
    }
}

/// The outcome of a coordinator workflow execution.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Whether the coordinator accepted and started the workflow.
    pub success: bool,
    /// Per-node activations; empty on failure.
    pub results: Vec<NodeActivation>,
}

impl ExecutionReport {
    /// Creates a successful report with the given activations.
    #[must_use]
    pub fn succeeded(results: Vec<NodeActivation>) -> Self {
        Self {
            success: true,
            results,
        }
    }

    /// Creates a failed report with no activations.
    #[must_use]
    pub fn failed() -> Self {
        Self {
            success: false,
            results: Vec::new(),
        }
    }
}

/// A collaborator that binds agents to workflow nodes and runs the graph.
#[async_trait]
pub trait WorkflowExecutor: Send + Sync {
    /// Executes the workflow through the coordinator backend.
    ///
    /// A report with `success == false` and a returned error are both
    /// failures from the editor's point of view; implementations should
    /// prefer the error path when they have a reason to convey.
    async fn execute_coordinator_workflow(
        &self,
        workflow: &Workflow,
    ) -> Result<ExecutionReport, ExecutorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn succeeded_report_carries_results() {
        let activation = NodeActivation::new(NodeId::new(), AgentId::new(), "ready");
        let report = ExecutionReport::succeeded(vec![activation.clone()]);

        assert!(report.success);
        assert_eq!(report.results, vec![activation]);
    }

    #[test]
    fn failed_report_is_empty() {
        let report = ExecutionReport::failed();
        assert!(!report.success);
        assert!(report.results.is_empty());
    }

    #[test]
    fn report_serde_roundtrip() {
        let report = ExecutionReport::succeeded(vec![NodeActivation::new(
            NodeId::new(),
            AgentId::new(),
            "online",
        )]);
        let json = serde_json::to_string(&report).expect("serialize");
        let parsed: ExecutionReport = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(report, parsed);
    }
}
