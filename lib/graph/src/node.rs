//! Workflow node types.
//!
//! Nodes are the building blocks of a workflow. Each node has:
//! - A unique ID within the workflow
//! - A kind (Agent, Trigger, Action, Condition)
//! - A canvas position (center-anchored)
//! - Display data and a free-form config map
//!
//! Config carries both per-kind settings filled in by the configuration
//! panel and runtime status keys (`agentId`, `status`, `lastResponse`)
//! written back after an execution starts.

use crate::position::Position;
use cobalt_loom_core::NodeId;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// The kind of a workflow node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// An AI agent that processes inbound payloads.
    Agent,
    /// An entry point that initiates workflow execution.
    Trigger,
    /// A terminal or side-effecting step.
    Action,
    /// A branching decision point.
    Condition,
}

impl NodeKind {
    /// Returns the canonical lowercase name of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::Trigger => "trigger",
            Self::Action => "action",
            Self::Condition => "condition",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display data and configuration for a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    /// Human-readable label shown on the canvas.
    pub label: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Per-kind settings and runtime status keys.
    pub config: HashMap<String, JsonValue>,
}

impl NodeData {
    /// Creates node data with the given label and an empty config.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: None,
            config: HashMap::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Shallow-merges a patch into the config.
    ///
    /// Later keys overwrite existing ones; nested structures are replaced
    /// wholesale, never merged recursively. Callers composing partial
    /// updates must include previously set keys themselves.
    pub fn merge_config(&mut self, patch: HashMap<String, JsonValue>) {
        self.config.extend(patch);
    }
}

/// A workflow node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node within the workflow.
    pub id: NodeId,
    /// The node kind.
    pub kind: NodeKind,
    /// Canvas position of the node's center.
    pub position: Position,
    /// Display data and config.
    pub data: NodeData,
}

impl Node {
    /// Creates a new node of the given kind at a position.
    #[must_use]
    pub fn new(kind: NodeKind, label: impl Into<String>, position: Position) -> Self {
        Self {
            id: NodeId::new(),
            kind,
            position,
            data: NodeData::new(label),
        }
    }

    /// Creates a node with a specific ID.
    #[must_use]
    pub fn with_id(
        id: NodeId,
        kind: NodeKind,
        label: impl Into<String>,
        position: Position,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            data: NodeData::new(label),
        }
    }

    /// Returns the config value for a key, if set.
    #[must_use]
    pub fn config_value(&self, key: &str) -> Option<&JsonValue> {
        self.data.config.get(key)
    }
}
