//! The workflow aggregate.
//!
//! A workflow owns its nodes and connections and is the single place
//! where the graph invariants are enforced:
//!
//! - node ids are unique
//! - every connection's endpoints reference nodes present in the workflow
//! - connections never loop a node back onto itself
//! - no two connections share the same ordered `(source, target)` pair
//!
//! Nodes are kept in insertion order for deterministic iteration and
//! rendering; an id -> index map is maintained alongside for O(1) lookup.
//! Cycles across multiple nodes are permitted by design.

use crate::connection::Connection;
use crate::error::GraphError;
use crate::node::Node;
use crate::position::Position;
use chrono::{DateTime, Utc};
use cobalt_loom_core::{ConnectionId, NodeId, WorkflowId};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Lifecycle status of a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    /// Being composed; never executed, or reset.
    #[default]
    Draft,
    /// An execution is in flight.
    Active,
    /// Execution was stopped or failed.
    Paused,
}

impl WorkflowStatus {
    /// Returns true if a new execution may start from this status.
    #[must_use]
    pub fn can_execute(&self) -> bool {
        !self.is_active()
    }

    /// Returns true if an execution is in flight.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Paused => "paused",
        };
        f.write_str(name)
    }
}

/// A workflow: nodes, connections, and lifecycle status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    /// Unique identifier for this workflow.
    pub id: WorkflowId,
    /// Human-readable name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Nodes in insertion order.
    nodes: Vec<Node>,
    /// Map from node id to index in `nodes` for O(1) lookup.
    #[serde(skip)]
    node_index: HashMap<NodeId, usize>,
    /// Connections between nodes.
    connections: Vec<Connection>,
    /// Lifecycle status.
    status: WorkflowStatus,
    /// When this workflow was created.
    pub created_at: DateTime<Utc>,
    /// When this workflow was last mutated.
    pub updated_at: DateTime<Utc>,
}

impl Workflow {
    /// Creates a new empty workflow in draft status.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(WorkflowId::new(), name)
    }

    /// Creates a workflow with a specific ID.
    #[must_use]
    pub fn with_id(id: WorkflowId, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            description: None,
            nodes: Vec::new(),
            node_index: HashMap::new(),
            connections: Vec::new(),
            status: WorkflowStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the current lifecycle status.
    #[must_use]
    pub fn status(&self) -> WorkflowStatus {
        self.status
    }

    /// Returns the nodes in insertion order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the connections in creation order.
    #[must_use]
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the workflow has at least one node.
    #[must_use]
    pub fn has_nodes(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// Returns a node by id.
    #[must_use]
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        let index = self.node_index.get(&node_id)?;
        self.nodes.get(*index)
    }

    /// Returns a connection by id.
    #[must_use]
    pub fn connection(&self, connection_id: ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == connection_id)
    }

    /// Appends a node to the workflow.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateNode` if a node with the same id is already
    /// present.
    pub fn add_node(&mut self, node: Node) -> Result<NodeId, GraphError> {
        let node_id = node.id;
        if self.node_index.contains_key(&node_id) {
            return Err(GraphError::DuplicateNode { node_id });
        }
        self.node_index.insert(node_id, self.nodes.len());
        self.nodes.push(node);
        self.touch();
        Ok(node_id)
    }

    /// Removes a node and every connection attached to it.
    ///
    /// Returns the removed node, or None if it was not present. Cascading
    /// the attached connections keeps the endpoint invariant intact.
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        let index = self.node_index.remove(&node_id)?;
        let node = self.nodes.remove(index);
        self.connections.retain(|c| !c.involves_node(node_id));
        self.reindex_nodes();
        self.touch();
        Some(node)
    }

    /// Moves a node to a new canvas position.
    ///
    /// Cached connection paths touching this node are stale afterward;
    /// callers must re-derive them.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the node is not present.
    pub fn move_node(&mut self, node_id: NodeId, position: Position) -> Result<(), GraphError> {
        let node = self.node_entry_mut(node_id)?;
        node.position = position;
        self.touch();
        Ok(())
    }

    /// Shallow-merges a patch into a node's config.
    ///
    /// Later keys overwrite; nested values are replaced wholesale.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the node is not present.
    pub fn update_node_config(
        &mut self,
        node_id: NodeId,
        patch: HashMap<String, JsonValue>,
    ) -> Result<(), GraphError> {
        let node = self.node_entry_mut(node_id)?;
        node.data.merge_config(patch);
        self.touch();
        Ok(())
    }

    /// Adds a connection between two existing nodes.
    ///
    /// # Errors
    ///
    /// Returns an error if either endpoint is missing, the endpoints are
    /// the same node, or a connection with the same ordered endpoint
    /// pair already exists.
    pub fn connect(&mut self, connection: Connection) -> Result<ConnectionId, GraphError> {
        let (source_id, target_id) = connection.endpoints();
        if !self.node_index.contains_key(&source_id) {
            return Err(GraphError::NodeNotFound { node_id: source_id });
        }
        if !self.node_index.contains_key(&target_id) {
            return Err(GraphError::NodeNotFound { node_id: target_id });
        }
        if source_id == target_id {
            return Err(GraphError::SelfLoop { node_id: source_id });
        }
        if self
            .connections
            .iter()
            .any(|c| c.source_id == source_id && c.target_id == target_id)
        {
            return Err(GraphError::DuplicateConnection {
                source_id,
                target_id,
            });
        }

        let connection_id = connection.id;
        self.connections.push(connection);
        self.touch();
        Ok(connection_id)
    }

    /// Removes a connection by id.
    ///
    /// Returns the removed connection, or None if it was not present.
    pub fn remove_connection(&mut self, connection_id: ConnectionId) -> Option<Connection> {
        let index = self
            .connections
            .iter()
            .position(|c| c.id == connection_id)?;
        let connection = self.connections.remove(index);
        self.touch();
        Some(connection)
    }

    /// Replaces the cached render path of a connection.
    ///
    /// Does not bump `updated_at`: the path is derived state, not content.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionNotFound` if the connection is not present.
    pub fn set_connection_path(
        &mut self,
        connection_id: ConnectionId,
        path: impl Into<String>,
    ) -> Result<(), GraphError> {
        let connection = self
            .connections
            .iter_mut()
            .find(|c| c.id == connection_id)
            .ok_or(GraphError::ConnectionNotFound { connection_id })?;
        connection.path = path.into();
        Ok(())
    }

    /// Transitions the workflow into active status.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStatusTransition` if an execution is already in
    /// flight.
    pub fn activate(&mut self) -> Result<(), GraphError> {
        if self.status.is_active() {
            return Err(GraphError::InvalidStatusTransition {
                from: self.status,
                to: WorkflowStatus::Active,
            });
        }
        self.status = WorkflowStatus::Active;
        self.touch();
        Ok(())
    }

    /// Transitions the workflow into paused status.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStatusTransition` unless the workflow is active.
    pub fn pause(&mut self) -> Result<(), GraphError> {
        if !self.status.is_active() {
            return Err(GraphError::InvalidStatusTransition {
                from: self.status,
                to: WorkflowStatus::Paused,
            });
        }
        self.status = WorkflowStatus::Paused;
        self.touch();
        Ok(())
    }

    /// Bumps the `updated_at` timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Rebuilds the node index map after deserialization.
    pub fn rebuild_node_index(&mut self) {
        self.reindex_nodes();
    }

    fn reindex_nodes(&mut self) {
        self.node_index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (node.id, index))
            .collect();
    }

    fn node_entry_mut(&mut self, node_id: NodeId) -> Result<&mut Node, GraphError> {
        let index = *self
            .node_index
            .get(&node_id)
            .ok_or(GraphError::NodeNotFound { node_id })?;
        self.nodes
            .get_mut(index)
            .ok_or(GraphError::NodeNotFound { node_id })
    }
}

/// Summary information about a workflow (for listings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSummary {
    /// Workflow ID.
    pub id: WorkflowId,
    /// Workflow name.
    pub name: String,
    /// Description, if any.
    pub description: Option<String>,
    /// Current status.
    pub status: WorkflowStatus,
    /// Number of nodes in the graph.
    pub node_count: usize,
    /// Number of connections in the graph.
    pub connection_count: usize,
    /// Last updated timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Workflow> for WorkflowSummary {
    fn from(workflow: &Workflow) -> Self {
        Self {
            id: workflow.id,
            name: workflow.name.clone(),
            description: workflow.description.clone(),
            status: workflow.status(),
            node_count: workflow.node_count(),
            connection_count: workflow.connections().len(),
            updated_at: workflow.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;
    use serde_json::json;

    fn node_at(kind: NodeKind, x: f64, y: f64) -> Node {
        Node::new(kind, kind.as_str(), Position::new(x, y))
    }

    #[test]
    fn add_node_preserves_insertion_order() {
        let mut workflow = Workflow::new("Pipeline");
        let first = workflow
            .add_node(node_at(NodeKind::Trigger, 100.0, 100.0))
            .expect("add");
        let second = workflow
            .add_node(node_at(NodeKind::Agent, 300.0, 100.0))
            .expect("add");

        let order: Vec<_> = workflow.nodes().iter().map(|n| n.id).collect();
        assert_eq!(order, vec![first, second]);
    }

    #[test]
    fn add_node_rejects_duplicate_id() {
        let mut workflow = Workflow::new("Pipeline");
        let node = node_at(NodeKind::Agent, 100.0, 100.0);
        let copy = node.clone();
        workflow.add_node(node).expect("add");

        let err = workflow.add_node(copy).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateNode { .. }));
    }

    #[test]
    fn connect_rejects_missing_endpoint() {
        let mut workflow = Workflow::new("Pipeline");
        let present = workflow
            .add_node(node_at(NodeKind::Trigger, 100.0, 100.0))
            .expect("add");
        let absent = NodeId::new();

        let err = workflow.connect(Connection::new(present, absent)).unwrap_err();
        assert_eq!(err, GraphError::NodeNotFound { node_id: absent });
    }

    #[test]
    fn connect_rejects_self_loop() {
        let mut workflow = Workflow::new("Pipeline");
        let node_id = workflow
            .add_node(node_at(NodeKind::Agent, 100.0, 100.0))
            .expect("add");

        let err = workflow.connect(Connection::new(node_id, node_id)).unwrap_err();
        assert_eq!(err, GraphError::SelfLoop { node_id });
    }

    #[test]
    fn connect_rejects_duplicate_ordered_pair() {
        let mut workflow = Workflow::new("Pipeline");
        let a = workflow
            .add_node(node_at(NodeKind::Trigger, 100.0, 100.0))
            .expect("add");
        let b = workflow
            .add_node(node_at(NodeKind::Agent, 300.0, 100.0))
            .expect("add");

        workflow.connect(Connection::new(a, b)).expect("first connect");
        let err = workflow.connect(Connection::new(a, b)).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateConnection { .. }));

        // The reverse direction is a different ordered pair.
        workflow.connect(Connection::new(b, a)).expect("reverse connect");
        assert_eq!(workflow.connections().len(), 2);
    }

    #[test]
    fn remove_node_cascades_attached_connections() {
        let mut workflow = Workflow::new("Pipeline");
        let a = workflow
            .add_node(node_at(NodeKind::Trigger, 100.0, 100.0))
            .expect("add");
        let b = workflow
            .add_node(node_at(NodeKind::Agent, 300.0, 100.0))
            .expect("add");
        let c = workflow
            .add_node(node_at(NodeKind::Action, 500.0, 100.0))
            .expect("add");
        workflow.connect(Connection::new(a, b)).expect("connect");
        workflow.connect(Connection::new(b, c)).expect("connect");

        workflow.remove_node(b);

        assert_eq!(workflow.node_count(), 2);
        assert!(workflow.connections().is_empty());
        assert!(workflow.node(a).is_some());
        assert!(workflow.node(c).is_some());
    }

    #[test]
    fn node_lookup_survives_removal_reindex() {
        let mut workflow = Workflow::new("Pipeline");
        let a = workflow
            .add_node(node_at(NodeKind::Trigger, 100.0, 100.0))
            .expect("add");
        let b = workflow
            .add_node(node_at(NodeKind::Agent, 300.0, 100.0))
            .expect("add");

        workflow.remove_node(a);

        let found = workflow.node(b).expect("b still present");
        assert_eq!(found.kind, NodeKind::Agent);
    }

    #[test]
    fn update_node_config_merges_shallowly() {
        let mut workflow = Workflow::new("Pipeline");
        let id = workflow
            .add_node(node_at(NodeKind::Agent, 100.0, 100.0))
            .expect("add");

        workflow
            .update_node_config(
                id,
                HashMap::from([("prompt".to_string(), json!("summarize"))]),
            )
            .expect("patch");
        workflow
            .update_node_config(id, HashMap::from([("prompt".to_string(), json!("triage"))]))
            .expect("patch");

        assert_eq!(
            workflow.node(id).expect("node").config_value("prompt"),
            Some(&json!("triage"))
        );
    }

    #[test]
    fn status_transitions_are_validated() {
        let mut workflow = Workflow::new("Pipeline");
        assert_eq!(workflow.status(), WorkflowStatus::Draft);

        // Draft cannot pause.
        assert!(workflow.pause().is_err());

        workflow.activate().expect("draft -> active");
        assert!(workflow.status().is_active());

        // Active cannot re-activate.
        assert!(workflow.activate().is_err());

        workflow.pause().expect("active -> paused");
        assert_eq!(workflow.status(), WorkflowStatus::Paused);

        // Paused may execute again.
        assert!(workflow.status().can_execute());
        workflow.activate().expect("paused -> active");
    }

    #[test]
    fn connection_endpoints_always_reference_present_nodes() {
        let mut workflow = Workflow::new("Pipeline");
        let a = workflow
            .add_node(node_at(NodeKind::Trigger, 100.0, 100.0))
            .expect("add");
        let b = workflow
            .add_node(node_at(NodeKind::Agent, 300.0, 100.0))
            .expect("add");
        workflow.connect(Connection::new(a, b)).expect("connect");
        workflow.remove_node(a);

        for connection in workflow.connections() {
            assert!(workflow.node(connection.source_id).is_some());
            assert!(workflow.node(connection.target_id).is_some());
            assert_ne!(connection.source_id, connection.target_id);
        }
    }

    #[test]
    fn workflow_serde_roundtrip_rebuilds_index() {
        let mut workflow = Workflow::new("Pipeline").with_description("demo");
        let a = workflow
            .add_node(node_at(NodeKind::Trigger, 100.0, 100.0))
            .expect("add");
        let b = workflow
            .add_node(node_at(NodeKind::Agent, 300.0, 100.0))
            .expect("add");
        workflow.connect(Connection::new(a, b)).expect("connect");

        let json = serde_json::to_string(&workflow).expect("serialize");
        let mut parsed: Workflow = serde_json::from_str(&json).expect("deserialize");
        parsed.rebuild_node_index();

        assert_eq!(parsed.node_count(), 2);
        assert_eq!(parsed.connections().len(), 1);
        assert!(parsed.node(a).is_some());
        assert!(parsed.node(b).is_some());
    }

    #[test]
    fn summary_reflects_counts_and_status() {
        let mut workflow = Workflow::new("Pipeline");
        workflow
            .add_node(node_at(NodeKind::Trigger, 100.0, 100.0))
            .expect("add");

        let summary = WorkflowSummary::from(&workflow);
        assert_eq!(summary.name, "Pipeline");
        assert_eq!(summary.node_count, 1);
        assert_eq!(summary.connection_count, 0);
        assert_eq!(summary.status, WorkflowStatus::Draft);
    }
}
