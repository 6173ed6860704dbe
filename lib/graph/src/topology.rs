//! Derived topology view over a workflow.
//!
//! The workflow aggregate stores nodes as an ordered sequence; traversal
//! questions (entry points, downstream fan-out) are answered by this
//! petgraph-backed view instead. The view is rebuilt from the aggregate
//! on demand and holds only ids, so it can never go stale against node
//! content — only against structure, which callers own.

use crate::workflow::Workflow;
use cobalt_loom_core::{ConnectionId, NodeId};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// A read-only directed-graph view of a workflow's structure.
#[derive(Debug, Clone)]
pub struct Topology {
    graph: DiGraph<NodeId, ConnectionId>,
    node_index: HashMap<NodeId, NodeIndex>,
}

impl Topology {
    /// Builds the topology view of a workflow.
    ///
    /// Node iteration order follows the workflow's insertion order, so
    /// query results are deterministic across rebuilds.
    #[must_use]
    pub fn of(workflow: &Workflow) -> Self {
        let mut graph = DiGraph::new();
        let mut node_index = HashMap::new();

        for node in workflow.nodes() {
            let index = graph.add_node(node.id);
            node_index.insert(node.id, index);
        }

        for connection in workflow.connections() {
            let (Some(&source), Some(&target)) = (
                node_index.get(&connection.source_id),
                node_index.get(&connection.target_id),
            ) else {
                continue;
            };
            graph.add_edge(source, target, connection.id);
        }

        Self { graph, node_index }
    }

    /// Returns the number of nodes in the view.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of connections in the view.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns nodes with no incoming connections (entry points).
    #[must_use]
    pub fn entry_nodes(&self) -> Vec<NodeId> {
        self.boundary_nodes(Direction::Incoming)
    }

    /// Returns nodes with no outgoing connections (terminal nodes).
    #[must_use]
    pub fn terminal_nodes(&self) -> Vec<NodeId> {
        self.boundary_nodes(Direction::Outgoing)
    }

    /// Returns the downstream neighbors of a node with the connecting
    /// connection ids.
    #[must_use]
    pub fn successors(&self, node_id: NodeId) -> Vec<(NodeId, ConnectionId)> {
        self.neighbors(node_id, Direction::Outgoing)
    }

    /// Returns the upstream neighbors of a node with the connecting
    /// connection ids.
    #[must_use]
    pub fn predecessors(&self, node_id: NodeId) -> Vec<(NodeId, ConnectionId)> {
        self.neighbors(node_id, Direction::Incoming)
    }

    fn boundary_nodes(&self, direction: Direction) -> Vec<NodeId> {
        self.graph
            .node_indices()
            .filter(|&index| self.graph.edges_directed(index, direction).next().is_none())
            .filter_map(|index| self.graph.node_weight(index).copied())
            .collect()
    }

    fn neighbors(&self, node_id: NodeId, direction: Direction) -> Vec<(NodeId, ConnectionId)> {
        let Some(&index) = self.node_index.get(&node_id) else {
            return Vec::new();
        };

        self.graph
            .edges_directed(index, direction)
            .filter_map(|edge| {
                let other = match direction {
                    Direction::Outgoing => edge.target(),
                    Direction::Incoming => edge.source(),
                };
                let neighbor = self.graph.node_weight(other)?;
                Some((*neighbor, *edge.weight()))
            })
            .collect()
    }
}
