//! Workflow graph model for the cobalt-loom platform.
//!
//! This crate provides the in-memory workflow aggregate that the canvas
//! editor mutates:
//!
//! - **Workflow**: the aggregate of nodes, connections, and lifecycle status
//! - **Node Types**: Agent, Trigger, Action, Condition with per-node config
//! - **Connections**: directed edges with cached render paths
//! - **Topology**: a petgraph-backed derived view for traversal queries
//!
//! The aggregate enforces its own invariants (unique node ids, valid
//! connection endpoints, no self-loops, no duplicate ordered pairs) at
//! every mutation; cycles are permitted.

pub mod connection;
pub mod error;
pub mod node;
pub mod position;
pub mod topology;
pub mod workflow;

pub use connection::Connection;
pub use error::GraphError;
pub use node::{Node, NodeData, NodeKind};
pub use position::Position;
pub use topology::Topology;
pub use workflow::{Workflow, WorkflowStatus, WorkflowSummary};
