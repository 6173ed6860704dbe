//! Connector handle projection.
//!
//! Handles are a pure projection of node state: four fixed anchors on
//! the node footprint (top and left accept connections, bottom and
//! right originate them). They are recomputed from the owning node's
//! position on every query and never cached, so a node move can never
//! leave a stale anchor behind.

use crate::config::CanvasConfig;
use cobalt_loom_core::NodeId;
use cobalt_loom_graph::{Node, Position, Workflow};
use serde::{Deserialize, Serialize};

/// The direction of a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleKind {
    /// Accepts incoming connections.
    Input,
    /// Originates outgoing connections.
    Output,
}

/// Which edge of the node footprint a handle sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl HandleSide {
    /// Returns the canonical lowercase name of this side.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Returns the handle direction for this side.
    ///
    /// Top and left accept; bottom and right originate.
    #[must_use]
    pub const fn kind(&self) -> HandleKind {
        match self {
            Self::Top | Self::Left => HandleKind::Input,
            Self::Bottom | Self::Right => HandleKind::Output,
        }
    }

    /// All four sides, in projection order.
    pub const ALL: [HandleSide; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];
}

/// A connector anchor on a node's boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Handle {
    /// Identifier of the form `<node_id>:<side>`.
    pub id: String,
    /// The node this handle belongs to.
    pub node_id: NodeId,
    /// Whether the handle accepts or originates connections.
    pub kind: HandleKind,
    /// Anchor position in canvas space.
    pub position: Position,
}

/// Projects the handle on one side of a node.
#[must_use]
pub fn handle_on_side(node: &Node, side: HandleSide, config: &CanvasConfig) -> Handle {
    let half_width = config.node_width / 2.0;
    let half_height = config.node_height / 2.0;
    let center = node.position;

    let position = match side {
        HandleSide::Top => center.offset_by(0.0, -half_height),
        HandleSide::Bottom => center.offset_by(0.0, half_height),
        HandleSide::Left => center.offset_by(-half_width, 0.0),
        HandleSide::Right => center.offset_by(half_width, 0.0),
    };

    Handle {
        id: format!("{}:{}", node.id, side.as_str()),
        node_id: node.id,
        kind: side.kind(),
        position,
    }
}

/// Projects all four handles of a node.
#[must_use]
pub fn node_handles(node: &Node, config: &CanvasConfig) -> [Handle; 4] {
    HandleSide::ALL.map(|side| handle_on_side(node, side, config))
}

/// Projects the handles of every node in a workflow, in node insertion
/// order.
#[must_use]
pub fn workflow_handles(workflow: &Workflow, config: &CanvasConfig) -> Vec<Handle> {
    workflow
        .nodes()
        .iter()
        .flat_map(|node| node_handles(node, config))
        .collect()
}

/// Finds a handle by id in a projected set.
#[must_use]
pub fn find_handle<'a>(handles: &'a [Handle], id: &str) -> Option<&'a Handle> {
    handles.iter().find(|handle| handle.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cobalt_loom_graph::NodeKind;

    fn node_at(x: f64, y: f64) -> Node {
        Node::new(NodeKind::Agent, "Agent", Position::new(x, y))
    }

    #[test]
    fn four_handles_with_fixed_offsets() {
        let config = CanvasConfig::default();
        let node = node_at(200.0, 100.0);
        let handles = node_handles(&node, &config);

        assert_eq!(handles[0].position, Position::new(200.0, 70.0)); // top
        assert_eq!(handles[1].position, Position::new(200.0, 130.0)); // bottom
        assert_eq!(handles[2].position, Position::new(120.0, 100.0)); // left
        assert_eq!(handles[3].position, Position::new(280.0, 100.0)); // right
    }

    #[test]
    fn top_and_left_accept_bottom_and_right_originate() {
        let config = CanvasConfig::default();
        let node = node_at(0.0, 0.0);
        let handles = node_handles(&node, &config);

        assert_eq!(handles[0].kind, HandleKind::Input);
        assert_eq!(handles[1].kind, HandleKind::Output);
        assert_eq!(handles[2].kind, HandleKind::Input);
        assert_eq!(handles[3].kind, HandleKind::Output);
    }

    #[test]
    fn handles_track_node_moves() {
        let config = CanvasConfig::default();
        let mut node = node_at(200.0, 100.0);
        let before = handle_on_side(&node, HandleSide::Right, &config);

        node.position = Position::new(500.0, 400.0);
        let after = handle_on_side(&node, HandleSide::Right, &config);

        assert_eq!(before.position, Position::new(280.0, 100.0));
        assert_eq!(after.position, Position::new(580.0, 400.0));
        assert_eq!(before.id, after.id);
    }

    #[test]
    fn handle_ids_name_node_and_side() {
        let config = CanvasConfig::default();
        let node = node_at(0.0, 0.0);
        let handle = handle_on_side(&node, HandleSide::Left, &config);

        assert_eq!(handle.id, format!("{}:left", node.id));
        let handles = node_handles(&node, &config);
        assert_eq!(find_handle(&handles, &handle.id), Some(&handle));
    }
}
