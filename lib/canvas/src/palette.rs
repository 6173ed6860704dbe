//! Node palette descriptors.
//!
//! The palette is supplied by the host shell; the editor only resolves
//! a dropped kind to its descriptor. Icons are symbolic names and color
//! tokens are theme keys — both opaque to this crate.

use cobalt_loom_graph::NodeKind;
use serde::{Deserialize, Serialize};

/// Static display metadata for one node kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    /// The node kind this descriptor describes.
    pub kind: NodeKind,
    /// Default label for freshly dropped nodes.
    pub label: String,
    /// Symbolic icon name.
    pub icon: String,
    /// Theme color token.
    pub color_token: String,
}

impl NodeDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub fn new(
        kind: NodeKind,
        label: impl Into<String>,
        icon: impl Into<String>,
        color_token: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            label: label.into(),
            icon: icon.into(),
            color_token: color_token.into(),
        }
    }
}

/// The set of node descriptors available for dropping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePalette {
    descriptors: Vec<NodeDescriptor>,
}

impl NodePalette {
    /// Creates an empty palette.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            descriptors: Vec::new(),
        }
    }

    /// Adds a descriptor, replacing any existing one for the same kind.
    #[must_use]
    pub fn with_descriptor(mut self, descriptor: NodeDescriptor) -> Self {
        self.descriptors.retain(|d| d.kind != descriptor.kind);
        self.descriptors.push(descriptor);
        self
    }

    /// Returns the descriptor for a kind, if the palette carries one.
    #[must_use]
    pub fn descriptor(&self, kind: NodeKind) -> Option<&NodeDescriptor> {
        self.descriptors.iter().find(|d| d.kind == kind)
    }

    /// Returns the descriptors in palette order.
    #[must_use]
    pub fn descriptors(&self) -> &[NodeDescriptor] {
        &self.descriptors
    }
}

impl Default for NodePalette {
    fn default() -> Self {
        Self::empty()
            .with_descriptor(NodeDescriptor::new(
                NodeKind::Trigger,
                "Trigger",
                "zap",
                "node-trigger",
            ))
            .with_descriptor(NodeDescriptor::new(
                NodeKind::Agent,
                "AI Agent",
                "bot",
                "node-agent",
            ))
            .with_descriptor(NodeDescriptor::new(
                NodeKind::Condition,
                "Condition",
                "git-branch",
                "node-condition",
            ))
            .with_descriptor(NodeDescriptor::new(
                NodeKind::Action,
                "Action",
                "play",
                "node-action",
            ))
    }
}
