//! Canvas tuning parameters.
//!
//! Everything the geometry, placement, and connection subsystems need to
//! know about the canvas lives here, so hosts can tune the editor feel
//! without touching the algorithms.

use serde::{Deserialize, Serialize};

/// Node dimensions for layout calculations.
const NODE_WIDTH: f64 = 160.0;
const NODE_HEIGHT: f64 = 60.0;

/// Tunable parameters for the canvas editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Node footprint width used for placement and handle anchors.
    pub node_width: f64,
    /// Node footprint height used for placement and handle anchors.
    pub node_height: f64,
    /// Minimum gap kept between a node edge and the canvas border.
    pub margin: f64,
    /// Pointer distance within which a drag snaps onto a handle.
    pub snap_radius: f64,
    /// Step between placement candidates during the grid scan.
    pub grid_step: f64,
    /// Placement attempts spent on the grid scan before spiraling.
    pub grid_attempts: u32,
    /// Total placement attempts before giving up on a free slot.
    pub max_attempts: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            node_width: NODE_WIDTH,
            node_height: NODE_HEIGHT,
            margin: 20.0,
            snap_radius: 20.0,
            grid_step: 200.0,
            grid_attempts: 20,
            max_attempts: 100,
        }
    }
}

/// The drawable canvas area, anchored at the top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasBounds {
    /// Canvas width in canvas units.
    pub width: f64,
    /// Canvas height in canvas units.
    pub height: f64,
}

impl CanvasBounds {
    /// Creates bounds of the given size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for CanvasBounds {
    fn default() -> Self {
        Self::new(800.0, 500.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_consistent() {
        let config = CanvasConfig::default();
        assert!(config.node_width > 0.0);
        assert!(config.node_height > 0.0);
        assert!(config.grid_attempts < config.max_attempts);
        assert!(config.grid_step > config.node_width);
    }

    #[test]
    fn config_serde_roundtrip() {
        let config = CanvasConfig::default();
        let json = serde_json::to_string(&config).expect("serialize");
        let parsed: CanvasConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(config, parsed);
    }
}
