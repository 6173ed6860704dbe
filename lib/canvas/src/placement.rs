//! Anti-overlap node placement.
//!
//! Dropping a node from the palette asks for a position; this module
//! finds a nearby one that does not sit on top of an existing node.
//! The search is deterministic (identical inputs always produce the
//! same position) and never fails: after the attempt budget runs out,
//! the last candidate is returned even if it still overlaps.

use crate::config::{CanvasBounds, CanvasConfig};
use cobalt_loom_graph::{Node, Position};

/// Radians advanced per spiral step.
const SPIRAL_ANGLE_STEP: f64 = 0.8;
/// Spiral starting radius.
const SPIRAL_BASE_RADIUS: f64 = 100.0;
/// Radius growth per spiral step.
const SPIRAL_RADIUS_STEP: f64 = 30.0;

/// Computes a placement for a node dropped at `requested`.
///
/// The requested position is clamped so the node footprint stays inside
/// the bounds, then searched outward in two phases: a row-major grid
/// scan anchored at the clamped position, followed by a spiral walk.
#[must_use]
pub fn place(
    requested: Position,
    existing: &[Node],
    bounds: &CanvasBounds,
    config: &CanvasConfig,
) -> Position {
    let base = clamp_into_bounds(requested, bounds, config);
    if !overlaps_any(base, existing, config) {
        return base;
    }

    let mut candidate = base;

    // Phase 1: grid scan rightward then downward from the drop point.
    let columns = grid_columns(base, bounds, config);
    for attempt in 0..config.grid_attempts {
        let column = f64::from(attempt % columns);
        let row = f64::from(attempt / columns);
        candidate = clamp_into_bounds(
            base.offset_by(column * config.grid_step, row * config.grid_step),
            bounds,
            config,
        );
        if !overlaps_any(candidate, existing, config) {
            return candidate;
        }
    }

    // Phase 2: spiral outward from the drop point.
    for step in 0..config.max_attempts.saturating_sub(config.grid_attempts) {
        let angle = f64::from(step) * SPIRAL_ANGLE_STEP;
        let radius = SPIRAL_BASE_RADIUS + f64::from(step) * SPIRAL_RADIUS_STEP;
        candidate = clamp_into_bounds(
            base.offset_by(angle.cos() * radius, angle.sin() * radius),
            bounds,
            config,
        );
        if !overlaps_any(candidate, existing, config) {
            return candidate;
        }
    }

    // Budget exhausted: an overlapping slot beats no slot at all.
    candidate
}

/// Returns true if a node centered at `candidate` would crowd any
/// existing node.
///
/// The test is box exclusion on full footprint extents rather than true
/// intersection, which keeps a visible gap between neighbors.
#[must_use]
pub fn overlaps_any(candidate: Position, existing: &[Node], config: &CanvasConfig) -> bool {
    existing.iter().any(|node| {
        (candidate.x - node.position.x).abs() < config.node_width
            && (candidate.y - node.position.y).abs() < config.node_height
    })
}

/// Clamps a center position so the node footprint plus margin stays
/// inside the bounds.
#[must_use]
pub fn clamp_into_bounds(
    position: Position,
    bounds: &CanvasBounds,
    config: &CanvasConfig,
) -> Position {
    let x = clamp_axis(
        position.x,
        config.margin + config.node_width / 2.0,
        bounds.width - config.node_width / 2.0 - config.margin,
    );
    let y = clamp_axis(
        position.y,
        config.margin + config.node_height / 2.0,
        bounds.height - config.node_height / 2.0 - config.margin,
    );
    Position::new(x, y)
}

/// How many grid columns fit between the anchor and the right border.
fn grid_columns(base: Position, bounds: &CanvasBounds, config: &CanvasConfig) -> u32 {
    let max_x = bounds.width - config.node_width / 2.0 - config.margin;
    let span = (max_x - base.x).max(0.0);
    (span / config.grid_step) as u32 + 1
}

/// Clamp that tolerates an inverted range (bounds narrower than the
/// footprint) instead of panicking.
fn clamp_axis(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max.max(min))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cobalt_loom_graph::NodeKind;

    fn node_at(x: f64, y: f64) -> Node {
        Node::new(NodeKind::Agent, "Agent", Position::new(x, y))
    }

    fn defaults() -> (CanvasBounds, CanvasConfig) {
        (CanvasBounds::default(), CanvasConfig::default())
    }

    #[test]
    fn empty_canvas_keeps_requested_position() {
        let (bounds, config) = defaults();
        let placed = place(Position::new(100.0, 100.0), &[], &bounds, &config);
        assert_eq!(placed, Position::new(100.0, 100.0));
    }

    #[test]
    fn requested_position_is_clamped_into_bounds() {
        let (bounds, config) = defaults();
        // Default footprint 160x60 with margin 20: x in [100, 700], y in [50, 450].
        let placed = place(Position::new(-500.0, 10_000.0), &[], &bounds, &config);
        assert_eq!(placed, Position::new(100.0, 450.0));
    }

    #[test]
    fn occupied_drop_point_moves_one_grid_step_right() {
        let (bounds, config) = defaults();
        let existing = vec![node_at(100.0, 100.0)];
        let placed = place(Position::new(100.0, 100.0), &existing, &bounds, &config);
        assert_eq!(placed, Position::new(300.0, 100.0));
    }

    #[test]
    fn grid_scan_wraps_to_next_row() {
        let (bounds, config) = defaults();
        // Occupy every grid column of the first row from x=100.
        let existing: Vec<_> = (0..4).map(|i| node_at(100.0 + 200.0 * f64::from(i), 100.0)).collect();
        let placed = place(Position::new(100.0, 100.0), &existing, &bounds, &config);
        assert_eq!(placed, Position::new(100.0, 300.0));
    }

    #[test]
    fn placement_is_deterministic() {
        let (bounds, config) = defaults();
        let existing = vec![node_at(100.0, 100.0), node_at(300.0, 100.0)];
        let first = place(Position::new(100.0, 100.0), &existing, &bounds, &config);
        let second = place(Position::new(100.0, 100.0), &existing, &bounds, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn placed_nodes_never_leave_bounds() {
        let (bounds, config) = defaults();
        let mut existing = Vec::new();
        for _ in 0..30 {
            let placed = place(Position::new(700.0, 450.0), &existing, &bounds, &config);
            assert!(placed.x >= 100.0 && placed.x <= 700.0, "x out of bounds: {}", placed.x);
            assert!(placed.y >= 50.0 && placed.y <= 450.0, "y out of bounds: {}", placed.y);
            existing.push(node_at(placed.x, placed.y));
        }
    }

    #[test]
    fn exhausted_budget_still_returns_a_position() {
        let config = CanvasConfig::default();
        // A canvas so small that only one footprint fits, already taken.
        let bounds = CanvasBounds::new(240.0, 140.0);
        let existing = vec![node_at(120.0, 70.0)];
        let placed = place(Position::new(120.0, 70.0), &existing, &bounds, &config);

        // Best effort: overlapping, but clamped inside the bounds.
        assert!(overlaps_any(placed, &existing, &config));
        assert!(placed.x >= 100.0 && placed.x <= 140.0);
        assert!(placed.y >= 50.0 && placed.y <= 90.0);
    }

    #[test]
    fn spiral_phase_finds_slot_when_grid_row_is_blocked() {
        let (bounds, config) = defaults();
        // Block the entire grid lattice reachable from (100, 100),
        // including the bottom row the scan clamps onto.
        let mut existing = Vec::new();
        for row_y in [100.0, 300.0, 450.0] {
            for col in 0..4 {
                existing.push(node_at(100.0 + 200.0 * f64::from(col), row_y));
            }
        }
        let placed = place(Position::new(100.0, 100.0), &existing, &bounds, &config);
        assert!(!overlaps_any(placed, &existing, &config));
    }
}
