//! Connection path geometry.
//!
//! Paths are cubic Bezier curves between two anchor points: either two
//! handle anchors, or one handle anchor and the live pointer position
//! during a drag. The curve bulges along the dominant travel axis so
//! connections read the same whether the graph flows left-to-right or
//! top-to-bottom.
//!
//! Paths are recomputed on demand and never mutated in place; callers
//! must re-derive after any endpoint move.

use cobalt_loom_graph::Position;

/// Fraction of the anchor distance given to each control point.
const CURVE_TENSION: f64 = 0.4;
/// Control point offset floor, so short connections still curve.
const MIN_CONTROL_OFFSET: f64 = 60.0;
/// Control point offset ceiling, so long connections do not balloon.
const MAX_CONTROL_OFFSET: f64 = 120.0;

/// Computes the cubic-Bezier path between two anchors.
///
/// Output is an SVG path string: `M x1 y1 C cp1x cp1y, cp2x cp2y, x2 y2`.
#[must_use]
pub fn connection_path(source: Position, target: Position) -> String {
    let dx = target.x - source.x;
    let dy = target.y - source.y;
    let distance = dx.hypot(dy);
    let offset = (distance * CURVE_TENSION).clamp(MIN_CONTROL_OFFSET, MAX_CONTROL_OFFSET);

    let (cp1, cp2) = if dy.abs() > dx.abs() {
        // Vertical flow: control points leave each anchor toward the other.
        (
            source.offset_by(0.0, offset.copysign(dy)),
            target.offset_by(0.0, -offset.copysign(dy)),
        )
    } else {
        (
            source.offset_by(offset.copysign(dx), 0.0),
            target.offset_by(-offset.copysign(dx), 0.0),
        )
    };

    format!(
        "M {} {} C {} {}, {} {}, {} {}",
        source.x, source.y, cp1.x, cp1.y, cp2.x, cp2.y, target.x, target.y
    )
}
