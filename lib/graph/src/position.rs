//! Canvas coordinates.
//!
//! Positions are expressed in canvas space with a top-left origin.
//! Nodes are anchored at their center point; handle anchors are derived
//! from the center plus half the node footprint.

use serde::{Deserialize, Serialize};

/// A point in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate, increasing rightward.
    pub x: f64,
    /// Vertical coordinate, increasing downward.
    pub y: f64,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the Euclidean distance to another position.
    #[must_use]
    pub fn distance_to(&self, other: Position) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Returns this position translated by the given deltas.
    #[must_use]
    pub fn offset_by(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Position::new(10.0, -2.0);
        let b = Position::new(-7.0, 31.0);
        assert_eq!(a.distance_to(b), b.distance_to(a));
    }

    #[test]
    fn offset_translates() {
        let p = Position::new(100.0, 50.0).offset_by(-20.0, 30.0);
        assert_eq!(p, Position::new(80.0, 80.0));
    }
}
