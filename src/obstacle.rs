use crate::math::Point2d;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A static circular obstacle.
///
/// Obstacles are fixed for the lifetime of a simulation; there is no way
/// to move or resize one after it is created.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Obstacle {
    /// The world space coordinates of the centre of the obstacle.
    pos: Point2d,
    /// The radius of the obstacle.
    radius: f64,
}

impl Obstacle {
    /// Creates a new obstacle.
    pub fn new(pos: Point2d, radius: f64) -> Self {
        Self { pos, radius }
    }

    /// The coordinates in world space of the centre of the obstacle.
    pub fn pos(&self) -> Point2d {
        self.pos
    }

    /// The radius of the obstacle.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Whether this obstacle overlaps a circle with the given centre and radius.
    pub(crate) fn overlaps_circle(&self, centre: Point2d, radius: f64) -> bool {
        use cgmath::MetricSpace;
        self.pos.distance(centre) < self.radius + radius
    }
}
