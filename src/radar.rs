//! A ray-sweeping radar mounted on the vehicle.

use crate::debug::debug_line;
use crate::math::{heading_vector, ray_circle_distance};
use crate::{Obstacle, Vehicle};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// The default reach of the radar.
const DEFAULT_RANGE: f64 = 200.0;

/// The default opening angle of the sweep, in degrees.
const DEFAULT_ANGLE: f64 = 60.0;

/// The default angular spacing between radar rays, in degrees.
const DEFAULT_STEP: f64 = 5.0;

/// The most rays cast in a single sweep.
const MAX_RAYS: usize = 721;

/// A radar return.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Detection {
    /// The distance from the vehicle's centre to the nearest hit along the ray.
    pub distance: f64,
    /// The direction of the ray in degrees, relative to the vehicle's heading.
    pub bearing: f64,
}

/// Sweeps rays ahead of a vehicle and reports the nearest obstacle on each.
///
/// The sweep is independent of the vehicle's field of view, which is only drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Radar {
    /// How far each ray reaches from the vehicle's centre.
    range: f64,
    /// The opening angle of the sweep in degrees, at most a full turn.
    angle: f64,
    /// The spacing between rays in degrees.
    step: f64,
}

impl Default for Radar {
    fn default() -> Self {
        Self {
            range: DEFAULT_RANGE,
            angle: DEFAULT_ANGLE,
            step: DEFAULT_STEP,
        }
    }
}

impl Radar {
    /// Creates a radar.
    ///
    /// # Parameters
    /// * `range` - The reach of each ray
    /// * `angle` - The opening angle of the sweep in degrees; wider than 360 is cut to 360
    /// * `step` - The spacing between rays in degrees
    ///
    /// Negative or non-finite values, and a non-positive step, fall back to the defaults.
    pub fn new(range: f64, angle: f64, step: f64) -> Self {
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        Self {
            range: if valid(range) { range } else { DEFAULT_RANGE },
            angle: if valid(angle) { angle.min(360.0) } else { DEFAULT_ANGLE },
            step: if valid(step) && step > 0.0 { step } else { DEFAULT_STEP },
        }
    }

    /// The reach of each ray.
    pub fn range(&self) -> f64 {
        self.range
    }

    /// The opening angle of the sweep in degrees.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// The spacing between rays in degrees.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// The number of rays cast per sweep.
    pub fn num_rays(&self) -> usize {
        let rays = (self.angle / self.step).floor() + 1.0;
        if rays >= MAX_RAYS as f64 {
            MAX_RAYS
        } else {
            rays as usize
        }
    }

    /// Scans ahead of the vehicle.
    ///
    /// Rays start at the left edge of the sweep and are cast every `step`
    /// degrees up to and including the right edge, each reaching `range`
    /// from the vehicle's centre. Very fine steps are limited to a fixed
    /// number of rays. Rays that hit nothing within range are omitted.
    pub fn scan(&self, vehicle: &Vehicle, obstacles: &[Obstacle]) -> SmallVec<[Detection; 16]> {
        let origin = vehicle.position();
        let half_angle = 0.5 * self.angle;

        let mut detections = SmallVec::new();
        for i in 0..self.num_rays() {
            let bearing = -half_angle + i as f64 * self.step;
            let dir = heading_vector(vehicle.heading() + bearing);
            let nearest = obstacles
                .iter()
                .filter_map(|obs| ray_circle_distance(origin, dir, obs.pos(), obs.radius()))
                .filter(|dist| *dist <= self.range)
                .min_by(f64::total_cmp);
            if let Some(distance) = nearest {
                debug_line("radar", origin, origin + distance * dir);
                detections.push(Detection { distance, bearing });
            }
        }
        detections
    }
}
