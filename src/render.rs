//! The boundary between the simulation and whatever draws it.

use crate::math::Point2d;
use crate::{Obstacle, Simulation};
#[cfg(feature = "serde")]
use serde::Serialize;

/// Draws the simulation once per tick and decides when the run is over.
pub trait Renderer {
    /// Whether the output is still open. The simulation loop stops once this is `false`.
    fn is_open(&self) -> bool;

    /// Draws a snapshot of the simulation.
    fn draw(&mut self, scene: &Scene);
}

/// A snapshot of everything a renderer needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Scene {
    /// The number of completed ticks.
    pub frame: usize,
    /// The centre of the vehicle.
    pub position: Point2d,
    /// The vehicle's heading in degrees.
    pub heading: f64,
    /// The vehicle's length.
    pub length: f64,
    /// The vehicle's width.
    pub width: f64,
    /// The corners of the vehicle's footprint.
    pub outline: [Point2d; 4],
    /// The corners of the field of view triangle.
    pub fov_cone: [Point2d; 3],
    /// The obstacle circles.
    pub obstacles: Vec<Obstacle>,
    /// Whether a collision has been reported since the last reset.
    pub collided: bool,
}

impl Scene {
    /// Captures the current state of a simulation.
    pub fn capture(sim: &Simulation) -> Self {
        let vehicle = sim.vehicle();
        Self {
            frame: sim.frame(),
            position: vehicle.position(),
            heading: vehicle.heading(),
            length: vehicle.length(),
            width: vehicle.width(),
            outline: vehicle.outline(),
            fov_cone: vehicle.fov_cone(),
            obstacles: sim.iter_obstacles().map(|(_, obs)| *obs).collect(),
            collided: sim.has_collided(),
        }
    }
}

/// A renderer with no output which closes after a fixed number of frames.
#[derive(Clone, Debug)]
pub struct HeadlessRenderer {
    frames_left: usize,
    last: Option<Scene>,
}

impl HeadlessRenderer {
    /// Creates a renderer which stays open for `frames` draws.
    pub fn new(frames: usize) -> Self {
        Self {
            frames_left: frames,
            last: None,
        }
    }

    /// The most recently drawn scene.
    pub fn last_scene(&self) -> Option<&Scene> {
        self.last.as_ref()
    }
}

impl Renderer for HeadlessRenderer {
    fn is_open(&self) -> bool {
        self.frames_left > 0
    }

    fn draw(&mut self, scene: &Scene) {
        self.frames_left = self.frames_left.saturating_sub(1);
        self.last = Some(scene.clone());
    }
}
