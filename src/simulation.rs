use crate::command::CommandSink;
use crate::config::SimulationConfig;
#[cfg(feature = "debug")]
use crate::debug::take_debug_frame;
use crate::debug::debug_circle;
use crate::input::CommandSource;
use crate::map::OccupancyMap;
use crate::math::Point2d;
use crate::radar::{Detection, Radar};
use crate::render::{Renderer, Scene};
use crate::util::Interval;
use crate::{Obstacle, ObstacleId, Vehicle, VehicleController};
use crossbeam::atomic::AtomicCell;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::Serialize;
use slotmap::SlotMap;
use smallvec::SmallVec;
use std::sync::Arc;

/// The number of positions tried for each randomly spawned obstacle before giving up on it.
const SPAWN_ATTEMPTS: usize = 100;

/// A single vehicle driving among static obstacles.
pub struct Simulation {
    /// The fixed set of obstacles.
    obstacles: SlotMap<ObstacleId, Obstacle>,
    /// The controller, which owns the vehicle.
    controller: VehicleController,
    /// The current frame of simulation.
    frame: usize,
    /// A copy of the collision flag which other threads may read.
    status: CollisionStatus,
    /// Debugging information from the previously simulated frame.
    #[cfg(feature = "debug")]
    debug: serde_json::Value,
}

/// The outcome of a single tick.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TickReport {
    /// The index of the tick, starting at 1 for the first.
    pub frame: usize,
    /// The first obstacle found overlapping the vehicle, if any.
    pub hit: Option<ObstacleId>,
    /// Whether this tick started a new collision episode.
    pub notified: bool,
}

/// A read-only, thread-safe view of a simulation's collision flag.
///
/// The simulation refreshes it at the end of every tick and whenever the
/// collision is reset, so it may lag the controller by at most one tick.
#[derive(Clone, Debug, Default)]
pub struct CollisionStatus(Arc<AtomicCell<bool>>);

impl CollisionStatus {
    /// Whether the simulation had a collision as of its last tick.
    pub fn has_collided(&self) -> bool {
        self.0.load()
    }

    fn publish(&self, collided: bool) {
        self.0.store(collided);
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(&SimulationConfig::default())
    }
}

impl Simulation {
    /// Creates a new simulation.
    pub fn new(config: &SimulationConfig) -> Self {
        let mut vehicle = Vehicle::new(&config.vehicle, config.start);
        vehicle.set_heading(config.start_heading);
        let mut obstacles = SlotMap::with_key();
        for obstacle in &config.obstacles {
            obstacles.insert(Obstacle::from(*obstacle));
        }
        Self {
            obstacles,
            controller: VehicleController::new(vehicle),
            frame: 0,
            status: CollisionStatus::default(),
            #[cfg(feature = "debug")]
            debug: serde_json::Value::Null,
        }
    }

    /// Adds an obstacle. The obstacle set is meant to be fixed before the first tick.
    pub fn add_obstacle(&mut self, obstacle: Obstacle) -> ObstacleId {
        self.obstacles.insert(obstacle)
    }

    /// Scatters up to `count` obstacles at random within `area`.
    ///
    /// Each obstacle lies entirely inside the area and overlaps neither the
    /// vehicle nor any existing obstacle. An obstacle which cannot be placed
    /// after a number of attempts is skipped.
    ///
    /// # Parameters
    /// * `rng` - The source of randomness
    /// * `count` - The number of obstacles to place
    /// * `area` - The minimum and maximum corners of the area
    /// * `radius` - The range from which radii are drawn
    ///
    /// # Returns
    /// The IDs of the obstacles that were placed.
    pub fn spawn_random_obstacles<R: Rng>(
        &mut self,
        rng: &mut R,
        count: usize,
        area: [Point2d; 2],
        radius: Interval<f64>,
    ) -> Vec<ObstacleId> {
        let mut placed = vec![];
        if !(radius.min > 0.0 && radius.min <= radius.max && radius.max.is_finite()) {
            log::warn!("cannot spawn obstacles with radius {:?}", radius);
            return placed;
        }

        for _ in 0..count {
            let spawned = (0..SPAWN_ATTEMPTS).find_map(|_| {
                let r = if radius.min < radius.max {
                    rng.gen_range(radius.min..radius.max)
                } else {
                    radius.min
                };
                let xs = Interval::new(area[0].x + r, area[1].x - r);
                let ys = Interval::new(area[0].y + r, area[1].y - r);
                let usable =
                    |i: &Interval<f64>| i.min.is_finite() && i.max.is_finite() && i.min <= i.max;
                if !usable(&xs) || !usable(&ys) {
                    return None;
                }
                let centre = Point2d::new(
                    rng.gen_range(xs.min..=xs.max),
                    rng.gen_range(ys.min..=ys.max),
                );
                let obstacle = Obstacle::new(centre, r);
                self.is_clear(&obstacle).then(|| obstacle)
            });

            match spawned {
                Some(obstacle) => placed.push(self.obstacles.insert(obstacle)),
                None => log::warn!(
                    "no room for obstacle {} of {} after {} attempts",
                    placed.len() + 1,
                    count,
                    SPAWN_ATTEMPTS
                ),
            }
        }
        placed
    }

    /// Whether an obstacle could be added without touching the vehicle or any other obstacle.
    fn is_clear(&self, obstacle: &Obstacle) -> bool {
        let vehicle = self.controller.vehicle();
        !obstacle.overlaps_circle(vehicle.position(), vehicle.bounding_radius())
            && !self
                .obstacles
                .values()
                .any(|other| obstacle.overlaps_circle(other.pos(), other.radius()))
    }

    /// Latches a command on the vehicle's controller.
    pub fn submit_command(&mut self, name: &str, value: f64) {
        self.controller.process_command(name, value);
    }

    /// Advances the simulation by one tick.
    ///
    /// The order is fixed: poll `input`, apply the latched command, move
    /// the vehicle, then test for collisions.
    pub fn step(&mut self, input: &mut dyn CommandSource) -> TickReport {
        input.poll(&mut self.controller);
        self.controller.update_vehicle();
        self.controller.vehicle_mut().advance();

        let hit = self.check_collision();
        let notified = hit.is_some() && self.controller.report_collision();

        self.frame += 1;
        self.status.publish(self.controller.has_collided());

        let vehicle = self.controller.vehicle();
        log::trace!(
            "frame {}: pos ({:.2}, {:.2}) heading {:.1} speed {:.2}",
            self.frame,
            vehicle.position().x,
            vehicle.position().y,
            vehicle.heading(),
            vehicle.speed()
        );

        #[cfg(feature = "debug")]
        {
            self.debug = take_debug_frame();
        }

        TickReport {
            frame: self.frame,
            hit,
            notified,
        }
    }

    /// Runs ticks, drawing after each, until the renderer is closed.
    pub fn run(&mut self, input: &mut dyn CommandSource, renderer: &mut dyn Renderer) {
        while renderer.is_open() {
            self.step(input);
            renderer.draw(&Scene::capture(self));
        }
        log::info!("simulation stopped after {} frames", self.frame);
    }

    /// Finds the first obstacle overlapping the vehicle's bounding circle.
    pub fn check_collision(&self) -> Option<ObstacleId> {
        let vehicle = self.controller.vehicle();
        let (id, obstacle) = self
            .obstacles
            .iter()
            .find(|(_, obstacle)| vehicle.collides_with(obstacle))?;
        debug_circle("collision", obstacle.pos(), obstacle.radius());
        Some(id)
    }

    /// Clears the collision flag so the next collision is reported again.
    pub fn reset_collision(&mut self) {
        self.controller.reset_collision();
        self.status.publish(false);
    }

    /// Whether a collision has been reported since the last reset.
    pub fn has_collided(&self) -> bool {
        self.controller.has_collided()
    }

    /// Gets a handle to the collision flag which can be shared with other threads.
    pub fn collision_status(&self) -> CollisionStatus {
        self.status.clone()
    }

    /// Scans the vehicle's field of view for obstacles.
    pub fn scan(&self, radar: &Radar) -> SmallVec<[Detection; 16]> {
        let obstacles = self
            .obstacles
            .values()
            .copied()
            .collect::<SmallVec<[_; 8]>>();
        radar.scan(self.controller.vehicle(), &obstacles)
    }

    /// Sweeps the radar and records the returns in `map`.
    pub fn update_map(&self, radar: &Radar, map: &mut OccupancyMap) -> SmallVec<[Detection; 16]> {
        let detections = self.scan(radar);
        let vehicle = self.controller.vehicle();
        map.update(vehicle.position(), vehicle.heading(), &detections);
        detections
    }

    /// Captures a snapshot of the current state for drawing.
    pub fn scene(&self) -> Scene {
        Scene::capture(self)
    }

    /// Gets the current simulation frame index.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Gets a reference to the vehicle.
    pub fn vehicle(&self) -> &Vehicle {
        self.controller.vehicle()
    }

    /// Gets a reference to the vehicle's controller.
    pub fn controller(&self) -> &VehicleController {
        &self.controller
    }

    /// Returns an iterator over all the obstacles in the simulation.
    pub fn iter_obstacles(&self) -> impl Iterator<Item = (ObstacleId, &Obstacle)> {
        self.obstacles.iter()
    }

    /// Gets a reference to the obstacle with the given ID.
    pub fn get_obstacle(&self, obstacle_id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(obstacle_id)
    }

    /// Gets the debugging information for the previously simulated frame as JSON array.
    #[cfg(feature = "debug")]
    pub fn debug(&mut self) -> serde_json::Value {
        self.debug.clone()
    }
}

impl CommandSink for Simulation {
    fn submit(&mut self, name: &str, value: f64) {
        self.submit_command(name, value);
    }
}
