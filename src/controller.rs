use crate::command::{Command, CommandSink};
use crate::Vehicle;

/// Applies externally submitted commands to a [Vehicle] and tracks collisions.
///
/// Commands are latched rather than queued: each submission overwrites the
/// previous one, and [update_vehicle](Self::update_vehicle) applies whichever
/// command was submitted last. Several submissions between two updates
/// therefore lose all but the most recent.
///
/// The controller performs no synchronisation of its own. When commands arrive
/// from another thread, route them through a [CommandQueue](crate::CommandQueue)
/// that is drained by the thread running the simulation.
#[derive(Clone, Debug, Default)]
pub struct VehicleController {
    /// The controlled vehicle.
    vehicle: Vehicle,
    /// The most recently submitted command name, lower-cased.
    last_command: String,
    /// The payload submitted with `last_command`.
    last_value: f64,
    /// Whether a collision has been reported since the last reset.
    collided: bool,
}

impl VehicleController {
    /// Creates a controller which takes ownership of `vehicle`.
    pub fn new(vehicle: Vehicle) -> Self {
        Self {
            vehicle,
            last_command: String::new(),
            last_value: 0.0,
            collided: false,
        }
    }

    /// Gets a reference to the controlled vehicle.
    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// Gets a mutable reference to the controlled vehicle.
    pub fn vehicle_mut(&mut self) -> &mut Vehicle {
        &mut self.vehicle
    }

    /// The latched command name and value, if any command has been submitted.
    pub fn last_command(&self) -> Option<(&str, f64)> {
        if self.last_command.is_empty() {
            None
        } else {
            Some((&self.last_command, self.last_value))
        }
    }

    /// Latches a command, replacing any command not yet applied.
    pub fn process_command(&mut self, name: &str, value: f64) {
        self.last_command = name.to_lowercase();
        self.last_value = value;
    }

    /// Applies the latched command to the vehicle.
    ///
    /// The latch is not cleared, so the same command is applied again on the
    /// next call unless a new one is submitted. Unknown commands do nothing.
    pub fn update_vehicle(&mut self) {
        match Command::parse(&self.last_command, self.last_value) {
            Some(cmd) => cmd.apply(&mut self.vehicle),
            None if !self.last_command.is_empty() => {
                log::debug!("ignoring unknown command {:?}", self.last_command);
            }
            None => {}
        }
    }

    /// Records that the vehicle has hit an obstacle.
    ///
    /// Returns `true` only on the transition into the collided state, which is
    /// also when the collision is logged. Further reports are ignored until
    /// [reset_collision](Self::reset_collision) is called.
    pub fn report_collision(&mut self) -> bool {
        if self.collided {
            return false;
        }
        self.collided = true;
        log::warn!("collision detected, the vehicle has hit an obstacle");
        true
    }

    /// Clears the collided state so the next collision is reported again.
    pub fn reset_collision(&mut self) {
        if self.collided {
            log::info!("collision state reset");
        }
        self.collided = false;
    }

    /// Whether a collision has been reported since the last reset.
    pub fn has_collided(&self) -> bool {
        self.collided
    }
}

impl CommandSink for VehicleController {
    fn submit(&mut self, name: &str, value: f64) {
        self.process_command(name, value);
    }
}
