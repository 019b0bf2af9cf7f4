//! Named vehicle commands.

use crate::Vehicle;

/// A command that can be applied to a [Vehicle].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Change the speed by a delta.
    Accelerate(f64),
    /// Rotate by a number of degrees.
    Turn(f64),
    /// Set the speed outright.
    SetSpeed(f64),
    /// Set the heading outright, in degrees.
    SetAngle(f64),
}

/// Something that accepts `(name, value)` command pairs.
pub trait CommandSink {
    /// Submits a command. Names are case-insensitive; unknown names are accepted and ignored later.
    fn submit(&mut self, name: &str, value: f64);
}

impl Command {
    /// Parses a command name, ignoring case.
    /// Returns `None` if the name is not recognised.
    pub fn parse(name: &str, value: f64) -> Option<Self> {
        let cmd = match name.to_lowercase().as_str() {
            "accelerate" => Self::Accelerate(value),
            "turn" => Self::Turn(value),
            "setspeed" => Self::SetSpeed(value),
            "setangle" => Self::SetAngle(value),
            _ => return None,
        };
        Some(cmd)
    }

    /// The canonical lower-case name of the command.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Accelerate(_) => "accelerate",
            Self::Turn(_) => "turn",
            Self::SetSpeed(_) => "setspeed",
            Self::SetAngle(_) => "setangle",
        }
    }

    /// The command's payload.
    pub fn value(&self) -> f64 {
        match *self {
            Self::Accelerate(v) | Self::Turn(v) | Self::SetSpeed(v) | Self::SetAngle(v) => v,
        }
    }

    /// Applies the command to a vehicle.
    pub fn apply(&self, vehicle: &mut Vehicle) {
        match *self {
            Self::Accelerate(delta) => vehicle.accelerate(delta),
            Self::Turn(degrees) => vehicle.turn(degrees),
            Self::SetSpeed(speed) => vehicle.set_speed(speed),
            Self::SetAngle(degrees) => vehicle.set_heading(degrees),
        }
    }
}
