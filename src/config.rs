//! Simulation set-up parameters.

use crate::math::Point2d;
use crate::vehicle::DEFAULT_START;
use crate::{Obstacle, VehicleAttributes};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Everything needed to set up a [Simulation](crate::Simulation).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SimulationConfig {
    /// The vehicle's dimensions and limits.
    pub vehicle: VehicleAttributes,
    /// Where the vehicle starts.
    pub start: Point2d,
    /// The vehicle's initial heading in degrees.
    pub start_heading: f64,
    /// The fixed obstacle set.
    pub obstacles: Vec<ObstacleConfig>,
    /// Step sizes used when mapping key presses to commands.
    pub keyboard: KeyboardTuning,
}

/// A single obstacle in a [SimulationConfig].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObstacleConfig {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// Step sizes for the keyboard mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct KeyboardTuning {
    /// The speed change per tick while up or down is held.
    pub accel_step: f64,
    /// The heading change in degrees per tick while left or right is held.
    pub turn_step: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            vehicle: VehicleAttributes::default(),
            start: DEFAULT_START,
            start_heading: 0.0,
            obstacles: vec![
                ObstacleConfig::new(200.0, 200.0, 20.0),
                ObstacleConfig::new(600.0, 400.0, 30.0),
                ObstacleConfig::new(400.0, 500.0, 25.0),
            ],
            keyboard: KeyboardTuning::default(),
        }
    }
}

impl Default for KeyboardTuning {
    fn default() -> Self {
        Self {
            accel_step: 0.1,
            turn_step: 2.0,
        }
    }
}

impl ObstacleConfig {
    pub const fn new(x: f64, y: f64, radius: f64) -> Self {
        Self { x, y, radius }
    }
}

impl From<ObstacleConfig> for Obstacle {
    fn from(cfg: ObstacleConfig) -> Self {
        Obstacle::new(Point2d::new(cfg.x, cfg.y), cfg.radius)
    }
}

#[cfg(feature = "serde")]
impl SimulationConfig {
    /// Parses a configuration from JSON. Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(all(test, feature = "serde"))]
mod test {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let cfg = SimulationConfig::from_json("{}").unwrap();
        assert_eq!(cfg, SimulationConfig::default());
    }

    #[test]
    fn partial_json_overrides() {
        let cfg = SimulationConfig::from_json(
            r#"{
                "vehicle": { "max_speed": 8.0 },
                "start": { "x": 10.0, "y": 20.0 },
                "obstacles": [{ "x": 1.0, "y": 2.0, "radius": 3.0 }]
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.vehicle.max_speed, 8.0);
        assert_eq!(cfg.vehicle.length, 40.0);
        assert_eq!(cfg.start, Point2d::new(10.0, 20.0));
        assert_eq!(cfg.obstacles, vec![ObstacleConfig::new(1.0, 2.0, 3.0)]);
        assert_eq!(cfg.keyboard, KeyboardTuning::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SimulationConfig::from_json(r#"{ "obstacles": 3 }"#).is_err());
        assert!(SimulationConfig::from_json("not json").is_err());
    }
}
