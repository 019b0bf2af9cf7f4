pub use cgmath;
pub use command::{Command, CommandSink};
pub use config::{KeyboardTuning, ObstacleConfig, SimulationConfig};
pub use controller::VehicleController;
pub use input::{CommandQueue, CommandSender, CommandSource, KeyState, KeyboardMapper};
pub use map::OccupancyMap;
pub use obstacle::Obstacle;
pub use radar::{Detection, Radar};
pub use render::{HeadlessRenderer, Renderer, Scene};
pub use simulation::{CollisionStatus, Simulation, TickReport};
use slotmap::new_key_type;
pub use slotmap::{Key, KeyData};
pub use util::Interval;
pub use vehicle::{Vehicle, VehicleAttributes};

mod command;
mod config;
mod controller;
mod debug;
mod input;
mod map;
pub mod math;
mod obstacle;
mod radar;
mod render;
mod simulation;
mod util;
mod vehicle;

new_key_type! {
    /// Unique ID of an [Obstacle].
    pub struct ObstacleId;
}
