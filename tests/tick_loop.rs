//! Tests that drive the whole tick loop through the public API.

use assert_approx_eq::assert_approx_eq;
use drive_sim::{
    math::Point2d, CommandQueue, HeadlessRenderer, KeyState, KeyboardMapper, ObstacleConfig,
    Simulation, SimulationConfig,
};

fn open_field() -> Simulation {
    Simulation::new(&SimulationConfig {
        obstacles: vec![],
        ..Default::default()
    })
}

/// Accelerating by 2 from rest moves the vehicle 2 units along its heading.
#[test]
fn accelerate_scenario() {
    let mut sim = open_field();
    sim.submit_command("accelerate", 2.0);
    sim.step(&mut CommandQueue::new());
    assert_approx_eq!(sim.vehicle().position().x, 402.0);
    assert_approx_eq!(sim.vehicle().position().y, 300.0);
}

/// Only the last command submitted between ticks takes effect.
#[test]
fn latched_command_survives() {
    let mut sim = open_field();
    let mut queue = CommandQueue::new();
    let tx = queue.sender();
    tx.submit("accelerate", 1.0);
    tx.submit("turn", 10.0);
    sim.step(&mut queue);
    assert_eq!(sim.vehicle().speed(), 0.0);
    assert_approx_eq!(sim.vehicle().heading(), 10.0);
    assert_eq!(sim.vehicle().position(), Point2d::new(400.0, 300.0));
}

/// A negative angle wraps into range.
#[test]
fn set_angle_scenario() {
    let mut sim = open_field();
    sim.submit_command("setangle", -30.0);
    sim.step(&mut CommandQueue::new());
    assert_approx_eq!(sim.vehicle().heading(), 330.0);
}

/// Driving straight into an obstacle reports exactly one collision.
#[test]
fn drive_into_obstacle() {
    let mut sim = Simulation::new(&SimulationConfig {
        obstacles: vec![ObstacleConfig::new(500.0, 300.0, 20.0)],
        ..Default::default()
    });
    let mut keyboard = KeyboardMapper::default();
    keyboard.set_keys(KeyState {
        up: true,
        ..Default::default()
    });

    let reports: Vec<_> = (0..200).map(|_| sim.step(&mut keyboard)).collect();
    let notified = reports.iter().filter(|r| r.notified).count();
    assert_eq!(notified, 1);

    let first_hit = reports.iter().position(|r| r.hit.is_some()).unwrap();
    assert!(reports[first_hit].notified);
    assert!(sim.has_collided());

    // The vehicle keeps going through the obstacle; the flag stays set.
    assert!(sim.vehicle().position().x > 500.0);
    assert!(sim.vehicle().speed() <= 5.0);
}

/// The loop draws once per tick and stops when the renderer closes.
#[test]
fn run_until_closed() {
    let mut sim = Simulation::default();
    let mut renderer = HeadlessRenderer::new(25);
    sim.submit_command("setspeed", 1.0);
    sim.run(&mut CommandQueue::new(), &mut renderer);

    assert_eq!(sim.frame(), 25);
    let scene = renderer.last_scene().unwrap();
    assert_eq!(scene.frame, 25);
    assert_approx_eq!(scene.position.x, 425.0);
    assert_eq!(scene.obstacles.len(), 3);
    assert_eq!(scene.length, 40.0);
    assert_eq!(scene.width, 20.0);
    assert!(!scene.collided);
}

/// A closed renderer means no ticks at all.
#[test]
fn run_with_closed_renderer() {
    let mut sim = Simulation::default();
    let mut renderer = HeadlessRenderer::new(0);
    sim.run(&mut CommandQueue::new(), &mut renderer);
    assert_eq!(sim.frame(), 0);
    assert!(renderer.last_scene().is_none());
}

#[cfg(feature = "serde")]
#[test]
fn scene_serializes() {
    let sim = Simulation::default();
    let json = serde_json::to_value(sim.scene()).unwrap();
    assert_eq!(json["position"]["x"], 400.0);
    assert_eq!(json["obstacles"].as_array().unwrap().len(), 3);
    assert_eq!(json["collided"], false);
}
