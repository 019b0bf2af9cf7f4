use std::io::BufRead;
use std::time::{Duration, Instant};

use drive_sim::{CommandQueue, HeadlessRenderer, Renderer, Scene, Simulation, SimulationConfig};

/// The wall-clock duration of one tick.
const TICK: Duration = Duration::from_micros(16_667);

/// The number of ticks to run when none is given.
const DEFAULT_FRAMES: usize = 600;

/// Holds each frame until its tick has elapsed, so the simulation runs in real time.
struct Paced {
    inner: HeadlessRenderer,
    next: Instant,
}

impl Renderer for Paced {
    fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    fn draw(&mut self, scene: &Scene) {
        self.inner.draw(scene);
        let now = Instant::now();
        if self.next > now {
            std::thread::sleep(self.next - now);
        }
        self.next += TICK;
    }
}

/// Parses a `<command> <value>` line.
fn parse_line(line: &str) -> Option<(&str, f64)> {
    let mut parts = line.split_whitespace();
    let name = parts.next()?;
    let value = parts.next()?.parse().ok()?;
    match parts.next() {
        Some(_) => None,
        None => Some((name, value)),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SimulationConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => SimulationConfig::default(),
    };
    let frames = match args.next() {
        Some(frames) => frames.parse()?,
        None => DEFAULT_FRAMES,
    };

    // Commands typed on stdin stand in for a remote API.
    let mut queue = CommandQueue::new();
    let sender = queue.sender();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    log::warn!("stopped reading commands: {}", err);
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(&line) {
                Some((name, value)) => {
                    if !sender.submit(name, value) {
                        break;
                    }
                }
                None => log::warn!("expected `<command> <value>`, got {:?}", line),
            }
        }
    });

    let mut sim = Simulation::new(&config);
    let mut renderer = Paced {
        inner: HeadlessRenderer::new(frames),
        next: Instant::now(),
    };
    log::info!(
        "simulating {} frames with {} obstacles",
        frames,
        sim.iter_obstacles().count()
    );
    sim.run(&mut queue, &mut renderer);

    println!("{}", serde_json::to_string_pretty(&sim.scene())?);
    log::info!("collided: {}", sim.collision_status().has_collided());
    Ok(())
}
