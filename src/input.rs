//! Sources of vehicle commands.
//!
//! A [CommandSource] is polled once at the start of every tick and forwards
//! whatever it has pending to a [CommandSink]. Keyboard state is mapped to
//! commands directly; commands from other threads arrive via a [CommandQueue].

use crate::command::CommandSink;
use crate::config::KeyboardTuning;
use crossbeam::channel::{self, Receiver, Sender};

/// Produces commands at tick boundaries.
pub trait CommandSource {
    /// Forwards every pending command to `sink`, oldest first.
    fn poll(&mut self, sink: &mut dyn CommandSink);
}

/// Polls both sources in order, so the second one's commands take precedence.
impl<A: CommandSource, B: CommandSource> CommandSource for (A, B) {
    fn poll(&mut self, sink: &mut dyn CommandSink) {
        self.0.poll(sink);
        self.1.poll(sink);
    }
}

/// Which arrow keys are held down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Maps held arrow keys to commands.
///
/// Up and down change the speed, with up taking precedence; with neither
/// held an `accelerate 0` is submitted. Left and right then submit turns.
/// Since the controller latches only the last command, holding a turn key
/// overrides the speed change for that tick.
#[derive(Clone, Debug, Default)]
pub struct KeyboardMapper {
    tuning: KeyboardTuning,
    keys: KeyState,
}

impl KeyboardMapper {
    /// Creates a mapper with the given step sizes.
    pub fn new(tuning: KeyboardTuning) -> Self {
        Self {
            tuning,
            keys: KeyState::default(),
        }
    }

    /// Records the current key state; read on the next poll.
    pub fn set_keys(&mut self, keys: KeyState) {
        self.keys = keys;
    }

    /// The most recently recorded key state.
    pub fn keys(&self) -> KeyState {
        self.keys
    }
}

impl CommandSource for KeyboardMapper {
    fn poll(&mut self, sink: &mut dyn CommandSink) {
        let KeyboardTuning { accel_step, turn_step } = self.tuning;
        let accel = match (self.keys.up, self.keys.down) {
            (true, _) => accel_step,
            (false, true) => -accel_step,
            (false, false) => 0.0,
        };
        sink.submit("accelerate", accel);
        if self.keys.left {
            sink.submit("turn", -turn_step);
        }
        if self.keys.right {
            sink.submit("turn", turn_step);
        }
    }
}

/// The receiving end of a thread-safe command channel.
///
/// Any number of [CommandSender]s may submit from other threads; the
/// simulation drains the queue on its own thread at the start of each tick,
/// so the controller only ever has a single writer.
#[derive(Debug)]
pub struct CommandQueue {
    tx: Sender<(String, f64)>,
    rx: Receiver<(String, f64)>,
}

/// A cloneable handle for submitting commands to a [CommandQueue].
#[derive(Clone, Debug)]
pub struct CommandSender {
    tx: Sender<(String, f64)>,
}

impl CommandQueue {
    /// Creates an empty, unbounded queue.
    pub fn new() -> Self {
        let (tx, rx) = channel::unbounded();
        Self { tx, rx }
    }

    /// Creates a new sender for this queue.
    pub fn sender(&self) -> CommandSender {
        CommandSender {
            tx: self.tx.clone(),
        }
    }

    /// The number of commands waiting to be polled.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Whether no commands are waiting.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandSource for CommandQueue {
    fn poll(&mut self, sink: &mut dyn CommandSink) {
        for (name, value) in self.rx.try_iter() {
            sink.submit(&name, value);
        }
    }
}

impl CommandSender {
    /// Submits a command. Returns `false` if the queue has been dropped.
    pub fn submit(&self, name: &str, value: f64) -> bool {
        self.tx.send((name.to_owned(), value)).is_ok()
    }
}
