//! Fixed-interval game loop
//!
//! The simulation thread is the only writer of game state. Input arrives as
//! queued [`InputEvent`]s and is applied at tick boundaries; after every tick
//! a fresh [`Snapshot`] is swapped into a shared slot for the renderer.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_pcg::Pcg32;
use thiserror::Error;

use crate::settings::Settings;
use crate::sim::{Direction, GameState, InputEvent, Snapshot, tick};

#[derive(Debug, Error)]
pub enum LoopError {
    #[error("failed to spawn simulation thread: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("simulation thread panicked")]
    Panicked,
}

/// Whether the loop should keep ticking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Every input sender is gone
    Shutdown,
}

/// Cloneable handle for the input collaborator
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: Sender<InputEvent>,
}

impl InputSender {
    /// Queue an event for the next tick. Returns false once the loop has stopped.
    pub fn send(&self, event: InputEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn direction_pressed(&self, direction: Direction) -> bool {
        self.send(InputEvent::DirectionPressed(direction))
    }

    pub fn direction_released(&self, direction: Direction) -> bool {
        self.send(InputEvent::DirectionReleased(direction))
    }

    pub fn fire_pressed(&self) -> bool {
        self.send(InputEvent::FirePressed)
    }
}

type SnapshotSlot = Arc<RwLock<Arc<Snapshot>>>;

/// Read side of the published snapshot
#[derive(Debug, Clone)]
pub struct SnapshotReader {
    slot: SnapshotSlot,
}

impl SnapshotReader {
    /// Most recently published snapshot (always a complete tick)
    pub fn latest(&self) -> Arc<Snapshot> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Owns the authoritative game state and the RNG driving it
pub struct GameLoop {
    state: GameState,
    rng: Pcg32,
    inbox: Receiver<InputEvent>,
    slot: SnapshotSlot,
    interval: Duration,
}

impl GameLoop {
    /// Build a loop plus the handles used to feed it and read from it
    pub fn new(settings: &Settings) -> (Self, InputSender, SnapshotReader) {
        let settings = settings.validated();
        let seed = settings.seed.unwrap_or_else(rand::random);
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = GameState::new(&settings, &mut rng);

        log::info!(
            "New session: seed={} field={}x{} enemies={} tick={}ms",
            seed,
            state.field.width,
            state.field.height,
            state.enemies.len(),
            settings.tick_interval_ms
        );

        let (tx, inbox) = mpsc::channel();
        let slot = Arc::new(RwLock::new(Arc::new(Snapshot::capture(&state))));
        let reader = SnapshotReader { slot: slot.clone() };

        let game_loop = Self {
            state,
            rng,
            inbox,
            slot,
            interval: settings.tick_interval(),
        };
        (game_loop, InputSender { tx }, reader)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Apply queued input, run one simulation step and publish the result
    ///
    /// Once every sender is gone this returns [`Flow::Shutdown`]. Events that
    /// arrived just before the disconnect still get a final tick so the last
    /// snapshot reflects them.
    pub fn step_once(&mut self) -> Flow {
        let mut drained = 0;
        let flow = loop {
            match self.inbox.try_recv() {
                Ok(event) => {
                    self.state.handle_input(event);
                    drained += 1;
                }
                Err(TryRecvError::Empty) => break Flow::Continue,
                Err(TryRecvError::Disconnected) => break Flow::Shutdown,
            }
        };
        if flow == Flow::Shutdown && drained == 0 {
            return flow;
        }

        let report = tick(&mut self.state, &mut self.rng);
        if report.enemies_destroyed() > 0 {
            log::debug!(
                "tick {}: {} enemies destroyed, {} left",
                self.state.time_ticks,
                report.enemies_destroyed(),
                self.state.enemies.len()
            );
        }

        self.publish();
        flow
    }

    fn publish(&self) {
        let snapshot = Arc::new(Snapshot::capture(&self.state));
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }

    /// Tick at the configured interval until every input sender is dropped.
    /// Overrunning ticks push the schedule back; there is no catch-up.
    /// Returns the number of ticks simulated.
    pub fn run(mut self) -> u64 {
        loop {
            let started = Instant::now();
            if self.step_once() == Flow::Shutdown {
                break;
            }

            let elapsed = started.elapsed();
            if elapsed > self.interval {
                log::debug!(
                    "tick {} overran: {:?} > {:?}",
                    self.state.time_ticks,
                    elapsed,
                    self.interval
                );
            }
            thread::sleep(self.interval.saturating_sub(elapsed));
        }

        log::info!("Session ended after {} ticks", self.state.time_ticks);
        self.state.time_ticks
    }

    /// Move the loop onto its own thread
    pub fn spawn(settings: &Settings) -> Result<LoopHandle, LoopError> {
        let (game_loop, input, snapshots) = Self::new(settings);
        let thread = thread::Builder::new()
            .name("tank-sim".to_string())
            .spawn(move || game_loop.run())
            .map_err(LoopError::Spawn)?;

        Ok(LoopHandle {
            input,
            snapshots,
            thread,
        })
    }
}

/// A running simulation thread
pub struct LoopHandle {
    pub input: InputSender,
    pub snapshots: SnapshotReader,
    thread: JoinHandle<u64>,
}

impl LoopHandle {
    /// Drop this handle's input sender and wait for the loop to finish.
    /// Clones of the sender still held elsewhere keep the loop alive.
    pub fn join(self) -> Result<u64, LoopError> {
        let LoopHandle { input, thread, .. } = self;
        drop(input);
        thread.join().map_err(|_| {
            log::error!("Simulation thread panicked");
            LoopError::Panicked
        })
    }
}
