//! Tank Arena - a fixed-tick top-down tank arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, tick update)
//! - `driver`: Fixed-interval game loop thread and snapshot publishing
//! - `renderer`: Frame geometry for drawing snapshots
//! - `settings`: Data-driven game tuning

pub mod driver;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::{GameLoop, InputSender, LoopError, LoopHandle, SnapshotReader};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Nominal simulation tick interval (~60 Hz)
    pub const TICK_INTERVAL_MS: u64 = 16;

    /// Field dimensions
    pub const FIELD_WIDTH: i32 = 800;
    pub const FIELD_HEIGHT: i32 = 600;

    /// Player tank
    pub const PLAYER_SIZE: i32 = 50;
    pub const PLAYER_STEP: i32 = 2;

    /// Enemy tanks
    pub const ENEMY_SIZE: i32 = 40;
    pub const ENEMY_STEP: i32 = 1;
    pub const ENEMY_COUNT: usize = 5;
    /// Upper bound accepted from settings files
    pub const MAX_ENEMY_COUNT: usize = 1000;

    /// Projectiles
    pub const PROJECTILE_SIZE: i32 = 10;
    pub const PROJECTILE_SPEED: f32 = 3.0;
}
