//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no wall-clock time
//! - Injected, seeded RNG only
//! - Stable iteration order (collection order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Aabb, intersects};
pub use input::InputEvent;
pub use snapshot::Snapshot;
pub use state::{Direction, Enemy, Field, GameState, Player, Projectile};
pub use tick::{TickReport, tick};
