//! Immutable per-tick views of the game state for rendering

use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::state::{Field, GameState};

/// Everything the renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Tick this snapshot was taken after
    pub tick: u64,
    pub field: Field,
    pub player: Aabb,
    pub enemies: Vec<Aabb>,
    pub projectiles: Vec<Aabb>,
}

impl Snapshot {
    /// Copy the drawable parts out of the live state
    pub fn capture(state: &GameState) -> Self {
        Self {
            tick: state.time_ticks,
            field: state.field,
            player: state.player.bounds(),
            enemies: state.enemies.iter().map(|e| e.bounds()).collect(),
            projectiles: state.projectiles.iter().map(|p| p.bounds()).collect(),
        }
    }
}
