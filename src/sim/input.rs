//! Player input events
//!
//! The input collaborator reports raw key transitions. They are applied to
//! the game state in arrival order at tick boundaries.

use serde::{Deserialize, Serialize};

use super::state::{Direction, GameState};

/// A discrete key transition from the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    DirectionPressed(Direction),
    DirectionReleased(Direction),
    FirePressed,
}

impl GameState {
    /// Apply one input event
    ///
    /// A press makes that direction the held one. A release only clears the
    /// held direction when it names the same key, so releasing some other
    /// key leaves movement alone. Fire spawns a projectile immediately.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::DirectionPressed(direction) => {
                self.player.held = Some(direction);
                self.player.facing = direction;
            }
            InputEvent::DirectionReleased(direction) => {
                if self.player.held == Some(direction) {
                    self.player.held = None;
                }
            }
            InputEvent::FirePressed => self.spawn_projectile(),
        }
    }
}
