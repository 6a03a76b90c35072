//! Game settings and tuning
//!
//! Defaults reproduce the classic arena. A JSON file can override any
//! subset of fields.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Environment variable naming an optional settings file
pub const SETTINGS_ENV_VAR: &str = "TANK_ARENA_SETTINGS";

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    pub field_width: i32,
    pub field_height: i32,

    // === Player ===
    pub player_size: i32,
    /// Units moved per tick while a direction is held
    pub player_step: i32,

    // === Enemies ===
    pub enemy_size: i32,
    pub enemy_step: i32,
    pub enemy_count: usize,

    // === Projectiles ===
    pub projectile_size: i32,
    /// Units travelled per tick
    pub projectile_speed: f32,
    /// Drop projectiles that can no longer advance because the field edge is in the way
    pub cull_stalled_projectiles: bool,

    // === Loop ===
    pub tick_interval_ms: u64,
    /// RNG seed; a random one is drawn when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            player_size: PLAYER_SIZE,
            player_step: PLAYER_STEP,

            enemy_size: ENEMY_SIZE,
            enemy_step: ENEMY_STEP,
            enemy_count: ENEMY_COUNT,

            projectile_size: PROJECTILE_SIZE,
            projectile_speed: PROJECTILE_SPEED,
            cull_stalled_projectiles: true,

            tick_interval_ms: TICK_INTERVAL_MS,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from the file named by `TANK_ARENA_SETTINGS`, if any
    pub fn load() -> Self {
        match std::env::var(SETTINGS_ENV_VAR) {
            Ok(path) => Self::load_from(Path::new(&path)),
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from a JSON file, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.validated()
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Copy with values forced into a playable range
    ///
    /// Sizes are at least 1 and never larger than the field, steps stay
    /// within the field's longer side, speeds are non-negative, the enemy
    /// count is capped and the tick interval is at least 1 ms.
    pub fn validated(&self) -> Self {
        let field_width = self.field_width.max(1);
        let field_height = self.field_height.max(1);
        let max_size = field_width.min(field_height);
        let max_step = field_width.max(field_height);
        let speed = if self.projectile_speed.is_finite() {
            self.projectile_speed.max(0.0)
        } else {
            PROJECTILE_SPEED
        };

        Self {
            field_width,
            field_height,
            player_size: self.player_size.clamp(1, max_size),
            player_step: self.player_step.clamp(0, max_step),
            enemy_size: self.enemy_size.clamp(1, max_size),
            enemy_step: self.enemy_step.clamp(0, max_step),
            enemy_count: self.enemy_count.min(MAX_ENEMY_COUNT),
            projectile_size: self.projectile_size.clamp(1, max_size),
            projectile_speed: speed,
            cull_stalled_projectiles: self.cull_stalled_projectiles,
            tick_interval_ms: self.tick_interval_ms.max(1),
            seed: self.seed,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
