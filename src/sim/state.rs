//! Game state and core simulation types
//!
//! Positions are in field coordinates with the origin at the top-left
//! corner and y growing downward. Tanks live on the integer grid;
//! projectiles travel in floating point.

use glam::{IVec2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::settings::Settings;

/// One of the four cardinal directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Map a random roll in `0..4` to a direction. Anything else is `None`.
    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Parse a key name (arrow keys or WASD, case-insensitive)
    pub fn from_key(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "up" | "arrowup" | "w" => Some(Direction::Up),
            "down" | "arrowdown" | "s" => Some(Direction::Down),
            "left" | "arrowleft" | "a" => Some(Direction::Left),
            "right" | "arrowright" | "d" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Unit offset on the integer grid (y grows downward)
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn as_vec2(self) -> Vec2 {
        self.offset().as_vec2()
    }
}

/// Rectangular play field shared by every entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub width: i32,
    pub height: i32,
}

impl Field {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Largest top-left corner a square of `size` may occupy
    pub fn max_corner(&self, size: i32) -> IVec2 {
        IVec2::new(self.width - size, self.height - size).max(IVec2::ZERO)
    }

    /// Whether a square of `size` at `pos` lies fully inside the field
    pub fn contains(&self, pos: IVec2, size: i32) -> bool {
        let max = self.max_corner(size);
        pos.x >= 0 && pos.y >= 0 && pos.x <= max.x && pos.y <= max.y
    }

    /// Floating point variant of [`Field::contains`]
    pub fn contains_f(&self, pos: Vec2, size: f32) -> bool {
        let max = Vec2::new(self.width as f32 - size, self.height as f32 - size);
        pos.x >= 0.0 && pos.y >= 0.0 && pos.x <= max.x && pos.y <= max.y
    }
}

/// The player's tank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: IVec2,
    pub size: i32,
    /// Direction key currently held (last write wins)
    pub held: Option<Direction>,
    /// Most recently pressed direction, used to aim when nothing is held
    pub facing: Direction,
}

impl Player {
    /// Spawn a player centered in the field
    pub fn new(field: &Field, size: i32) -> Self {
        Self {
            pos: IVec2::new(field.width / 2 - size / 2, field.height / 2 - size / 2),
            size,
            held: None,
            facing: Direction::Up,
        }
    }

    /// Move `step` units toward `direction`, clamped to the field.
    /// No direction is a no-op.
    pub fn drive(&mut self, direction: Option<Direction>, step: i32, field: &Field) {
        let Some(direction) = direction else {
            return;
        };
        let target = self
            .pos
            .saturating_add(direction.offset().saturating_mul(IVec2::splat(step)));
        self.pos = target.clamp(IVec2::ZERO, field.max_corner(self.size));
    }

    /// Top-left corner for a projectile of `projectile_size` fired from the tank center
    pub fn muzzle(&self, projectile_size: i32) -> Vec2 {
        IVec2::new(
            self.pos.x + self.size / 2 - projectile_size / 2,
            self.pos.y + self.size / 2 - projectile_size / 2,
        )
        .as_vec2()
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            pos: self.pos.as_vec2(),
            size: self.size as f32,
        }
    }
}

/// A randomly wandering enemy tank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: IVec2,
    pub size: i32,
}

impl Enemy {
    pub fn new(pos: IVec2, size: i32) -> Self {
        Self { pos, size }
    }

    /// Spawn at a uniformly random position inside the field
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, size: i32, field: &Field) -> Self {
        let max = field.max_corner(size);
        let x = rng.random_range(0..max.x.max(1));
        let y = rng.random_range(0..max.y.max(1));
        Self::new(IVec2::new(x, y), size)
    }

    /// Roll a fresh direction and move `step` units if the result stays
    /// in the field. A blocked roll leaves the tank in place this tick.
    pub fn wander<R: Rng + ?Sized>(&mut self, rng: &mut R, step: i32, field: &Field) {
        let Some(direction) = Direction::from_index(rng.random_range(0..4)) else {
            return;
        };
        let target = self
            .pos
            .saturating_add(direction.offset().saturating_mul(IVec2::splat(step)));
        if field.contains(target, self.size) {
            self.pos = target;
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            pos: self.pos.as_vec2(),
            size: self.size as f32,
        }
    }
}

/// A shell fired by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub size: f32,
    pub direction: Direction,
    pub speed: f32,
    /// Set when the last advance was blocked by the field edge
    pub stalled: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, size: f32, direction: Direction, speed: f32) -> Self {
        Self {
            pos,
            size,
            direction,
            speed,
            stalled: false,
        }
    }

    /// Travel `speed` units along the firing direction. The shell only moves
    /// if it stays inside the field; otherwise it stalls where it is.
    /// Returns whether it moved.
    pub fn advance(&mut self, field: &Field) -> bool {
        let target = self.pos + self.direction.as_vec2() * self.speed;
        if field.contains_f(target, self.size) {
            self.pos = target;
            self.stalled = false;
        } else {
            self.stalled = true;
        }
        !self.stalled
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Complete authoritative game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Tuning this session was started with
    pub settings: Settings,
    pub field: Field,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
}

impl GameState {
    /// Start a session: player centered, enemies scattered using `rng`
    pub fn new<R: Rng + ?Sized>(settings: &Settings, rng: &mut R) -> Self {
        let settings = settings.validated();
        let field = Field::new(settings.field_width, settings.field_height);
        let player = Player::new(&field, settings.player_size);
        let enemies = (0..settings.enemy_count)
            .map(|_| Enemy::spawn(rng, settings.enemy_size, &field))
            .collect();

        Self {
            settings,
            field,
            time_ticks: 0,
            player,
            enemies,
            projectiles: Vec::new(),
        }
    }

    /// Fire a projectile from the player's center, aimed along the held
    /// direction or, when nothing is held, along the facing direction.
    pub fn spawn_projectile(&mut self) {
        let direction = self.player.held.unwrap_or(self.player.facing);
        let size = self.settings.projectile_size;
        self.projectiles.push(Projectile::new(
            self.player.muzzle(size),
            size as f32,
            direction,
            self.settings.projectile_speed,
        ));
    }

    /// Whether every entity lies fully inside the field
    pub fn all_in_bounds(&self) -> bool {
        self.field.contains(self.player.pos, self.player.size)
            && self
                .enemies
                .iter()
                .all(|e| self.field.contains(e.pos, e.size))
            && self
                .projectiles
                .iter()
                .all(|p| self.field.contains_f(p.pos, p.size))
    }
}
