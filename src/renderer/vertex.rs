//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const PLAYER: [f32; 4] = [0.0, 0.5, 0.0, 1.0]; // Green
    pub const ENEMY: [f32; 4] = [1.0, 0.0, 0.0, 1.0]; // Red
    pub const PROJECTILE: [f32; 4] = [0.0, 0.0, 0.0, 1.0]; // Black
    pub const BACKGROUND: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}
