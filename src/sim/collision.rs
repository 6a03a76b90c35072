//! Axis-aligned box collision
//!
//! Every entity in the arena is a square, so all hit tests reduce to
//! comparing the four edges of two boxes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned square in field coordinates (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, size: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size)
    }
}

/// Check whether two boxes overlap
///
/// Boundaries are inclusive on all four edges: boxes that only touch along
/// an edge or a corner count as intersecting.
#[inline]
pub fn intersects(a: &Aabb, b: &Aabb) -> bool {
    a.max().x >= b.min().x
        && a.min().x <= b.max().x
        && a.max().y >= b.min().y
        && a.min().y <= b.max().y
}
