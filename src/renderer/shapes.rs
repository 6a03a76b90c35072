//! Shape generation for 2D primitives
//!
//! Converts snapshots into triangle lists in normalized device coordinates
//! (x right, y up, both in `[-1, 1]`).

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::sim::{Aabb, Field, Snapshot};

/// A complete frame: clear color plus every filled square
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub clear_color: [f32; 4],
    pub vertices: Vec<Vertex>,
}

impl Frame {
    /// Raw bytes for a vertex buffer upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Map a field-space point (origin top-left, y down) to NDC
fn to_ndc(point: Vec2, field: &Field) -> Vec2 {
    let extent = Vec2::new(field.width as f32, field.height as f32);
    let unit = point / extent;
    Vec2::new(unit.x * 2.0 - 1.0, 1.0 - unit.y * 2.0)
}

/// Two triangles covering a square in field space
pub fn filled_square(square: &Aabb, field: &Field, color: [f32; 4]) -> [Vertex; 6] {
    let tl = to_ndc(square.min(), field);
    let br = to_ndc(square.max(), field);

    [
        Vertex::new(tl.x, tl.y, color),
        Vertex::new(br.x, tl.y, color),
        Vertex::new(tl.x, br.y, color),
        Vertex::new(br.x, tl.y, color),
        Vertex::new(br.x, br.y, color),
        Vertex::new(tl.x, br.y, color),
    ]
}

/// Build the frame for a snapshot: player, then enemies, then projectiles
pub fn frame(snapshot: &Snapshot) -> Frame {
    let field = &snapshot.field;
    let count = 1 + snapshot.enemies.len() + snapshot.projectiles.len();
    let mut vertices = Vec::with_capacity(count * 6);

    vertices.extend(filled_square(&snapshot.player, field, colors::PLAYER));
    for enemy in &snapshot.enemies {
        vertices.extend(filled_square(enemy, field, colors::ENEMY));
    }
    for projectile in &snapshot.projectiles {
        vertices.extend(filled_square(projectile, field, colors::PROJECTILE));
    }

    Frame {
        clear_color: colors::BACKGROUND,
        vertices,
    }
}
