//! Shape generation for 2D primitives
//!
//! Vertices are emitted in screen pixels (y down); the pipeline maps them to
//! clip space.

use std::f32::consts::TAU;

use super::scene::{Scene, SpriteShape};
use super::vertex::{Vertex, rgba};
use crate::sim::Rect;

/// Segments used for the ball disc
const DISC_SEGMENTS: u32 = 24;

/// Two triangles covering `rect`
pub fn quad(rect: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    let (l, t) = (rect.left() as f32, rect.top() as f32);
    let (r, b) = (rect.right() as f32, rect.bottom() as f32);
    [
        Vertex::new(l, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, b, color),
    ]
}

/// Generate vertices for a filled circle inscribed in `rect`
pub fn disc(rect: &Rect, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let cx = rect.left() as f32 + rect.width as f32 / 2.0;
    let cy = rect.top() as f32 + rect.height as f32 / 2.0;
    let radius = rect.width.min(rect.height) as f32 / 2.0;
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        // Triangle from center to edge
        vertices.push(Vertex::new(cx, cy, color));
        vertices.push(Vertex::new(
            cx + radius * theta1.cos(),
            cy + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            cx + radius * theta2.cos(),
            cy + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// All sprites of a scene, in draw order
pub fn scene_vertices(scene: &Scene) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(scene.sprites.len() * 6 + DISC_SEGMENTS as usize * 3);
    for sprite in &scene.sprites {
        let color = rgba(sprite.color);
        match sprite.shape {
            SpriteShape::Box => vertices.extend_from_slice(&quad(&sprite.rect, color)),
            SpriteShape::Disc => vertices.extend(disc(&sprite.rect, color, DISC_SEGMENTS)),
        }
    }
    vertices
}
