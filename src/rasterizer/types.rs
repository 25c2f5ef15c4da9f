//! Core types for the rasterizer

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use super::math::{Vec2, Vec3};

/// RGBA color (0-255 per channel), laid out exactly like an RGBA8 pixel
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const GRAY: Color = Color { r: 128, g: 128, b: 128, a: 255 };
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Double each RGB channel, saturating at 255
    pub fn brighten(self) -> Self {
        Self {
            r: self.r.saturating_mul(2),
            g: self.g.saturating_mul(2),
            b: self.b.saturating_mul(2),
            a: self.a,
        }
    }

    /// Straight alpha compositing of `src` over `self`.
    /// Output alpha is always opaque.
    pub fn blend(self, src: Color) -> Color {
        let t = src.a as f32 / 255.0;
        let mix = |dst: u8, src: u8| (dst as f32 + (src as f32 - dst as f32) * t) as u8;
        Color {
            r: mix(self.r, src.r),
            g: mix(self.g, src.g),
            b: mix(self.b, src.b),
            a: 255,
        }
    }
}

/// A vertex with position, texture coordinate, and color
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vertex {
    pub pos: Vec3,
    pub uv: Vec2,
    pub color: Color,
}

impl Vertex {
    pub const fn new(pos: Vec3, uv: Vec2, color: Color) -> Self {
        Self { pos, uv, color }
    }
}

/// Exactly three vertices, built per draw call
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tris {
    pub vertices: [Vertex; 3],
}

impl Tris {
    pub const fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self { vertices: [v0, v1, v2] }
    }

    /// Flat-colored triangle from three positions
    pub const fn flat(p0: Vec3, p1: Vec3, p2: Vec3, color: Color) -> Self {
        let uv = Vec2::new(0.0, 0.0);
        Self {
            vertices: [
                Vertex::new(p0, uv, color),
                Vertex::new(p1, uv, color),
                Vertex::new(p2, uv, color),
            ],
        }
    }
}
