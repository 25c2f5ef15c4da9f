//! Software line rasterizer
//!
//! Features:
//! - Homogeneous 4x4 transforms with a fixed-FOV perspective projection
//! - Far-plane rejection of whole triangles (no frustum splitting)
//! - Cohen-Sutherland clipping of every edge to the screen rectangle
//! - Bresenham lines with straight alpha blending
//! - Linear distance fog via the edge color's alpha
//!
//! There is no polygon fill, texture sampling, or depth buffer.

mod clip;
mod error;
mod framebuffer;
mod math;
mod render;
mod texture;
mod transform;
mod types;

pub use clip::*;
pub use error::*;
pub use framebuffer::*;
pub use math::*;
pub use render::*;
pub use texture::*;
pub use transform::*;
pub use types::*;

/// Default render resolution
pub const WIDTH: usize = 320;
pub const HEIGHT: usize = 240;

pub const NEAR_PLANE: f32 = 16.0;

/// Distance at which geometry has faded out completely
pub const FADEOUT_FAR: f32 = 64000.0;

pub const FAR_PLANE: f32 = FADEOUT_FAR;

/// Vertical field of view
pub const FOV_DEGREES: f32 = 73.75;

/// Texture registry capacity
pub const TEXTURES_MAX: usize = 1024;
