//! Softline: software line renderer for a 3D racing scene
//!
//! Draws wireframe geometry straight into a raw RGBA pixel buffer with no
//! GPU involvement:
//! - 4x4 homogeneous transforms and fixed-FOV perspective
//! - Cohen-Sutherland clipping and Bresenham lines
//! - Distance fog through alpha blending
//!
//! Per frame: `Renderer::frame_prepare` -> `set_view` / `set_view_2d` ->
//! `set_model_mat` + `push_*` per object -> `Frame::end`.

pub mod assets;
pub mod config;
pub mod logging;
pub mod rasterizer;

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
