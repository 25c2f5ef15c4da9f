//! Render configuration
//!
//! Uses RON (Rusty Object Notation) for a human-readable settings file.

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::rasterizer::{Color, HEIGHT, WIDTH};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Internal framebuffer resolution
    pub width: u32,
    pub height: u32,
    /// Window pixels per framebuffer pixel
    pub window_scale: u32,
    pub clear_color: Color,
    /// env_logger filter, e.g. "debug" or "softline=trace"
    pub log_filter: Option<String>,
    /// PNGs in this directory are registered as textures at startup
    pub texture_dir: Option<PathBuf>,
    /// Demo camera speed in world units per second
    pub camera_speed: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: WIDTH as u32,
            height: HEIGHT as u32,
            window_scale: 3,
            clear_color: Color::BLACK,
            log_filter: None,
            texture_dir: None,
            camera_speed: 2400.0,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
}

/// Load a config from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RenderConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    load_config_from_str(&contents)
}

/// Load a config from a RON string
pub fn load_config_from_str(s: &str) -> Result<RenderConfig, ConfigError> {
    Ok(ron::from_str(s)?)
}

/// Save a config to a RON file
pub fn save_config<P: AsRef<Path>>(config: &RenderConfig, path: P) -> Result<(), ConfigError> {
    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(config, pretty)?;
    fs::write(path, contents)?;
    Ok(())
}
