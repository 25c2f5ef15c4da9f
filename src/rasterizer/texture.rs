//! Texture registry
//!
//! A fixed-capacity table of texture dimensions. Handles are dense indices
//! handed out in creation order. This backend never samples, so pixel data
//! passed in is not retained.

use std::path::Path;
use super::error::{RenderError, RenderResult};
use super::math::Vec2i;
use super::types::Color;
use super::TEXTURES_MAX;

/// Index into the texture registry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(u16);

impl TextureHandle {
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    pub const fn index(self) -> u16 {
        self.0
    }
}

/// Registered texture entry (dimensions only)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct TextureEntry {
    size: Vec2i,
}

pub struct TextureRegistry {
    entries: Box<[TextureEntry]>,
    len: usize,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::with_capacity(TEXTURES_MAX)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        // Handles are u16
        let capacity = capacity.min(u16::MAX as usize + 1);
        Self {
            entries: vec![TextureEntry::default(); capacity].into_boxed_slice(),
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Register a texture and return its handle.
    /// `pixels` is accepted for interface parity; only the size is kept.
    pub fn create(&mut self, width: u32, height: u32, _pixels: &[Color]) -> RenderResult<TextureHandle> {
        if self.len >= self.capacity() {
            return Err(RenderError::TexturesFull(self.capacity()));
        }

        let handle = TextureHandle(self.len as u16);
        self.entries[self.len] = TextureEntry {
            size: Vec2i::new(
                i32::try_from(width).unwrap_or(i32::MAX),
                i32::try_from(height).unwrap_or(i32::MAX),
            ),
        };
        self.len += 1;
        log::debug!("texture {} created ({}x{})", handle.0, width, height);
        Ok(handle)
    }

    pub fn validate(&self, handle: TextureHandle) -> RenderResult<()> {
        if (handle.0 as usize) < self.len {
            Ok(())
        } else {
            Err(RenderError::InvalidTexture(handle.0))
        }
    }

    pub fn size(&self, handle: TextureHandle) -> RenderResult<Vec2i> {
        self.validate(handle)?;
        Ok(self.entries[handle.0 as usize].size)
    }

    /// No stored pixels to replace; only the handle is checked
    pub fn replace_pixels(&mut self, handle: TextureHandle, _pixels: &[Color]) -> RenderResult<()> {
        self.validate(handle)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Shrink the table to `len` entries. Growing through reset is an error.
    pub fn reset(&mut self, len: usize) -> RenderResult<()> {
        if len > self.len {
            return Err(RenderError::InvalidReset { len, current: self.len });
        }
        log::debug!("textures reset {} -> {}", self.len, len);
        self.len = len;
        Ok(())
    }

    /// Nothing to write for a dimensions-only backend
    pub fn dump<P: AsRef<Path>>(&self, path: P) {
        log::debug!("texture dump to {} skipped", path.as_ref().display());
    }
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}
