//! Pixel storage for software rendering
//!
//! `Framebuffer` is owned by the platform layer and presented once per frame.
//! `FrameTarget` is the borrowed view the renderer draws into between
//! `frame_prepare` and `Frame::end`.

use super::clip::clip_line;
use super::math::Vec2i;
use super::types::Color;

/// Framebuffer for software rendering (RGBA8, `stride` pixels per row)
pub struct Framebuffer {
    pub pixels: Vec<Color>,
    pub width: usize,
    pub height: usize,
    pub stride: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![Color::BLACK; width * height],
            width,
            height,
            stride: width,
        }
    }

    /// Resize if needed. Contents are undefined afterwards.
    pub fn resize(&mut self, width: usize, height: usize) {
        if self.width != width || self.height != height {
            self.width = width;
            self.height = height;
            self.stride = width;
            self.pixels = vec![Color::BLACK; width * height];
        }
    }

    pub fn size(&self) -> Vec2i {
        Vec2i::new(self.width as i32, self.height as i32)
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.stride + x])
        } else {
            None
        }
    }

    /// Raw RGBA bytes, ready for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

/// Borrowed drawing surface, valid for one frame
pub struct FrameTarget<'a> {
    pixels: &'a mut [Color],
    stride: usize,
    size: Vec2i,
    pixels_written: usize,
}

impl<'a> FrameTarget<'a> {
    /// Caller guarantees `pixels` holds `size` rows of `stride` pixels
    pub(crate) fn new(pixels: &'a mut [Color], stride: usize, size: Vec2i) -> Self {
        Self {
            pixels,
            stride,
            size,
            pixels_written: 0,
        }
    }

    /// Pixels needed to hold `size` with the given stride
    pub(crate) fn required_len(size: Vec2i, stride: usize) -> usize {
        if size.x <= 0 || size.y <= 0 {
            return 0;
        }
        (size.y as usize - 1) * stride + size.x as usize
    }

    pub fn size(&self) -> Vec2i {
        self.size
    }

    pub fn pixels_written(&self) -> usize {
        self.pixels_written
    }

    pub fn clear(&mut self, color: Color) {
        let width = self.size.x.max(0) as usize;
        for y in 0..self.size.y.max(0) as usize {
            let row = y * self.stride;
            self.pixels[row..row + width].fill(color);
        }
    }

    #[inline]
    fn blend_at(&mut self, x: i32, y: i32, color: Color) {
        let idx = y as usize * self.stride + x as usize;
        self.pixels[idx] = self.pixels[idx].blend(color);
        self.pixels_written += 1;
    }

    /// Clip to the screen, then rasterize with Bresenham and alpha blending.
    /// Returns false if the segment was clipped away entirely.
    pub fn draw_line(&mut self, p0: Vec2i, p1: Vec2i, color: Color) -> bool {
        let Some((mut p0, mut p1)) = clip_line(p0, p1, self.size) else {
            return false;
        };

        let steep = (p0.x - p1.x).abs() < (p0.y - p1.y).abs();
        if steep {
            std::mem::swap(&mut p0.x, &mut p0.y);
            std::mem::swap(&mut p1.x, &mut p1.y);
        }
        if p0.x > p1.x {
            std::mem::swap(&mut p0, &mut p1);
        }

        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;
        let derror2 = dy.abs() * 2;
        let mut error2 = 0;
        let mut y = p0.y;
        let ydir = if p1.y > p0.y { 1 } else { -1 };

        for x in p0.x..=p1.x {
            if steep {
                self.blend_at(y, x, color);
            } else {
                self.blend_at(x, y, color);
            }
            error2 += derror2;
            if error2 > dx {
                y += ydir;
                error2 -= dx * 2;
            }
        }
        true
    }
}
