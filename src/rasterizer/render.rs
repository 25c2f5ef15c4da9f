//! Renderer state and primitive submission
//!
//! Triangles are drawn as three clipped line segments in a single flat,
//! fog-faded color. There is no fill, no texture sampling, and no depth
//! test: later submissions draw over earlier ones, so draw order is up to
//! the caller.

use std::ops::Deref;
use std::path::Path;

use super::error::{RenderError, RenderResult};
use super::framebuffer::FrameTarget;
use super::math::{Mat4, Vec2, Vec2i, Vec3};
use super::texture::{TextureHandle, TextureRegistry};
use super::transform::Transforms;
use super::types::{Color, Tris, Vertex};
use super::FAR_PLANE;

/// Counters for one frame, returned by `Frame::end`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub tris_submitted: usize,
    /// Dropped whole because a vertex reached the far plane
    pub tris_rejected: usize,
    pub lines_submitted: usize,
    pub lines_clipped: usize,
    pub pixels_written: usize,
}

/// Process-wide renderer state: transforms and the texture table
pub struct Renderer {
    transforms: Transforms,
    textures: TextureRegistry,
    no_texture: TextureHandle,
    clear_color: Color,
}

impl Renderer {
    pub fn new(screen_size: Vec2i) -> RenderResult<Self> {
        Self::with_registry(screen_size, TextureRegistry::new())
    }

    /// Start from a caller-provided (usually empty) registry.
    /// The gray placeholder texture is registered first.
    pub fn with_registry(screen_size: Vec2i, mut textures: TextureRegistry) -> RenderResult<Self> {
        let gray = [Color::GRAY; 4];
        let no_texture = textures.create(2, 2, &gray)?;
        log::info!("renderer initialized at {}x{}", screen_size.x, screen_size.y);
        Ok(Self {
            transforms: Transforms::new(screen_size),
            textures,
            no_texture,
            clear_color: Color::BLACK,
        })
    }

    /// Handle of the placeholder used for flat-colored geometry
    pub fn no_texture(&self) -> TextureHandle {
        self.no_texture
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    pub fn transforms(&self) -> &Transforms {
        &self.transforms
    }

    pub fn size(&self) -> Vec2i {
        self.transforms.screen_size()
    }

    pub fn set_screen_size(&mut self, size: Vec2i) {
        log::info!("screen size set to {}x{}", size.x, size.y);
        self.transforms.set_screen_size(size);
    }

    pub fn set_view(&mut self, pos: Vec3, angles: Vec3) {
        self.transforms.set_view(pos, angles);
    }

    pub fn set_view_2d(&mut self) {
        self.transforms.set_view_2d();
    }

    pub fn set_model_mat(&mut self, model: &Mat4) {
        self.transforms.set_model_mat(model);
    }

    /// Project a world point into the rasterizer's normalized space
    pub fn transform(&self, pos: Vec3) -> Vec3 {
        self.transforms.transform(pos)
    }

    /// Screen pixel for a world point, as used for HUD markers
    pub fn project_to_screen(&self, pos: Vec3) -> Vec2i {
        let p = self.transform(pos);
        let size = self.size();
        Vec2i::new(
            ((p.x + 1.0) / 2.0 * size.x as f32) as i32,
            ((1.0 - p.y) / 2.0 * size.y as f32) as i32,
        )
    }

    pub fn texture_create(&mut self, width: u32, height: u32, pixels: &[Color]) -> RenderResult<TextureHandle> {
        self.textures.create(width, height, pixels)
    }

    pub fn texture_size(&self, handle: TextureHandle) -> RenderResult<Vec2i> {
        self.textures.size(handle)
    }

    pub fn texture_replace_pixels(&mut self, handle: TextureHandle, pixels: &[Color]) -> RenderResult<()> {
        self.textures.replace_pixels(handle, pixels)
    }

    pub fn textures_len(&self) -> usize {
        self.textures.len()
    }

    pub fn textures_reset(&mut self, len: usize) -> RenderResult<()> {
        self.textures.reset(len)
    }

    pub fn textures_dump<P: AsRef<Path>>(&self, path: P) {
        self.textures.dump(path);
    }

    /// Begin a frame on a platform-owned buffer of `stride` pixels per row.
    /// The visible area is cleared; the buffer stays borrowed until `Frame::end`.
    pub fn frame_prepare<'a>(&'a mut self, pixels: &'a mut [Color], stride: usize) -> RenderResult<Frame<'a>> {
        let size = self.size();
        if stride < size.x.max(0) as usize || pixels.len() < FrameTarget::required_len(size, stride) {
            return Err(RenderError::BufferTooSmall {
                len: pixels.len(),
                width: size.x,
                height: size.y,
                stride,
            });
        }

        let mut target = FrameTarget::new(pixels, stride, size);
        target.clear(self.clear_color);
        Ok(Frame {
            renderer: self,
            target,
            stats: FrameStats::default(),
        })
    }
}

/// One frame's drawing session. Dereferences to `Renderer` for queries;
/// only view and model changes are allowed between submissions, so the
/// screen size stays fixed until `end`.
pub struct Frame<'a> {
    renderer: &'a mut Renderer,
    target: FrameTarget<'a>,
    stats: FrameStats,
}

impl Deref for Frame<'_> {
    type Target = Renderer;
    fn deref(&self) -> &Renderer {
        &*self.renderer
    }
}

impl Frame<'_> {
    /// Size of the buffer being drawn to
    pub fn size(&self) -> Vec2i {
        self.target.size()
    }

    pub fn set_view(&mut self, pos: Vec3, angles: Vec3) {
        self.renderer.set_view(pos, angles);
    }

    pub fn set_view_2d(&mut self) {
        self.renderer.set_view_2d();
    }

    pub fn set_model_mat(&mut self, model: &Mat4) {
        self.renderer.set_model_mat(model);
    }

    pub fn stats(&self) -> FrameStats {
        FrameStats {
            pixels_written: self.target.pixels_written(),
            ..self.stats
        }
    }

    /// Release the buffer back to the platform
    pub fn end(self) -> FrameStats {
        let stats = self.stats();
        log::trace!("frame end: {:?}", stats);
        stats
    }

    pub fn push_tris(&mut self, tris: Tris, texture: TextureHandle) -> RenderResult<()> {
        self.renderer.textures.validate(texture)?;
        self.stats.tris_submitted += 1;

        let mvp = *self.renderer.transforms.mvp();
        let [v0, v1, v2] = tris.vertices;
        let p0 = mvp.transform_point(v0.pos);
        let p1 = mvp.transform_point(v1.pos);
        let p2 = mvp.transform_point(v2.pos);
        if p0.z >= 1.0 || p1.z >= 1.0 || p2.z >= 1.0 {
            self.stats.tris_rejected += 1;
            return Ok(());
        }

        let size = self.target.size();
        let sc0 = to_screen(p0, size);
        let sc1 = to_screen(p1, size);
        let sc2 = to_screen(p2, size);

        let color = fog_color(v0.color, p0.z);

        for (a, b) in [(sc0, sc1), (sc1, sc2), (sc2, sc0)] {
            self.stats.lines_submitted += 1;
            if !self.target.draw_line(a, b, color) {
                self.stats.lines_clipped += 1;
            }
        }
        Ok(())
    }

    /// Camera-facing quad of `size` centred on `pos`
    pub fn push_sprite(&mut self, pos: Vec3, size: Vec2i, color: Color, texture: TextureHandle) -> RenderResult<()> {
        let tex_size = self.renderer.textures.size(texture)?;
        let sprite = *self.renderer.transforms.sprite();

        let hx = size.x as f32 * 0.5;
        let hy = size.y as f32 * 0.5;
        let corner = |x: f32, y: f32| pos + sprite.transform_point(Vec3::new(x, y, 0.0));
        let p0 = corner(-hx, -hy);
        let p1 = corner(hx, -hy);
        let p2 = corner(-hx, hy);
        let p3 = corner(hx, hy);

        let (u, v) = (tex_size.x as f32, tex_size.y as f32);
        self.push_tris(
            Tris::new(
                Vertex::new(p0, Vec2::new(0.0, 0.0), color),
                Vertex::new(p1, Vec2::new(u, 0.0), color),
                Vertex::new(p2, Vec2::new(0.0, v), color),
            ),
            texture,
        )?;
        self.push_tris(
            Tris::new(
                Vertex::new(p2, Vec2::new(0.0, v), color),
                Vertex::new(p1, Vec2::new(u, 0.0), color),
                Vertex::new(p3, Vec2::new(u, v), color),
            ),
            texture,
        )
    }

    /// Screen-space quad covering the whole texture
    pub fn push_2d(&mut self, pos: Vec2i, size: Vec2i, color: Color, texture: TextureHandle) -> RenderResult<()> {
        let uv_size = self.renderer.textures.size(texture)?;
        self.push_2d_tile(pos, Vec2i::new(0, 0), uv_size, size, color, texture)
    }

    /// Screen-space quad covering a sub-rectangle of the texture
    pub fn push_2d_tile(
        &mut self,
        pos: Vec2i,
        uv_offset: Vec2i,
        uv_size: Vec2i,
        size: Vec2i,
        color: Color,
        texture: TextureHandle,
    ) -> RenderResult<()> {
        self.renderer.textures.validate(texture)?;

        let (x0, y0) = (pos.x as f32, pos.y as f32);
        let (x1, y1) = (x0 + size.x as f32, y0 + size.y as f32);
        let (u0, v0) = (uv_offset.x as f32, uv_offset.y as f32);
        let (u1, v1) = (u0 + uv_size.x as f32, v0 + uv_size.y as f32);

        self.push_tris(
            Tris::new(
                Vertex::new(Vec3::new(x0, y1, 0.0), Vec2::new(u0, v1), color),
                Vertex::new(Vec3::new(x1, y0, 0.0), Vec2::new(u1, v0), color),
                Vertex::new(Vec3::new(x0, y0, 0.0), Vec2::new(u0, v0), color),
            ),
            texture,
        )?;
        self.push_tris(
            Tris::new(
                Vertex::new(Vec3::new(x1, y1, 0.0), Vec2::new(u1, v1), color),
                Vertex::new(Vec3::new(x1, y0, 0.0), Vec2::new(u1, v0), color),
                Vertex::new(Vec3::new(x0, y1, 0.0), Vec2::new(u0, v1), color),
            ),
            texture,
        )
    }
}

/// NDC to pixel coordinates, Y flipped for a top-left origin
fn to_screen(p: Vec3, size: Vec2i) -> Vec2i {
    let w2 = size.x as f32 * 0.5;
    let h2 = size.y as f32 * 0.5;
    Vec2i::new((p.x * w2 + w2) as i32, (h2 - p.y * h2) as i32)
}

/// Brighten `base` and fade its alpha linearly toward the far plane
fn fog_color(base: Color, z: f32) -> Color {
    let alpha = base.a as f32 * (1.0 - z) * FAR_PLANE * (2.0 / 255.0);
    Color {
        a: alpha.clamp(0.0, 255.0) as u8,
        ..base.brighten()
    }
}
