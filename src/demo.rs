//! Demo scene: a wireframe track ring with ships, markers and a HUD
//!
//! World up is -y. A camera with yaw `a` looks along `(-sin a, 0, cos a)`.

use std::f32::consts::PI;
use softline::rasterizer::{
    wrap_angle, Color, Frame, Mat4, RenderResult, Renderer, TextureHandle, Tris, Vec2i, Vec3,
};

const TRACK_RADIUS: f32 = 20000.0;
const TRACK_SEGMENTS: usize = 96;
const TRACK_HALF_WIDTH: f32 = 600.0;
const CAMERA_HEIGHT: f32 = -350.0;
const MARKER_EVERY: usize = 8;

const TRACK_COLOR: Color = Color::with_alpha(40, 70, 110, 255);
const MARKER_COLOR: Color = Color::with_alpha(120, 110, 30, 255);
const HUD_COLOR: Color = Color::with_alpha(90, 90, 90, 255);

/// Ship racing around the ring, `lead` radians ahead of the camera
struct Ship {
    lead: f32,
    lane: f32,
    color: Color,
}

pub struct DemoScene {
    track: Vec<Tris>,
    ship_model: Vec<Tris>,
    ships: Vec<Ship>,
    markers: Vec<Vec3>,
    reticle: TextureHandle,
    digits: TextureHandle,
}

fn ring_point(angle: f32, offset: f32, height: f32) -> Vec3 {
    let r = TRACK_RADIUS + offset;
    Vec3::new(r * angle.cos(), height, r * angle.sin())
}

fn build_track() -> Vec<Tris> {
    let mut tris = Vec::with_capacity(TRACK_SEGMENTS * 2);
    for i in 0..TRACK_SEGMENTS {
        let a0 = i as f32 / TRACK_SEGMENTS as f32 * PI * 2.0;
        let a1 = (i + 1) as f32 / TRACK_SEGMENTS as f32 * PI * 2.0;
        let in0 = ring_point(a0, -TRACK_HALF_WIDTH, 0.0);
        let out0 = ring_point(a0, TRACK_HALF_WIDTH, 0.0);
        let in1 = ring_point(a1, -TRACK_HALF_WIDTH, 0.0);
        let out1 = ring_point(a1, TRACK_HALF_WIDTH, 0.0);
        tris.push(Tris::flat(in0, out0, out1, TRACK_COLOR));
        tris.push(Tris::flat(in0, out1, in1, TRACK_COLOR));
    }
    tris
}

/// Wedge pointing down +z in model space
fn build_ship(color: Color) -> Vec<Tris> {
    let nose = Vec3::new(0.0, 0.0, 220.0);
    let left = Vec3::new(-140.0, 0.0, -120.0);
    let right = Vec3::new(140.0, 0.0, -120.0);
    let fin = Vec3::new(0.0, -90.0, -100.0);
    vec![
        Tris::flat(nose, left, right, color),
        Tris::flat(nose, left, fin, color),
        Tris::flat(nose, fin, right, color),
        Tris::flat(left, right, fin, color),
    ]
}

/// Square outline pixels for HUD textures
fn outline_pixels(width: u32, height: u32) -> Vec<Color> {
    (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    Color::WHITE
                } else {
                    Color::TRANSPARENT
                }
            })
        })
        .collect()
}

impl DemoScene {
    pub fn new(renderer: &mut Renderer) -> RenderResult<Self> {
        let reticle = renderer.texture_create(16, 16, &outline_pixels(16, 16))?;
        let digits = renderer.texture_create(80, 8, &outline_pixels(80, 8))?;

        let ships = (0..4)
            .map(|i| Ship {
                lead: 0.03 + i as f32 * 0.025,
                lane: if i % 2 == 0 { -250.0 } else { 250.0 },
                color: Color::with_alpha(120, 40 + i as u8 * 20, 40, 255),
            })
            .collect();

        let markers = (0..TRACK_SEGMENTS)
            .step_by(MARKER_EVERY)
            .map(|i| {
                let a = i as f32 / TRACK_SEGMENTS as f32 * PI * 2.0;
                ring_point(a, TRACK_HALF_WIDTH + 200.0, -400.0)
            })
            .collect();

        Ok(Self {
            track: build_track(),
            ship_model: build_ship(Color::WHITE),
            ships,
            markers,
            reticle,
            digits,
        })
    }

    /// Draw one frame. `time` in seconds, `speed` in world units per second.
    pub fn draw(&self, frame: &mut Frame<'_>, time: f32, speed: f32) -> RenderResult<()> {
        let no_texture = frame.no_texture();
        let cam_angle = wrap_angle(time * speed / TRACK_RADIUS);
        let cam_pos = ring_point(cam_angle, 0.0, CAMERA_HEIGHT);
        let cam_angles = Vec3::new(0.0, cam_angle, 0.0);

        // 3D pass
        frame.set_view(cam_pos, cam_angles);
        for tris in &self.track {
            frame.push_tris(*tris, no_texture)?;
        }

        for marker in &self.markers {
            frame.push_sprite(*marker, Vec2i::new(160, 160), MARKER_COLOR, no_texture)?;
        }

        let mut target = None;
        for (i, ship) in self.ships.iter().enumerate() {
            let bob = (time * 2.0 + i as f32).sin() * 30.0;
            let angle = cam_angle + ship.lead;
            let pos = ring_point(angle, ship.lane, -120.0 + bob);

            let mut model = Mat4::IDENTITY;
            model.set_roll_pitch_yaw(Vec3::new(0.0, angle, (time + i as f32).sin() * 0.2));
            model.set_translation(pos);
            frame.set_model_mat(&model);
            for tris in &self.ship_model {
                let mut tris = *tris;
                for v in &mut tris.vertices {
                    v.color = ship.color;
                }
                frame.push_tris(tris, no_texture)?;
            }

            if target.is_none() {
                target = Some(pos);
            }
        }

        // Reticle needs the 3D view, so project before switching to 2D
        let reticle_at = match target {
            Some(pos) if frame.transform(pos).z < 1.0 => Some(frame.project_to_screen(pos)),
            _ => None,
        };

        // HUD pass
        frame.set_view_2d();
        let size = frame.size();

        if let Some(p) = reticle_at {
            let reticle_size = frame.texture_size(self.reticle)?;
            let pos = Vec2i::new(p.x - reticle_size.x / 2, p.y - reticle_size.y / 2);
            frame.push_2d(pos, reticle_size, Color::with_alpha(128, 30, 30, 128), self.reticle)?;
        }

        // Speed bar
        let bar_max = size.x / 3;
        let fill = ((time * 0.7).sin() * 0.5 + 0.5) * bar_max as f32;
        frame.push_2d(Vec2i::new(8, size.y - 16), Vec2i::new(bar_max, 8), HUD_COLOR, no_texture)?;
        frame.push_2d(Vec2i::new(8, size.y - 14), Vec2i::new(fill as i32, 4), MARKER_COLOR, no_texture)?;

        // Lap counter tiles from the digit strip
        let lap = ((time * speed) / (TRACK_RADIUS * PI * 2.0)) as i32;
        for (i, digit) in [lap / 10 % 10, lap % 10].into_iter().enumerate() {
            frame.push_2d_tile(
                Vec2i::new(size.x - 28 + i as i32 * 10, 8),
                Vec2i::new(digit * 8, 0),
                Vec2i::new(8, 8),
                Vec2i::new(8, 8),
                HUD_COLOR,
                self.digits,
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use softline::rasterizer::Framebuffer;

    #[test]
    fn test_track_is_closed_ring() {
        let track = build_track();
        assert_eq!(track.len(), TRACK_SEGMENTS * 2);
        let first = track[0].vertices[0].pos;
        let last = track[track.len() - 1].vertices[2].pos;
        assert!((first - last).len() < 1.0);
    }

    #[test]
    fn test_camera_faces_along_track() {
        let mut r = Renderer::new(Vec2i::new(320, 240)).unwrap();
        let a = 0.7;
        let cam = ring_point(a, 0.0, CAMERA_HEIGHT);
        r.set_view(cam, Vec3::new(0.0, a, 0.0));
        let ahead = ring_point(a + 0.01, 0.0, CAMERA_HEIGHT);
        let behind = ring_point(a - 0.01, 0.0, CAMERA_HEIGHT);
        assert!(r.transform(ahead).z < 1.0);
        assert!(r.transform(behind).z >= 1.0);
    }

    #[test]
    fn test_scene_draws_something() {
        let mut r = Renderer::new(Vec2i::new(320, 240)).unwrap();
        let scene = DemoScene::new(&mut r).unwrap();
        let mut fb = Framebuffer::new(320, 240);
        let mut frame = r.frame_prepare(&mut fb.pixels, fb.stride).unwrap();
        scene.draw(&mut frame, 1.5, 2400.0).unwrap();
        let stats = frame.end();
        assert!(stats.tris_submitted > TRACK_SEGMENTS * 2);
        assert!(stats.pixels_written > 0);
    }
}
