//! View, projection, and model transforms
//!
//! `mvp` is recomputed by `set_model_mat`. `set_view` ends by resetting the
//! model matrix to identity so the composition is never stale after a view
//! change. `set_view_2d` replaces `mvp` outright with a pixel-space mapping.

use std::f32::consts::PI;
use super::math::{Mat4, Vec2i, Vec3};
use super::{FAR_PLANE, FOV_DEGREES, NEAR_PLANE};

pub struct Transforms {
    screen_size: Vec2i,
    projection: Mat4,
    view: Mat4,
    sprite: Mat4,
    mvp: Mat4,
}

impl Transforms {
    pub fn new(screen_size: Vec2i) -> Self {
        let mut t = Self {
            screen_size,
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            sprite: Mat4::IDENTITY,
            mvp: Mat4::IDENTITY,
        };
        t.set_screen_size(screen_size);
        t
    }

    pub fn screen_size(&self) -> Vec2i {
        self.screen_size
    }

    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    pub fn view(&self) -> &Mat4 {
        &self.view
    }

    pub fn sprite(&self) -> &Mat4 {
        &self.sprite
    }

    pub fn mvp(&self) -> &Mat4 {
        &self.mvp
    }

    /// Store the new size and rebuild the perspective projection.
    /// Only the horizontal term depends on the aspect ratio.
    pub fn set_screen_size(&mut self, size: Vec2i) {
        self.screen_size = size;
        self.projection = perspective(size.x as f32 / size.y as f32);
    }

    pub fn set_view(&mut self, pos: Vec3, angles: Vec3) {
        self.view = Mat4::IDENTITY;
        self.view.set_roll_pitch_yaw(Vec3::new(angles.x, -angles.y + PI, angles.z + PI));
        self.view.translate(-pos);

        self.sprite.set_yaw_pitch_roll(Vec3::new(-angles.x, angles.y - PI, 0.0));

        self.set_model_mat(&Mat4::IDENTITY);
    }

    /// Map pixel coordinates (top-left origin) straight to NDC
    pub fn set_view_2d(&mut self) {
        let near = -1.0;
        let far = 1.0;
        let left = 0.0;
        let right = self.screen_size.x as f32;
        let bottom = self.screen_size.y as f32;
        let top = 0.0;
        let lr = 1.0 / (left - right);
        let bt = 1.0 / (bottom - top);
        let nf = 1.0 / (near - far);
        self.mvp = Mat4::from_cols([
            -2.0 * lr, 0.0, 0.0, 0.0,
            0.0, -2.0 * bt, 0.0, 0.0,
            0.0, 0.0, 2.0 * nf, 0.0,
            (left + right) * lr, (top + bottom) * bt, (far + near) * nf, 1.0,
        ]);
    }

    pub fn set_model_mat(&mut self, model: &Mat4) {
        self.mvp = self.projection * (self.view * *model);
    }

    /// World point to NDC through view and projection (model ignored).
    /// Screen position is `((x + 1) / 2 * width, (1 - y) / 2 * height)`.
    pub fn transform(&self, pos: Vec3) -> Vec3 {
        self.projection.transform_point(self.view.transform_point(pos))
    }
}

fn perspective(aspect: f32) -> Mat4 {
    let fov = FOV_DEGREES / 180.0 * PI;
    let f = 1.0 / (fov / 2.0).tan();
    let nf = 1.0 / (NEAR_PLANE - FAR_PLANE);
    Mat4::from_cols([
        f / aspect, 0.0, 0.0, 0.0,
        0.0, f, 0.0, 0.0,
        0.0, 0.0, (FAR_PLANE + NEAR_PLANE) * nf, -1.0,
        0.0, 0.0, 2.0 * FAR_PLANE * NEAR_PLANE * nf, 0.0,
    ])
}
