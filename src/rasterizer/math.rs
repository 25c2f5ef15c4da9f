//! Vector and matrix math for the transform pipeline
//!
//! Matrices are 4x4, column-major, and transform column vectors
//! (`p' = M * p`). Two Euler-angle constructors exist and they are NOT
//! interchangeable: the view matrix uses `set_roll_pitch_yaw`, billboards
//! use `set_yaw_pitch_roll`.

use std::f32::consts::PI;
use std::ops::{Add, Div, Mul, Neg, Sub};
use serde::{Serialize, Deserialize};

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction. Callers must not pass a zero vector;
    /// it comes back as zero rather than NaN.
    pub fn normalize(self) -> Vec3 {
        let l = self.len();
        if l == 0.0 {
            return Vec3::ZERO;
        }
        self / l
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    pub fn lerp(self, other: Vec3, t: f32) -> Vec3 {
        Vec3 {
            x: self.x + t * (other.x - self.x),
            y: self.y + t * (other.y - self.y),
            z: self.z + t * (other.z - self.z),
        }
    }

    /// Angle between two vectors in radians (0 if either is zero)
    pub fn angle(self, other: Vec3) -> f32 {
        let magnitude = (self.dot(self) * other.dot(other)).sqrt();
        let cosine = if magnitude == 0.0 {
            1.0
        } else {
            self.dot(other) / magnitude
        };
        cosine.clamp(-1.0, 1.0).acos()
    }

    /// Wrap every component into (-PI, PI]
    pub fn wrap_angle(self) -> Vec3 {
        Vec3::new(wrap_angle(self.x), wrap_angle(self.y), wrap_angle(self.z))
    }

    /// Closest point to `self` on the infinite line through `r0` and `r1`
    pub fn project_to_ray(self, r0: Vec3, r1: Vec3) -> Vec3 {
        let ray = (r1 - r0).normalize();
        let dp = (self - r0).dot(ray);
        r0 + ray * dp
    }

    /// Signed distance along `plane_normal` from `self` to the plane
    pub fn distance_to_plane(self, plane_pos: Vec3, plane_normal: Vec3) -> f32 {
        (plane_pos - self).dot(plane_normal) / plane_normal.dot(plane_normal)
    }

    /// Reflect `self` off a surface; `f` = 1 slides along it, 2 mirrors it
    pub fn reflect(self, normal: Vec3, f: f32) -> Vec3 {
        self + normal * (normal.dot(-self) * f)
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

/// Componentwise product
impl Mul for Vec3 {
    type Output = Vec3;
    fn mul(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x * other.x,
            y: self.y * other.y,
            z: self.z * other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        self.scale(s)
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;
    fn div(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x / s,
            y: self.y / s,
            z: self.z / s,
        }
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        Vec3 {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

/// 2D Vector (for texture coordinates)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Integer 2D vector (screen positions and sizes)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vec2i {
    pub x: i32,
    pub y: i32,
}

impl Vec2i {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Wrap an angle into (-PI, PI]
pub fn wrap_angle(a: f32) -> f32 {
    let wrapped = (a + PI).rem_euclid(PI * 2.0) - PI;
    if wrapped <= -PI {
        PI
    } else {
        wrapped
    }
}

/// 4x4 matrix, column-major (`m[col * 4 + row]`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub m: [f32; 16],
}

impl Default for Mat4 {
    fn default() -> Self {
        Mat4::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Build from 16 values listed column by column
    pub const fn from_cols(m: [f32; 16]) -> Self {
        Self { m }
    }

    #[inline]
    pub fn at(&self, col: usize, row: usize) -> f32 {
        self.m[col * 4 + row]
    }

    #[inline]
    fn set(&mut self, col: usize, row: usize, v: f32) {
        self.m[col * 4 + row] = v;
    }

    /// Overwrite the translation column, leaving rotation untouched
    pub fn set_translation(&mut self, pos: Vec3) {
        self.set(3, 0, pos.x);
        self.set(3, 1, pos.y);
        self.set(3, 2, pos.z);
    }

    /// Post-multiply by a translation (`self = self * T(t)`)
    pub fn translate(&mut self, t: Vec3) {
        let m = self.m;
        self.m[12] = m[0] * t.x + m[4] * t.y + m[8] * t.z + m[12];
        self.m[13] = m[1] * t.x + m[5] * t.y + m[9] * t.z + m[13];
        self.m[14] = m[2] * t.x + m[6] * t.y + m[10] * t.z + m[14];
        self.m[15] = m[3] * t.x + m[7] * t.y + m[11] * t.z + m[15];
    }

    /// Overwrite the 3x3 rotation block, composing yaw, then pitch, then roll.
    /// Used for camera-facing sprites.
    pub fn set_yaw_pitch_roll(&mut self, rot: Vec3) {
        let (sx, cx) = rot.x.sin_cos();
        let (sy, cy) = (-rot.y).sin_cos();
        let (sz, cz) = (-rot.z).sin_cos();

        self.set(0, 0, cy * cz + sx * sy * sz);
        self.set(1, 0, cz * sx * sy - cy * sz);
        self.set(2, 0, cx * sy);
        self.set(0, 1, cx * sz);
        self.set(1, 1, cx * cz);
        self.set(2, 1, -sx);
        self.set(0, 2, -cz * sy + cy * sx * sz);
        self.set(1, 2, cy * cz * sx + sy * sz);
        self.set(2, 2, cx * cy);
    }

    /// Overwrite the 3x3 rotation block, composing roll, then pitch, then yaw.
    /// Used for the view matrix.
    pub fn set_roll_pitch_yaw(&mut self, rot: Vec3) {
        let (sx, cx) = rot.x.sin_cos();
        let (sy, cy) = (-rot.y).sin_cos();
        let (sz, cz) = (-rot.z).sin_cos();

        self.set(0, 0, cy * cz - sx * sy * sz);
        self.set(1, 0, -cx * sz);
        self.set(2, 0, cz * sy + cy * sx * sz);
        self.set(0, 1, cz * sx * sy + cy * sz);
        self.set(1, 1, cx * cz);
        self.set(2, 1, -cy * cz * sx + sy * sz);
        self.set(0, 2, -cx * sy);
        self.set(1, 2, sx);
        self.set(2, 2, cx * cy);
    }

    /// Transform a point, dividing by w when w is non-zero.
    /// With a projection matrix in the chain the result is already in NDC.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let m = &self.m;
        let mut w = m[3] * p.x + m[7] * p.y + m[11] * p.z + m[15];
        if w == 0.0 {
            w = 1.0;
        }
        Vec3 {
            x: (m[0] * p.x + m[4] * p.y + m[8] * p.z + m[12]) / w,
            y: (m[1] * p.x + m[5] * p.y + m[9] * p.z + m[13]) / w,
            z: (m[2] * p.x + m[6] * p.y + m[10] * p.z + m[14]) / w,
        }
    }
}

impl Mul for Mat4 {
    type Output = Mat4;
    fn mul(self, b: Mat4) -> Mat4 {
        let mut res = [0.0f32; 16];
        for col in 0..4 {
            for row in 0..4 {
                res[col * 4 + row] = (0..4).map(|k| self.at(k, row) * b.at(col, k)).sum::<f32>();
            }
        }
        Mat4 { m: res }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.001
    }

    fn approx_vec(a: Vec3, b: Vec3) -> bool {
        approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
    }

    #[test]
    fn test_vec3_dot() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert!((a.dot(b) - 32.0).abs() < 0.001);
    }

    #[test]
    fn test_vec3_cross() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        let c = a.cross(b);
        assert!((c.z - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_vec3_arithmetic() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(2.0, 4.0, 8.0);
        assert_eq!(a + b, Vec3::new(3.0, 6.0, 11.0));
        assert_eq!(b - a, Vec3::new(1.0, 2.0, 5.0));
        assert_eq!(a * b, Vec3::new(2.0, 8.0, 24.0));
        assert_eq!(b / 2.0, Vec3::new(1.0, 2.0, 4.0));
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
        assert!(approx_vec(a.lerp(b, 0.5), Vec3::new(1.5, 3.0, 5.5)));
    }

    #[test]
    fn test_normalize_and_len() {
        let v = Vec3::new(3.0, 0.0, 4.0);
        assert!(approx(v.len(), 5.0));
        assert!(approx(v.normalize().len(), 1.0));
    }

    #[test]
    fn test_wrap_angle_range() {
        assert!(approx(wrap_angle(0.5), 0.5));
        assert!(approx(wrap_angle(PI * 2.0 + 0.25), 0.25));
        assert!(approx(wrap_angle(-PI * 2.0 - 0.25), -0.25));
        assert_eq!(wrap_angle(PI), PI);
        assert_eq!(wrap_angle(-PI), PI);
        for i in -40..40 {
            let a = wrap_angle(i as f32 * 0.7);
            assert!(a > -PI && a <= PI, "{} out of range", a);
        }
    }

    #[test]
    fn test_angle_and_projection_helpers() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 2.0, 0.0);
        assert!(approx(x.angle(y), PI / 2.0));
        assert!(approx(Vec3::ZERO.angle(y), 0.0));

        let p = Vec3::new(3.0, 5.0, 0.0);
        let on_ray = p.project_to_ray(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0));
        assert!(approx_vec(on_ray, Vec3::new(3.0, 0.0, 0.0)));

        let d = Vec3::new(0.0, 1.0, 0.0).distance_to_plane(Vec3::new(0.0, 4.0, 0.0), Vec3::UP);
        assert!(approx(d, 3.0));

        let bounced = Vec3::new(1.0, -1.0, 0.0).reflect(Vec3::UP, 2.0);
        assert!(approx_vec(bounced, Vec3::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn test_identity_transform() {
        let p = Vec3::new(1.0, -2.0, 3.0);
        assert_eq!(Mat4::IDENTITY.transform_point(p), p);
    }

    #[test]
    fn test_translate_post_multiplies() {
        let mut m = Mat4::IDENTITY;
        m.set_roll_pitch_yaw(Vec3::new(0.0, PI / 2.0, 0.0));
        let rot = m;
        m.translate(Vec3::new(1.0, 0.0, 0.0));

        // Translation happens before rotation
        let expected = rot.transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!(approx_vec(m.transform_point(Vec3::ZERO), expected));
    }

    #[test]
    fn test_mat_mul_matches_sequential_transform() {
        let mut a = Mat4::IDENTITY;
        a.set_yaw_pitch_roll(Vec3::new(0.3, 0.7, -0.2));
        let mut b = Mat4::IDENTITY;
        b.set_translation(Vec3::new(5.0, -1.0, 2.0));

        let p = Vec3::new(1.0, 2.0, 3.0);
        let combined = (a * b).transform_point(p);
        let sequential = a.transform_point(b.transform_point(p));
        assert!(approx_vec(combined, sequential));
    }

    #[test]
    fn test_zero_angles_give_identity_rotation() {
        let mut a = Mat4::IDENTITY;
        a.set_yaw_pitch_roll(Vec3::ZERO);
        let mut b = Mat4::IDENTITY;
        b.set_roll_pitch_yaw(Vec3::ZERO);
        assert_eq!(a, Mat4::IDENTITY);
        assert_eq!(b, Mat4::IDENTITY);
    }

    #[test]
    fn test_rotation_conventions_differ() {
        let angles = Vec3::new(0.4, 1.1, 0.6);
        let mut ypr = Mat4::IDENTITY;
        ypr.set_yaw_pitch_roll(angles);
        let mut rpy = Mat4::IDENTITY;
        rpy.set_roll_pitch_yaw(angles);

        let p = Vec3::new(1.0, 2.0, 3.0);
        let a = ypr.transform_point(p);
        let b = rpy.transform_point(p);
        assert!(!approx_vec(a, b));

        // Both stay rotations
        assert!(approx(a.len(), p.len()));
        assert!(approx(b.len(), p.len()));
    }

    #[test]
    fn test_transform_divides_by_w() {
        let mut m = Mat4::IDENTITY;
        m.m[15] = 2.0;
        let p = m.transform_point(Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(p, Vec3::new(1.0, 2.0, 3.0));
    }
}
