//! Cohen-Sutherland line clipping against the screen rectangle
//!
//! Bit names follow a top-left origin: BOTTOM means y < 0 and TOP means
//! y >= height.

use super::math::Vec2i;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutCode(u8);

impl OutCode {
    pub const INSIDE: OutCode = OutCode(0);
    pub const LEFT: OutCode = OutCode(1 << 0);
    pub const RIGHT: OutCode = OutCode(1 << 1);
    pub const BOTTOM: OutCode = OutCode(1 << 2);
    pub const TOP: OutCode = OutCode(1 << 3);

    /// Classify `p` against `[0, size.x) x [0, size.y)`
    pub fn of(p: Vec2i, size: Vec2i) -> OutCode {
        let mut code = 0;
        if p.x < 0 {
            code |= Self::LEFT.0;
        } else if p.x >= size.x {
            code |= Self::RIGHT.0;
        }
        if p.y < 0 {
            code |= Self::BOTTOM.0;
        } else if p.y >= size.y {
            code |= Self::TOP.0;
        }
        OutCode(code)
    }

    pub fn is_inside(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, other: OutCode) -> bool {
        self.0 & other.0 != 0
    }

    /// Both points lie beyond the same edge
    pub fn shares_side(self, other: OutCode) -> bool {
        self.contains(other)
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

/// Clip the segment to the screen. `None` means nothing is visible.
///
/// Intersections use integer arithmetic, truncating toward zero.
pub fn clip_line(mut p0: Vec2i, mut p1: Vec2i, size: Vec2i) -> Option<(Vec2i, Vec2i)> {
    let mut cc0 = OutCode::of(p0, size);
    let mut cc1 = OutCode::of(p1, size);
    let max_x = size.x as i64 - 1;
    let max_y = size.y as i64 - 1;

    loop {
        if cc0.is_inside() && cc1.is_inside() {
            return Some((p0, p1));
        }
        if cc0.shares_side(cc1) {
            return None;
        }

        let clip_first = !cc0.is_inside();
        let cc_out = if clip_first { cc0 } else { cc1 };

        let (x0, y0) = (p0.x as i64, p0.y as i64);
        let (dx, dy) = (p1.x as i64 - x0, p1.y as i64 - y0);

        let r = if cc_out.contains(OutCode::TOP) {
            Vec2i::new((x0 + dx * (max_y - y0) / dy) as i32, max_y as i32)
        } else if cc_out.contains(OutCode::BOTTOM) {
            Vec2i::new((x0 + dx * -y0 / dy) as i32, 0)
        } else if cc_out.contains(OutCode::RIGHT) {
            Vec2i::new(max_x as i32, (y0 + dy * (max_x - x0) / dx) as i32)
        } else {
            Vec2i::new(0, (y0 + dy * -x0 / dx) as i32)
        };

        if clip_first {
            p0 = r;
            cc0 = OutCode::of(p0, size);
        } else {
            p1 = r;
            cc1 = OutCode::of(p1, size);
        }
    }
}
