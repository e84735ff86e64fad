//! Homogeneous clip-space coordinates.

use super::vec2::Vec2;
use super::vec3::Vec3;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Normalized device x and y. The caller checks `w` first.
    #[inline]
    pub fn ndc_xy(&self) -> Vec2 {
        Vec2::new(self.x / self.w, self.y / self.w)
    }
}

impl From<Vec3> for Vec4 {
    /// A point: `w = 1`.
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_get_unit_w() {
        assert_eq!(Vec4::from(Vec3::new(1.0, 2.0, 3.0)), Vec4::new(1.0, 2.0, 3.0, 1.0));
    }

    #[test]
    fn ndc_divides_by_w() {
        assert_eq!(Vec4::new(4.0, -2.0, 7.0, 2.0).ndc_xy(), Vec2::new(2.0, -1.0));
    }
}
