//! The per-vertex payload carried through rasterization.

use super::vec2::Vec2;

/// A vertex in raster space.
///
/// `x` and `y` are pixel coordinates, `z` is the camera-space depth before
/// the perspective divide and `u`, `v` are texture coordinates. Anything that
/// takes `1.0 / z` requires `z != 0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec5 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub u: f32,
    pub v: f32,
}

impl Vec5 {
    pub const fn new(x: f32, y: f32, z: f32, u: f32, v: f32) -> Self {
        Self { x, y, z, u, v }
    }

    /// Screen position only.
    pub const fn xy(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub const fn uv(&self) -> Vec2 {
        Vec2::new(self.u, self.v)
    }
}
