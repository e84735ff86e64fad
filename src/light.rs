//! Lighting types for the renderer.

use crate::colors;
use crate::math::vec3::Vec3;

/// A directional light that illuminates the scene uniformly from a direction.
///
/// Directional lights are ideal for simulating distant light sources like the sun,
/// where all rays are effectively parallel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// The normalized direction the light is pointing (not where it comes from).
    pub direction: Vec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Vec3::new(3.0, -5.0, 0.0))
    }
}

impl DirectionalLight {
    /// Create a new directional light pointing in the given direction.
    /// The direction will be normalized automatically.
    pub fn new(direction: Vec3) -> Self {
        DirectionalLight {
            direction: direction.normalize(),
        }
    }

    /// Light intensity for flat shading, in `[0.0, 1.0]`.
    ///
    /// Maps the cosine between the normal and the incoming light from
    /// `[-1, 1]` onto `[0, 1]`, so faces turned away from the light are dark
    /// but never clipped to a single black.
    pub fn intensity(&self, normal: Vec3) -> f32 {
        // Negate direction: light pointing at surface = positive dot product
        (((-self.direction).dot(normal.normalize()) + 1.0) / 2.0).clamp(0.0, 1.0)
    }

    /// Scales the RGB channels of `color` by [`intensity`](Self::intensity).
    pub fn flat_shade(&self, normal: Vec3, color: u32) -> u32 {
        colors::scale(color, self.intensity(normal))
    }
}
