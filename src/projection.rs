//! Perspective projection from camera space to raster space.
//!
//! The [`Projection`] struct is the single source of truth for the
//! projection parameters. [`Viewport`] maps normalized device coordinates to
//! pixels with one scale per axis taken from the viewport size, so the only
//! zoom in the pipeline comes from the projection matrix.

use crate::error::{DegenerateKind, RenderError};
use crate::math::mat4::Mat4;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::math::vec5::Vec5;

/// Clip-space `w` at or below this is treated as on or behind the eye.
const MIN_W: f32 = 1e-6;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Field of view in radians.
    fov: f32,
    /// Height divided by width.
    inv_aspect_ratio: f32,
    z_near: f32,
    z_far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(std::f32::consts::FRAC_PI_3, 9.0 / 16.0, 5.0, 500.0)
    }
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `fov` - Field of view in radians
    /// * `inv_aspect_ratio` - Height divided by width
    /// * `z_near` - Near plane distance (must be > 0)
    /// * `z_far` - Far plane distance (must be > z_near)
    pub fn new(fov: f32, inv_aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov,
            inv_aspect_ratio,
            z_near,
            z_far,
        }
    }

    /// Creates a projection from degrees instead of radians.
    pub fn from_degrees(fov_degrees: f32, inv_aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self::new(fov_degrees.to_radians(), inv_aspect_ratio, z_near, z_far)
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn inv_aspect_ratio(&self) -> f32 {
        self.inv_aspect_ratio
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    /// Updates the aspect ratio (typically called on window resize).
    pub fn set_inv_aspect_ratio(&mut self, inv_aspect_ratio: f32) {
        self.inv_aspect_ratio = inv_aspect_ratio;
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov, self.inv_aspect_ratio, self.z_near, self.z_far)
    }
}

/// Pixel dimensions of the raster target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Height divided by width.
    pub fn inv_aspect_ratio(&self) -> f32 {
        self.height as f32 / self.width.max(1) as f32
    }

    /// Maps NDC (`[-1, 1]` on both axes, +y up) to pixels (+y down).
    #[inline]
    pub fn ndc_to_raster(&self, ndc: Vec2) -> Vec2 {
        let half_width = self.width as f32 / 2.0;
        let half_height = self.height as f32 / 2.0;
        Vec2::new((ndc.x + 1.0) * half_width, (-ndc.y + 1.0) * half_height)
    }
}

/// Translates a world-space point into camera space.
///
/// The camera looks down +Z without rotation.
#[inline]
pub fn to_camera_space(vertex: Vec3, camera: Vec3) -> Vec3 {
    vertex - camera
}

/// Projects a world-space vertex into a raster vertex.
///
/// The result carries the raster position, the camera-space depth (before
/// the `w` divide) and the given texture coordinate. Vertices closer to the
/// eye than `z_near` are rejected: their raster coordinates grow without
/// bound as `w` approaches zero.
pub fn project_vertex(
    matrix: &Mat4,
    z_near: f32,
    viewport: Viewport,
    camera: Vec3,
    vertex: Vec3,
    uv: Vec2,
) -> Result<Vec5, RenderError> {
    let camera_space = to_camera_space(vertex, camera);
    let clip = *matrix * camera_space;

    if !(clip.x.is_finite() && clip.y.is_finite() && clip.w.is_finite()) {
        return Err(DegenerateKind::NonFinite.into());
    }
    if clip.w <= MIN_W {
        return Err(DegenerateKind::BehindCamera { w: clip.w }.into());
    }
    if clip.w < z_near {
        return Err(DegenerateKind::InsideNearPlane { w: clip.w, z_near }.into());
    }

    let raster = viewport.ndc_to_raster(clip.ndc_xy());

    Ok(Vec5::new(raster.x, raster.y, camera_space.z, uv.x, uv.y))
}
