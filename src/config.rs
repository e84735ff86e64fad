//! Startup configuration for the engine and the demo window.

use crate::colors;
use crate::light::DirectionalLight;
use crate::math::vec3::Vec3;
use crate::projection::Projection;

/// Everything a frame needs that is not the mesh or the texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub projection: Projection,
    /// Camera position in world space. The camera looks down +Z.
    pub camera: Vec3,
    pub light: DirectionalLight,
    /// Fill color for faces of a built-in or loaded mesh.
    pub base_color: u32,
    pub background: u32,
    /// Radians added to each rotation axis per frame.
    pub rotation_step: f32,
    pub width: u32,
    pub height: u32,
    /// Target frame rate of the demo window.
    pub target_fps: u32,
    /// Background grid spacing in pixels; 0 disables it.
    pub grid_spacing: i32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            projection: Projection::default(),
            camera: Vec3::new(0.0, 0.0, -10.0),
            light: DirectionalLight::default(),
            base_color: colors::LILAC,
            background: colors::BACKGROUND,
            rotation_step: 0.01,
            width: 1280,
            height: 720,
            target_fps: 30,
            grid_spacing: 0,
        }
    }
}

impl RenderConfig {
    /// Per-frame rotation applied to all three axes.
    pub fn rotation_angles(&self) -> Vec3 {
        Vec3::new(self.rotation_step, self.rotation_step, self.rotation_step)
    }

    /// Milliseconds per frame at [`target_fps`](Self::target_fps).
    pub fn frame_time_ms(&self) -> u64 {
        1000 / self.target_fps.max(1) as u64
    }
}
