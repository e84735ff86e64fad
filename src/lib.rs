//! A CPU-based software rasterizer.
//!
//! This crate provides a small 3D rendering pipeline: meshes are rotated,
//! depth-ordered with the painter's algorithm, back-face culled, projected
//! and scan-converted into a caller-owned pixel surface, either with a flat
//! color or a perspective-correct texture. SDL2 is used only for the demo
//! window.
//!
//! # Quick Start
//!
//! ```ignore
//! use rastrum::prelude::*;
//!
//! let mut renderer = Renderer::new(800, 600);
//! let mut engine = Engine::new(RenderConfig::default());
//! let mut mesh = Mesh::cube();
//! let texture = Texture::checkerboard(64, 64, colors::LILAC, colors::BLUE);
//!
//! let mut buffer = renderer.as_framebuffer()?;
//! let stats = engine.render_frame(&mut mesh, &texture, Vec3::new(0.01, 0.01, 0.01), &mut buffer);
//! ```

pub mod colors;
pub mod config;
pub mod depth;
pub mod engine;
pub mod error;
pub mod light;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod render;
pub mod texture;
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use config::RenderConfig;
pub use engine::{Engine, FrameStats, RenderMode};
pub use error::{DegenerateKind, LoadError, RenderError};
pub use mesh::{Face, Mesh};
pub use projection::{Projection, Viewport};
pub use texture::Texture;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use rastrum::prelude::*;
/// ```
pub mod prelude {
    pub use crate::colors;

    // Engine
    pub use crate::config::RenderConfig;
    pub use crate::engine::{Engine, FrameStats, RenderMode};
    pub use crate::error::{DegenerateKind, LoadError, RenderError};
    pub use crate::light::DirectionalLight;

    // Assets
    pub use crate::mesh::{Face, Mesh};
    pub use crate::texture::Texture;

    // Projection
    pub use crate::projection::{Projection, Viewport};

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;
    pub use crate::math::vec5::Vec5;

    // Rendering
    pub use crate::render::{
        FrameBuffer, Rasterizer, Renderer, ScanlineRasterizer, ScreenTriangle, TextureMapper,
    };

    // Window
    pub use crate::window::{FrameLimiter, Window, WindowEvent};
}
