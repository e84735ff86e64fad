//! Drawing into pixel surfaces: the frame buffer view, the owning renderer,
//! line drawing and triangle rasterizers.

pub mod framebuffer;
pub mod line;
pub mod rasterizer;
pub mod renderer;

pub use framebuffer::FrameBuffer;
pub use rasterizer::{Rasterizer, ScanlineRasterizer, ScreenTriangle, TextureMapper};
pub use renderer::Renderer;
