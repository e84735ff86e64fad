//! Error types for loading assets and rasterizing geometry.

use std::fmt;

/// The specific way a piece of geometry cannot be rasterized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DegenerateKind {
    /// The three screen-space vertices are collinear (zero area).
    ZeroArea,
    /// A vertex sits on the eye plane, so `1 / z` is undefined.
    ZeroDepth { z: f32 },
    /// A vertex is at or behind the eye after projection (`w <= 0`).
    BehindCamera { w: f32 },
    /// A vertex is in front of the eye but closer than the near plane.
    InsideNearPlane { w: f32, z_near: f32 },
    /// A coordinate is NaN or infinite.
    NonFinite,
}

impl fmt::Display for DegenerateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegenerateKind::ZeroArea => write!(f, "triangle has zero screen-space area"),
            DegenerateKind::ZeroDepth { z } => write!(f, "vertex depth {z} is too close to zero"),
            DegenerateKind::BehindCamera { w } => write!(f, "vertex is behind the camera (w = {w})"),
            DegenerateKind::InsideNearPlane { w, z_near } => {
                write!(f, "vertex at w = {w} is closer than the near plane at {z_near}")
            }
            DegenerateKind::NonFinite => write!(f, "vertex has a non-finite coordinate"),
        }
    }
}

/// Errors raised while projecting or rasterizing.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    DegenerateGeometry(DegenerateKind),
    /// The byte region is too small for the declared width, height and stride.
    InvalidSurface {
        width: u32,
        height: u32,
        stride: usize,
        len: usize,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::DegenerateGeometry(kind) => write!(f, "degenerate geometry: {kind}"),
            RenderError::InvalidSurface {
                width,
                height,
                stride,
                len,
            } => write!(
                f,
                "surface of {len} bytes cannot hold {width}x{height} pixels with stride {stride}"
            ),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<DegenerateKind> for RenderError {
    fn from(kind: DegenerateKind) -> Self {
        RenderError::DegenerateGeometry(kind)
    }
}

/// Errors raised while loading meshes and textures.
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Obj(tobj::LoadError),
    Image(image::ImageError),
    /// A face refers to a vertex or texture coordinate that does not exist.
    IndexOutOfRange {
        face: usize,
        index: usize,
        len: usize,
        what: &'static str,
    },
    /// Texture dimensions and byte count disagree.
    InvalidTexture {
        width: u32,
        height: u32,
        bytes_per_texel: u32,
        len: usize,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "I/O error: {e}"),
            LoadError::Obj(e) => write!(f, "OBJ error: {e}"),
            LoadError::Image(e) => write!(f, "image error: {e}"),
            LoadError::IndexOutOfRange {
                face,
                index,
                len,
                what,
            } => write!(
                f,
                "face {face} references {what} {index}, but only {len} exist"
            ),
            LoadError::InvalidTexture {
                width,
                height,
                bytes_per_texel,
                len,
            } => write!(
                f,
                "{len} bytes cannot hold a {width}x{height} texture at {bytes_per_texel} bytes per texel"
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Obj(e) => Some(e),
            LoadError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<tobj::LoadError> for LoadError {
    fn from(e: tobj::LoadError) -> Self {
        LoadError::Obj(e)
    }
}

impl From<image::ImageError> for LoadError {
    fn from(e: image::ImageError) -> Self {
        LoadError::Image(e)
    }
}
