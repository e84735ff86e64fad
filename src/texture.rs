//! Textures sampled by the perspective-correct rasterizer.

use std::path::Path;

use crate::colors;
use crate::error::LoadError;

/// A texture stored as tightly packed rows of blue, green, red (and an
/// optional ignored alpha) bytes.
///
/// Row 0 is the bottom of the image, matching the bitmap layout and the
/// OBJ convention of `v = 0` at the bottom.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
    bytes_per_texel: u32,
}

impl Texture {
    /// Wraps raw texel bytes. At least three bytes per texel are required.
    pub fn from_bgr_bytes(
        width: u32,
        height: u32,
        bytes_per_texel: u32,
        bytes: Vec<u8>,
    ) -> Result<Self, LoadError> {
        let needed = width as usize * height as usize * bytes_per_texel as usize;
        if width == 0 || height == 0 || bytes_per_texel < 3 || bytes.len() < needed {
            return Err(LoadError::InvalidTexture {
                width,
                height,
                bytes_per_texel,
                len: bytes.len(),
            });
        }

        Ok(Self {
            bytes,
            width,
            height,
            bytes_per_texel,
        })
    }

    /// Load a texture from an image file (BMP, PNG, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let img = image::open(path)?.to_rgb8();
        let (width, height) = img.dimensions();

        // Bottom-up rows, BGR byte order
        let mut bytes = Vec::with_capacity(width as usize * height as usize * 3);
        for y in (0..height).rev() {
            for x in 0..width {
                let [r, g, b] = img.get_pixel(x, y).0;
                bytes.extend_from_slice(&[b, g, r]);
            }
        }

        log::info!("loaded texture {}: {}x{}", path.display(), width, height);
        Self::from_bgr_bytes(width, height, 3, bytes)
    }

    /// A checkerboard of single texels: `even` where `x + y` is even,
    /// `odd` elsewhere.
    pub fn checkerboard(width: u32, height: u32, even: u32, odd: u32) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        let mut bytes = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                let color = if (x + y) % 2 == 0 { even } else { odd };
                let (a, r, g, b) = colors::unpack(color);
                bytes.extend_from_slice(&[b, g, r, a]);
            }
        }

        Self {
            bytes,
            width,
            height,
            bytes_per_texel: 4,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bytes_per_texel(&self) -> u32 {
        self.bytes_per_texel
    }

    /// Fetches a texel as an opaque ARGB color, wrapping both coordinates
    /// into the texture so any integer pair is valid.
    #[inline]
    pub fn texel(&self, x: i64, y: i64) -> u32 {
        let x = x.rem_euclid(self.width as i64) as usize;
        let y = y.rem_euclid(self.height as i64) as usize;
        let bpt = self.bytes_per_texel as usize;
        let offset = (y * self.width as usize + x) * bpt;
        colors::opaque_from_bgr(
            self.bytes[offset],
            self.bytes[offset + 1],
            self.bytes[offset + 2],
        )
    }

    /// Samples with nearest-neighbour lookup at texture-space `(u, v)`,
    /// where `[0, 1)` spans the texture once and everything else repeats.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> u32 {
        // `as` saturates and maps NaN to 0, so this never panics
        let x = (u * self.width as f32).floor() as i64;
        let y = (v * self.height as f32).floor() as i64;
        self.texel(x, y)
    }
}
