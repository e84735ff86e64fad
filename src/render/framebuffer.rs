//! Frame buffer abstraction for 2D pixel access.
//!
//! Provides a bounds-checked view over a borrowed byte region laid out as
//! rows of 4-byte `0xAARRGGBB` pixels. Rows may be padded: the stride is the
//! distance in bytes between the starts of two consecutive rows.

use crate::error::RenderError;

const BYTES_PER_PIXEL: usize = 4;

/// A view into a strided pixel surface.
///
/// This is a borrowed view, not an owning type. It is created when a frame
/// is drawn and threaded through every draw call as `&mut FrameBuffer`.
/// Pixels are stored native-endian at `row * stride + col * 4`.
pub struct FrameBuffer<'a> {
    bytes: &'a mut [u8],
    width: u32,
    height: u32,
    stride: usize,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view over `bytes`.
    ///
    /// # Errors
    /// Returns [`RenderError::InvalidSurface`] if `stride` is narrower than a
    /// row of pixels or `bytes` cannot hold `height` rows.
    pub fn new(
        bytes: &'a mut [u8],
        width: u32,
        height: u32,
        stride: usize,
    ) -> Result<Self, RenderError> {
        let row_bytes = width as usize * BYTES_PER_PIXEL;
        let required = match height {
            0 => 0,
            h => stride * (h as usize - 1) + row_bytes,
        };
        if stride < row_bytes || bytes.len() < required {
            return Err(RenderError::InvalidSurface {
                width,
                height,
                stride,
                len: bytes.len(),
            });
        }
        Ok(Self {
            bytes,
            width,
            height,
            stride,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.stride + x as usize * BYTES_PER_PIXEL)
        } else {
            None
        }
    }

    /// Set a pixel at (x, y). Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(offset) = self.offset(x, y) {
            self.bytes[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&color.to_ne_bytes());
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        let offset = self.offset(x, y)?;
        let mut pixel = [0u8; BYTES_PER_PIXEL];
        pixel.copy_from_slice(&self.bytes[offset..offset + BYTES_PER_PIXEL]);
        Some(u32::from_ne_bytes(pixel))
    }

    /// Fill the inclusive span `x_start..=x_end` on row `y`.
    ///
    /// The span is clamped to the surface; rows outside it are ignored.
    #[inline]
    pub fn fill_span(&mut self, y: i32, x_start: i32, x_end: i32, color: u32) {
        if y < 0 || y >= self.height as i32 || self.width == 0 {
            return;
        }
        let x_start = x_start.max(0);
        let x_end = x_end.min(self.width as i32 - 1);
        if x_start > x_end {
            return;
        }

        let row = y as usize * self.stride;
        let start = row + x_start as usize * BYTES_PER_PIXEL;
        let end = row + (x_end as usize + 1) * BYTES_PER_PIXEL;
        let pixel = color.to_ne_bytes();
        for chunk in self.bytes[start..end].chunks_exact_mut(BYTES_PER_PIXEL) {
            chunk.copy_from_slice(&pixel);
        }
    }

    /// Fill every pixel of the surface, leaving row padding untouched.
    pub fn clear(&mut self, color: u32) {
        for y in 0..self.height as i32 {
            self.fill_span(y, 0, self.width as i32 - 1, color);
        }
    }
}
