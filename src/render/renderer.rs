//! Low-level rendering primitives.
//!
//! Provides the [`Renderer`] struct which owns the pixel buffer and
//! implements whole-surface operations like clearing, rectangles and the
//! background grid. Triangle and line drawing go through [`FrameBuffer`].

use super::framebuffer::FrameBuffer;
use crate::colors;
use crate::error::RenderError;

const BYTES_PER_PIXEL: usize = 4;

pub struct Renderer {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
    stride: usize,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        let stride = width as usize * BYTES_PER_PIXEL;
        let mut renderer = Self {
            bytes: vec![0; stride * height as usize],
            width,
            height,
            stride,
        };
        renderer.clear(colors::BACKGROUND);
        renderer
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes between the starts of two rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn clear(&mut self, color: u32) {
        let pixel = color.to_ne_bytes();
        for chunk in self.bytes.chunks_exact_mut(BYTES_PER_PIXEL) {
            chunk.copy_from_slice(&pixel);
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.stride + x as usize * BYTES_PER_PIXEL)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        let index = self.index(x, y)?;
        let mut pixel = [0u8; BYTES_PER_PIXEL];
        pixel.copy_from_slice(&self.bytes[index..index + BYTES_PER_PIXEL]);
        Some(u32::from_ne_bytes(pixel))
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(index) = self.index(x, y) {
            self.bytes[index..index + BYTES_PER_PIXEL].copy_from_slice(&color.to_ne_bytes());
        }
    }

    /// Draws grid lines every `spacing` pixels, blending `color` over the
    /// existing pixels with its alpha channel.
    pub fn draw_grid(&mut self, spacing: i32, color: u32) {
        if spacing <= 0 {
            return;
        }
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if x % spacing == 0 || y % spacing == 0 {
                    if let Some(dst) = self.get_pixel(x, y) {
                        self.set_pixel(x, y, colors::blend_over(dst, color));
                    }
                }
            }
        }
    }

    #[inline]
    pub fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: u32) {
        for dy in 0..height {
            for dx in 0..width {
                self.set_pixel(x + dx, y + dy, color);
            }
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Get a mutable FrameBuffer view into the pixel buffer.
    pub fn as_framebuffer(&mut self) -> Result<FrameBuffer<'_>, RenderError> {
        FrameBuffer::new(&mut self.bytes, self.width, self.height, self.stride)
    }
}
