//! Perspective-correct texture mapping.
//!
//! The triangle is split at its middle vertex into an upper and a lower
//! half. The long edge runs top to bottom and is walked through both halves;
//! the short edges take turns on the other side:
//!
//! ```text
//!        top
//!        /|
//!       / |  upper half: top->middle vs top->bottom
//!  mid /__|
//!      \  |  lower half: middle->bottom vs top->bottom
//!       \ |
//!        \|
//!       bottom
//! ```
//!
//! Per pixel the interpolated `u/z` and `v/z` are divided by the
//! interpolated `1/z`, which recovers the texture coordinate the point had
//! before projection.

use super::gradient::{middle_is_left, Edge, Gradients};
use super::{sort_vertices, Rasterizer, ScreenTriangle};
use crate::error::RenderError;
use crate::render::framebuffer::FrameBuffer;
use crate::texture::Texture;

/// Fills triangles with texels from a borrowed [`Texture`].
pub struct TextureMapper<'t> {
    texture: &'t Texture,
}

impl<'t> TextureMapper<'t> {
    pub fn new(texture: &'t Texture) -> Self {
        Self { texture }
    }

    pub fn texture(&self) -> &Texture {
        self.texture
    }

    /// Draws one row between two edges sitting on the same scanline.
    ///
    /// The span is `ceil(left.x)..=ceil(right.x)`, clamped to the surface.
    /// Attributes start from the left edge and are pre-stepped to the first
    /// drawn pixel.
    fn draw_scanline(&self, gradients: &Gradients, left: &Edge, right: &Edge, buffer: &mut FrameBuffer) {
        let y = left.y;
        if y < 0 || y >= buffer.height() as i32 {
            return;
        }

        let x_start = (left.x.ceil() as i32).max(0);
        let x_end = (right.x.ceil() as i32).min(buffer.width() as i32 - 1);
        if x_start > x_end {
            return;
        }

        let x_prestep = x_start as f32 - left.x;
        let mut one_over_z = left.one_over_z + x_prestep * gradients.d_one_over_z_dx;
        let mut u_over_z = left.u_over_z + x_prestep * gradients.d_u_over_z_dx;
        let mut v_over_z = left.v_over_z + x_prestep * gradients.d_v_over_z_dx;

        for x in x_start..=x_end {
            let z = 1.0 / one_over_z;
            let u = u_over_z * z;
            let v = v_over_z * z;

            if u.is_finite() && v.is_finite() {
                buffer.set_pixel(x, y, self.texture.sample(u, v));
            }

            one_over_z += gradients.d_one_over_z_dx;
            u_over_z += gradients.d_u_over_z_dx;
            v_over_z += gradients.d_v_over_z_dx;
        }
    }

    /// Walks `short` and `long` together until `short` runs out of rows.
    ///
    /// Rows above the surface are skipped in one step and the walk stops at
    /// the bottom of the surface.
    fn draw_half(
        &self,
        gradients: &Gradients,
        short: &mut Edge,
        long: &mut Edge,
        middle_is_left: bool,
        buffer: &mut FrameBuffer,
    ) {
        let first = short.y.max(0);
        short.skip_to(first);
        long.skip_to(first);

        let rows = buffer.height() as i32;
        while short.height > 0 && short.y < rows {
            if middle_is_left {
                self.draw_scanline(gradients, short, long, buffer);
            } else {
                self.draw_scanline(gradients, long, short, buffer);
            }
            short.step();
            long.step();
        }
    }
}

impl Rasterizer for TextureMapper<'_> {
    fn fill_triangle(
        &self,
        triangle: &ScreenTriangle,
        buffer: &mut FrameBuffer,
    ) -> Result<(), RenderError> {
        let mut vertices = triangle.vertices;
        sort_vertices(&mut vertices);

        let gradients = Gradients::new(&vertices)?;

        let mut top_to_bottom = Edge::new(&gradients, &vertices, 0, 2);
        let mut top_to_middle = Edge::new(&gradients, &vertices, 0, 1);
        let mut middle_to_bottom = Edge::new(&gradients, &vertices, 1, 2);
        let middle_is_left = middle_is_left(&vertices);

        self.draw_half(&gradients, &mut top_to_middle, &mut top_to_bottom, middle_is_left, buffer);
        self.draw_half(&gradients, &mut middle_to_bottom, &mut top_to_bottom, middle_is_left, buffer);

        Ok(())
    }
}
