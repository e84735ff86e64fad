//! Scanline-based flat-color triangle rasterization.
//!
//! This module implements triangle filling using the classic scanline
//! algorithm with flat-top/flat-bottom triangle decomposition.
//!
//! # Triangle Decomposition
//!
//! Any triangle can be decomposed into at most two simpler triangles:
//!
//! ```text
//!        v0                   v0
//!        /\                   /\
//!       /  \                 /  \
//!      /    \       =>      /----\<- split at v1.y
//!     /      \             v1   split
//!    /________\             \    /
//!   v1        v2             \  /
//!                             \/
//!                             v2
//!
//!   General triangle      Flat-bottom (top) + Flat-top (bottom)
//! ```
//!
//! Special cases (already flat-top or flat-bottom) require no splitting.
//!
//! # Inverse Slope Method
//!
//! For each scanline we track the X position along the left and right
//! edges. Rather than computing X from Y each time, both boundaries start on
//! the first scanline (`ceil(y)`, the "pre-step") and advance by their
//! inverse slope `dx / dy` once per row.
//!
//! Rows run from `ceil(top.y)` up to but not including `ceil(bottom.y)`, so
//! the two halves of a split triangle meet without a gap or a shared row.

use std::ops::Range;

use super::{determinant, is_finite, sort_vertices, Rasterizer, ScreenTriangle, MIN_AREA};
use crate::error::{DegenerateKind, RenderError};
use crate::math::vec2::Vec2;
use crate::render::framebuffer::FrameBuffer;

/// Scanline-based flat-color rasterizer.
///
/// Writes [`ScreenTriangle::color`] to every covered pixel. Depth and texture
/// coordinates are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanlineRasterizer;

impl ScanlineRasterizer {
    /// Creates a new scanline rasterizer instance.
    pub fn new() -> Self {
        Self
    }

    /// Reports the spans covering a triangle as `(y, x_start, x_end)` with
    /// `x_end` inclusive. Each row is reported at most once.
    ///
    /// Triangles whose vertices all share one y produce no spans. Any other
    /// triangle with zero area fails with [`DegenerateKind::ZeroArea`].
    pub fn spans<F: FnMut(i32, i32, i32)>(triangle: &ScreenTriangle, emit: F) -> Result<(), RenderError> {
        Self::spans_within(triangle, i32::MIN..i32::MAX, emit)
    }

    /// Like [`spans`](Self::spans) but only visits rows in `rows`.
    ///
    /// Rows outside the range are skipped with a single pre-step rather
    /// than walked.
    pub fn spans_within<F: FnMut(i32, i32, i32)>(
        triangle: &ScreenTriangle,
        rows: Range<i32>,
        mut emit: F,
    ) -> Result<(), RenderError> {
        let mut v = triangle.vertices;
        if !v.iter().all(is_finite) {
            return Err(DegenerateKind::NonFinite.into());
        }
        sort_vertices(&mut v);

        if v[0].y == v[2].y {
            return Ok(());
        }
        if determinant(&v).abs() < MIN_AREA {
            return Err(DegenerateKind::ZeroArea.into());
        }
        let [v0, v1, v2] = v.map(|p| p.xy());

        // Case 1: Already flat-top
        if v0.y == v1.y {
            Self::flat_top(v0, v1, v2, &rows, &mut emit);
            return Ok(());
        }

        // Case 2: Already flat-bottom
        if v1.y == v2.y {
            Self::flat_bottom(v0, v1, v2, &rows, &mut emit);
            return Ok(());
        }

        // Case 3: General triangle - split the long edge at v1's Y level
        let split_x = (v2.x - v0.x) * (v0.y - v1.y) / (v0.y - v2.y) + v0.x;
        let split = Vec2::new(split_x, v1.y);

        Self::flat_bottom(v0, v1, split, &rows, &mut emit);
        Self::flat_top(v1, split, v2, &rows, &mut emit);
        Ok(())
    }

    /// Fills a flat-bottom triangle.
    ///
    /// ```text
    ///        top
    ///        /\
    ///       /  \
    ///      /____\
    ///    b1      b2  (same Y)
    /// ```
    fn flat_bottom<F: FnMut(i32, i32, i32)>(top: Vec2, b1: Vec2, b2: Vec2, rows: &Range<i32>, emit: &mut F) {
        let y_start = (top.y.ceil() as i32).max(rows.start);
        let y_end = (b1.y.ceil() as i32).min(rows.end);
        if y_start >= y_end {
            return;
        }

        let height = b1.y - top.y;
        let inv_slope_1 = (b1.x - top.x) / height;
        let inv_slope_2 = (b2.x - top.x) / height;

        let y_prestep = y_start as f32 - top.y;
        let mut x1 = y_prestep * inv_slope_1 + top.x;
        let mut x2 = y_prestep * inv_slope_2 + top.x;

        for y in y_start..y_end {
            emit(y, x1.min(x2).ceil() as i32, x1.max(x2).ceil() as i32);
            x1 += inv_slope_1;
            x2 += inv_slope_2;
        }
    }

    /// Fills a flat-top triangle.
    ///
    /// ```text
    ///   t1______t2  (same Y)
    ///     \    /
    ///      \  /
    ///       \/
    ///      bottom
    /// ```
    fn flat_top<F: FnMut(i32, i32, i32)>(t1: Vec2, t2: Vec2, bottom: Vec2, rows: &Range<i32>, emit: &mut F) {
        let y_start = (t1.y.ceil() as i32).max(rows.start);
        let y_end = (bottom.y.ceil() as i32).min(rows.end);
        if y_start >= y_end {
            return;
        }

        let height = bottom.y - t1.y;
        let inv_slope_1 = (bottom.x - t1.x) / height;
        let inv_slope_2 = (bottom.x - t2.x) / height;

        let y_prestep = y_start as f32 - t1.y;
        let mut x1 = y_prestep * inv_slope_1 + t1.x;
        let mut x2 = y_prestep * inv_slope_2 + t2.x;

        for y in y_start..y_end {
            emit(y, x1.min(x2).ceil() as i32, x1.max(x2).ceil() as i32);
            x1 += inv_slope_1;
            x2 += inv_slope_2;
        }
    }
}

impl Rasterizer for ScanlineRasterizer {
    fn fill_triangle(
        &self,
        triangle: &ScreenTriangle,
        buffer: &mut FrameBuffer,
    ) -> Result<(), RenderError> {
        let color = triangle.color;
        let rows = 0..buffer.height() as i32;
        Self::spans_within(triangle, rows, |y, x_start, x_end| {
            buffer.fill_span(y, x_start, x_end, color)
        })
    }
}
