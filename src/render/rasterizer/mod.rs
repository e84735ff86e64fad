//! Triangle rasterization algorithms.
//!
//! Two fills share the [`Rasterizer`] trait:
//! - [`ScanlineRasterizer`]: flat color via flat-top/flat-bottom decomposition
//! - [`TextureMapper`]: perspective-correct texturing via gradient and edge
//!   stepping
//!
//! Both walk rows from `ceil(top.y)` up to but not including
//! `ceil(bottom.y)`, so triangles sharing an edge never fill the same row of
//! that edge twice.

mod gradient;
mod scanline;
mod texture_map;

pub use gradient::{Edge, Gradients};
pub use scanline::ScanlineRasterizer;
pub use texture_map::TextureMapper;

use super::framebuffer::FrameBuffer;
use crate::error::RenderError;
use crate::math::vec5::Vec5;

/// A triangle ready for rasterization in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenTriangle {
    pub vertices: [Vec5; 3],
    /// Fill color for flat fills, already shaded.
    pub color: u32,
}

impl ScreenTriangle {
    pub fn new(vertices: [Vec5; 3], color: u32) -> Self {
        Self { vertices, color }
    }
}

/// Trait for triangle rasterization algorithms.
///
/// Implementors define how triangles are filled into a pixel buffer.
pub trait Rasterizer {
    /// Fill a triangle into the frame buffer.
    ///
    /// # Errors
    /// Returns [`RenderError::DegenerateGeometry`] when the triangle cannot be
    /// filled. Nothing is written in that case.
    fn fill_triangle(
        &self,
        triangle: &ScreenTriangle,
        buffer: &mut FrameBuffer,
    ) -> Result<(), RenderError>;
}

/// Sorts three vertices by ascending screen y.
///
/// A fixed decision table rather than a loop: find the topmost vertex, move
/// it to slot 0, then order the remaining two. Vertices with equal y keep
/// their input order.
pub fn sort_vertices(v: &mut [Vec5; 3]) {
    let (y0, y1, y2) = (v[0].y, v[1].y, v[2].y);

    if y1 < y0 && y1 <= y2 {
        v.swap(1, 0);
        if y2 < y0 {
            v.swap(1, 2);
        }
    } else if y2 < y0 && y2 < y1 {
        v.swap(2, 0);
        if y0 <= y1 {
            v.swap(2, 1);
        }
    } else if y2 < y1 {
        v.swap(2, 1);
    }
}

/// Smallest `|determinant|` (twice the signed screen area) accepted.
pub(crate) const MIN_AREA: f32 = 1e-6;

/// Twice the signed screen-space area of a triangle.
#[inline]
pub(crate) fn determinant(v: &[Vec5; 3]) -> f32 {
    (v[0].y - v[2].y) * (v[1].x - v[2].x) - (v[0].x - v[2].x) * (v[1].y - v[2].y)
}

#[inline]
pub(crate) fn is_finite(v: &Vec5) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite() && v.u.is_finite() && v.v.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn tagged(ys: [f32; 3]) -> [Vec5; 3] {
        // u records the input slot
        [
            Vec5::new(0.0, ys[0], 1.0, 0.0, 0.0),
            Vec5::new(0.0, ys[1], 1.0, 1.0, 0.0),
            Vec5::new(0.0, ys[2], 1.0, 2.0, 0.0),
        ]
    }

    fn slots(v: &[Vec5; 3]) -> [u8; 3] {
        [v[0].u as u8, v[1].u as u8, v[2].u as u8]
    }

    #[test]
    fn sorts_every_permutation() {
        for ys in [
            [1.0, 2.0, 3.0],
            [1.0, 3.0, 2.0],
            [2.0, 1.0, 3.0],
            [2.0, 3.0, 1.0],
            [3.0, 1.0, 2.0],
            [3.0, 2.0, 1.0],
        ] {
            let mut v = tagged(ys);
            sort_vertices(&mut v);
            assert_eq!([v[0].y, v[1].y, v[2].y], [1.0, 2.0, 3.0], "{ys:?}");
        }
    }

    #[test]
    fn already_sorted_input_is_untouched() {
        for ys in [[1.0, 1.0, 1.0], [1.0, 1.0, 2.0], [1.0, 2.0, 2.0], [0.0, 4.0, 9.0]] {
            let mut v = tagged(ys);
            sort_vertices(&mut v);
            assert_eq!(slots(&v), [0, 1, 2], "{ys:?}");
        }
    }

    #[test]
    fn equal_y_keeps_input_order() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let ys = [
                rng.gen_range(0..3) as f32,
                rng.gen_range(0..3) as f32,
                rng.gen_range(0..3) as f32,
            ];
            let mut v = tagged(ys);
            sort_vertices(&mut v);

            let mut expected = [0u8, 1, 2];
            expected.sort_by(|&a, &b| ys[a as usize].total_cmp(&ys[b as usize]));
            assert_eq!(slots(&v), expected, "{ys:?}");
        }
    }
}
