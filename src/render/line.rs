//! Line drawing.
//!
//! Each algorithm has a core that reports pixels through a plot callback and
//! a thin wrapper that writes into a [`FrameBuffer`]. The wrappers start and
//! stop the walk at the surface edges, so a line with far-off endpoints costs
//! no more than the pixels it can actually touch.
//!
//! [`bresenham`] and [`midpoint`] are two formulations of the same integer
//! walk and produce identical pixels for identical input. [`scaled_bresenham`]
//! accepts subpixel endpoints and keeps them in fixed point.

use super::framebuffer::FrameBuffer;
use crate::math::vec2::Vec2;

/// Subpixel units per pixel used by [`draw_line_scaled`].
pub const DEFAULT_SUBPIXEL_SCALE: i64 = 100;

/// Fixed-point endpoints are clamped to this magnitude so the products in
/// [`scaled_bresenham`] fit in `i64`.
const MAX_FIXED: i64 = 1 << 30;
const MAX_SCALE: i64 = 1 << 16;

/// Inclusive pixel bounds a walk is restricted to.
#[derive(Clone, Copy, Debug)]
struct Clip {
    x: (i64, i64),
    y: (i64, i64),
}

impl Clip {
    const NONE: Clip = Clip {
        x: (i64::MIN, i64::MAX),
        y: (i64::MIN, i64::MAX),
    };

    fn surface(buffer: &FrameBuffer) -> Self {
        Clip {
            x: (0, i64::from(buffer.width()) - 1),
            y: (0, i64::from(buffer.height()) - 1),
        }
    }

    /// Bounds along the axis the walk steps one pixel at a time.
    fn major(&self, steep: bool) -> (i64, i64) {
        if steep {
            self.y
        } else {
            self.x
        }
    }
}

/// Normalizes a line so it walks left to right along its major axis.
///
/// Returns the endpoints in walking order and whether the axes were swapped.
/// Deltas between two `i32` endpoints can exceed `i32`, so the walk runs in
/// `i64`.
fn orient(x0: i32, y0: i32, x1: i32, y1: i32) -> (i64, i64, i64, i64, bool) {
    let (mut x0, mut y0, mut x1, mut y1) = (i64::from(x0), i64::from(y0), i64::from(x1), i64::from(y1));
    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }
    (x0, y0, x1, y1, steep)
}

/// Integer walk state positioned on the first pixel inside the clip.
struct Walk {
    start: i64,
    end: i64,
    y: i64,
    y_step: i64,
    dx: i64,
    dy: i64,
    /// `2 * dy * k - 2 * dx * n` after `k` pixels and `n` minor steps.
    error: i64,
    steep: bool,
}

impl Walk {
    fn new(x0: i32, y0: i32, x1: i32, y1: i32, clip: Clip) -> Option<Self> {
        let (x0, y0, x1, y1, steep) = orient(x0, y0, x1, y1);
        let (lo, hi) = clip.major(steep);
        let (start, end) = (x0.max(lo), x1.min(hi));
        if start > end {
            return None;
        }

        let dx = x1 - x0;
        let dy = (y1 - y0).abs();
        let y_step = if y0 < y1 { 1 } else { -1 };

        // minor steps taken before pixel k: ceil((2 * dy * k - dx) / (2 * dx))
        let k = i128::from(start - x0);
        let steps = if dx == 0 {
            0
        } else {
            let (num, den) = (2 * i128::from(dy) * k - i128::from(dx), 2 * i128::from(dx));
            (-(-num).div_euclid(den)).max(0)
        };
        let error = 2 * i128::from(dy) * k - 2 * i128::from(dx) * steps;

        // the minor coordinate never leaves the span between y0 and y1
        Some(Self {
            start,
            end,
            y: y0 + y_step * steps as i64,
            y_step,
            dx,
            dy,
            error: error as i64,
            steep,
        })
    }

    #[inline]
    fn plot<F: FnMut(i32, i32)>(&self, x: i64, plot: &mut F) {
        if self.steep {
            plot(self.y as i32, x as i32);
        } else {
            plot(x as i32, self.y as i32);
        }
    }
}

/// Bresenham's line algorithm.
///
/// Walks the major axis one pixel at a time and accumulates twice the minor
/// delta as an error term. When the error passes the major delta the minor
/// coordinate steps and the error pays back twice the major delta. Lines that
/// pass exactly between two pixels keep the lower minor coordinate.
pub fn bresenham<F: FnMut(i32, i32)>(x0: i32, y0: i32, x1: i32, y1: i32, plot: F) {
    bresenham_clipped(x0, y0, x1, y1, Clip::NONE, plot);
}

fn bresenham_clipped<F: FnMut(i32, i32)>(x0: i32, y0: i32, x1: i32, y1: i32, clip: Clip, mut plot: F) {
    let Some(mut walk) = Walk::new(x0, y0, x1, y1, clip) else {
        return;
    };
    for x in walk.start..=walk.end {
        walk.plot(x, &mut plot);
        walk.error += 2 * walk.dy;
        if walk.error > walk.dx {
            walk.y += walk.y_step;
            walk.error -= 2 * walk.dx;
        }
    }
}

/// Midpoint line algorithm.
///
/// Tracks the sign of the implicit line equation evaluated at the midpoint
/// between the two candidate pixels.
pub fn midpoint<F: FnMut(i32, i32)>(x0: i32, y0: i32, x1: i32, y1: i32, plot: F) {
    midpoint_clipped(x0, y0, x1, y1, Clip::NONE, plot);
}

fn midpoint_clipped<F: FnMut(i32, i32)>(x0: i32, y0: i32, x1: i32, y1: i32, clip: Clip, mut plot: F) {
    let Some(mut walk) = Walk::new(x0, y0, x1, y1, clip) else {
        return;
    };
    let (dx, dy) = (walk.dx, walk.dy);

    let mut d = walk.error + 2 * dy - dx;
    for x in walk.start..=walk.end {
        walk.plot(x, &mut plot);
        if d > 0 {
            walk.y += walk.y_step;
            d += 2 * (dy - dx);
        } else {
            d += 2 * dy;
        }
    }
}

/// Rounds `value / scale` to the nearest integer, halves up.
#[inline]
fn round_div(value: i64, scale: i64) -> i64 {
    (2 * value + scale).div_euclid(2 * scale)
}

/// Bresenham over fixed-point endpoints.
///
/// Endpoints are converted to integers in units of `1 / scale` pixel. The
/// walk covers every pixel column (or row, for steep lines) between the
/// rounded endpoints, and the plotted minor coordinate is the ideal line
/// position at that pixel rounded to nearest, halves up. The division is
/// carried as an integer quotient and remainder, so there is no drift.
pub fn scaled_bresenham<F: FnMut(i32, i32)>(p0: Vec2, p1: Vec2, scale: i64, plot: F) {
    scaled_bresenham_clipped(p0, p1, scale, Clip::NONE, plot);
}

fn scaled_bresenham_clipped<F: FnMut(i32, i32)>(p0: Vec2, p1: Vec2, scale: i64, clip: Clip, mut plot: F) {
    let scale = scale.clamp(1, MAX_SCALE);
    let to_fixed = |v: f32| ((v as f64 * scale as f64).round() as i64).clamp(-MAX_FIXED, MAX_FIXED);

    let (mut x0, mut y0) = (to_fixed(p0.x), to_fixed(p0.y));
    let (mut x1, mut y1) = (to_fixed(p1.x), to_fixed(p1.y));

    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let mut emit = |x: i64, y: i64| {
        if steep {
            plot(y as i32, x as i32);
        } else {
            plot(x as i32, y as i32);
        }
    };

    let dx = x1 - x0;
    let dy = y1 - y0;
    let (lo, hi) = clip.major(steep);
    let first = round_div(x0, scale).max(lo);
    let last = round_div(x1, scale).min(hi);
    if first > last {
        return;
    }

    if dx == 0 {
        emit(first, round_div(y0, scale));
        return;
    }

    // At column px the ideal minor coordinate is n / den with
    // n = y0 * dx + (px * scale - x0) * dy and den = dx * scale.
    // Track floor((2n + den) / (2 * den)) as quotient plus remainder.
    let den = dx * scale;
    let two_den = 2 * den;
    let numerator = 2 * (y0 * dx + (first * scale - x0) * dy) + den;
    let mut y = numerator.div_euclid(two_den);
    let mut remainder = numerator.rem_euclid(two_den);
    let step = 2 * scale * dy;

    for x in first..=last {
        emit(x, y);
        remainder += step;
        if remainder >= two_den {
            y += 1;
            remainder -= two_den;
        } else if remainder < 0 {
            y -= 1;
            remainder += two_den;
        }
    }
}

pub fn draw_line_bresenham(buffer: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let clip = Clip::surface(buffer);
    bresenham_clipped(x0, y0, x1, y1, clip, |x, y| buffer.set_pixel(x, y, color));
}

pub fn draw_line_midpoint(buffer: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let clip = Clip::surface(buffer);
    midpoint_clipped(x0, y0, x1, y1, clip, |x, y| buffer.set_pixel(x, y, color));
}

/// Draws a line between subpixel endpoints at [`DEFAULT_SUBPIXEL_SCALE`].
pub fn draw_line_scaled(buffer: &mut FrameBuffer, p0: Vec2, p1: Vec2, color: u32) {
    let clip = Clip::surface(buffer);
    scaled_bresenham_clipped(p0, p1, DEFAULT_SUBPIXEL_SCALE, clip, |x, y| {
        buffer.set_pixel(x, y, color)
    });
}

/// Outlines a screen-space triangle. Coordinates are truncated to pixels.
pub fn draw_triangle_wireframe(buffer: &mut FrameBuffer, points: [Vec2; 3], color: u32) {
    for i in 0..3 {
        let a = points[i];
        let b = points[(i + 1) % 3];
        draw_line_bresenham(buffer, a.x as i32, a.y as i32, b.x as i32, b.y as i32, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::BTreeSet;

    fn collect<F>(draw: F) -> Vec<(i32, i32)>
    where
        F: FnOnce(&mut dyn FnMut(i32, i32)),
    {
        let mut pixels = Vec::new();
        draw(&mut |x, y| pixels.push((x, y)));
        pixels
    }

    fn pixel_set(pixels: &[(i32, i32)]) -> BTreeSet<(i32, i32)> {
        pixels.iter().copied().collect()
    }

    #[test]
    fn horizontal_line_sets_every_pixel_once() {
        let b = collect(|plot| bresenham(0, 0, 4, 0, plot));
        let m = collect(|plot| midpoint(0, 0, 4, 0, plot));
        assert_eq!(b, vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
        assert_eq!(b, m);
    }

    #[test]
    fn single_point_line() {
        assert_eq!(collect(|plot| bresenham(3, 3, 3, 3, plot)), vec![(3, 3)]);
        assert_eq!(collect(|plot| midpoint(3, 3, 3, 3, plot)), vec![(3, 3)]);
    }

    #[test]
    fn steep_line_covers_every_row() {
        let pixels = collect(|plot| bresenham(0, 0, 1, 4, plot));
        assert_eq!(pixels, vec![(0, 0), (0, 1), (0, 2), (1, 3), (1, 4)]);
    }

    #[test]
    fn direction_does_not_change_pixels() {
        let forward = collect(|plot| bresenham(1, 7, 9, 2, plot));
        let backward = collect(|plot| bresenham(9, 2, 1, 7, plot));
        assert_eq!(pixel_set(&forward), pixel_set(&backward));
        assert_eq!(forward.len(), 9);
    }

    #[test]
    fn bresenham_and_midpoint_agree() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let (x0, y0, x1, y1) = (
                rng.gen_range(-40..40),
                rng.gen_range(-40..40),
                rng.gen_range(-40..40),
                rng.gen_range(-40..40),
            );
            let b = collect(|plot| bresenham(x0, y0, x1, y1, plot));
            let m = collect(|plot| midpoint(x0, y0, x1, y1, plot));
            assert_eq!(b, m, "({x0},{y0}) -> ({x1},{y1})");
            assert!(b.contains(&(x0, y0)) && b.contains(&(x1, y1)));
        }
    }

    #[test]
    fn scaled_matches_integer_walk_without_ties() {
        let b = collect(|plot| bresenham(0, 0, 5, 2, plot));
        let s = collect(|plot| {
            scaled_bresenham(Vec2::new(0.0, 0.0), Vec2::new(5.0, 2.0), DEFAULT_SUBPIXEL_SCALE, plot)
        });
        assert_eq!(b, s);
    }

    #[test]
    fn scaled_stays_within_half_a_pixel_of_ideal_line() {
        let (p0, p1) = (Vec2::new(0.3, 1.7), Vec2::new(9.6, 5.2));
        let pixels = collect(|plot| scaled_bresenham(p0, p1, DEFAULT_SUBPIXEL_SCALE, plot));
        assert_eq!(pixels.len(), 11);

        let slope = (p1.y - p0.y) / (p1.x - p0.x);
        for (x, y) in pixels {
            let ideal = p0.y + (x as f32 - p0.x) * slope;
            assert!((y as f32 - ideal).abs() <= 0.5 + 1e-4, "({x}, {y}) vs {ideal}");
        }
    }

    #[test]
    fn scaled_handles_steep_and_reversed_lines() {
        let pixels = collect(|plot| {
            scaled_bresenham(Vec2::new(2.0, 8.0), Vec2::new(0.0, 0.0), DEFAULT_SUBPIXEL_SCALE, plot)
        });
        let rows: Vec<i32> = pixels.iter().map(|&(_, y)| y).collect();
        assert_eq!(rows, (0..=8).collect::<Vec<_>>());
        for (x, y) in pixels {
            let ideal = y as f32 * 0.25;
            assert!((x as f32 - ideal).abs() <= 0.5);
        }
    }

    #[test]
    fn framebuffer_wrapper_clips() {
        let mut bytes = vec![0u8; 4 * 4 * 4];
        let mut fb = FrameBuffer::new(&mut bytes, 4, 4, 16).unwrap();
        draw_line_bresenham(&mut fb, -5, 1, 10, 1, 9);
        for x in 0..4 {
            assert_eq!(fb.get_pixel(x, 1), Some(9));
        }
        assert_eq!(fb.get_pixel(0, 0), Some(0));
    }

    fn lit_pixels(fb: &FrameBuffer) -> BTreeSet<(i32, i32)> {
        let mut lit = BTreeSet::new();
        for y in 0..fb.height() as i32 {
            for x in 0..fb.width() as i32 {
                if fb.get_pixel(x, y) != Some(0) {
                    lit.insert((x, y));
                }
            }
        }
        lit
    }

    #[test]
    fn clipped_walk_matches_full_walk_on_surface() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let (x0, y0, x1, y1) = (
                rng.gen_range(-300..300),
                rng.gen_range(-300..300),
                rng.gen_range(-300..300),
                rng.gen_range(-300..300),
            );
            let on_surface: BTreeSet<(i32, i32)> = collect(|plot| bresenham(x0, y0, x1, y1, plot))
                .into_iter()
                .filter(|&(x, y)| (0..24).contains(&x) && (0..16).contains(&y))
                .collect();

            let mut bytes = vec![0u8; 24 * 16 * 4];
            let mut fb = FrameBuffer::new(&mut bytes, 24, 16, 96).unwrap();
            draw_line_bresenham(&mut fb, x0, y0, x1, y1, 1);
            assert_eq!(lit_pixels(&fb), on_surface, "({x0},{y0}) -> ({x1},{y1})");

            let mut bytes = vec![0u8; 24 * 16 * 4];
            let mut fb = FrameBuffer::new(&mut bytes, 24, 16, 96).unwrap();
            draw_line_midpoint(&mut fb, x0, y0, x1, y1, 1);
            assert_eq!(lit_pixels(&fb), on_surface, "({x0},{y0}) -> ({x1},{y1})");
        }
    }

    #[test]
    fn far_off_endpoints_do_not_overflow() {
        let mut bytes = vec![0u8; 64 * 64 * 4];
        let mut fb = FrameBuffer::new(&mut bytes, 64, 64, 256).unwrap();
        // slope one half through the origin, deltas beyond i32
        draw_line_bresenham(&mut fb, -2_000_000_000, -1_000_000_000, 2_000_000_000, 1_000_000_000, 5);
        assert_eq!(fb.get_pixel(0, 0), Some(5));
        assert_eq!(fb.get_pixel(2, 1), Some(5));
        assert_eq!(fb.get_pixel(62, 31), Some(5));
        assert_eq!(lit_pixels(&fb).len(), 64);

        draw_line_midpoint(&mut fb, i32::MIN, i32::MAX, i32::MAX, i32::MIN, 5);
        draw_line_scaled(&mut fb, Vec2::new(-3.0e9, 10.0), Vec2::new(3.0e9, 10.0), 5);
        assert_eq!(fb.get_pixel(40, 10), Some(5));
    }

    #[test]
    fn wireframe_touches_all_corners() {
        let mut bytes = vec![0u8; 8 * 8 * 4];
        let mut fb = FrameBuffer::new(&mut bytes, 8, 8, 32).unwrap();
        let points = [Vec2::new(1.0, 1.0), Vec2::new(6.0, 1.0), Vec2::new(1.0, 6.0)];
        draw_triangle_wireframe(&mut fb, points, 3);
        for p in points {
            assert_eq!(fb.get_pixel(p.x as i32, p.y as i32), Some(3));
        }
        assert_eq!(fb.get_pixel(3, 3), Some(0));
    }
}
