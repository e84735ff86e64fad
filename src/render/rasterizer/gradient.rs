//! Screen-space gradients and edge walkers for perspective-correct fills.
//!
//! `u`, `v` are not linear in screen space once a triangle is projected, but
//! `1/z`, `u/z` and `v/z` are. Both structs here carry those three
//! attributes: [`Gradients`] holds their constant partial derivatives over
//! the triangle and [`Edge`] walks one side of it a scanline at a time.
//!
//! Everything is pre-stepped onto the pixel grid. An edge starts on row
//! `ceil(top.y)` with its x and attributes already advanced to that row, and
//! a span starts at `ceil(x)` with attributes advanced along the row. This is
//! what keeps shared edges free of gaps and double writes.

use crate::error::{DegenerateKind, RenderError};
use crate::math::vec5::Vec5;

use super::{determinant, is_finite, MIN_AREA};

/// Smallest `|z|` accepted before `1/z` is taken.
const MIN_DEPTH: f32 = 1e-6;

/// Per-triangle partial derivatives of `1/z`, `u/z` and `v/z`.
///
/// Indexed by vertex for the per-vertex values. Vertices are expected in
/// ascending-y order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gradients {
    pub one_over_z: [f32; 3],
    pub u_over_z: [f32; 3],
    pub v_over_z: [f32; 3],
    pub d_one_over_z_dx: f32,
    pub d_one_over_z_dy: f32,
    pub d_u_over_z_dx: f32,
    pub d_u_over_z_dy: f32,
    pub d_v_over_z_dx: f32,
    pub d_v_over_z_dy: f32,
}

impl Gradients {
    /// Computes the gradients for a triangle.
    ///
    /// # Errors
    /// Fails with [`DegenerateKind::NonFinite`], [`DegenerateKind::ZeroDepth`]
    /// or [`DegenerateKind::ZeroArea`] before any division could produce an
    /// infinity.
    pub fn new(v: &[Vec5; 3]) -> Result<Self, RenderError> {
        if !v.iter().all(is_finite) {
            return Err(DegenerateKind::NonFinite.into());
        }
        if let Some(p) = v.iter().find(|p| p.z.abs() < MIN_DEPTH) {
            return Err(DegenerateKind::ZeroDepth { z: p.z }.into());
        }

        let determinant = determinant(v);
        if determinant.abs() < MIN_AREA {
            return Err(DegenerateKind::ZeroArea.into());
        }

        let one_over_z = [1.0 / v[0].z, 1.0 / v[1].z, 1.0 / v[2].z];
        let u_over_z = [
            v[0].u * one_over_z[0],
            v[1].u * one_over_z[1],
            v[2].u * one_over_z[2],
        ];
        let v_over_z = [
            v[0].v * one_over_z[0],
            v[1].v * one_over_z[1],
            v[2].v * one_over_z[2],
        ];

        let one_over_dx = 1.0 / determinant;
        let one_over_dy = -one_over_dx;

        // Derivatives of the plane through the three (x, y, attr) points
        let d_dx = |a: &[f32; 3]| {
            one_over_dx * ((a[1] - a[2]) * (v[0].y - v[2].y) - (a[0] - a[2]) * (v[1].y - v[2].y))
        };
        let d_dy = |a: &[f32; 3]| {
            one_over_dy * ((a[1] - a[2]) * (v[0].x - v[2].x) - (a[0] - a[2]) * (v[1].x - v[2].x))
        };

        Ok(Self {
            d_one_over_z_dx: d_dx(&one_over_z),
            d_one_over_z_dy: d_dy(&one_over_z),
            d_u_over_z_dx: d_dx(&u_over_z),
            d_u_over_z_dy: d_dy(&u_over_z),
            d_v_over_z_dx: d_dx(&v_over_z),
            d_v_over_z_dy: d_dy(&v_over_z),
            one_over_z,
            u_over_z,
            v_over_z,
        })
    }
}

/// Walking state for one side of a triangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub x: f32,
    pub x_step: f32,
    /// Current row.
    pub y: i32,
    /// Rows left to walk. Wider than `y` so saturated rows far off the
    /// surface still subtract exactly.
    pub height: i64,
    pub one_over_z: f32,
    pub one_over_z_step: f32,
    pub u_over_z: f32,
    pub u_over_z_step: f32,
    pub v_over_z: f32,
    pub v_over_z_step: f32,
}

impl Edge {
    /// Sets up the edge from vertex `top` to vertex `bottom`, pre-stepped to
    /// the first scanline at or below `top`.
    ///
    /// An edge spanning no scanline keeps zero steps, so its slope is never
    /// evaluated.
    pub fn new(gradients: &Gradients, vertices: &[Vec5; 3], top: usize, bottom: usize) -> Self {
        let (t, b) = (&vertices[top], &vertices[bottom]);

        let y = t.y.ceil() as i32;
        let height = (i64::from(b.y.ceil() as i32) - i64::from(y)).max(0);

        let mut edge = Self {
            x: t.x,
            x_step: 0.0,
            y,
            height,
            one_over_z: gradients.one_over_z[top],
            one_over_z_step: 0.0,
            u_over_z: gradients.u_over_z[top],
            u_over_z_step: 0.0,
            v_over_z: gradients.v_over_z[top],
            v_over_z_step: 0.0,
        };
        if height == 0 {
            return edge;
        }

        let y_prestep = y as f32 - t.y;
        edge.x_step = (b.x - t.x) / (b.y - t.y);
        edge.x = y_prestep * edge.x_step + t.x;
        let x_prestep = edge.x - t.x;

        edge.one_over_z += y_prestep * gradients.d_one_over_z_dy + x_prestep * gradients.d_one_over_z_dx;
        edge.one_over_z_step = edge.x_step * gradients.d_one_over_z_dx + gradients.d_one_over_z_dy;

        edge.u_over_z += y_prestep * gradients.d_u_over_z_dy + x_prestep * gradients.d_u_over_z_dx;
        edge.u_over_z_step = edge.x_step * gradients.d_u_over_z_dx + gradients.d_u_over_z_dy;

        edge.v_over_z += y_prestep * gradients.d_v_over_z_dy + x_prestep * gradients.d_v_over_z_dx;
        edge.v_over_z_step = edge.x_step * gradients.d_v_over_z_dx + gradients.d_v_over_z_dy;

        edge
    }

    /// Advances straight to `row`, skipping the rows in between.
    ///
    /// Does nothing if the edge is already at or past `row`.
    pub fn skip_to(&mut self, row: i32) {
        let rows = i64::from(row) - i64::from(self.y);
        if rows <= 0 {
            return;
        }
        let n = rows as f32;
        self.x += n * self.x_step;
        self.one_over_z += n * self.one_over_z_step;
        self.u_over_z += n * self.u_over_z_step;
        self.v_over_z += n * self.v_over_z_step;
        self.y = row;
        self.height = (self.height - rows).max(0);
    }

    /// Advances one scanline.
    #[inline]
    pub fn step(&mut self) {
        self.x += self.x_step;
        self.y += 1;
        self.height -= 1;
        self.one_over_z += self.one_over_z_step;
        self.u_over_z += self.u_over_z_step;
        self.v_over_z += self.v_over_z_step;
    }
}

/// Whether the middle vertex lies left of the long top-to-bottom edge.
///
/// Vertices must be sorted by ascending y and form a triangle with nonzero
/// area. When the middle vertex is the horizontal extreme on one side the x
/// order decides; otherwise the steeper of the two short edges does.
pub fn middle_is_left(v: &[Vec5; 3]) -> bool {
    let slope = |a: &Vec5, b: &Vec5| ((b.y - a.y) / (b.x - a.x)).abs();

    if v[1].x < v[2].x {
        if v[0].x < v[1].x {
            slope(&v[0], &v[1]) > slope(&v[1], &v[2])
        } else {
            true
        }
    } else if v[0].x > v[1].x {
        slope(&v[0], &v[1]) <= slope(&v[1], &v[2])
    } else {
        false
    }
}
