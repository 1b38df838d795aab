//! De Boor evaluation by repeated linear blending.
//!
//! Every evaluator here follows the same scheme: locate the knot span `d`,
//! seed `order` values from control points `d, d-1, ..., d-order+1`, then run
//! `order - 1` blending rounds. Rational curves blend homogeneous `(w·P, w)`
//! values and divide at the end; tensor surfaces collapse each row in `v`
//! first and the resulting column in `u`.

use std::ops::{Add, Mul};

use log::trace;
use verdure_core::{GeometryError, Result, Tolerance};
use verdure_math::{DVec3, DVec4, Point3};

use super::knot::KnotVector;
use crate::surface::ControlGrid;

/// Blend factor for round `r` at knot `i`. Spans below `tolerance.parametric`
/// blend with 0 instead of dividing by zero.
fn blend_factor(knots: &[f64], i: usize, r: usize, u: f64, tolerance: Tolerance) -> f64 {
    let span = knots[i + r - 1] - knots[i];
    if tolerance.is_zero_span(span) {
        trace!("degenerate knot span [{}, {}] clamped", i, i + r - 1);
        0.0
    } else {
        (u - knots[i]) / span
    }
}

/// Collapse `values` (seeded from span `d` downward) to a single value.
fn collapse<T>(
    values: &mut [T],
    knots: &[f64],
    d: usize,
    order: usize,
    u: f64,
    tolerance: Tolerance,
) -> T
where
    T: Copy + Add<Output = T> + Mul<f64, Output = T>,
{
    for r in (2..=order).rev() {
        for s in 0..=r - 2 {
            let omega = blend_factor(knots, d - s, r, u, tolerance);
            values[s] = values[s] * omega + values[s + 1] * (1.0 - omega);
        }
    }
    values[0]
}

fn check_window(count: usize, knots: &KnotVector, order: usize) -> Result<()> {
    if count == 0 {
        return Err(GeometryError::EmptyCurve);
    }
    if order == 0 || order > count || knots.len() < count + order {
        return Err(GeometryError::InvalidDegree {
            order,
            control_points: count,
        });
    }
    Ok(())
}

/// Evaluate a rational (weighted) B-spline curve at `u ∈ [0, 1]`.
///
/// # Errors
/// `EmptyCurve` for no control points, `IncompatibleCurves` when weights and
/// points differ in length, `InvalidWeight` for a weight that is not finite
/// and positive, `InvalidDegree` when `order` does not fit the control
/// polygon or the knot vector.
pub fn rational_curve_point(
    points: &[Point3],
    weights: &[f64],
    knots: &KnotVector,
    u: f64,
    order: usize,
) -> Result<Point3> {
    rational_curve_point_with_tolerance(points, weights, knots, u, order, Tolerance::default())
}

/// [`rational_curve_point`] with an explicit zero-span tolerance.
pub fn rational_curve_point_with_tolerance(
    points: &[Point3],
    weights: &[f64],
    knots: &KnotVector,
    u: f64,
    order: usize,
    tolerance: Tolerance,
) -> Result<Point3> {
    check_window(points.len(), knots, order)?;
    if weights.len() != points.len() {
        return Err(GeometryError::IncompatibleCurves(format!(
            "{} weights for {} control points",
            weights.len(),
            points.len()
        )));
    }
    if let Some(&w) = weights.iter().find(|w| !(w.is_finite() && **w > 0.0)) {
        return Err(GeometryError::InvalidWeight(w));
    }

    let u = u.clamp(0.0, 1.0);
    let m = points.len() - 1;
    let d = knots.find_span(u, order, m);

    let mut homogeneous: Vec<DVec4> = (0..order)
        .map(|j| {
            let w = weights[d - j];
            (points[d - j] * w).extend(w)
        })
        .collect();
    let h = collapse(&mut homogeneous, knots.values(), d, order, u, tolerance);
    // Only reachable when custom knots leave `u` outside the span window.
    if !(h.w.is_finite() && h.w > 0.0) {
        return Err(GeometryError::InvalidWeight(h.w));
    }
    Ok(h.truncate() / h.w)
}

/// Evaluate a non-rational B-spline curve at `u ∈ [0, 1]`.
///
/// # Errors
/// Same as [`rational_curve_point`] minus the weight checks.
pub fn curve_point(points: &[Point3], knots: &KnotVector, u: f64, order: usize) -> Result<Point3> {
    check_window(points.len(), knots, order)?;

    let u = u.clamp(0.0, 1.0);
    let m = points.len() - 1;
    let d = knots.find_span(u, order, m);

    let mut seeds: Vec<DVec3> = (0..order).map(|j| points[d - j]).collect();
    Ok(collapse(&mut seeds, knots.values(), d, order, u, Tolerance::default()))
}

/// A tensor-product B-spline surface over a borrowed control grid, with knot
/// vectors built once and reused for every evaluation.
#[derive(Debug, Clone)]
pub struct TensorSurface<'a> {
    grid: &'a ControlGrid,
    knots_u: KnotVector,
    knots_v: KnotVector,
    order_u: usize,
    order_v: usize,
    tolerance: Tolerance,
}

impl<'a> TensorSurface<'a> {
    /// Rows of the grid run along `u`, columns along `v`.
    ///
    /// # Errors
    /// `EmptyCurve` for an empty grid, `InvalidDegree` when either order does
    /// not fit its direction (two rows or columns clamp to order 2).
    pub fn new(grid: &'a ControlGrid, order_u: usize, order_v: usize) -> Result<Self> {
        if grid.is_empty() {
            return Err(GeometryError::EmptyCurve);
        }
        let order_u = super::effective_order(order_u, grid.rows())?;
        let order_v = super::effective_order(order_v, grid.cols())?;
        Ok(Self {
            grid,
            knots_u: KnotVector::clamped(order_u, grid.rows() - 1)?,
            knots_v: KnotVector::clamped(order_v, grid.cols() - 1)?,
            order_u,
            order_v,
            tolerance: Tolerance::default(),
        })
    }

    /// Use `tolerance.parametric` as the zero-span threshold.
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn orders(&self) -> (usize, usize) {
        (self.order_u, self.order_v)
    }

    pub fn knots_u(&self) -> &KnotVector {
        &self.knots_u
    }

    pub fn knots_v(&self) -> &KnotVector {
        &self.knots_v
    }

    /// Evaluate the surface point at `(u, v) ∈ [0, 1]²`.
    pub fn point_at(&self, u: f64, v: f64) -> Point3 {
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);
        let d_u = self.knots_u.find_span(u, self.order_u, self.grid.rows() - 1);
        let d_v = self.knots_v.find_span(v, self.order_v, self.grid.cols() - 1);

        let mut column: Vec<Point3> = Vec::with_capacity(self.order_u);
        let mut row: Vec<Point3> = Vec::with_capacity(self.order_v);
        for i in 0..self.order_u {
            row.clear();
            row.extend((0..self.order_v).map(|j| self.grid.position(d_u - i, d_v - j)));
            column.push(collapse(
                &mut row,
                self.knots_v.values(),
                d_v,
                self.order_v,
                v,
                self.tolerance,
            ));
        }
        collapse(&mut column, self.knots_u.values(), d_u, self.order_u, u, self.tolerance)
    }
}

/// One-shot tensor surface evaluation; prefer [`TensorSurface`] when sampling
/// many points.
///
/// # Errors
/// See [`TensorSurface::new`].
pub fn surface_point(
    grid: &ControlGrid,
    order_u: usize,
    order_v: usize,
    u: f64,
    v: f64,
) -> Result<Point3> {
    Ok(TensorSurface::new(grid, order_u, order_v)?.point_at(u, v))
}
