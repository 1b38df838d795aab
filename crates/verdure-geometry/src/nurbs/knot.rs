//! Clamped knot vectors and knot span lookup.

use serde::{Deserialize, Serialize};
use verdure_core::traits::Validate;
use verdure_core::{GeometryError, Result};

/// A non-decreasing knot sequence over the parameter domain `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnotVector {
    values: Vec<f64>,
}

impl KnotVector {
    /// Build the clamped uniform knot vector for a spline of the given `order`
    /// (degree + 1) over control points `0..=last_index`.
    ///
    /// The result has `last_index + order + 2` entries: `order` zeros, then
    /// `last_index - order + 2` entries stepping by `1 / (last_index - order + 2)`
    /// (the last of which reaches 1), then `order` ones.
    ///
    /// # Errors
    /// `InvalidDegree` if `order` is zero or exceeds the control point count.
    pub fn clamped(order: usize, last_index: usize) -> Result<Self> {
        let count = last_index + 1;
        if order == 0 || count < order {
            return Err(GeometryError::InvalidDegree {
                order,
                control_points: count,
            });
        }

        let k = order;
        let m = last_index;
        let segments = (m + 2 - k) as f64;

        let values = (0..=m + k + 1)
            .map(|i| {
                if i < k {
                    0.0
                } else if i > m {
                    1.0
                } else {
                    (i + 1 - k) as f64 / segments
                }
            })
            .collect();

        Ok(Self { values })
    }

    /// Wrap a caller-supplied knot sequence.
    ///
    /// # Errors
    /// `DegenerateKnotSpan` at the first decreasing span, or at index 0 when the
    /// whole domain collapses to a single value.
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        let knots = Self { values };
        knots.validate()?;
        Ok(knots)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Locate the span `d` with `U[d] <= u < U[d+1]`.
    ///
    /// Falls back to `last_index` when no span contains `u`, which is the case
    /// for `u = 1`, so the curve end is always evaluable. The result is kept in
    /// `order - 1 ..= last_index` so the de Boor window never leaves the
    /// control polygon.
    pub fn find_span(&self, u: f64, order: usize, last_index: usize) -> usize {
        let span = self
            .values
            .windows(2)
            .position(|w| u >= w[0] && u < w[1])
            .unwrap_or(last_index);
        span.clamp(order.saturating_sub(1), last_index)
    }
}

impl Validate for KnotVector {
    fn validate(&self) -> Result<()> {
        if let Some(index) = self.values.windows(2).position(|w| w[1] < w[0]) {
            return Err(GeometryError::DegenerateKnotSpan { index });
        }
        match (self.values.first(), self.values.last()) {
            (Some(first), Some(last)) if last > first => Ok(()),
            _ => Err(GeometryError::DegenerateKnotSpan { index: 0 }),
        }
    }
}

/// Resolve the order actually used for `count` control points.
///
/// Exactly two points always evaluate as a linear segment (order 2), whatever
/// was requested.
///
/// # Errors
/// `EmptyCurve` with no points, `InvalidDegree` when there are fewer points
/// than the requested order.
pub fn effective_order(requested: usize, count: usize) -> Result<usize> {
    match count {
        0 => Err(GeometryError::EmptyCurve),
        2 => Ok(2),
        _ if requested == 0 || count < requested => Err(GeometryError::InvalidDegree {
            order: requested,
            control_points: count,
        }),
        _ => Ok(requested),
    }
}
