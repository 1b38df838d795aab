//! Editable control curves with a lazily sampled polyline.

mod control_point;

use log::debug;
use serde::{Deserialize, Serialize};
use verdure_core::{GeometryError, Result, Tolerance};
use verdure_math::{Point3, Vector3};

pub use control_point::ControlPoint;

use crate::nurbs::{effective_order, rational_curve_point_with_tolerance, KnotVector};

/// How a curve is turned into a polyline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    /// Spline order (degree + 1).
    pub order: usize,
    /// Parameter increment between samples.
    pub step: f64,
    /// Zero-span threshold for the de Boor blend.
    #[serde(default)]
    pub tolerance: Tolerance,
}

impl SamplingParams {
    pub const DEFAULT_ORDER: usize = 3;
    pub const DEFAULT_STEP: f64 = 0.02;

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            order: Self::DEFAULT_ORDER,
            step: Self::DEFAULT_STEP,
            tolerance: Tolerance::default(),
        }
    }
}

/// Parameter values `0, step, 2·step, ...` strictly below 1, followed by an
/// explicit `1.0`. The multiples are computed directly rather than
/// accumulated, and values within the parametric tolerance of 1 are dropped,
/// so the endpoint appears exactly once.
pub fn sample_parameters(step: f64) -> Vec<f64> {
    let tol = Tolerance::default().parametric;
    let mut params = Vec::new();
    if step.is_finite() && step > tol {
        let mut i = 0usize;
        loop {
            let u = i as f64 * step;
            if u >= 1.0 - tol {
                break;
            }
            params.push(u);
            i += 1;
        }
    } else {
        params.push(0.0);
    }
    params.push(1.0);
    params
}

/// An ordered chain of weighted control points plus its cached sample polyline.
///
/// Every mutation marks the polyline stale; [`Curve::polyline`] resamples on
/// the next read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Curve {
    points: Vec<ControlPoint>,
    params: SamplingParams,
    #[serde(skip)]
    polyline: Vec<Point3>,
    #[serde(skip, default = "stale")]
    dirty: bool,
}

fn stale() -> bool {
    true
}

impl Curve {
    pub fn new(params: SamplingParams) -> Self {
        Self {
            points: Vec::new(),
            params,
            polyline: Vec::new(),
            dirty: true,
        }
    }

    pub fn from_positions(positions: &[Point3], params: SamplingParams) -> Self {
        let mut curve = Self::new(params);
        curve.points = positions.iter().copied().map(ControlPoint::new).collect();
        curve
    }

    pub fn params(&self) -> SamplingParams {
        self.params
    }

    pub fn set_params(&mut self, params: SamplingParams) {
        self.params = params;
        self.dirty = true;
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn positions(&self) -> Vec<Point3> {
        self.points.iter().map(|p| p.position).collect()
    }

    pub fn weights(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.weight).collect()
    }

    pub fn push(&mut self, position: Point3) {
        self.points.push(ControlPoint::new(position));
        self.dirty = true;
    }

    pub fn insert(&mut self, index: usize, position: Point3) -> Result<()> {
        if index > self.points.len() {
            return Err(self.out_of_range(index));
        }
        self.points.insert(index, ControlPoint::new(position));
        self.dirty = true;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<ControlPoint> {
        if index >= self.points.len() {
            return Err(self.out_of_range(index));
        }
        self.dirty = true;
        Ok(self.points.remove(index))
    }

    pub fn set_position(&mut self, index: usize, position: Point3) -> Result<()> {
        self.point_mut(index)?.position = position;
        self.dirty = true;
        Ok(())
    }

    pub fn translate_point(&mut self, index: usize, offset: Vector3) -> Result<()> {
        self.point_mut(index)?.position += offset;
        self.dirty = true;
        Ok(())
    }

    /// # Errors
    /// `InvalidWeight` unless `weight` is finite and positive.
    pub fn set_weight(&mut self, index: usize, weight: f64) -> Result<()> {
        if !(weight.is_finite() && weight > 0.0) {
            return Err(GeometryError::InvalidWeight(weight));
        }
        self.point_mut(index)?.weight = weight;
        self.dirty = true;
        Ok(())
    }

    /// Selection only routes edits; it does not invalidate the polyline.
    pub fn set_selected(&mut self, index: usize, selected: bool) -> Result<()> {
        self.point_mut(index)?.selected = selected;
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        for p in &mut self.points {
            p.selected = false;
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.points.iter().position(|p| p.selected)
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.polyline.clear();
        self.dirty = true;
    }

    /// Sample the curve without touching the cache.
    ///
    /// # Errors
    /// `EmptyCurve` with no control points, `InvalidDegree` while there are
    /// fewer points than the order (two points always sample as a segment),
    /// `InvalidWeight` if a deserialized point carries a non-positive weight.
    pub fn sample(&self) -> Result<Vec<Point3>> {
        let order = effective_order(self.params.order, self.points.len())?;
        let knots = KnotVector::clamped(order, self.points.len() - 1)?;
        let positions = self.positions();
        let weights = self.weights();

        sample_parameters(self.params.step)
            .into_iter()
            .map(|u| {
                rational_curve_point_with_tolerance(
                    &positions,
                    &weights,
                    &knots,
                    u,
                    order,
                    self.params.tolerance,
                )
            })
            .collect()
    }

    /// The sample polyline, recomputed first if any control point changed.
    /// A curve that cannot be built yet yields an empty polyline.
    pub fn polyline(&mut self) -> &[Point3] {
        if self.dirty {
            self.polyline = match self.sample() {
                Ok(points) => points,
                Err(err) => {
                    debug!("curve not sampled: {}", err);
                    Vec::new()
                }
            };
            self.dirty = false;
        }
        &self.polyline
    }

    /// Last computed polyline, possibly stale.
    pub fn cached_polyline(&self) -> &[Point3] {
        &self.polyline
    }

    fn point_mut(&mut self, index: usize) -> Result<&mut ControlPoint> {
        let len = self.points.len();
        self.points
            .get_mut(index)
            .ok_or(GeometryError::IndexOutOfRange { index, len })
    }

    fn out_of_range(&self, index: usize) -> GeometryError {
        GeometryError::IndexOutOfRange {
            index,
            len: self.points.len(),
        }
    }
}

impl Default for Curve {
    fn default() -> Self {
        Self::new(SamplingParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdure_math::DVec3;

    fn arc() -> Curve {
        Curve::from_positions(
            &[
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(1.0, 1.0, 0.0),
                DVec3::new(2.0, 1.0, 0.0),
                DVec3::new(3.0, 0.0, 0.0),
            ],
            SamplingParams::default(),
        )
    }

    #[test]
    fn test_sample_parameters_end_once() {
        let params = sample_parameters(0.02);
        assert_eq!(params.len(), 51);
        assert_eq!(params.iter().filter(|&&u| u == 1.0).count(), 1);
        assert_eq!(*params.last().unwrap(), 1.0);
        assert!(params[params.len() - 2] < 1.0 - 1e-3);
    }

    #[test]
    fn test_sample_parameters_uneven_step() {
        let params = sample_parameters(0.3);
        assert_eq!(params.len(), 5);
        assert!((params[3] - 0.9).abs() < 1e-12);
        assert_eq!(params[4], 1.0);
        assert_eq!(sample_parameters(0.0), vec![0.0, 1.0]);
    }

    #[test]
    fn test_polyline_hits_endpoints() {
        let mut curve = arc();
        let line = curve.polyline().to_vec();
        assert_eq!(line.len(), 51);
        assert!((line[0] - DVec3::ZERO).length() < 1e-12);
        assert!((line[50] - DVec3::new(3.0, 0.0, 0.0)).length() < 1e-12);
        assert!(!curve.is_dirty());
    }

    #[test]
    fn test_mutation_marks_dirty() {
        let mut curve = arc();
        let before = curve.polyline().to_vec();

        curve.set_weight(1, 4.0).unwrap();
        assert!(curve.is_dirty());
        let after = curve.polyline().to_vec();
        assert_ne!(before, after);

        curve.set_selected(2, true).unwrap();
        assert!(!curve.is_dirty());
        assert_eq!(curve.selected_index(), Some(2));

        curve.translate_point(3, DVec3::Y).unwrap();
        assert!(curve.is_dirty());
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let curve = arc();
        assert_eq!(curve.sample().unwrap(), curve.sample().unwrap());
    }

    #[test]
    fn test_two_points_sample_as_segment() {
        let mut curve = Curve::from_positions(
            &[DVec3::ZERO, DVec3::new(2.0, 0.0, 0.0)],
            SamplingParams::default().with_order(4).with_step(0.25),
        );
        let line = curve.polyline().to_vec();
        assert_eq!(line.len(), 5);
        assert!((line[2] - DVec3::new(1.0, 0.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_cannot_build_yet() {
        let mut curve = Curve::from_positions(
            &[DVec3::ZERO, DVec3::X, DVec3::Y],
            SamplingParams::default().with_order(4),
        );
        assert!(matches!(
            curve.sample(),
            Err(GeometryError::InvalidDegree { .. })
        ));
        assert!(curve.polyline().is_empty());

        let mut empty = Curve::default();
        assert_eq!(empty.sample(), Err(GeometryError::EmptyCurve));
        assert!(empty.polyline().is_empty());
    }

    #[test]
    fn test_sampling_tolerance_reaches_evaluator() {
        let default = arc().sample().unwrap();
        let mut coarse = arc();
        coarse.set_params(SamplingParams::default().with_tolerance(Tolerance::new(1e-7, 2.0)));
        let flattened = coarse.sample().unwrap();
        assert_eq!(flattened.len(), default.len());
        assert_ne!(flattened, default);
    }

    #[test]
    fn test_rejects_non_positive_weight() {
        let mut curve = arc();
        assert_eq!(
            curve.set_weight(0, 0.0),
            Err(GeometryError::InvalidWeight(0.0))
        );
        assert!(curve.set_weight(0, -1.0).is_err());
        assert_eq!(curve.points()[0].weight, 1.0);
    }

    #[test]
    fn test_insert_remove() {
        let mut curve = arc();
        curve.insert(1, DVec3::new(0.5, 0.5, 0.0)).unwrap();
        assert_eq!(curve.len(), 5);
        let removed = curve.remove(1).unwrap();
        assert_eq!(removed.position, DVec3::new(0.5, 0.5, 0.0));
        assert_eq!(
            curve.remove(9),
            Err(GeometryError::IndexOutOfRange { index: 9, len: 4 })
        );
    }
}
