use serde::{Deserialize, Serialize};
use verdure_core::{GeometryError, Result};
use verdure_math::Point3;

/// A weighted control point. `selected` is editor state and never affects
/// evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub position: Point3,
    pub weight: f64,
    pub selected: bool,
}

impl ControlPoint {
    pub fn new(position: Point3) -> Self {
        Self {
            position,
            weight: 1.0,
            selected: false,
        }
    }

    /// # Errors
    /// `InvalidWeight` unless `weight` is finite and positive.
    pub fn with_weight(mut self, weight: f64) -> Result<Self> {
        if !(weight.is_finite() && weight > 0.0) {
            return Err(GeometryError::InvalidWeight(weight));
        }
        self.weight = weight;
        Ok(self)
    }
}

impl From<Point3> for ControlPoint {
    fn from(position: Point3) -> Self {
        Self::new(position)
    }
}
