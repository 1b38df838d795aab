/// Tolerances shared by the evaluators and the mesher.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Distances below this are treated as collapsed geometry (model units).
    pub linear: f64,
    /// Parameter-space epsilon for knot spans and sampling bounds.
    pub parametric: f64,
}

impl Tolerance {
    pub const DEFAULT_LINEAR: f64 = 1e-7;
    pub const DEFAULT_PARAMETRIC: f64 = 1e-9;

    pub fn new(linear: f64, parametric: f64) -> Self {
        Self { linear, parametric }
    }

    pub fn default_precision() -> Self {
        Self {
            linear: Self::DEFAULT_LINEAR,
            parametric: Self::DEFAULT_PARAMETRIC,
        }
    }

    /// Coarse tolerance used for cross-section collapse detection.
    pub fn loose() -> Self {
        Self {
            linear: 1e-4,
            parametric: 1e-9,
        }
    }

    /// Check if a length is zero within linear tolerance
    pub fn is_collapsed(self, length: f64) -> bool {
        length.abs() <= self.linear
    }

    /// Check if a knot span is zero within parametric tolerance
    pub fn is_zero_span(self, span: f64) -> bool {
        span.abs() < self.parametric
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}
