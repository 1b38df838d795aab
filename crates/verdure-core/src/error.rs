use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("Invalid degree: order {order} needs more than {control_points} control points")]
    InvalidDegree { order: usize, control_points: usize },

    #[error("Degenerate knot span at index {index}")]
    DegenerateKnotSpan { index: usize },

    #[error("Incompatible curves: {0}")]
    IncompatibleCurves(String),

    #[error("Curve has no control points")]
    EmptyCurve,

    #[error("Invalid weight {0}: weights must be positive")]
    InvalidWeight(f64),

    #[error("Index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, GeometryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = GeometryError::InvalidDegree {
            order: 4,
            control_points: 3,
        };
        assert_eq!(
            err.to_string(),
            "Invalid degree: order 4 needs more than 3 control points"
        );

        let err = GeometryError::IncompatibleCurves("rails differ".into());
        assert_eq!(err.to_string(), "Incompatible curves: rails differ");
    }
}
