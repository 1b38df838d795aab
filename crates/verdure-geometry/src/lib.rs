//! Verdure geometry: knot vectors, de Boor evaluation, control curves and grids.

pub mod curve;
pub mod nurbs;
pub mod surface;

pub use curve::{sample_parameters, ControlPoint, Curve, SamplingParams};
pub use nurbs::{KnotVector, TensorSurface};
pub use surface::ControlGrid;
