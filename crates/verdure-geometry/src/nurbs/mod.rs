//! Knot vector construction and de Boor evaluation for rational curves and tensor surfaces.

pub mod deboor;
pub mod knot;

pub use deboor::{
    curve_point, rational_curve_point, rational_curve_point_with_tolerance, surface_point,
    TensorSurface,
};
pub use knot::{effective_order, KnotVector};
