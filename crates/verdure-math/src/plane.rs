use crate::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A plane through `origin` with unit `normal`; used as the mirror plane
/// when closing a half cross-section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub origin: Point3,
    pub normal: Vector3,
}

impl Plane {
    pub fn new(origin: Point3, normal: Vector3) -> Self {
        Self {
            origin,
            normal: normal.normalize(),
        }
    }

    /// The `z = 0` plane. Lofted cross-sections are mirrored across it.
    pub fn xy() -> Self {
        Self::new(Point3::ZERO, Vector3::Z)
    }

    pub fn signed_distance(&self, point: Point3) -> f64 {
        (point - self.origin).dot(self.normal)
    }

    pub fn project_point(&self, point: Point3) -> Point3 {
        point - self.normal * self.signed_distance(point)
    }

    /// Mirror image of `point` on the other side of the plane.
    pub fn reflect_point(&self, point: Point3) -> Point3 {
        point - self.normal * (2.0 * self.signed_distance(point))
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::xy()
    }
}
