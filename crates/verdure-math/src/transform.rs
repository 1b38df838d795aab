use crate::{DMat4, DVec3, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Affine transform stored as a column-major 4x4 matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub matrix: [f64; 16],
}

impl Transform {
    pub fn identity() -> Self {
        Self::from_mat4(DMat4::IDENTITY)
    }

    pub fn from_translation(t: Vector3) -> Self {
        Self::from_mat4(DMat4::from_translation(t))
    }

    pub fn from_rotation_z(angle: f64) -> Self {
        Self::from_mat4(DMat4::from_rotation_z(angle))
    }

    pub fn from_uniform_scale(s: f64) -> Self {
        Self::from_mat4(DMat4::from_scale(DVec3::splat(s)))
    }

    /// `translate(origin) * rotate_z(angle) * scale(s)`: maps the unit X axis
    /// onto a chord of length `s` turned by `angle`, centred on `origin`.
    pub fn from_chord_frame(origin: Point3, angle: f64, s: f64) -> Self {
        Self::from_mat4(
            DMat4::from_translation(origin)
                * DMat4::from_rotation_z(angle)
                * DMat4::from_scale(DVec3::splat(s)),
        )
    }

    /// `translate * rotate_x * rotate_y * rotate_z * scale`, angles in degrees.
    pub fn from_euler_degrees(scale: Vector3, rotation_deg: Vector3, translation: Vector3) -> Self {
        let rotation = DMat4::from_rotation_x(rotation_deg.x.to_radians())
            * DMat4::from_rotation_y(rotation_deg.y.to_radians())
            * DMat4::from_rotation_z(rotation_deg.z.to_radians());
        Self::from_mat4(DMat4::from_translation(translation) * rotation * DMat4::from_scale(scale))
    }

    pub fn from_mat4(m: DMat4) -> Self {
        Self {
            matrix: m.to_cols_array(),
        }
    }

    pub fn to_mat4(&self) -> DMat4 {
        DMat4::from_cols_array(&self.matrix)
    }

    pub fn transform_point(&self, p: Point3) -> Point3 {
        self.to_mat4().transform_point3(p)
    }

    pub fn transform_vector(&self, v: Vector3) -> Vector3 {
        self.to_mat4().transform_vector3(v)
    }

    pub fn transform_points(&self, points: &[Point3]) -> Vec<Point3> {
        let m = self.to_mat4();
        points.iter().map(|&p| m.transform_point3(p)).collect()
    }

    /// Apply `self` first, then `other`.
    pub fn then(&self, other: &Transform) -> Transform {
        Self::from_mat4(other.to_mat4() * self.to_mat4())
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use glam::dvec3;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_identity() {
        let t = Transform::identity();
        let p = dvec3(1.0, 2.0, 3.0);
        assert!((t.transform_point(p) - p).length() < 1e-10);
    }

    #[test]
    fn test_chord_frame_maps_unit_x() {
        let t = Transform::from_chord_frame(dvec3(1.0, 1.0, 0.0), FRAC_PI_2, 2.0);
        let a = t.transform_point(dvec3(-0.5, 0.0, 0.0));
        let b = t.transform_point(dvec3(0.5, 0.0, 0.0));
        assert!((a - dvec3(1.0, 0.0, 0.0)).length() < 1e-10);
        assert!((b - dvec3(1.0, 2.0, 0.0)).length() < 1e-10);
    }

    #[test]
    fn test_euler_order_scale_first() {
        let t = Transform::from_euler_degrees(
            dvec3(2.0, 1.0, 1.0),
            dvec3(0.0, 0.0, 90.0),
            dvec3(0.0, 0.0, 5.0),
        );
        // Scaled along X, then turned onto Y, then lifted.
        let p = t.transform_point(dvec3(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!(p.y, 2.0, epsilon = 1e-10);
        assert_abs_diff_eq!(p.z, 5.0, epsilon = 1e-10);
    }

    #[test]
    fn test_then_applies_in_order() {
        let scale = Transform::from_uniform_scale(3.0);
        let shift = Transform::from_translation(dvec3(1.0, 0.0, 0.0));
        let p = scale.then(&shift).transform_point(dvec3(1.0, 0.0, 0.0));
        assert!((p - dvec3(4.0, 0.0, 0.0)).length() < 1e-10);
    }

    #[test]
    fn test_vectors_ignore_translation() {
        let t = Transform::from_translation(dvec3(10.0, 20.0, 30.0));
        let v = t.transform_vector(dvec3(0.0, 1.0, 0.0));
        assert!((v - dvec3(0.0, 1.0, 0.0)).length() < 1e-10);
    }
}
