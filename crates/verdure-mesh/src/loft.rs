//! Cross-section lofting between a pair of rails.
//!
//! An open half-profile is canonicalized (centred, turned onto +X, scaled to
//! unit chord, mirror-closed across the XY plane) and then placed on every
//! rail chord `left[i] → right[i]`, giving one ring per rail sample. Adjacent
//! rings are stitched into a closed tube.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use verdure_core::{GeometryError, Result, Tolerance};
use verdure_math::{DVec3, Plane, Point3, Transform, Vector3};

use crate::TriangleMesh;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoftOptions {
    /// `linear` is the chord length below which a cross-section counts as collapsed.
    pub tolerance: Tolerance,
    /// Plane the half-profile is mirrored across; its normal is the lofting axis.
    pub mirror_plane: Plane,
}

impl LoftOptions {
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl Default for LoftOptions {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::loose(),
            mirror_plane: Plane::xy(),
        }
    }
}

/// Centre, align and normalize an open cross-section.
///
/// The result has its endpoints at `(-0.5, 0, 0)` and `(0.5, 0, 0)` when the
/// input's endpoints share a height. Returns `None` for fewer than two points
/// or when the endpoint chord is collapsed.
pub fn canonicalize_cross_section(curve: &[Point3], tolerance: Tolerance) -> Option<Vec<Point3>> {
    let (&first, &last) = (curve.first()?, curve.last()?);
    if curve.len() < 2 {
        return None;
    }

    let chord = last - first;
    let length = chord.length();
    if tolerance.is_collapsed(length) {
        return None;
    }

    // Turn about Z until the chord points along +X. The sign follows the
    // chord's Y component, so profiles drawn right-to-left open the other way.
    let direction = chord / length;
    let mut angle = direction.dot(DVec3::X).clamp(-1.0, 1.0).acos();
    if direction.y > 0.0 {
        angle = -angle;
    }

    let midpoint = (first + last) * 0.5;
    let to_origin = Transform::from_translation(-midpoint)
        .then(&Transform::from_rotation_z(angle))
        .then(&Transform::from_uniform_scale(1.0 / length));

    // The profile is authored in XY; its height becomes the out-of-plane Z.
    Some(
        curve
            .iter()
            .map(|&p| {
                let q = to_origin.transform_point(p);
                DVec3::new(q.x, q.z, q.y)
            })
            .collect(),
    )
}

/// Close a half-profile into a loop by appending its interior points,
/// reversed and reflected across `plane`. `L` points become `2·(L−1)`.
pub fn mirror_close(half: &[Point3], plane: &Plane) -> Vec<Point3> {
    let mut ring = half.to_vec();
    if half.len() > 2 {
        ring.extend(half[1..half.len() - 1].iter().rev().map(|&p| plane.reflect_point(p)));
    }
    ring
}

/// Placement of the unit cross-section on the chord `left → right`.
pub fn slice_transform(left: Point3, right: Point3) -> Transform {
    let axis = right - left;
    let angle = axis.y.atan2(axis.x);
    Transform::from_chord_frame((left + right) * 0.5, angle, axis.length())
}

/// Sweeps a mirror-closed cross-section along paired left/right rails.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CrossSectionLoft {
    options: LoftOptions,
}

impl CrossSectionLoft {
    pub fn new(options: LoftOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LoftOptions {
        &self.options
    }

    /// The canonical closed ring every slice is built from.
    pub fn closed_cross_section(&self, cross_section: &[Point3]) -> Option<Vec<Point3>> {
        canonicalize_cross_section(cross_section, self.options.tolerance)
            .map(|half| mirror_close(&half, &self.options.mirror_plane))
    }

    /// Build the tube mesh.
    ///
    /// The mesh holds `N·M` ring vertices (`N` rail samples, `M` ring points)
    /// and `(N−1)·M` quads of two triangles each. `normals` carries one face
    /// normal per quad followed by `M` cap normals along the mirror plane
    /// normal, so it is parallel to `positions`.
    ///
    /// Rails shorter than two points or a collapsed cross-section give an
    /// empty mesh.
    ///
    /// # Errors
    /// `IncompatibleCurves` when the rails differ in length or the
    /// cross-section has fewer than two points.
    pub fn loft(
        &self,
        cross_section: &[Point3],
        left: &[Point3],
        right: &[Point3],
    ) -> Result<TriangleMesh> {
        if left.len() != right.len() {
            return Err(GeometryError::IncompatibleCurves(format!(
                "left rail has {} points, right rail has {}",
                left.len(),
                right.len()
            )));
        }
        if cross_section.len() < 2 {
            return Err(GeometryError::IncompatibleCurves(format!(
                "cross-section needs at least 2 points, got {}",
                cross_section.len()
            )));
        }
        if left.len() < 2 {
            debug!("loft skipped: rails have {} points", left.len());
            return Ok(TriangleMesh::default());
        }
        let Some(ring) = self.closed_cross_section(cross_section) else {
            warn!("loft skipped: cross-section endpoints coincide");
            return Ok(TriangleMesh::default());
        };

        let n = left.len();
        let m = ring.len();

        let mut positions = Vec::with_capacity(n * m);
        for (&l, &r) in left.iter().zip(right) {
            positions.extend(slice_transform(l, r).transform_points(&ring));
        }

        let mut indices = Vec::with_capacity((n - 1) * m * 6);
        let mut normals: Vec<Vector3> = Vec::with_capacity(n * m);
        for i in 0..n - 1 {
            for j in 0..m {
                let v0 = i * m + j;
                let v1 = (i + 1) * m + j;
                let v2 = i * m + (j + 1) % m;
                let v3 = (i + 1) * m + (j + 1) % m;

                indices.extend([v0, v1, v2, v2, v1, v3].map(|v| v as u32));
                normals.push((positions[v1] - positions[v0]).cross(positions[v2] - positions[v0]));
            }
        }
        normals.extend(std::iter::repeat(self.options.mirror_plane.normal).take(m));
        for normal in &mut normals {
            *normal = normal.normalize_or_zero();
        }

        debug!("lofted {} slices of {} points", n, m);
        Ok(TriangleMesh {
            positions,
            normals,
            indices,
        })
    }
}
