use verdure_core::traits::Validate;
use verdure_core::{GeometryError, Result};
use verdure_math::{DMat3, Point3, Transform, Vector3};

/// Indexed triangle mesh ready for upload to a vertex buffer.
///
/// `normals` is either empty or parallel to `positions`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    pub positions: Vec<Point3>,
    pub normals: Vec<Vector3>,
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Build from a flat triangle list (every three positions form one
    /// triangle) with sequential indices and flat per-triangle normals.
    pub fn from_triangle_list(positions: Vec<Point3>) -> Self {
        let indices = (0..positions.len() as u32).collect();
        let mut mesh = Self {
            positions,
            normals: Vec::new(),
            indices,
        };
        mesh.compute_flat_normals();
        mesh
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.indices.clear();
    }

    /// Merge another mesh into this one, offsetting indices appropriately.
    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices.extend(other.indices.iter().map(|&i| i + offset));
    }

    /// Give every vertex the unit normal of the triangle it belongs to.
    /// Intended for triangle lists where no vertex is shared.
    pub fn compute_flat_normals(&mut self) {
        self.normals.clear();
        self.normals.resize(self.positions.len(), Vector3::ZERO);
        for tri in self.indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let p0 = self.positions[i0];
            let normal = (self.positions[i1] - p0)
                .cross(self.positions[i2] - p0)
                .normalize_or_zero();
            self.normals[i0] = normal;
            self.normals[i1] = normal;
            self.normals[i2] = normal;
        }
    }

    /// Expand the indexed mesh into a flat triangle list with flat normals.
    pub fn to_triangle_list(&self) -> TriangleMesh {
        let positions = self
            .indices
            .iter()
            .map(|&i| self.positions[i as usize])
            .collect();
        Self::from_triangle_list(positions)
    }

    /// Copy of the mesh with positions mapped by `transform` and normals by
    /// its inverse transpose.
    pub fn transformed(&self, transform: &Transform) -> TriangleMesh {
        let m = transform.to_mat4();
        let normal_matrix = DMat3::from_mat4(m).inverse().transpose();
        TriangleMesh {
            positions: self
                .positions
                .iter()
                .map(|&p| m.transform_point3(p))
                .collect(),
            normals: self
                .normals
                .iter()
                .map(|&n| (normal_matrix * n).normalize_or_zero())
                .collect(),
            indices: self.indices.clone(),
        }
    }

    /// Axis-aligned bounds of all positions, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Point3, Point3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p))),
        )
    }
}

impl Validate for TriangleMesh {
    fn validate(&self) -> Result<()> {
        let len = self.positions.len();
        if self.indices.len() % 3 != 0 {
            return Err(GeometryError::IndexOutOfRange {
                index: self.indices.len(),
                len: self.indices.len() / 3 * 3,
            });
        }
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= len) {
            return Err(GeometryError::IndexOutOfRange {
                index: index as usize,
                len,
            });
        }
        if !self.normals.is_empty() && self.normals.len() != len {
            return Err(GeometryError::IndexOutOfRange {
                index: self.normals.len(),
                len,
            });
        }
        Ok(())
    }
}
