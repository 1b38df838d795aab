//! Uniform tessellation of a tensor-product surface over an owned control grid.

use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use verdure_core::{Result, Tolerance};
use verdure_geometry::{ControlGrid, TensorSurface};
use verdure_math::{Point3, Vector3};

use crate::TriangleMesh;

/// Orders and sampling resolution for [`SurfaceTessellator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TessellationParams {
    pub order_u: usize,
    pub order_v: usize,
    /// Samples along `u`; the mesh has `resolution_u - 1` cells in that direction.
    pub resolution_u: usize,
    pub resolution_v: usize,
    /// Zero-span threshold for the de Boor blend.
    #[serde(default)]
    pub tolerance: Tolerance,
}

impl TessellationParams {
    pub fn with_orders(mut self, order_u: usize, order_v: usize) -> Self {
        self.order_u = order_u;
        self.order_v = order_v;
        self
    }

    pub fn with_resolution(mut self, resolution_u: usize, resolution_v: usize) -> Self {
        self.resolution_u = resolution_u;
        self.resolution_v = resolution_v;
        self
    }

    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Vertices in a regenerated triangle list.
    pub fn vertex_count(&self) -> usize {
        self.resolution_u.saturating_sub(1) * self.resolution_v.saturating_sub(1) * 6
    }
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self {
            order_u: 3,
            order_v: 3,
            resolution_u: 20,
            resolution_v: 20,
            tolerance: Tolerance::default(),
        }
    }
}

/// Owns a control grid and the triangle list sampled from it.
///
/// Edits never regenerate on their own; call [`SurfaceTessellator::regenerate`]
/// after a batch of edits.
#[derive(Debug, Clone)]
pub struct SurfaceTessellator {
    grid: ControlGrid,
    params: TessellationParams,
    mesh: TriangleMesh,
}

impl SurfaceTessellator {
    pub fn new(grid: ControlGrid, params: TessellationParams) -> Self {
        Self {
            grid,
            params,
            mesh: TriangleMesh::default(),
        }
    }

    pub fn grid(&self) -> &ControlGrid {
        &self.grid
    }

    pub fn params(&self) -> TessellationParams {
        self.params
    }

    pub fn set_params(&mut self, params: TessellationParams) {
        self.params = params;
    }

    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    /// Add `offset` to the control point at a row-major flat index. The mesh
    /// is left as is until the next [`regenerate`](Self::regenerate).
    ///
    /// # Errors
    /// `IndexOutOfRange` if the index is outside the grid.
    pub fn update_control_point(&mut self, flat_index: usize, offset: Vector3) -> Result<()> {
        self.grid.translate_point(flat_index, offset)
    }

    /// Discard the mesh and resample the whole surface.
    ///
    /// Each cell `(i, j)` emits triangles `p00, p10, p01` and `p01, p10, p11`.
    /// A resolution below 2 in either direction yields an empty mesh.
    ///
    /// # Errors
    /// `EmptyCurve` or `InvalidDegree` when the grid cannot carry the
    /// requested orders; the mesh is left empty.
    pub fn regenerate(&mut self) -> Result<()> {
        self.mesh.clear();

        let params = self.params;
        let surface = match TensorSurface::new(&self.grid, params.order_u, params.order_v) {
            Ok(surface) => surface.with_tolerance(params.tolerance),
            Err(err) => {
                warn!("surface not tessellated: {}", err);
                return Err(err);
            }
        };

        let (res_u, res_v) = (params.resolution_u, params.resolution_v);
        if res_u < 2 || res_v < 2 {
            debug!("tessellation resolution {}x{} too small", res_u, res_v);
            return Ok(());
        }

        let samples: Vec<Vec<Point3>> = (0..res_u)
            .into_par_iter()
            .map(|i| {
                let u = i as f64 / (res_u - 1) as f64;
                (0..res_v)
                    .map(|j| surface.point_at(u, j as f64 / (res_v - 1) as f64))
                    .collect()
            })
            .collect();

        let mut verts = Vec::with_capacity(params.vertex_count());
        for i in 0..res_u - 1 {
            for j in 0..res_v - 1 {
                let p00 = samples[i][j];
                let p10 = samples[i + 1][j];
                let p01 = samples[i][j + 1];
                let p11 = samples[i + 1][j + 1];

                verts.extend_from_slice(&[p00, p10, p01]);
                verts.extend_from_slice(&[p01, p10, p11]);
            }
        }

        self.mesh = TriangleMesh::from_triangle_list(verts);
        debug!(
            "tessellated {}x{} grid at {}x{}: {} vertices",
            self.grid.rows(),
            self.grid.cols(),
            res_u,
            res_v,
            self.mesh.vertex_count()
        );
        Ok(())
    }
}
