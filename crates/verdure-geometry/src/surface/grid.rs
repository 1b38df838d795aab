use serde::{Deserialize, Serialize};
use verdure_core::traits::Validate;
use verdure_core::{GeometryError, Result};
use verdure_math::{Point3, Vector3};

use super::noise::terrain_noise;
use crate::curve::ControlPoint;

/// A fixed-size `rows × cols` grid of control points stored row-major.
///
/// Rows run along the surface `u` direction, columns along `v`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlGrid {
    rows: usize,
    cols: usize,
    points: Vec<ControlPoint>,
}

impl ControlGrid {
    /// A flat grid on `y = 0` centred on the origin; row `i` sits at
    /// `z = i·spacing`, column `j` at `x = j·spacing` (both shifted to centre).
    pub fn flat(rows: usize, cols: usize, spacing: f64) -> Self {
        let half_x = cols.saturating_sub(1) as f64 * spacing / 2.0;
        let half_z = rows.saturating_sub(1) as f64 * spacing / 2.0;
        let points = (0..rows)
            .flat_map(|i| {
                (0..cols).map(move |j| {
                    ControlPoint::new(Point3::new(
                        j as f64 * spacing - half_x,
                        0.0,
                        i as f64 * spacing - half_z,
                    ))
                })
            })
            .collect();
        Self { rows, cols, points }
    }

    /// # Errors
    /// `IncompatibleCurves` when rows differ in length.
    pub fn from_rows(rows: Vec<Vec<Point3>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(GeometryError::IncompatibleCurves(format!(
                "row {} has {} columns, expected {}",
                i,
                row.len(),
                cols
            )));
        }
        let n_rows = rows.len();
        let points = rows
            .into_iter()
            .flatten()
            .map(ControlPoint::new)
            .collect();
        Ok(Self {
            rows: n_rows,
            cols,
            points,
        })
    }

    /// Displace every point's height by [`terrain_noise`] of its `(x, z)`.
    pub fn with_terrain_noise(mut self, scale: f64, amplitude: f64) -> Self {
        for p in &mut self.points {
            p.position.y += terrain_noise(p.position.x, p.position.z, scale, amplitude);
        }
        self
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&ControlPoint> {
        if row < self.rows && col < self.cols {
            self.points.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Position at `(row, col)`.
    ///
    /// # Panics
    /// Panics if the index is outside the grid.
    pub fn position(&self, row: usize, col: usize) -> Point3 {
        assert!(row < self.rows && col < self.cols, "grid index out of range");
        self.points[row * self.cols + col].position
    }

    pub fn row(&self, row: usize) -> &[ControlPoint] {
        &self.points[row * self.cols..(row + 1) * self.cols]
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Row-major positions, the layout used to draw the control handles.
    pub fn positions(&self) -> Vec<Point3> {
        self.points.iter().map(|p| p.position).collect()
    }

    /// Map a row-major flat index back to `(row, col)`.
    pub fn row_col(&self, flat_index: usize) -> Option<(usize, usize)> {
        if self.cols == 0 || flat_index >= self.points.len() {
            return None;
        }
        Some((flat_index / self.cols, flat_index % self.cols))
    }

    /// Add `offset` to the point at a row-major flat index.
    ///
    /// # Errors
    /// `IndexOutOfRange` if the index is outside the grid.
    pub fn translate_point(&mut self, flat_index: usize, offset: Vector3) -> Result<()> {
        let len = self.points.len();
        let point = self
            .points
            .get_mut(flat_index)
            .ok_or(GeometryError::IndexOutOfRange {
                index: flat_index,
                len,
            })?;
        point.position += offset;
        Ok(())
    }
}

impl Validate for ControlGrid {
    fn validate(&self) -> Result<()> {
        if self.points.len() != self.rows * self.cols {
            return Err(GeometryError::IndexOutOfRange {
                index: self.points.len(),
                len: self.rows * self.cols,
            });
        }
        match self.points.iter().find(|p| !(p.weight > 0.0)) {
            Some(p) => Err(GeometryError::InvalidWeight(p.weight)),
            None => Ok(()),
        }
    }
}
