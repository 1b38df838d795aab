use verdure_core::traits::Validate;
use verdure_geometry::ControlGrid;
use verdure_math::DVec3;
use verdure_mesh::{SurfaceTessellator, TessellationParams, TriangleMesh};

const RES: usize = 20;

/// Corner offsets of the six vertices each cell emits.
const CELL_LAYOUT: [(usize, usize); 6] = [(0, 0), (1, 0), (0, 1), (0, 1), (1, 0), (1, 1)];

/// Sample indices `(i, j)` of every vertex in a regenerated triangle list.
fn sample_indices() -> Vec<(usize, usize)> {
    let mut out = Vec::with_capacity((RES - 1) * (RES - 1) * 6);
    for i in 0..RES - 1 {
        for j in 0..RES - 1 {
            out.extend(CELL_LAYOUT.iter().map(|&(di, dj)| (i + di, j + dj)));
        }
    }
    out
}

fn default_surface() -> SurfaceTessellator {
    let mut tess =
        SurfaceTessellator::new(ControlGrid::flat(5, 5, 1.0), TessellationParams::default());
    tess.regenerate().unwrap();
    tess
}

#[test]
fn test_flat_grid_tessellates_flat() {
    let tess = default_surface();
    let mesh = tess.mesh();

    assert_eq!(mesh.vertex_count(), 2166);
    assert_eq!(mesh.triangle_count(), 722);
    assert_eq!(mesh.normals.len(), 2166);
    mesh.validate().unwrap();

    let (lo, hi) = mesh.bounds().unwrap();
    assert!((lo - DVec3::new(-2.0, 0.0, -2.0)).length() < 1e-9, "{:?}", lo);
    assert!((hi - DVec3::new(2.0, 0.0, 2.0)).length() < 1e-9, "{:?}", hi);
}

#[test]
fn test_interior_edit_is_local() {
    let mut tess = default_surface();
    let before: TriangleMesh = tess.mesh().clone();

    // Flat index 6 is row 1, column 1; with order 3 on five points its
    // influence ends at parameter 2/3 in both directions.
    tess.update_control_point(6, DVec3::new(0.0, 1.0, 0.0)).unwrap();
    tess.regenerate().unwrap();
    let after = tess.mesh();
    assert_eq!(after.vertex_count(), before.vertex_count());

    let outside_support = |s: usize| s as f64 / (RES - 1) as f64 >= 2.0 / 3.0;
    let mut moved = 0;
    for (k, &(i, j)) in sample_indices().iter().enumerate() {
        let (a, b) = (before.positions[k], after.positions[k]);
        if outside_support(i) || outside_support(j) {
            assert_eq!(a, b, "sample ({}, {}) moved", i, j);
        } else if (a - b).length() > 1e-9 {
            assert!(b.y > 0.0);
            moved += 1;
        }
    }
    assert!(moved > 0);

    // Corners stay interpolated.
    for (k, &(i, j)) in sample_indices().iter().enumerate() {
        if (i == 0 || i == RES - 1) && (j == 0 || j == RES - 1) {
            assert!((before.positions[k] - after.positions[k]).length() < 1e-12);
        }
    }
}

#[test]
fn test_terrain_grid_stays_within_amplitude() {
    let grid = ControlGrid::flat(6, 6, 1.0).with_terrain_noise(0.7, 0.5);
    let mut tess = SurfaceTessellator::new(grid, TessellationParams::default().with_orders(4, 4));
    tess.regenerate().unwrap();

    // Curve points are convex combinations of the control points.
    let (lo, hi) = tess.mesh().bounds().unwrap();
    assert!(lo.y >= -0.5 - 1e-9 && hi.y <= 0.5 + 1e-9);
}
