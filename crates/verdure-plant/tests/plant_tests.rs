use approx::assert_abs_diff_eq;
use verdure_core::traits::Validate;
use verdure_math::{DVec3, Transform};
use verdure_plant::{CurveRole, Plant, PlantPart};

fn dvec3(x: f64, y: f64, z: f64) -> DVec3 {
    DVec3::new(x, y, z)
}

fn make_leaf(name: &str) -> PlantPart {
    let mut part = PlantPart::new(name);
    let rails = [
        (dvec3(-0.2, 0.0, 0.0), dvec3(0.2, 0.0, 0.0)),
        (dvec3(-1.0, 1.0, 0.0), dvec3(1.0, 1.0, 0.0)),
        (dvec3(-0.8, 2.0, 0.0), dvec3(0.8, 2.0, 0.0)),
        (dvec3(-0.1, 3.0, 0.0), dvec3(0.1, 3.0, 0.0)),
    ];
    for (l, r) in rails {
        part.push_point(CurveRole::LeftRail, l);
        part.push_point(CurveRole::RightRail, r);
    }
    for p in [dvec3(0.0, 0.0, 0.0), dvec3(1.0, 0.4, 0.0), dvec3(2.0, 0.0, 0.0)] {
        part.push_point(CurveRole::CrossSection, p);
    }
    part
}

#[test]
fn test_leaf_loft_is_valid_and_symmetric() {
    let mut part = make_leaf("leaf");
    let mesh = part.mesh().clone();

    let m = 100;
    assert_eq!(mesh.vertex_count(), 51 * m);
    assert_eq!(mesh.indices.len(), 50 * m * 6);
    assert_eq!(mesh.normals.len(), mesh.vertex_count());
    mesh.validate().unwrap();
    assert!(mesh.positions.iter().all(|p| p.is_finite()));

    // The mirrored half lands on the other side of the rail plane.
    let (lo, hi) = mesh.bounds().unwrap();
    assert!(hi.z > 0.0);
    assert_abs_diff_eq!(lo.z, -hi.z, epsilon = 1e-9);

    // Ring endpoints ride the rails.
    let left = part.curve(CurveRole::LeftRail).cached_polyline().to_vec();
    let right = part.curve(CurveRole::RightRail).cached_polyline().to_vec();
    for i in [0, 25, 50] {
        assert!((mesh.positions[i * m] - left[i]).length() < 1e-9);
        assert!((mesh.positions[i * m + 50] - right[i]).length() < 1e-9);
    }

    let list = mesh.to_triangle_list();
    assert_eq!(list.vertex_count(), mesh.indices.len());
}

#[test]
fn test_plant_regenerates_and_places_parts() {
    let mut plant = Plant::new("sprout");
    let leaf = plant.add_part(make_leaf("leaf"));
    let mut stem = make_leaf("stem");
    stem.translation = dvec3(0.0, 0.0, 5.0);
    let stem = plant.add_part(stem);

    assert_eq!(plant.regenerate_all(), 2);
    let per_part = plant.part(leaf).unwrap().cached_mesh().vertex_count();
    assert_eq!(plant.part(stem).unwrap().cached_mesh().vertex_count(), per_part);

    plant.model = Transform::from_translation(dvec3(10.0, 0.0, 0.0));
    let merged = plant.merged_mesh();
    assert_eq!(merged.vertex_count(), 2 * per_part);
    merged.validate().unwrap();

    let (lo, hi) = merged.bounds().unwrap();
    assert!(lo.x > 8.0 && hi.x < 12.0);
    assert!(hi.z > 5.0);
}

#[test]
fn test_invalid_part_does_not_block_others() {
    let mut plant = Plant::new("sprout");
    let good = plant.add_part(make_leaf("good"));
    let mut bad = make_leaf("bad");
    bad.push_point(CurveRole::LeftRail, dvec3(0.0, 4.0, 0.0));
    bad.curve_mut(CurveRole::LeftRail)
        .set_params(verdure_geometry::SamplingParams::default().with_step(0.05));
    let bad = plant.add_part(bad);

    plant.regenerate_all();
    assert!(plant.part(good).unwrap().validation_message().is_none());
    assert!(!plant.part(good).unwrap().cached_mesh().is_empty());

    let bad = plant.part(bad).unwrap();
    assert!(bad.is_generated());
    assert!(bad.cached_mesh().is_empty());
    assert!(bad.validation_message().unwrap().starts_with("Incompatible curves"));
}
