pub mod plane;
pub mod transform;

pub use glam::{DAffine3, DMat3, DMat4, DVec2, DVec3, DVec4};
pub use plane::Plane;
pub use transform::Transform;

pub type Point3 = DVec3;
pub type Vector3 = DVec3;
