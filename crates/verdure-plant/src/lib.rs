//! Verdure plant model: parts lofted from rail and cross-section curves,
//! collected into a plant.

pub mod part;
pub mod plant;

pub use part::{Color, CurveRole, PlantPart};
pub use plant::{PartId, Plant};
