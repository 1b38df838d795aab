//! Control grids for tensor-product surfaces.

mod grid;
mod noise;

pub use grid::ControlGrid;
pub use noise::terrain_noise;
