//! Verdure meshing: uniform surface tessellation and cross-section lofting.

pub mod loft;
pub mod tessellator;
pub mod triangle_mesh;

pub use loft::{
    canonicalize_cross_section, mirror_close, slice_transform, CrossSectionLoft, LoftOptions,
};
pub use tessellator::{SurfaceTessellator, TessellationParams};
pub use triangle_mesh::TriangleMesh;
