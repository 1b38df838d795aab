pub mod error;
pub mod tolerance;
pub mod traits;

pub use error::{GeometryError, Result};
pub use tolerance::Tolerance;
