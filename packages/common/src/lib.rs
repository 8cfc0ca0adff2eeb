pub mod geometry;
pub mod id_generator;
pub mod ordering;

pub use geometry::*;
pub use id_generator::*;
pub use ordering::*;
