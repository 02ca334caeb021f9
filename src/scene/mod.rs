//! Scene placement of the previewed garment

mod transform;

pub use transform::*;
