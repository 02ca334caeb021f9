//! Resource management
//!
//! Meshes, materials and textures used by the preview.

mod mesh;
mod material;
mod texture;

pub use mesh::*;
pub use material::*;
pub use texture::*;
