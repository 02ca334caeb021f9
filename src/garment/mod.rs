//! Geometry builder for garment archetypes
//!
//! Produces the immutable rest pose ([`RestMesh`]) the simulation displaces
//! each frame. All archetypes share one vertical convention: `y = 0` at the
//! hem, `y ≈ height` at the attachment band (shoulders or waistband).

mod builders;

use std::fmt;
use std::str::FromStr;

use crate::error::PreviewError;
use crate::resources::{Mesh, Vertex};

/// Lowest accepted segment count; coarser meshes degenerate
pub const MIN_RESOLUTION: u32 = 8;
/// Highest accepted segment count
pub const MAX_RESOLUTION: u32 = 256;
/// Fraction of the garment height above which vertices are anchored
pub const ATTACHMENT_BAND: f32 = 0.8;

/// The supported garment silhouettes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GarmentType {
    #[default]
    Shirt,
    Dress,
    Jacket,
    Pants,
}

impl GarmentType {
    pub const ALL: [GarmentType; 4] = [Self::Shirt, Self::Dress, Self::Jacket, Self::Pants];

    /// Identifier used by the catalog UI
    pub fn name(self) -> &'static str {
        match self {
            Self::Shirt => "tshirt",
            Self::Dress => "dress",
            Self::Jacket => "jacket",
            Self::Pants => "pants",
        }
    }

    /// Number of vertices [`build`] produces for this archetype
    pub fn vertex_count(self, resolution: u32) -> usize {
        let r = clamp_resolution(resolution) as usize;
        let s = r / 2;
        let sleeves = 2 * (s + 1) * (s + 1);

        match self {
            Self::Shirt => (r + 1) * (r + 1) + sleeves,
            Self::Dress => r * (r + 1),
            Self::Jacket => (r + 1) * (r + 1) + sleeves + 2 * (r + 1),
            Self::Pants => 2 * (r + 1) * (r + 1) + (s + 1) * (r + 1),
        }
    }
}

impl fmt::Display for GarmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GarmentType {
    type Err = PreviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tshirt" | "t-shirt" | "shirt" => Ok(Self::Shirt),
            "dress" => Ok(Self::Dress),
            "jacket" => Ok(Self::Jacket),
            "pants" | "trousers" => Ok(Self::Pants),
            _ => Err(PreviewError::UnknownGarment(s.to_string())),
        }
    }
}

/// Overall garment size in scene units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GarmentDimensions {
    pub width: f32,
    pub height: f32,
    /// Front-to-back squash of the otherwise round cross sections
    pub depth_ratio: f32,
}

impl Default for GarmentDimensions {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.6,
            depth_ratio: 0.6,
        }
    }
}

impl GarmentDimensions {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Replace non-positive or non-finite values with the defaults
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let pick = |value: f32, fallback: f32, what: &str| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                log::warn!("Invalid garment {what} {value}, using {fallback}");
                fallback
            }
        };

        Self {
            width: pick(self.width, defaults.width, "width"),
            height: pick(self.height, defaults.height, "height"),
            depth_ratio: pick(self.depth_ratio, defaults.depth_ratio, "depth ratio"),
        }
    }
}

/// Clamp a requested segment count into `[MIN_RESOLUTION, MAX_RESOLUTION]`
pub fn clamp_resolution(resolution: u32) -> u32 {
    let clamped = resolution.clamp(MIN_RESOLUTION, MAX_RESOLUTION);
    if clamped != resolution {
        log::debug!("Resolution {resolution} clamped to {clamped}");
    }
    clamped
}

/// Number of vertices in the fallback primitive
pub fn fallback_vertex_count(resolution: u32) -> usize {
    let r = clamp_resolution(resolution) as usize;
    (r + 1) * (r + 1)
}

/// Undeformed garment geometry, immutable once built
#[derive(Debug, Clone, PartialEq)]
pub struct RestMesh {
    mesh: Mesh,
    garment_type: Option<GarmentType>,
    dimensions: GarmentDimensions,
    resolution: u32,
}

impl RestMesh {
    fn from_parts(
        mut mesh: Mesh,
        garment_type: Option<GarmentType>,
        dimensions: GarmentDimensions,
        resolution: u32,
    ) -> Self {
        mesh.recompute_normals();
        Self {
            mesh,
            garment_type,
            dimensions,
            resolution,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.mesh.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.mesh.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    /// `None` for the fallback primitive
    pub fn garment_type(&self) -> Option<GarmentType> {
        self.garment_type
    }

    pub fn dimensions(&self) -> GarmentDimensions {
        self.dimensions
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn height(&self) -> f32 {
        self.dimensions.height
    }

    /// Rest-pose `y` above which vertices never move
    pub fn attachment_threshold(&self) -> f32 {
        self.dimensions.height * ATTACHMENT_BAND
    }

    pub fn is_attached(&self, index: usize) -> bool {
        self.mesh
            .vertices
            .get(index)
            .is_some_and(|v| v.position.y > self.attachment_threshold())
    }

    pub fn attachment_count(&self) -> usize {
        let threshold = self.attachment_threshold();
        self.mesh
            .vertices
            .iter()
            .filter(|v| v.position.y > threshold)
            .count()
    }
}

/// Build an archetype with the default dimensions
pub fn build(garment_type: GarmentType, resolution: u32) -> RestMesh {
    build_with(garment_type, resolution, GarmentDimensions::default())
}

/// Build an archetype at the given size
pub fn build_with(garment_type: GarmentType, resolution: u32, dimensions: GarmentDimensions) -> RestMesh {
    let resolution = clamp_resolution(resolution);
    let dims = dimensions.sanitized();

    let mesh = match garment_type {
        GarmentType::Shirt => builders::shirt(&dims, resolution),
        GarmentType::Dress => builders::dress(&dims, resolution),
        GarmentType::Jacket => builders::jacket(&dims, resolution),
        GarmentType::Pants => builders::pants(&dims, resolution),
    };

    log::debug!(
        "Built {garment_type} rest mesh: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    RestMesh::from_parts(mesh, Some(garment_type), dims, resolution)
}

/// Default cylinder primitive, always renderable
pub fn build_fallback(resolution: u32, dimensions: GarmentDimensions) -> RestMesh {
    let resolution = clamp_resolution(resolution);
    let dims = dimensions.sanitized();
    RestMesh::from_parts(builders::fallback(&dims, resolution), None, dims, resolution)
}

/// Build from a catalog identifier, falling back to the default primitive
/// when the identifier is not a known archetype
pub fn build_named(name: &str, resolution: u32, dimensions: GarmentDimensions) -> RestMesh {
    match name.parse::<GarmentType>() {
        Ok(garment_type) => build_with(garment_type, resolution, dimensions),
        Err(err) => {
            log::warn!("{err}; showing default primitive");
            build_fallback(resolution, dimensions)
        }
    }
}
