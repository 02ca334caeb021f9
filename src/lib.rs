//! Garment Preview - real-time draping preview for garment patterns
//!
//! Builds a parametric mesh for a garment archetype and sways it every frame
//! with a stylized gravity/wind displacement, so pattern and material choices
//! can be previewed before purchase.
//!
//! # Components
//! - [`garment`]: parametric rest-pose geometry per archetype
//! - [`simulation`]: pure per-frame vertex displacement with anchored shoulders/waistband
//! - [`playback`]: auto-rotate / simulate flags, speed and elapsed time
//! - [`resources`]: meshes, materials and texture loading
//! - [`preview`]: the orchestrator a host render loop drives once per frame
//!
//! Rendering is left to the host: it uploads [`simulation::WorkingMesh::vertex_bytes`]
//! and [`resources::Material::uniform_data`] with whatever graphics API it uses.

pub mod error;
pub mod garment;
pub mod playback;
pub mod preview;
pub mod resources;
pub mod scene;
pub mod simulation;

pub use error::{PreviewError, PreviewResult};
pub use garment::{GarmentDimensions, GarmentType, RestMesh};
pub use playback::{PlaybackController, PlaybackState};
pub use preview::GarmentPreview;
pub use resources::{Color, Material, MaterialSpec};
pub use simulation::{SimulationParams, SimulationState, StiffnessMode, WorkingMesh};

/// Configuration for initializing a garment preview
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    /// Initial archetype
    pub garment: GarmentType,
    /// Segment count, clamped to `[garment::MIN_RESOLUTION, garment::MAX_RESOLUTION]`
    pub resolution: u32,
    /// Garment size in scene units
    pub dimensions: GarmentDimensions,
    /// Initial forces
    pub params: SimulationParams,
    /// Initial color and finish
    pub material: MaterialSpec,
    /// Start spinning about the vertical axis
    pub auto_rotate: bool,
    /// Playback speed multiplier
    pub speed: f32,
    /// Auto-rotation rate in radians per second at speed 1.0
    pub rotation_rate: f32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            garment: GarmentType::Shirt,
            resolution: 32,
            dimensions: GarmentDimensions::default(),
            params: SimulationParams::default(),
            material: MaterialSpec::default(),
            auto_rotate: true,
            speed: 1.0,
            rotation_rate: 0.5,
        }
    }
}

impl PreviewConfig {
    pub fn with_garment(mut self, garment: GarmentType) -> Self {
        self.garment = garment;
        self
    }

    pub fn with_resolution(mut self, resolution: u32) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_dimensions(mut self, dimensions: GarmentDimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn with_params(mut self, params: SimulationParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_material(mut self, material: MaterialSpec) -> Self {
        self.material = material;
        self
    }

    pub fn with_auto_rotate(mut self, auto_rotate: bool) -> Self {
        self.auto_rotate = auto_rotate;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }
}

/// Install a logger honoring `RUST_LOG` (defaults to `info`).
///
/// Safe to call more than once; later calls are ignored.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Route `log` output to the browser console and install the panic hook.
///
/// Safe to call more than once; later calls are ignored.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
