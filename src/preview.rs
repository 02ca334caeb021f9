//! Preview orchestrator
//!
//! Owns the rest/working meshes, the playback controller, the garment
//! transform and its material, and runs one frame per [`GarmentPreview::tick`].
//! The host render loop pulls everything it needs to draw from here.

use glam::{Mat4, Vec3};

use crate::garment::{self, GarmentDimensions, GarmentType, RestMesh};
use crate::playback::{PlaybackController, PlaybackState};
use crate::resources::{apply_material, Material, MaterialSpec};
use crate::scene::Transform;
use crate::simulation::{SimulationParams, SimulationState, WorkingMesh};
use crate::PreviewConfig;

pub struct GarmentPreview {
    simulation: SimulationState,
    playback: PlaybackController,
    transform: Transform,
    material: Material,
    /// Requested archetype; `None` after an unknown catalog identifier
    garment_type: Option<GarmentType>,
    resolution: u32,
    dimensions: GarmentDimensions,
    mounted: bool,
    fullscreen_requested: bool,
}

impl GarmentPreview {
    pub fn new(config: PreviewConfig) -> Self {
        let rest = garment::build_with(config.garment, config.resolution, config.dimensions);
        let playback = PlaybackController::new(PlaybackState {
            auto_rotate: config.auto_rotate,
            speed: config.speed,
            ..Default::default()
        })
        .with_rotation_rate(config.rotation_rate);

        log::info!(
            "Garment preview ready: {} ({} vertices)",
            config.garment,
            rest.vertex_count()
        );

        Self {
            resolution: rest.resolution(),
            dimensions: rest.dimensions(),
            garment_type: Some(config.garment),
            simulation: SimulationState::new(rest, config.params),
            playback,
            transform: Transform::default(),
            material: Material::from_spec(&config.material),
            mounted: true,
            fullscreen_requested: false,
        }
    }

    // ---- inbound surface ----

    /// Switch archetype; the working mesh restarts from the new rest pose
    pub fn set_garment_type(&mut self, garment_type: GarmentType) {
        if self.garment_type == Some(garment_type) {
            return;
        }
        log::info!("Switching garment to {garment_type}");
        self.garment_type = Some(garment_type);
        self.rebuild();
    }

    /// Switch archetype by catalog identifier; unknown identifiers show the
    /// default primitive
    pub fn set_garment_by_name(&mut self, name: &str) {
        match name.parse::<GarmentType>() {
            Ok(garment_type) => self.set_garment_type(garment_type),
            Err(err) => {
                log::warn!("{err}; showing default primitive");
                self.garment_type = None;
                self.rebuild();
            }
        }
    }

    pub fn set_resolution(&mut self, resolution: u32) {
        let resolution = garment::clamp_resolution(resolution);
        if resolution != self.resolution {
            self.resolution = resolution;
            self.rebuild();
        }
    }

    pub fn set_dimensions(&mut self, dimensions: GarmentDimensions) {
        let dimensions = dimensions.sanitized();
        if dimensions != self.dimensions {
            self.dimensions = dimensions;
            self.rebuild();
        }
    }

    pub fn set_params(&mut self, params: SimulationParams) {
        self.simulation.set_params(params);
    }

    pub fn set_material(&mut self, spec: &MaterialSpec) {
        apply_material(&mut self.material, spec);
    }

    /// Mutable access for hosts completing an asynchronous texture load
    pub fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    fn rebuild(&mut self) {
        let rest = match self.garment_type {
            Some(garment_type) => garment::build_with(garment_type, self.resolution, self.dimensions),
            None => garment::build_fallback(self.resolution, self.dimensions),
        };
        log::debug!("Rest mesh rebuilt: {} vertices", rest.vertex_count());
        self.simulation.reset(rest);
    }

    // ---- outbound surface ----

    pub fn working_mesh(&self) -> &WorkingMesh {
        self.simulation.working()
    }

    pub fn rest_mesh(&self) -> &RestMesh {
        self.simulation.rest()
    }

    pub fn params(&self) -> &SimulationParams {
        self.simulation.params()
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.transform.matrix()
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn playback(&self) -> &PlaybackState {
        self.playback.state()
    }

    // ---- controls ----

    pub fn toggle_rotation(&mut self) -> bool {
        self.playback.toggle_rotation()
    }

    pub fn toggle_simulation(&mut self) -> bool {
        self.playback.toggle_simulation()
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.playback.set_speed(speed);
    }

    /// Ask the host to enter fullscreen on its next frame
    pub fn request_fullscreen(&mut self) {
        self.fullscreen_requested = true;
    }

    /// Drain a pending fullscreen request
    pub fn take_fullscreen_request(&mut self) -> bool {
        std::mem::take(&mut self.fullscreen_requested)
    }

    // ---- frame loop ----

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Resume ticking after [`unmount`](Self::unmount)
    pub fn mount(&mut self) {
        self.mounted = true;
    }

    /// Stop ticking; the last working mesh stays as is
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    /// Run one display frame of `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        if !self.mounted {
            return;
        }

        let frame = self.playback.tick(dt);
        if let Some(angle) = frame.rotation_delta {
            self.transform.rotate_axis(Vec3::Y, angle);
        }
        if frame.simulate {
            self.simulation.step(frame.phase);
        }
    }
}

impl Default for GarmentPreview {
    fn default() -> Self {
        Self::new(PreviewConfig::default())
    }
}
