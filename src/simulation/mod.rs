//! Procedural draping simulation
//!
//! Each frame's displacement is a pure function of the rest pose, the
//! accumulated playback time and the [`SimulationParams`]. Nothing carries
//! over between frames, so the working buffer can never drift.

use crate::garment::RestMesh;
use crate::resources::{bounds_of, recompute_normals, Aabb, Vertex};

/// How `stiffness` blends the candidate displacement toward the rest pose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StiffnessMode {
    /// `rest + (candidate - rest) * (1 - stiffness)`: stiffer fabric moves less
    #[default]
    Resistive,
    /// `rest + (candidate - rest) * stiffness`, as older previews rendered it
    Legacy,
}

/// Forces applied to the garment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    pub gravity: f32,
    pub wind: f32,
    /// In `[0, 1]`
    pub stiffness: f32,
    pub stiffness_mode: StiffnessMode,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            gravity: 0.05,
            wind: 0.1,
            stiffness: 0.5,
            stiffness_mode: StiffnessMode::Resistive,
        }
    }
}

impl SimulationParams {
    pub fn new(gravity: f32, wind: f32, stiffness: f32) -> Self {
        Self {
            gravity,
            wind,
            stiffness,
            ..Default::default()
        }
        .sanitized()
    }

    /// No forces at all
    pub fn still() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn with_stiffness_mode(mut self, mode: StiffnessMode) -> Self {
        self.stiffness_mode = mode;
        self
    }

    /// Non-finite forces become zero, stiffness is clamped to `[0, 1]`
    pub fn sanitized(self) -> Self {
        let finite_or_zero = |v: f32| if v.is_finite() { v } else { 0.0 };
        let stiffness = if self.stiffness.is_finite() {
            self.stiffness.clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            gravity: finite_or_zero(self.gravity),
            wind: finite_or_zero(self.wind),
            stiffness,
            stiffness_mode: self.stiffness_mode,
        }
    }

    /// Fraction of the candidate displacement that reaches the mesh
    pub fn blend_factor(&self) -> f32 {
        match self.stiffness_mode {
            StiffnessMode::Resistive => 1.0 - self.stiffness,
            StiffnessMode::Legacy => self.stiffness,
        }
    }
}

/// Per-frame vertex buffer handed to the renderer.
///
/// Same length and order as the rest mesh it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingMesh {
    vertices: Vec<Vertex>,
}

impl WorkingMesh {
    /// Working buffer reset to the rest pose
    pub fn from_rest(rest: &RestMesh) -> Self {
        Self {
            vertices: rest.vertices().to_vec(),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get vertex data as bytes
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn bounds(&self) -> Option<Aabb> {
        bounds_of(&self.vertices)
    }

    /// Whether this buffer can hold displaced positions of `rest`
    pub fn matches_rest(&self, rest: &RestMesh) -> bool {
        self.vertices.len() == rest.vertex_count()
    }

    /// Largest per-axis distance of any vertex from its rest position
    pub fn max_displacement(&self, rest: &RestMesh) -> f32 {
        self.vertices
            .iter()
            .zip(rest.vertices())
            .map(|(w, r)| (w.position - r.position).abs().max_element())
            .fold(0.0, f32::max)
    }
}

/// Displace the rest pose for time `elapsed` into a new working mesh
pub fn advance(rest: &RestMesh, elapsed: f32, params: &SimulationParams) -> WorkingMesh {
    let mut working = WorkingMesh::from_rest(rest);
    advance_into(&mut working, rest, elapsed, params);
    working
}

/// Displace the rest pose for time `elapsed`, reusing `working`'s storage.
///
/// Vertices above the attachment band keep their rest position exactly.
/// Normals are recomputed from the displaced positions.
pub fn advance_into(working: &mut WorkingMesh, rest: &RestMesh, elapsed: f32, params: &SimulationParams) {
    let params = params.sanitized();
    let threshold = rest.attachment_threshold();
    let blend = params.blend_factor();
    let t = if elapsed.is_finite() { elapsed } else { 0.0 };

    working.vertices.clear();
    working.vertices.extend(rest.vertices().iter().map(|vertex| {
        let p = vertex.position;
        if p.y > threshold {
            return *vertex;
        }

        let dy = (t + p.x * 2.0).sin() * params.gravity * p.y;
        let dx = (t + p.y).sin() * params.wind;
        let dz = (t + p.y * 0.5).cos() * params.wind * 0.5;

        let mut displaced = *vertex;
        displaced.position.x = p.x + dx * blend;
        displaced.position.y = p.y + dy * blend;
        displaced.position.z = p.z + dz * blend;
        displaced
    }));

    recompute_normals(&mut working.vertices, rest.indices());
}

/// Simulation state threaded through each tick
#[derive(Debug, Clone)]
pub struct SimulationState {
    rest: RestMesh,
    working: WorkingMesh,
    params: SimulationParams,
}

impl SimulationState {
    pub fn new(rest: RestMesh, params: SimulationParams) -> Self {
        let working = WorkingMesh::from_rest(&rest);
        Self {
            rest,
            working,
            params: params.sanitized(),
        }
    }

    pub fn rest(&self) -> &RestMesh {
        &self.rest
    }

    pub fn working(&self) -> &WorkingMesh {
        &self.working
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn set_params(&mut self, params: SimulationParams) {
        self.params = params.sanitized();
    }

    /// Swap in a new rest pose; the working buffer restarts from it
    pub fn reset(&mut self, rest: RestMesh) {
        self.working = WorkingMesh::from_rest(&rest);
        self.rest = rest;
    }

    /// Recompute the working mesh for time `elapsed`
    pub fn step(&mut self, elapsed: f32) {
        advance_into(&mut self.working, &self.rest, elapsed, &self.params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::garment::{build, GarmentType};

    #[test]
    fn test_attachment_band_never_moves() {
        let rest = build(GarmentType::Shirt, 16);
        let params = SimulationParams::new(3.0, 2.0, 0.0);

        for t in [0.0, 0.7, 12.5, 1000.0] {
            let working = advance(&rest, t, &params);
            for (i, (w, r)) in working.vertices().iter().zip(rest.vertices()).enumerate() {
                if rest.is_attached(i) {
                    assert_eq!(w.position, r.position);
                }
            }
        }
    }

    #[test]
    fn test_advance_is_deterministic() {
        let rest = build(GarmentType::Dress, 20);
        let params = SimulationParams::default();
        let a = advance(&rest, 3.25, &params);
        let b = advance(&rest, 3.25, &params);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_forces_leave_rest_pose() {
        let rest = build(GarmentType::Shirt, 16);
        for stiffness in [0.0, 0.5, 1.0] {
            let params = SimulationParams::new(0.0, 0.0, stiffness);
            let working = advance(&rest, 4.2, &params);
            assert_eq!(working.vertices(), rest.vertices());
        }
    }

    #[test]
    fn test_resistive_full_stiffness_snaps_to_rest() {
        let rest = build(GarmentType::Pants, 12);
        let params = SimulationParams::new(1.0, 1.0, 1.0);
        let working = advance(&rest, 2.0, &params);
        assert_eq!(working.max_displacement(&rest), 0.0);
    }

    #[test]
    fn test_legacy_mode_inverts_blend() {
        let rest = build(GarmentType::Dress, 12);
        let legacy = SimulationParams::new(0.2, 0.3, 0.25).with_stiffness_mode(StiffnessMode::Legacy);
        let resistive = SimulationParams::new(0.2, 0.3, 0.75);
        assert_eq!(legacy.blend_factor(), resistive.blend_factor());
        assert_eq!(advance(&rest, 1.5, &legacy), advance(&rest, 1.5, &resistive));
    }

    #[test]
    fn test_displacement_is_bounded() {
        let rest = build(GarmentType::Jacket, 16);
        let (g, w) = (0.3, 0.2);
        let params = SimulationParams::new(g, w, 0.0);

        for step in 0..40 {
            let working = advance(&rest, step as f32 * 0.37, &params);
            for (wv, rv) in working.vertices().iter().zip(rest.vertices()) {
                let bound = (rv.position.y * g).abs() + w + 1e-5;
                let delta = (wv.position - rv.position).abs();
                assert!(delta.max_element() <= bound, "{delta} exceeds {bound}");
            }
        }
    }

    #[test]
    fn test_forces_move_free_vertices() {
        let rest = build(GarmentType::Dress, 16);
        let working = advance(&rest, 1.0, &SimulationParams::new(0.1, 0.2, 0.0));
        assert!(working.max_displacement(&rest) > 0.0);
        assert!(working.matches_rest(&rest));
    }

    #[test]
    fn test_params_are_sanitized() {
        let params = SimulationParams::new(f32::INFINITY, f32::NAN, 7.0);
        assert_eq!(params.gravity, 0.0);
        assert_eq!(params.wind, 0.0);
        assert_eq!(params.stiffness, 1.0);

        let params = SimulationParams::new(0.1, 0.1, -3.0);
        assert_eq!(params.stiffness, 0.0);
    }

    #[test]
    fn test_state_reset_switches_rest_pose() {
        let mut state = SimulationState::new(build(GarmentType::Shirt, 12), SimulationParams::default());
        state.step(2.0);

        let dress = build(GarmentType::Dress, 12);
        state.reset(dress.clone());
        assert_eq!(state.working().vertex_count(), dress.vertex_count());
        assert_eq!(state.working().vertices(), dress.vertices());
        assert_eq!(state.rest().garment_type(), Some(GarmentType::Dress));
    }

    #[test]
    fn test_working_bytes_for_upload() {
        let rest = build(GarmentType::Shirt, 8);
        let working = WorkingMesh::from_rest(&rest);
        assert_eq!(working.vertex_bytes().len(), rest.vertex_count() * 32);
        assert_eq!(working.bounds(), rest.mesh().bounds());
    }
}
