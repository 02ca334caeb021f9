//! End-to-end checks of the draping preview through the public API.

use garment_preview::garment::{self, GarmentType};
use garment_preview::playback::wave_phase;
use garment_preview::simulation::advance;
use garment_preview::{GarmentPreview, PreviewConfig, SimulationParams, StiffnessMode};

const FRAME: f32 = 1.0 / 60.0;

fn preview(garment: GarmentType, params: SimulationParams) -> GarmentPreview {
    GarmentPreview::new(
        PreviewConfig::default()
            .with_garment(garment)
            .with_resolution(16)
            .with_params(params),
    )
}

#[test]
fn attachment_band_is_fixed_for_every_archetype() {
    let param_grid = [
        SimulationParams::new(0.5, 0.5, 0.0),
        SimulationParams::new(-2.0, 1.0, 0.3),
        SimulationParams::new(1.0, -1.0, 0.9).with_stiffness_mode(StiffnessMode::Legacy),
    ];

    for garment in GarmentType::ALL {
        let rest = garment::build(garment, 16);
        for params in &param_grid {
            for t in [0.0, 0.33, 5.0, 77.7] {
                let working = advance(&rest, t, params);
                let threshold = rest.height() * 0.8;
                for (w, r) in working.vertices().iter().zip(rest.vertices()) {
                    if r.position.y > threshold {
                        assert_eq!(w.position, r.position, "{garment} moved an anchored vertex");
                    }
                }
            }
        }
    }
}

#[test]
fn shirt_without_forces_stays_at_rest() {
    let mut preview = preview(GarmentType::Shirt, SimulationParams::still());
    for _ in 0..120 {
        preview.tick(FRAME);
        assert_eq!(preview.working_mesh().vertices(), preview.rest_mesh().vertices());
    }
}

#[test]
fn garment_switch_resets_working_mesh() {
    let mut preview = preview(GarmentType::Shirt, SimulationParams::new(0.2, 0.2, 0.0));
    for _ in 0..30 {
        preview.tick(FRAME);
    }

    preview.set_garment_type(GarmentType::Pants);
    let rest = preview.rest_mesh();
    assert_eq!(rest.garment_type(), Some(GarmentType::Pants));
    assert_eq!(rest.vertex_count(), GarmentType::Pants.vertex_count(16));
    assert_eq!(preview.working_mesh().vertices(), rest.vertices());
}

#[test]
fn pause_and_resume_keeps_time_accounting() {
    let params = SimulationParams::new(0.1, 0.15, 0.2);
    let mut preview = preview(GarmentType::Dress, params);

    for _ in 0..10 {
        preview.tick(FRAME);
    }
    preview.toggle_simulation();
    let t_pause = preview.playback().elapsed_time;
    let frozen = preview.working_mesh().clone();

    preview.toggle_simulation();
    preview.tick(0.25);

    let expected = advance(preview.rest_mesh(), wave_phase(t_pause + 0.25), preview.params());
    assert_ne!(preview.working_mesh(), &frozen);
    assert_eq!(preview.working_mesh(), &expected);
}

#[test]
fn paused_preview_keeps_last_frame() {
    let mut preview = preview(GarmentType::Jacket, SimulationParams::default());
    preview.tick(0.4);
    preview.toggle_simulation();
    let frozen = preview.working_mesh().clone();

    for _ in 0..60 {
        preview.tick(FRAME);
    }
    assert_eq!(preview.working_mesh(), &frozen);
}

#[test]
fn displacement_stays_within_force_bound() {
    let (g, w) = (0.4, 0.25);
    let params = SimulationParams::new(g, w, 0.0);

    for garment in GarmentType::ALL {
        let rest = garment::build(garment, 12);
        for frame in 0..90 {
            let working = advance(&rest, frame as f32 * FRAME * 7.0, &params);
            for (wv, rv) in working.vertices().iter().zip(rest.vertices()) {
                let bound = rv.position.y.abs() * g + w + 1e-5;
                let delta = (wv.position - rv.position).abs();
                assert!(delta.x <= bound && delta.y <= bound && delta.z <= bound);
            }
        }
    }
}

#[test]
fn dress_at_resolution_20() {
    let rest = garment::build(GarmentType::Dress, 20);
    assert_eq!(rest.vertex_count(), 20 * 21);
    let anchored = (0..rest.vertex_count()).filter(|&i| rest.is_attached(i)).count();
    assert_eq!(anchored, rest.attachment_count());
}

#[test]
fn stiffer_fabric_moves_less() {
    let rest = garment::build(GarmentType::Dress, 16);
    let loose = advance(&rest, 1.3, &SimulationParams::new(0.3, 0.3, 0.1));
    let stiff = advance(&rest, 1.3, &SimulationParams::new(0.3, 0.3, 0.9));
    assert!(stiff.max_displacement(&rest) < loose.max_displacement(&rest));
}
