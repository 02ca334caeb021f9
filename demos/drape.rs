//! Headless draping demo
//!
//! Runs the preview frame loop for a garment and prints per-frame
//! statistics.
//!
//! Run with:
//!   cargo run --example drape
//!   cargo run --example drape -- --garment dress --wind 0.3 --frames 240
//!   RUST_LOG=debug cargo run --example drape -- --garment hoodie

use clap::Parser;
use garment_preview::garment::{self, GarmentDimensions};
use garment_preview::resources::{apply_color_hex, Color, MaterialSpec};
use garment_preview::{GarmentPreview, PreviewConfig, SimulationParams, StiffnessMode};

#[derive(Parser, Debug)]
#[command(name = "drape", about = "Headless garment draping preview")]
struct Args {
    /// Garment archetype (tshirt, dress, jacket, pants)
    #[arg(long, default_value = "tshirt")]
    garment: String,
    /// Segment count
    #[arg(long, default_value_t = 32)]
    resolution: u32,
    #[arg(long, default_value_t = 0.05, allow_negative_numbers = true)]
    gravity: f32,
    #[arg(long, default_value_t = 0.1, allow_negative_numbers = true)]
    wind: f32,
    /// Fabric stiffness in [0, 1]
    #[arg(long, default_value_t = 0.5)]
    stiffness: f32,
    /// Blend with the legacy stiffness convention
    #[arg(long)]
    legacy_stiffness: bool,
    /// Playback speed multiplier
    #[arg(long, default_value_t = 1.0)]
    speed: f32,
    /// Number of 60 Hz frames to run
    #[arg(long, default_value_t = 120)]
    frames: u32,
    /// Print statistics every N frames
    #[arg(long, default_value_t = 30)]
    report_every: u32,
    /// Base color as hex
    #[arg(long, default_value = "#3a6ea5")]
    color: String,
    /// Optional fabric swatch image
    #[arg(long)]
    texture: Option<std::path::PathBuf>,
    /// Pause simulation halfway through the run
    #[arg(long)]
    pause_halfway: bool,
    /// Start without auto-rotation
    #[arg(long)]
    no_rotate: bool,
}

fn main() {
    garment_preview::init_logging();
    let args = Args::parse();

    let mut params = SimulationParams::new(args.gravity, args.wind, args.stiffness);
    if args.legacy_stiffness {
        params = params.with_stiffness_mode(StiffnessMode::Legacy);
    }

    let mut material = MaterialSpec::new(Color::WHITE).with_roughness(0.85);
    if let Some(path) = &args.texture {
        material = material.with_texture(path);
    }

    let config = PreviewConfig::default()
        .with_resolution(args.resolution)
        .with_params(params)
        .with_material(material)
        .with_auto_rotate(!args.no_rotate)
        .with_speed(args.speed);

    let mut preview = GarmentPreview::new(config);
    preview.set_garment_by_name(&args.garment);
    apply_color_hex(preview.material_mut(), &args.color);

    let rest = preview.rest_mesh();
    let kind = rest
        .garment_type()
        .map_or("fallback primitive".to_string(), |g| g.to_string());
    println!(
        "{kind}: {} vertices ({} anchored), {} triangles, textured: {}",
        rest.vertex_count(),
        rest.attachment_count(),
        rest.mesh().triangle_count(),
        preview.material().is_textured()
    );
    if let Some(garment_type) = rest.garment_type() {
        println!(
            "expected vertex count at resolution {}: {}",
            rest.resolution(),
            garment_type.vertex_count(rest.resolution())
        );
    } else {
        println!(
            "expected vertex count at resolution {}: {}",
            rest.resolution(),
            garment::fallback_vertex_count(rest.resolution())
        );
    }
    let dims: GarmentDimensions = rest.dimensions();
    println!("size: {} x {} (attachment above y = {})", dims.width, dims.height, rest.attachment_threshold());

    let frame_dt = 1.0 / 60.0;
    for frame in 1..=args.frames {
        if args.pause_halfway && frame == args.frames / 2 {
            preview.toggle_simulation();
            println!("-- simulation paused at t = {:.3}", preview.playback().elapsed_time);
        }

        preview.tick(frame_dt);

        if args.report_every > 0 && frame % args.report_every == 0 {
            let rest = preview.rest_mesh();
            let working = preview.working_mesh();
            let anchored_ok = working
                .vertices()
                .iter()
                .zip(rest.vertices())
                .enumerate()
                .all(|(i, (w, r))| !rest.is_attached(i) || w.position == r.position);
            let bounds = working.bounds().map(|b| b.size()).unwrap_or_default();

            println!(
                "frame {frame:4}  t={:7.3}  yaw={:6.3}  max_disp={:.4}  anchored={}  extent=({:.3}, {:.3}, {:.3})",
                preview.playback().elapsed_time,
                preview.transform().yaw(),
                working.max_displacement(rest),
                if anchored_ok { "ok" } else { "MOVED" },
                bounds.x,
                bounds.y,
                bounds.z,
            );
        }
    }
}
