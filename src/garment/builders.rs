//! Per-archetype geometry construction.
//!
//! Every builder places the hem at `y = 0` and the attachment band at the top
//! (`y ≈ height`). Parts are built as independent grids and appended, then
//! normals are computed once over the whole garment.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use super::GarmentDimensions;
use crate::resources::{grid_indices, Mesh, Vertex};

/// Surface of revolution around a vertical axis through `center`.
///
/// `profile` holds `(radius, y)` rows from bottom to top; each row gets
/// `segments + 1` vertices (the seam column is duplicated for UVs).
fn lathe(name: &str, center: Vec3, profile: &[(f32, f32)], segments: u32, depth_ratio: f32) -> Mesh {
    let mut mesh = Mesh::new(name);
    let rows = profile.len() as u32;
    let cols = segments + 1;
    let v_span = rows.saturating_sub(1).max(1) as f32;

    for (row, &(radius, y)) in profile.iter().enumerate() {
        for col in 0..cols {
            let theta = col as f32 * TAU / segments as f32;
            let position = center
                + Vec3::new(
                    radius * theta.cos(),
                    y,
                    radius * theta.sin() * depth_ratio,
                );
            let uv = Vec2::new(col as f32 / segments as f32, row as f32 / v_span);
            mesh.vertices.push(Vertex::new(position, uv));
        }
    }

    mesh.indices = grid_indices(0, rows, cols);
    mesh
}

/// Tapered open tube from `start` to `end` with `rings + 1` rows of
/// `segments + 1` vertices.
fn tube(
    name: &str,
    start: Vec3,
    end: Vec3,
    radii: (f32, f32),
    rings: u32,
    segments: u32,
) -> Mesh {
    let mut mesh = Mesh::new(name);
    let axis = (end - start).normalize_or_zero();
    // Sleeves lie in the XY plane, so Z is always perpendicular to the axis
    let u = Vec3::Z;
    let v = u.cross(axis);
    let cols = segments + 1;

    for ring in 0..=rings {
        let t = ring as f32 / rings as f32;
        let center = start.lerp(end, t);
        let radius = radii.0 + (radii.1 - radii.0) * t;

        for col in 0..cols {
            let theta = col as f32 * TAU / segments as f32;
            let offset = (u * theta.cos() + v * theta.sin()) * radius;
            let uv = Vec2::new(col as f32 / segments as f32, t);
            mesh.vertices.push(Vertex::new(center + offset, uv));
        }
    }

    mesh.indices = grid_indices(0, rings + 1, cols);
    mesh
}

/// `rows` evenly spaced `(radius, y)` samples of `radius_at(t)` for
/// `t = y / height` in `[from, to]`.
fn profile(rows: u32, height: f32, from: f32, to: f32, radius_at: impl Fn(f32) -> f32) -> Vec<(f32, f32)> {
    let span = rows.saturating_sub(1).max(1) as f32;
    (0..rows)
        .map(|i| {
            let t = from + (to - from) * i as f32 / span;
            (radius_at(t), t * height)
        })
        .collect()
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Sleeve attached at the shoulder, hanging `droop` radians below horizontal
struct SleeveShape {
    length: f32,
    droop: f32,
    radii: (f32, f32),
}

fn torso(name: &str, dims: &GarmentDimensions, radius: f32, top: f32, resolution: u32) -> Mesh {
    // Straight body that narrows over the top tenth into the shoulders
    let rows = profile(resolution + 1, dims.height, 0.0, top, |t| {
        radius * (1.0 - 0.2 * smoothstep(0.9, 1.0, t))
    });
    lathe(name, Vec3::ZERO, &rows, resolution, dims.depth_ratio)
}

fn sleeves(mesh: &mut Mesh, dims: &GarmentDimensions, torso_radius: f32, shape: &SleeveShape, resolution: u32) {
    let shoulder_y = dims.height * 0.88;
    let s = resolution / 2;

    for side in [-1.0f32, 1.0] {
        let start = Vec3::new(side * torso_radius * 0.85, shoulder_y, 0.0);
        let direction = Vec3::new(side * shape.droop.cos(), -shape.droop.sin(), 0.0);
        let end = start + direction * shape.length;
        let name = if side < 0.0 { "sleeve_left" } else { "sleeve_right" };
        mesh.append(&tube(name, start, end, shape.radii, s, s));
    }
}

pub(super) fn shirt(dims: &GarmentDimensions, resolution: u32) -> Mesh {
    let w = dims.width;
    let radius = w * 0.5;

    let mut mesh = torso("shirt", dims, radius, 1.0, resolution);
    let shape = SleeveShape {
        length: w * 0.3,
        droop: 35f32.to_radians(),
        radii: (w * 0.16, w * 0.13),
    };
    sleeves(&mut mesh, dims, radius, &shape, resolution);
    mesh.name = "shirt".to_string();
    mesh
}

pub(super) fn jacket(dims: &GarmentDimensions, resolution: u32) -> Mesh {
    let w = dims.width;
    let h = dims.height;
    let radius = w * 0.55;

    let mut mesh = torso("jacket", dims, radius, 0.94, resolution);
    let shape = SleeveShape {
        length: h * 0.55,
        droop: 60f32.to_radians(),
        radii: (w * 0.17, w * 0.12),
    };
    sleeves(&mut mesh, dims, radius, &shape, resolution);

    let collar = [(w * 0.3, h * 0.94), (w * 0.34, h)];
    mesh.append(&lathe("collar", Vec3::ZERO, &collar, resolution, dims.depth_ratio));
    mesh.name = "jacket".to_string();
    mesh
}

pub(super) fn dress(dims: &GarmentDimensions, resolution: u32) -> Mesh {
    let w = dims.width;
    let hem = w * 0.75;
    let waist = w * 0.32;
    let bust = w * 0.42;
    let shoulder = w * 0.36;

    let rows = profile(resolution, dims.height, 0.0, 1.0, |t| {
        if t <= 0.6 {
            lerp(hem, waist, smoothstep(0.0, 0.6, t))
        } else if t <= 0.8 {
            lerp(waist, bust, smoothstep(0.6, 0.8, t))
        } else {
            lerp(bust, shoulder, smoothstep(0.8, 1.0, t))
        }
    });
    lathe("dress", Vec3::ZERO, &rows, resolution, dims.depth_ratio)
}

pub(super) fn pants(dims: &GarmentDimensions, resolution: u32) -> Mesh {
    let w = dims.width;
    let h = dims.height;
    let mut mesh = Mesh::new("pants");

    for side in [-1.0f32, 1.0] {
        let center = Vec3::new(side * w * 0.22, 0.0, 0.0);
        let rows = profile(resolution + 1, h, 0.0, 0.9, |t| lerp(w * 0.2, w * 0.24, t / 0.9));
        let name = if side < 0.0 { "leg_left" } else { "leg_right" };
        mesh.append(&lathe(name, center, &rows, resolution, dims.depth_ratio));
    }

    mesh.append(&waistband(dims, resolution));
    mesh
}

/// Torus sitting on top of the legs; its lowest point is `0.9 * height`
fn waistband(dims: &GarmentDimensions, resolution: u32) -> Mesh {
    let mut mesh = Mesh::new("waistband");
    let major = dims.width * 0.46;
    let minor = dims.height * 0.05;
    let center_y = dims.height - minor;
    let rings = resolution / 2;
    let cols = resolution + 1;

    for ring in 0..=rings {
        // Minor angle runs from the bottom of the tube around to its bottom again
        let psi = -PI * 0.5 + ring as f32 * TAU / rings as f32;
        let reach = major + minor * psi.cos();

        for col in 0..cols {
            let phi = col as f32 * TAU / resolution as f32;
            let position = Vec3::new(
                reach * phi.cos(),
                center_y + minor * psi.sin(),
                reach * phi.sin() * dims.depth_ratio,
            );
            let uv = Vec2::new(col as f32 / resolution as f32, ring as f32 / rings as f32);
            mesh.vertices.push(Vertex::new(position, uv));
        }
    }

    mesh.indices = grid_indices(0, rings + 1, cols);
    mesh
}

/// Plain open cylinder used when the archetype is not recognised
pub(super) fn fallback(dims: &GarmentDimensions, resolution: u32) -> Mesh {
    let radius = dims.width * 0.5;
    let rows = profile(resolution + 1, dims.height, 0.0, 1.0, |_| radius);
    lathe("fallback", Vec3::ZERO, &rows, resolution, dims.depth_ratio)
}
