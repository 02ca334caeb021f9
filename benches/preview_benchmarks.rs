use criterion::{black_box, criterion_group, criterion_main, Criterion};

use garment_preview::garment::{build, GarmentType};
use garment_preview::simulation::{advance, advance_into, SimulationParams, WorkingMesh};

// ---------------------------------------------------------------------------
// Geometry construction
// ---------------------------------------------------------------------------

fn bench_build_archetypes(c: &mut Criterion) {
    for garment in GarmentType::ALL {
        c.bench_function(&format!("build_{garment}_32"), |b| {
            b.iter(|| build(black_box(garment), black_box(32)));
        });
    }
}

fn bench_build_high_resolution(c: &mut Criterion) {
    c.bench_function("build_dress_128", |b| {
        b.iter(|| build(black_box(GarmentType::Dress), black_box(128)));
    });
}

// ---------------------------------------------------------------------------
// Per-frame step
// ---------------------------------------------------------------------------

fn bench_advance_alloc(c: &mut Criterion) {
    let rest = build(GarmentType::Jacket, 64);
    let params = SimulationParams::default();
    c.bench_function("advance_jacket_64", |b| {
        b.iter(|| advance(&rest, black_box(1.25), &params));
    });
}

fn bench_advance_in_place(c: &mut Criterion) {
    let rest = build(GarmentType::Jacket, 64);
    let params = SimulationParams::default();
    let mut working = WorkingMesh::from_rest(&rest);
    let mut t = 0.0f32;
    c.bench_function("advance_into_jacket_64", |b| {
        b.iter(|| {
            t += 1.0 / 60.0;
            advance_into(&mut working, &rest, black_box(t), &params);
        });
    });
}

criterion_group!(geometry, bench_build_archetypes, bench_build_high_resolution);
criterion_group!(simulation, bench_advance_alloc, bench_advance_in_place);
criterion_main!(geometry, simulation);
