use criterion::{criterion_group, criterion_main, Criterion, black_box};

use fuelscape::generation::{generate, GenerationConfig};
use fuelscape::terrain::{ElevationSynthesizer, MeshParams, MeshSynthesizer, PerlinField};

fn bench_config(size: usize, resolution: usize) -> GenerationConfig {
    GenerationConfig {
        map_width: size,
        map_height: size,
        mesh: MeshParams {
            resolution,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn bench_generate_128(c: &mut Criterion) {
    let config = bench_config(128, 128);

    c.bench_function("generate_128", |b| {
        b.iter(|| generate(black_box(&config)))
    });
}

fn bench_generate_256(c: &mut Criterion) {
    let config = bench_config(256, 256);

    c.bench_function("generate_256", |b| {
        b.iter(|| generate(black_box(&config)))
    });
}

fn bench_elevation_256(c: &mut Criterion) {
    let noise = PerlinField::default();

    c.bench_function("elevation_256", |b| {
        b.iter(|| {
            ElevationSynthesizer::new(&noise, 20.0, black_box(42)).synthesize(256, 256)
        });
    });
}

fn bench_mesh_only(c: &mut Criterion) {
    let noise = PerlinField::default();
    let elevation = ElevationSynthesizer::new(&noise, 20.0, 42).synthesize(256, 256);
    let params = MeshParams::default();

    c.bench_function("mesh_256_from_256", |b| {
        b.iter(|| MeshSynthesizer::synthesize(black_box(&elevation), black_box(&params)))
    });
}

criterion_group!(
    benches,
    bench_generate_128,
    bench_generate_256,
    bench_elevation_256,
    bench_mesh_only,
);
criterion_main!(benches);
