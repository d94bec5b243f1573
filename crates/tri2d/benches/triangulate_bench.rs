//! Criterion benchmarks for point-cloud and profile triangulation.
//! Focus sizes: n in {16, 64, 256, 1024} points / outline vertices.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p tri2d

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use tri2d::sample::{random_points, star_polygon, ReplayToken};
use tri2d::Mesh;

fn bench_triangulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangulate");
    for &n in &[16usize, 64, 256, 1024] {
        group.bench_with_input(BenchmarkId::new("point_cloud", n), &n, |b, &n| {
            b.iter_batched(
                || random_points(n, 10.0, ReplayToken { seed: 43, index: n as u64 }),
                |pts| {
                    let mut mesh = Mesh::new();
                    mesh.triangulate_point_cloud(&pts).unwrap();
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("star_profile", n), &n, |b, &n| {
            b.iter_batched(
                || {
                    let mut mesh = Mesh::new();
                    let outline = star_polygon(n, 0.5, 1.5, ReplayToken { seed: 44, index: n as u64 });
                    mesh.add_loop(&outline).unwrap();
                    mesh
                },
                |mut mesh| {
                    mesh.triangulate_profile(true, true, true).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_refine(c: &mut Criterion) {
    let mut group = c.benchmark_group("refine");
    for &limit in &[0.1f64, 0.02] {
        group.bench_with_input(BenchmarkId::new("refine_area", limit), &limit, |b, &limit| {
            b.iter_batched(
                || {
                    let mut mesh = Mesh::new();
                    let outline = star_polygon(24, 0.5, 1.5, ReplayToken { seed: 45, index: 0 });
                    mesh.add_loop(&outline).unwrap();
                    mesh.triangulate_profile(true, true, true).unwrap();
                    mesh
                },
                |mut mesh| {
                    mesh.triangulate_refine_area(limit, 0.5, true, true, true).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_triangulate, bench_refine);
criterion_main!(benches);
