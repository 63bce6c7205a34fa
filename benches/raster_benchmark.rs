#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmarks for line rasterization and figure updates.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pixel_raster::prelude::*;

fn line_algorithm_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("rasterize");

    for length in [10, 100, 1_000, 10_000] {
        let end = Point::new(length, length / 3 + 1);

        for algorithm in LineAlgorithm::ALL {
            group.bench_with_input(
                BenchmarkId::new(algorithm.name(), length),
                &end,
                |b, &end| b.iter(|| rasterize(algorithm, black_box(Point::ORIGIN), black_box(end))),
            );
        }
    }

    group.finish();
}

fn figure_transform_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("figure_state");

    group.bench_function("rotate_default_trapezoid", |b| {
        let mut state = FigureState::default();
        b.iter(|| {
            state
                .apply_transform(black_box(Transform::Rotate { degrees: 7.5 }))
                .expect("rotation should succeed");
        });
    });

    group.bench_function("params_rebuild", |b| {
        let params = TransformParams::new()
            .translate(3.0, -3.0)
            .rotate(30.0)
            .scale(1.5, 0.75)
            .shear(10.0, 0.0)
            .reflect(Some(ReflectionLine::X_AXIS));
        b.iter(|| black_box(&params).matrix().expect("parameters are valid"));
    });

    group.finish();
}

fn render_benchmark(c: &mut Criterion) {
    let state = FigureState::default();

    c.bench_function("render_state_600x600", |b| {
        b.iter(|| render_state(black_box(&state)).expect("render should succeed"));
    });
}

criterion_group!(
    benches,
    line_algorithm_benchmark,
    figure_transform_benchmark,
    render_benchmark
);
criterion_main!(benches);
