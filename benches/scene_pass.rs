//! Benchmarks for the CPU side of a frame.
//!
//! Run with: `cargo bench`

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;

use magview::glyph::{project, GlyphSample, SliceWindow};
use magview::{Axis, FrameStatistics, GlyphBatch, GridShape, SliceBound, VectorGrid, ViewState, Visualizer};

/// Grid where every cell passes the magnitude gate.
fn swirl(n: usize) -> VectorGrid {
    let c = n as f32 * 0.5;
    VectorGrid::from_fn(GridShape::new(n, n, n), |i, j, k| {
        let v = Vec3::new(c - j as f32, i as f32 - c, k as f32 - c + 0.5);
        v.normalize() * 2.0
    })
    .expect("non-empty grid")
}

fn bench_scene_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_pass");

    for n in [16usize, 32] {
        let mut vis = Visualizer::new();
        vis.bind(Arc::new(swirl(n)));
        let mut batch = GlyphBatch::new();

        group.bench_with_input(BenchmarkId::new("full", n), &n, |b, _| {
            b.iter(|| black_box(vis.paint(&mut batch)))
        });
    }

    // Half the grid sliced away along Z.
    let mut vis = Visualizer::new();
    vis.bind(Arc::new(swirl(32)));
    vis.set_slice(Axis::Z, SliceBound::High, 800);
    let mut batch = GlyphBatch::new();
    group.bench_function("half_slice_32", |b| {
        b.iter(|| black_box(vis.paint(&mut batch)))
    });

    group.finish();
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");

    group.bench_function("sample", |b| {
        let v = Vec3::new(1.2, -0.7, 0.4);
        b.iter(|| black_box(GlyphSample::from_vector(black_box(v))))
    });

    group.bench_function("project_cell", |b| {
        let stats = FrameStatistics::new(GridShape::new(32, 32, 32));
        let window = SliceWindow::new(&ViewState::new(), &stats);
        let v = Vec3::new(1.2, -0.7, 0.4);
        b.iter(|| black_box(project(black_box(v), [3, 4, 5], &window, &stats)))
    });

    group.finish();
}

criterion_group!(benches, bench_scene_pass, bench_projection);
criterion_main!(benches);
