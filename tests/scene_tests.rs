//! End-to-end tests: bind a volume, adjust the view, paint into a sink.
//!
//! Everything here runs without a window or GPU.

use std::sync::Arc;

use glam::{Mat4, Vec3};
use magview::view::FULL_TURN;
use magview::{
    Axis, GlyphBatch, GlyphInstance, GlyphSink, GridShape, GridVolume, RotationChanged, SliceBound,
    VectorGrid, Visualizer,
};

// ============================================================================
// Helpers
// ============================================================================

/// Sink that keeps every frame it receives.
#[derive(Default)]
struct RecordingSink {
    frames: Vec<(Mat4, Vec<GlyphInstance>)>,
}

impl GlyphSink for RecordingSink {
    fn begin_frame(&mut self, camera: Mat4) {
        self.frames.push((camera, Vec::new()));
    }

    fn draw_glyph(&mut self, glyph: &GlyphInstance) {
        self.frames
            .last_mut()
            .expect("draw before begin_frame")
            .1
            .push(*glyph);
    }
}

/// A grid that is zero everywhere except the listed cells.
fn sparse(shape: GridShape, cells: &[([usize; 3], Vec3)]) -> VectorGrid {
    let mut grid = VectorGrid::uniform(shape, Vec3::ZERO).unwrap();
    for &([i, j, k], v) in cells {
        *grid.get_mut(i, j, k).unwrap() = v;
    }
    grid
}

fn paint(vis: &mut Visualizer) -> GlyphBatch {
    let mut batch = GlyphBatch::new();
    vis.paint(&mut batch);
    batch
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_single_upward_cell() {
    let mut vis = Visualizer::new();
    vis.bind(Arc::new(VectorGrid::uniform(GridShape::new(1, 1, 1), Vec3::new(0.0, 0.0, 2.0)).unwrap()));

    let batch = paint(&mut vis);
    assert_eq!(batch.len(), 1);

    let glyph = batch.glyphs()[0];
    assert_eq!(glyph.sample.magnitude, 2.0);
    assert_eq!(glyph.sample.theta, 0.0);
    assert_eq!(glyph.sample.phi, 0.0);
    assert_eq!(glyph.origin, Vec3::splat(-0.5));
    assert!(glyph.color.abs_diff_eq(Vec3::new(0.0, 1.0, 1.0f32.cos()), 1e-6));
}

#[test]
fn test_slice_boundary_is_inclusive() {
    let shape = GridShape::new(10, 10, 10);
    let mut vis = Visualizer::new();
    vis.bind(Arc::new(sparse(shape, &[([5, 5, 5], Vec3::new(3.0, 0.0, 0.0))])));
    assert!(vis.set_slice(Axis::X, SliceBound::High, 800));

    let batch = paint(&mut vis);
    assert_eq!(batch.len(), 1);
    assert_eq!(batch.glyphs()[0].cell, [5, 5, 5]);

    // One step lower puts the bound just below cell 5.
    vis.set_slice(Axis::X, SliceBound::High, 799);
    assert!(paint(&mut vis).is_empty());
}

#[test]
fn test_rebind_recomputes_statistics() {
    let mut vis = Visualizer::new();
    let small = VectorGrid::uniform(GridShape::new(2, 2, 2), Vec3::X * 2.0).unwrap();
    vis.bind(Arc::new(small));

    let mut sink = RecordingSink::default();
    vis.paint(&mut sink);
    assert_eq!(vis.stats().unwrap().center, Vec3::ONE);

    let large = VectorGrid::uniform(GridShape::new(6, 4, 3), Vec3::Y * 2.0).unwrap();
    vis.bind(Arc::new(large));
    assert!(vis.repaint_pending());
    assert_eq!(vis.stats().unwrap().center, Vec3::new(3.0, 2.0, 1.5));
    assert_eq!(vis.stats().unwrap().extent, Vec3::new(6.0, 4.0, 3.0));

    vis.paint(&mut sink);

    // The first frame only ever saw the small grid.
    assert_eq!(sink.frames.len(), 2);
    assert_eq!(sink.frames[0].1.len(), 8);
    assert!(sink.frames[0].1.iter().all(|g| g.cell.iter().all(|&c| c < 2)));
    assert_eq!(sink.frames[1].1.len(), 72);
    assert!(sink.frames[1]
        .1
        .iter()
        .any(|g| g.origin == Vec3::new(2.0, 1.0, 0.5)));
}

#[test]
fn test_rotation_order_matters() {
    let mut xy = Visualizer::new();
    xy.set_rotation(Axis::X, 90 * 16);
    xy.set_rotation(Axis::Y, 90 * 16);

    let mut yx = Visualizer::new();
    yx.set_rotation(Axis::Y, 90 * 16);
    yx.set_rotation(Axis::X, 90 * 16);

    // Same stored state regardless of call order...
    assert_eq!(xy.view(), yx.view());

    // ...but the camera applies X before Y, which differs from Y before X.
    let camera = paint(&mut xy).camera();
    let rot_x = Mat4::from_rotation_x(90f32.to_radians());
    let rot_y = Mat4::from_rotation_y(90f32.to_radians());
    let translate = Mat4::from_translation(Vec3::new(0.0, 0.0, -10.0 + 0.5));

    assert!(camera.abs_diff_eq(translate * rot_x * rot_y, 1e-5));
    assert!(!camera.abs_diff_eq(translate * rot_y * rot_x, 1e-3));
}

// ============================================================================
// Notifications and repaint scheduling
// ============================================================================

#[test]
fn test_repeated_rotation_notifies_once() {
    let mut vis = Visualizer::new();
    assert!(vis.set_rotation(Axis::Z, 400));
    assert!(!vis.set_rotation(Axis::Z, 400));
    assert!(!vis.set_rotation(Axis::Z, 400 + FULL_TURN));
    assert!(!vis.set_rotation(Axis::Z, 400 - 3 * FULL_TURN));

    assert_eq!(
        vis.drain_notifications(),
        vec![RotationChanged { axis: Axis::Z, angle: 400 }]
    );
}

#[test]
fn test_drag_sequence_collapses_to_single_repaint() {
    let mut vis = Visualizer::new();
    vis.bind(Arc::new(VectorGrid::uniform(GridShape::new(3, 3, 3), Vec3::Z * 5.0).unwrap()));
    let _ = vis.take_repaint();

    for _ in 0..10 {
        vis.rotate_by(Axis::X, 8);
        vis.rotate_by(Axis::Y, -8);
    }
    assert!(vis.take_repaint());
    assert!(!vis.take_repaint());
    assert_eq!(vis.view().rotation(Axis::X), 80);
    assert_eq!(vis.view().rotation(Axis::Y), FULL_TURN - 80);
    assert_eq!(
        vis.drain_notifications(),
        vec![
            RotationChanged { axis: Axis::X, angle: 80 },
            RotationChanged { axis: Axis::Y, angle: FULL_TURN - 80 },
        ]
    );
}

#[test]
fn test_repaint_is_deterministic() {
    let shape = GridShape::new(4, 4, 4);
    let grid = VectorGrid::from_fn(shape, |i, j, k| {
        Vec3::new(i as f32 - 1.5, j as f32 - 1.5, k as f32 - 1.5) * 1.3
    })
    .unwrap();
    let mut vis = Visualizer::new();
    vis.bind(Arc::new(grid));
    vis.set_slice(Axis::Y, SliceBound::Low, 400);

    let first = paint(&mut vis);
    let second = paint(&mut vis);
    assert_eq!(first.glyphs(), second.glyphs());
    assert_eq!(first.camera(), second.camera());
}

// ============================================================================
// Edge cases
// ============================================================================

#[test]
fn test_unbound_visualizer_draws_background_only() {
    let mut vis = Visualizer::new();
    let mut sink = RecordingSink::default();
    assert_eq!(vis.paint(&mut sink), 0);
    assert_eq!(sink.frames.len(), 1);
    assert!(sink.frames[0].1.is_empty());
}

#[test]
fn test_inverted_slice_hides_axis() {
    let mut vis = Visualizer::new();
    vis.bind(Arc::new(VectorGrid::uniform(GridShape::new(4, 4, 4), Vec3::X * 2.0).unwrap()));
    vis.set_slice(Axis::Y, SliceBound::Low, 1200);
    vis.set_slice(Axis::Y, SliceBound::High, 400);
    assert!(paint(&mut vis).is_empty());
}

#[test]
fn test_high_bound_alone_schedules_repaint() {
    let mut vis = Visualizer::new();
    assert!(vis.set_slice(Axis::Z, SliceBound::High, 0));
    assert!(vis.take_repaint());
}

#[test]
fn test_custom_volume_binds() {
    /// Procedural volume with no backing storage.
    struct Diagonal;

    impl GridVolume for Diagonal {
        fn shape(&self) -> GridShape {
            GridShape::new(3, 3, 3)
        }

        fn at(&self, i: usize, j: usize, k: usize) -> Vec3 {
            if i == j && j == k {
                Vec3::splat(1.0)
            } else {
                Vec3::ZERO
            }
        }
    }

    let mut vis = Visualizer::new();
    vis.bind(Arc::new(Diagonal));
    let batch = paint(&mut vis);
    assert_eq!(batch.len(), 3);
}
