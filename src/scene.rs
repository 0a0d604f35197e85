//! Frame orchestration.
//!
//! [`SceneRenderer`] is either empty or bound to one volume. Each call to
//! [`SceneRenderer::render`] produces one complete frame into a
//! [`GlyphSink`]: the sink is reset with the camera transform, then receives
//! one draw per visible cell. Cells are independent, so iteration order
//! carries no meaning.

use std::sync::Arc;

use glam::Mat4;

use crate::glyph::{project, GlyphInstance, SliceWindow};
use crate::stats::FrameStatistics;
use crate::view::ViewState;
use crate::volume::{GridShape, GridVolume};

/// Receiver of draw commands for one frame.
///
/// This is the drawing capability the scene needs: clear, set the camera,
/// draw the canonical glyph with a placement, orientation and color.
pub trait GlyphSink {
    /// Start a new frame. Implementations drop anything from the previous
    /// frame and adopt `camera` as the view transform.
    fn begin_frame(&mut self, camera: Mat4);

    /// Draw one glyph.
    fn draw_glyph(&mut self, glyph: &GlyphInstance);
}

/// Sink that collects a frame's glyphs for a single batched upload.
#[derive(Debug, Clone, Default)]
pub struct GlyphBatch {
    camera: Mat4,
    glyphs: Vec<GlyphInstance>,
}

impl GlyphBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn camera(&self) -> Mat4 {
        self.camera
    }

    pub fn glyphs(&self) -> &[GlyphInstance] {
        &self.glyphs
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl GlyphSink for GlyphBatch {
    fn begin_frame(&mut self, camera: Mat4) {
        self.camera = camera;
        self.glyphs.clear();
    }

    fn draw_glyph(&mut self, glyph: &GlyphInstance) {
        self.glyphs.push(*glyph);
    }
}

/// Whether a volume is bound.
#[derive(Clone)]
pub enum SceneState {
    /// Nothing to draw; frames contain only the background.
    Empty,
    /// A volume and the statistics derived from it at bind time.
    Bound {
        volume: Arc<dyn GridVolume>,
        stats: FrameStatistics,
    },
}

impl std::fmt::Debug for SceneState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneState::Empty => write!(f, "Empty"),
            SceneState::Bound { volume, stats } => f
                .debug_struct("Bound")
                .field("shape", &volume.shape())
                .field("stats", stats)
                .finish(),
        }
    }
}

/// Draws the bound volume as glyphs.
#[derive(Debug, Clone)]
pub struct SceneRenderer {
    state: SceneState,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self {
            state: SceneState::Empty,
        }
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    pub fn is_bound(&self) -> bool {
        matches!(self.state, SceneState::Bound { .. })
    }

    /// Statistics of the bound volume, if any.
    pub fn stats(&self) -> Option<&FrameStatistics> {
        match &self.state {
            SceneState::Bound { stats, .. } => Some(stats),
            SceneState::Empty => None,
        }
    }

    /// Shape of the bound volume, if any.
    pub fn shape(&self) -> Option<GridShape> {
        match &self.state {
            SceneState::Bound { volume, .. } => Some(volume.shape()),
            SceneState::Empty => None,
        }
    }

    /// Replace the bound volume and recompute its statistics.
    pub fn bind(&mut self, volume: Arc<dyn GridVolume>) {
        let stats = FrameStatistics::new(volume.shape());
        log::debug!("Bound volume {:?}, center {}", volume.shape(), stats.center);
        self.state = SceneState::Bound { volume, stats };
    }

    /// Render one frame. Returns the number of glyphs drawn.
    pub fn render(&self, view: &ViewState, sink: &mut dyn GlyphSink) -> usize {
        sink.begin_frame(view.camera_matrix());

        let (volume, stats) = match &self.state {
            SceneState::Empty => return 0,
            SceneState::Bound { volume, stats } => (volume, stats),
        };

        let window = SliceWindow::new(view, stats);
        let shape = volume.shape();
        let mut drawn = 0;
        for i in 0..shape.nx {
            for j in 0..shape.ny {
                for k in 0..shape.nz {
                    if let Some(glyph) = project(volume.at(i, j, k), [i, j, k], &window, stats) {
                        sink.draw_glyph(&glyph);
                        drawn += 1;
                    }
                }
            }
        }
        drawn
    }
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{Axis, SliceBound};
    use crate::volume::VectorGrid;
    use glam::Vec3;

    /// Sink that only counts frames and glyphs.
    #[derive(Default)]
    struct CountingSink {
        frames: usize,
        glyphs: usize,
    }

    impl GlyphSink for CountingSink {
        fn begin_frame(&mut self, _camera: Mat4) {
            self.frames += 1;
            self.glyphs = 0;
        }

        fn draw_glyph(&mut self, _glyph: &GlyphInstance) {
            self.glyphs += 1;
        }
    }

    fn uniform(nx: usize, ny: usize, nz: usize, v: Vec3) -> Arc<dyn GridVolume> {
        Arc::new(VectorGrid::uniform(GridShape::new(nx, ny, nz), v).unwrap())
    }

    #[test]
    fn test_empty_scene_draws_nothing() {
        let scene = SceneRenderer::new();
        let mut sink = CountingSink::default();

        assert_eq!(scene.render(&ViewState::new(), &mut sink), 0);
        assert_eq!(sink.frames, 1);
        assert_eq!(sink.glyphs, 0);
        assert!(scene.stats().is_none());
    }

    #[test]
    fn test_bound_scene_draws_every_visible_cell() {
        let mut scene = SceneRenderer::new();
        scene.bind(uniform(3, 4, 5, Vec3::new(2.0, 0.0, 0.0)));

        let mut sink = CountingSink::default();
        assert_eq!(scene.render(&ViewState::new(), &mut sink), 60);
        assert_eq!(sink.glyphs, 60);
    }

    #[test]
    fn test_short_vectors_skipped() {
        let mut scene = SceneRenderer::new();
        scene.bind(uniform(4, 4, 4, Vec3::new(0.5, 0.5, 0.5)));

        let mut batch = GlyphBatch::new();
        assert_eq!(scene.render(&ViewState::new(), &mut batch), 0);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_slicing_restricts_cells() {
        let mut scene = SceneRenderer::new();
        scene.bind(uniform(10, 10, 10, Vec3::new(0.0, 3.0, 0.0)));

        let mut view = ViewState::new();
        view.set_slice(Axis::Z, SliceBound::Low, 800);
        view.set_slice(Axis::Z, SliceBound::High, 800);

        let mut batch = GlyphBatch::new();
        assert_eq!(scene.render(&view, &mut batch), 100);
        assert!(batch.glyphs().iter().all(|g| g.cell[2] == 5));
    }

    #[test]
    fn test_batch_resets_between_frames() {
        let mut scene = SceneRenderer::new();
        scene.bind(uniform(2, 2, 2, Vec3::Z * 4.0));
        let mut batch = GlyphBatch::new();
        let mut view = ViewState::new();

        scene.render(&view, &mut batch);
        assert_eq!(batch.len(), 8);

        view.set_zoom(200.0);
        scene.render(&view, &mut batch);
        assert_eq!(batch.len(), 8);
        assert_eq!(batch.camera(), view.camera_matrix());
    }
}
