//! The interactive core: view state, bound scene and repaint scheduling.
//!
//! Input handlers and UI panels call the mutators below; each one that
//! actually changes something marks a repaint as pending. The event loop
//! polls [`Visualizer::take_repaint`] once per batch of events, so any number
//! of changes between two frames costs a single pass over the grid.
//!
//! Rotation changes are also queued as [`RotationChanged`] notifications for
//! widgets that mirror the camera angles. The queue holds at most one entry
//! per axis: a later change to the same axis overwrites the pending angle.

use std::sync::Arc;

use crate::scene::{GlyphSink, SceneRenderer};
use crate::stats::FrameStatistics;
use crate::view::{Axis, SliceBound, ViewState};
use crate::volume::GridVolume;

/// Emitted when the stored rotation about an axis changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationChanged {
    pub axis: Axis,
    /// New angle in rotation units, `[0, FULL_TURN)`.
    pub angle: i32,
}

#[derive(Debug, Clone, Default)]
pub struct Visualizer {
    view: ViewState,
    scene: SceneRenderer,
    repaint_pending: bool,
    notifications: Vec<RotationChanged>,
}

impl Visualizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn scene(&self) -> &SceneRenderer {
        &self.scene
    }

    /// Statistics of the bound volume, if any.
    pub fn stats(&self) -> Option<&FrameStatistics> {
        self.scene.stats()
    }

    /// Bind a new volume. Statistics are recomputed before the next frame.
    pub fn bind(&mut self, volume: Arc<dyn GridVolume>) {
        self.scene.bind(volume);
        self.request_repaint();
    }

    pub fn set_rotation(&mut self, axis: Axis, angle: i32) -> bool {
        let changed = self.view.set_rotation(axis, angle);
        self.record_rotation(axis, changed)
    }

    /// Rotate relative to the current angle.
    pub fn rotate_by(&mut self, axis: Axis, delta: i32) -> bool {
        let changed = self.view.rotate_by(axis, delta);
        self.record_rotation(axis, changed)
    }

    /// Apply a raw wheel delta.
    pub fn set_zoom(&mut self, delta: f32) {
        if self.view.set_zoom(delta) {
            self.request_repaint();
        }
    }

    pub fn set_slice(&mut self, axis: Axis, bound: SliceBound, value: i32) -> bool {
        let changed = self.view.set_slice(axis, bound, value);
        if changed {
            self.request_repaint();
        }
        changed
    }

    /// Force a repaint, e.g. after the window was resized or exposed.
    pub fn request_repaint(&mut self) {
        self.repaint_pending = true;
    }

    /// True if a repaint is pending, without consuming it.
    pub fn repaint_pending(&self) -> bool {
        self.repaint_pending
    }

    /// Consume the pending-repaint flag.
    pub fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.repaint_pending)
    }

    /// Take queued rotation notifications, one per changed axis, in the order
    /// the axes first changed.
    pub fn drain_notifications(&mut self) -> Vec<RotationChanged> {
        std::mem::take(&mut self.notifications)
    }

    /// Render one frame into `sink`. Returns the number of glyphs drawn.
    pub fn paint(&mut self, sink: &mut dyn GlyphSink) -> usize {
        self.repaint_pending = false;
        self.scene.render(&self.view, sink)
    }

    fn record_rotation(&mut self, axis: Axis, changed: Option<i32>) -> bool {
        match changed {
            Some(angle) => {
                match self.notifications.iter_mut().find(|n| n.axis == axis) {
                    Some(pending) => pending.angle = angle,
                    None => self.notifications.push(RotationChanged { axis, angle }),
                }
                self.request_repaint();
                true
            }
            None => false,
        }
    }
}
