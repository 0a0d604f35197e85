//! In-memory frame sequence.
//!
//! Holds every loaded frame of a run so the animation control can jump
//! between them without reloading. Selecting a frame hands back the volume to
//! bind; the sequence itself never touches the visualizer.

use std::sync::Arc;

use crate::volume::VectorGrid;

#[derive(Debug, Clone, Default)]
pub struct FrameSequence {
    frames: Vec<Arc<VectorGrid>>,
    current: usize,
}

impl FrameSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame. The first frame pushed becomes current.
    pub fn push(&mut self, frame: VectorGrid) {
        self.frames.push(Arc::new(frame));
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Index of the current frame. Meaningless while empty.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<Arc<VectorGrid>> {
        self.frames.get(self.current).cloned()
    }

    /// Make `index` current and return its frame. Out-of-range indices leave
    /// the selection unchanged and return `None`.
    pub fn select(&mut self, index: usize) -> Option<Arc<VectorGrid>> {
        let frame = self.frames.get(index).cloned()?;
        self.current = index;
        log::debug!("Selected frame {}/{}", index + 1, self.frames.len());
        Some(frame)
    }

    /// Move by `delta` frames, stopping at either end. Returns the new frame
    /// only if the selection moved.
    pub fn step(&mut self, delta: isize) -> Option<Arc<VectorGrid>> {
        if self.frames.is_empty() {
            return None;
        }
        let last = self.frames.len() - 1;
        let target = self.current.saturating_add_signed(delta).min(last);
        if target == self.current {
            return None;
        }
        self.select(target)
    }

    /// Jump to the last frame.
    pub fn last(&mut self) -> Option<Arc<VectorGrid>> {
        let last = self.frames.len().checked_sub(1)?;
        if last == self.current {
            return None;
        }
        self.select(last)
    }

    /// Jump to the first frame.
    pub fn first(&mut self) -> Option<Arc<VectorGrid>> {
        if self.frames.is_empty() || self.current == 0 {
            return None;
        }
        self.select(0)
    }
}

impl FromIterator<VectorGrid> for FrameSequence {
    fn from_iter<I: IntoIterator<Item = VectorGrid>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().map(Arc::new).collect(),
            current: 0,
        }
    }
}
