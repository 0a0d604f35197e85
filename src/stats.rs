//! Per-volume derived quantities.

use glam::Vec3;

use crate::volume::GridShape;

/// Center and extent of the bound grid.
///
/// Recomputed once per bind and read-only until the next one. The center
/// keeps half-cell offsets for odd dimensions so the glyph lattice stays
/// centered on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStatistics {
    /// Rendering origin offset, `shape / 2` per axis.
    pub center: Vec3,
    /// Upper bound per axis. The lower bound is always 0.
    pub extent: Vec3,
}

impl FrameStatistics {
    pub fn new(shape: GridShape) -> Self {
        let mut stats = Self::default();
        stats.recompute(shape);
        stats
    }

    pub fn recompute(&mut self, shape: GridShape) {
        let dims = shape.as_vec3();
        self.center = dims * 0.5;
        self.extent = dims;
    }

    /// Lower bound per axis.
    pub fn min(&self) -> Vec3 {
        Vec3::ZERO
    }
}

impl Default for FrameStatistics {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            extent: Vec3::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_keeps_half_cells() {
        let stats = FrameStatistics::new(GridShape::new(5, 4, 1));
        assert_eq!(stats.center, Vec3::new(2.5, 2.0, 0.5));
        assert_eq!(stats.extent, Vec3::new(5.0, 4.0, 1.0));
        assert_eq!(stats.min(), Vec3::ZERO);
    }

    #[test]
    fn test_recompute_replaces_previous_shape() {
        let mut stats = FrameStatistics::new(GridShape::new(10, 10, 10));
        stats.recompute(GridShape::new(3, 7, 2));
        assert_eq!(stats.center, Vec3::new(1.5, 3.5, 1.0));
        assert_eq!(stats.extent, Vec3::new(3.0, 7.0, 2.0));
    }
}
