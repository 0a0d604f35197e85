//! Per-cell glyph classification.
//!
//! Every cell of the bound volume goes through [`project`] once per frame.
//! A cell is drawn only if its vector is longer than [`MAGNITUDE_THRESHOLD`]
//! and its coordinates fall inside the slice window on all three axes. Visible
//! cells get a cone oriented by the vector's polar angle `theta` and azimuth
//! `phi`, colored by azimuth alone:
//!
//! | Channel | Value |
//! |---------|-------|
//! | R | `sin(phi)` |
//! | G | `cos(phi)` |
//! | B | `cos(phi + 1)` |
//!
//! so all cells pointing the same way share a color regardless of length.

use glam::{Mat4, Vec3};

use crate::stats::FrameStatistics;
use crate::view::{Axis, SliceBound, ViewState, SLICE_RESOLUTION};

/// Vectors at or below this length are never drawn.
pub const MAGNITUDE_THRESHOLD: f32 = 1.0;

/// Radians to degrees, for sinks that take rotations in degrees.
pub fn radians_to_degrees(radians: f32) -> f32 {
    180.0 * radians / std::f32::consts::PI
}

/// Glyph color for an azimuth angle.
pub fn azimuth_color(phi: f32) -> Vec3 {
    Vec3::new(phi.sin(), phi.cos(), (phi + 1.0).cos())
}

/// Spherical decomposition of one cell vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphSample {
    /// Euclidean length.
    pub magnitude: f32,
    /// Polar angle from +z, radians.
    pub theta: f32,
    /// Azimuth in the xy-plane, radians. Zero when `vx = vy = 0`.
    pub phi: f32,
}

impl GlyphSample {
    /// Returns `None` for vectors that do not pass the magnitude gate, so the
    /// trigonometry below never sees a zero length.
    pub fn from_vector(v: Vec3) -> Option<Self> {
        let magnitude = v.length();
        if !(magnitude > MAGNITUDE_THRESHOLD) {
            return None;
        }
        Some(Self {
            magnitude,
            theta: (v.z / magnitude).clamp(-1.0, 1.0).acos(),
            phi: v.y.atan2(v.x),
        })
    }

    pub fn color(&self) -> Vec3 {
        azimuth_color(self.phi)
    }

    /// `(theta, phi)` in degrees.
    pub fn orientation_degrees(&self) -> (f32, f32) {
        (radians_to_degrees(self.theta), radians_to_degrees(self.phi))
    }

    /// Rotation taking the canonical +z glyph to this orientation: `theta`
    /// about Y, then `phi` about Z.
    pub fn rotation(&self) -> Mat4 {
        Mat4::from_rotation_y(self.theta) * Mat4::from_rotation_z(self.phi)
    }
}

/// Slice bounds mapped onto the bound grid's extent.
///
/// Built once per frame so the per-cell test is six comparisons. Both ends
/// are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceWindow {
    low: [f64; 3],
    high: [f64; 3],
}

impl SliceWindow {
    pub fn new(view: &ViewState, stats: &FrameStatistics) -> Self {
        let extent = stats.extent.to_array();
        let mut low = [0.0; 3];
        let mut high = [0.0; 3];
        for axis in Axis::ALL {
            let n = axis.index();
            let span = extent[n] as f64 - stats.min().to_array()[n] as f64;
            low[n] = span * view.slice(axis, SliceBound::Low) as f64 / SLICE_RESOLUTION as f64;
            high[n] = span * view.slice(axis, SliceBound::High) as f64 / SLICE_RESOLUTION as f64;
        }
        Self { low, high }
    }

    /// Lowest visible coordinate on `axis`.
    pub fn low(&self, axis: Axis) -> f64 {
        self.low[axis.index()]
    }

    /// Highest visible coordinate on `axis`.
    pub fn high(&self, axis: Axis) -> f64 {
        self.high[axis.index()]
    }

    #[inline]
    pub fn contains(&self, cell: [usize; 3]) -> bool {
        (0..3).all(|n| {
            let c = cell[n] as f64;
            c >= self.low[n] && c <= self.high[n]
        })
    }
}

/// One glyph ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphInstance {
    /// Grid cell the glyph came from.
    pub cell: [usize; 3],
    /// Position relative to the grid center.
    pub origin: Vec3,
    pub sample: GlyphSample,
    pub color: Vec3,
}

impl GlyphInstance {
    /// Placement followed by orientation.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.origin) * self.sample.rotation()
    }
}

/// Classify a cell and, if visible, build its glyph.
#[inline]
pub fn project(
    vector: Vec3,
    cell: [usize; 3],
    window: &SliceWindow,
    stats: &FrameStatistics,
) -> Option<GlyphInstance> {
    if !window.contains(cell) {
        return None;
    }
    let sample = GlyphSample::from_vector(vector)?;
    let position = Vec3::new(cell[0] as f32, cell[1] as f32, cell[2] as f32);
    Some(GlyphInstance {
        cell,
        origin: position - stats.center,
        sample,
        color: sample.color(),
    })
}
