//! # magview - Volumetric vector-field glyph viewer
//!
//! Renders a 3D grid of vectors (typically a magnetization snapshot from a
//! micromagnetic run) as a lattice of colored cones. Each cone points along
//! the local vector and is colored by its azimuth, so domain walls and
//! vortices stand out at a glance.
//!
//! ## Quick Start
//!
//! ```ignore
//! use magview::prelude::*;
//!
//! fn main() -> Result<(), ViewerError> {
//!     let shape = GridShape::new(16, 16, 4);
//!     let frame = VectorGrid::from_fn(shape, |i, j, _k| {
//!         Vec3::new(j as f32 - 8.0, 8.0 - i as f32, 1.0)
//!     })?;
//!
//!     Viewer::new()
//!         .with_config(ViewerConfig::new().with_title("vortex"))
//!         .with_frame(frame)
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Volumes
//!
//! Anything implementing [`GridVolume`] can be bound: a shape plus a vector
//! per cell. [`VectorGrid`] is the in-memory implementation; binding takes an
//! `Arc` so the caller can keep frames around while they are displayed.
//!
//! ### View state
//!
//! [`ViewState`] holds the camera and slicing state in the units the controls
//! use:
//!
//! | Quantity | Unit | Range |
//! |----------|------|-------|
//! | Rotation | 1/16 degree | normalized into `[0, 5760)` |
//! | Slice bound | 1/1600 of the grid span | `0..=1600`, not clamped |
//! | Zoom | wheel delta / 100 | unbounded |
//!
//! ### Rendering without a window
//!
//! [`Visualizer::paint`] writes a frame into any [`GlyphSink`]. The GPU
//! backend uses a [`GlyphBatch`]; tests and tools can implement the trait to
//! inspect exactly which glyphs a view produces:
//!
//! ```ignore
//! let mut vis = Visualizer::new();
//! vis.bind(Arc::new(frame));
//! vis.set_slice(Axis::Z, SliceBound::High, 800);
//!
//! let mut batch = GlyphBatch::new();
//! let drawn = vis.paint(&mut batch);
//! ```
//!
//! ### Glyph rules
//!
//! - Cells with `|v| <= 1` are skipped.
//! - A glyph is drawn at `cell - center`, rotated by the vector's polar angle
//!   about Y and its azimuth about Z.
//! - Color is `(sin φ, cos φ, cos(φ + 1))`; magnitude does not affect it.
//!   Channels can be negative and are clamped to `[0, 1]` at shading time.
//!
//! ## Controls
//!
//! | Input | Effect |
//! |-------|--------|
//! | Left drag | rotate about X and Y |
//! | Right drag | rotate about X and Z |
//! | Wheel | zoom |
//! | Left / Right | previous / next frame |
//! | Home / End | first / last frame |
//! | Escape | quit |
//!
//! With the `egui` feature a side panel adds sliders for every rotation,
//! slice bound and the current frame.

mod config;
mod error;
pub mod frames;
pub mod glyph;
mod gpu;
pub mod input;
pub mod mesh;
pub mod scene;
mod shader;
pub mod stats;
#[cfg(feature = "egui")]
mod ui;
pub mod view;
mod viewer;
pub mod visualizer;
pub mod volume;

pub use config::ViewerConfig;
pub use error::{GpuError, ViewerError, VolumeError};
pub use frames::FrameSequence;
pub use glam::{Mat4, Vec3};
pub use glyph::{GlyphInstance, GlyphSample, SliceWindow};
pub use mesh::GlyphMesh;
pub use scene::{GlyphBatch, GlyphSink, SceneRenderer, SceneState};
pub use stats::FrameStatistics;
pub use view::{Axis, SliceBound, ViewState};
pub use viewer::Viewer;
pub use visualizer::{RotationChanged, Visualizer};
pub use volume::{GridShape, GridVolume, VectorGrid};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use magview::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::ViewerConfig;
    pub use crate::error::{ViewerError, VolumeError};
    pub use crate::frames::FrameSequence;
    pub use crate::scene::{GlyphBatch, GlyphSink};
    pub use crate::view::{Axis, SliceBound, ViewState};
    pub use crate::viewer::Viewer;
    pub use crate::visualizer::Visualizer;
    pub use crate::volume::{GridShape, GridVolume, VectorGrid};
    pub use crate::Vec3;
    #[cfg(feature = "egui")]
    pub use egui;
}
