//! Viewer configuration.
//!
//! ```ignore
//! let config = ViewerConfig::new()
//!     .with_title("relaxation run")
//!     .with_size(1024, 768)
//!     .with_glyph(0.25, 0.8, 12);
//! ```

use glam::Vec3;

use crate::mesh::{GlyphMesh, CONE_HEIGHT, CONE_RADIUS, CONE_SLICES};

/// Window, projection, lighting and glyph settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub title: String,
    /// Initial window size in logical pixels.
    pub width: u32,
    pub height: u32,
    /// Background color (RGB, 0.0-1.0).
    pub clear_color: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Light position in eye space.
    pub light_position: Vec3,
    /// Ambient light level applied to glyph colors.
    pub ambient: f32,
    pub glyph_radius: f32,
    pub glyph_height: f32,
    pub glyph_slices: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "magview".to_string(),
            width: 800,
            height: 400,
            clear_color: Vec3::new(0.305, 0.305, 0.5), // Dark purple
            fov_y: 60.0,
            near: 0.1,
            far: 80.0,
            light_position: Vec3::new(0.5, 10.0, 7.0),
            ambient: 0.2,
            glyph_radius: CONE_RADIUS,
            glyph_height: CONE_HEIGHT,
            glyph_slices: CONE_SLICES,
        }
    }
}

impl ViewerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial window size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_clear_color(mut self, color: Vec3) -> Self {
        self.clear_color = color;
        self
    }

    /// Set the perspective projection: vertical FOV in degrees and clip planes.
    pub fn with_projection(mut self, fov_y: f32, near: f32, far: f32) -> Self {
        self.fov_y = fov_y;
        self.near = near;
        self.far = far;
        self
    }

    pub fn with_light(mut self, position: Vec3, ambient: f32) -> Self {
        self.light_position = position;
        self.ambient = ambient;
        self
    }

    /// Set the cone glyph dimensions.
    pub fn with_glyph(mut self, radius: f32, height: f32, slices: u32) -> Self {
        self.glyph_radius = radius;
        self.glyph_height = height;
        self.glyph_slices = slices;
        self
    }

    /// Build the glyph mesh these settings describe.
    pub fn glyph_mesh(&self) -> GlyphMesh {
        GlyphMesh::cone(self.glyph_radius, self.glyph_height, self.glyph_slices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_builtin_glyph() {
        let config = ViewerConfig::default();
        assert_eq!(config.glyph_mesh(), GlyphMesh::default());
        assert_eq!(config.fov_y, 60.0);
        assert_eq!(config.far, 80.0);
    }

    #[test]
    fn test_builder_chain() {
        let config = ViewerConfig::new()
            .with_title("run 7")
            .with_size(640, 480)
            .with_projection(45.0, 0.5, 40.0)
            .with_glyph(0.1, 0.5, 6);

        assert_eq!(config.title, "run 7");
        assert_eq!((config.width, config.height), (640, 480));
        assert_eq!((config.fov_y, config.near, config.far), (45.0, 0.5, 40.0));
        assert_eq!(config.glyph_mesh().triangle_count(), 12);
    }
}
