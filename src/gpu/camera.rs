//! Perspective projection for the glyph scene.

use glam::Mat4;

/// Perspective projection with a fixed vertical field of view.
///
/// The view transform comes from [`ViewState::camera_matrix`](crate::ViewState::camera_matrix);
/// this only maps eye space to clip space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn new(fov_y: f32, near: f32, far: f32) -> Self {
        Self { fov_y, near, far }
    }

    /// Projection matrix for a viewport of the given size.
    pub fn matrix(&self, width: u32, height: u32) -> Mat4 {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        Mat4::perspective_rh(self.fov_y.to_radians(), aspect, self.near, self.far)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(60.0, 0.1, 80.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_scene_origin_is_centered() {
        let proj = Projection::default().matrix(800, 400);
        let ndc = proj.project_point3(Vec3::new(0.0, 0.0, -9.5));
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_zero_height_does_not_divide_by_zero() {
        let proj = Projection::default().matrix(800, 0);
        assert!(proj.is_finite());
    }
}
