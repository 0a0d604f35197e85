//! Camera and slicing state.
//!
//! All values are stored in the fixed-point units the UI controls use:
//! rotations in sixteenths of a degree, slice bounds on a `0..=1600` scale
//! that is independent of the grid resolution. The conversion helpers below
//! are the only places those scales are turned back into degrees or
//! fractions.

use glam::{Mat4, Vec3};

/// Rotation units per visual degree.
pub const ANGLE_UNITS_PER_DEGREE: i32 = 16;

/// One full turn in rotation units.
pub const FULL_TURN: i32 = 360 * ANGLE_UNITS_PER_DEGREE;

/// Upper end of the slice control scale.
pub const SLICE_RESOLUTION: i32 = 1600;

/// Raw wheel delta units per unit of zoom.
pub const ZOOM_WHEEL_DIVISOR: f32 = 100.0;

/// Zoom offset the camera starts with.
pub const INITIAL_ZOOM: f32 = 0.5;

/// Distance from the eye to the scene origin at zero zoom.
pub const CAMERA_DISTANCE: f32 = 10.0;

/// A grid / camera axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in camera rotation order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector along this axis.
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

/// Which end of a slice window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliceBound {
    Low,
    High,
}

/// Wrap a rotation into `[0, FULL_TURN)`.
///
/// Adds or subtracts whole turns one at a time rather than taking a modulo, so
/// multi-turn jumps from fast drags land on the same value either way.
pub fn normalize_angle(angle: i32) -> i32 {
    let mut angle = angle;
    while angle < 0 {
        angle += FULL_TURN;
    }
    while angle >= FULL_TURN {
        angle -= FULL_TURN;
    }
    angle
}

/// Rotation units to degrees.
pub fn angle_to_degrees(units: i32) -> f32 {
    units as f32 / ANGLE_UNITS_PER_DEGREE as f32
}

/// Slice control value to a fraction of the axis extent.
///
/// Values outside `0..=1600` map outside `[0, 1]`.
pub fn slice_fraction(value: i32) -> f32 {
    value as f32 / SLICE_RESOLUTION as f32
}

/// Interactive view state: rotation, zoom and slice window.
///
/// Mutators report whether anything changed so callers can skip redundant
/// repaints.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    rotation: [i32; 3],
    zoom: f32,
    slice_low: [i32; 3],
    slice_high: [i32; 3],
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            rotation: [0; 3],
            zoom: INITIAL_ZOOM,
            slice_low: [0; 3],
            slice_high: [SLICE_RESOLUTION; 3],
        }
    }

    /// Current rotation about `axis`, in `[0, FULL_TURN)`.
    pub fn rotation(&self, axis: Axis) -> i32 {
        self.rotation[axis.index()]
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Slice bound on the `0..=1600` control scale.
    pub fn slice(&self, axis: Axis, bound: SliceBound) -> i32 {
        match bound {
            SliceBound::Low => self.slice_low[axis.index()],
            SliceBound::High => self.slice_high[axis.index()],
        }
    }

    /// Set the rotation about `axis`.
    ///
    /// Returns the normalized angle if the stored value changed, `None` if it
    /// was already there.
    pub fn set_rotation(&mut self, axis: Axis, angle: i32) -> Option<i32> {
        let angle = normalize_angle(angle);
        let slot = &mut self.rotation[axis.index()];
        if *slot == angle {
            return None;
        }
        *slot = angle;
        Some(angle)
    }

    /// Rotate about `axis` by `delta` units relative to the current angle.
    pub fn rotate_by(&mut self, axis: Axis, delta: i32) -> Option<i32> {
        let target = self.rotation(axis).saturating_add(delta);
        self.set_rotation(axis, target)
    }

    /// Apply a raw wheel delta. Always counts as a change.
    pub fn set_zoom(&mut self, delta: f32) -> bool {
        self.zoom += delta / ZOOM_WHEEL_DIVISOR;
        true
    }

    /// Store a slice bound verbatim.
    ///
    /// No clamping: out-of-range or inverted bounds are kept and simply leave
    /// the axis empty. Returns true if the bound changed.
    pub fn set_slice(&mut self, axis: Axis, bound: SliceBound, value: i32) -> bool {
        let slot = match bound {
            SliceBound::Low => &mut self.slice_low[axis.index()],
            SliceBound::High => &mut self.slice_high[axis.index()],
        };
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    /// Camera transform: push the scene back by the eye distance less the
    /// zoom, then rotate about X, Y and Z in that order.
    pub fn camera_matrix(&self) -> Mat4 {
        let translation = Mat4::from_translation(Vec3::new(0.0, 0.0, -CAMERA_DISTANCE + self.zoom));
        Axis::ALL.iter().fold(translation, |m, &axis| {
            m * Mat4::from_axis_angle(axis.unit(), angle_to_degrees(self.rotation(axis)).to_radians())
        })
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_normalize_range_and_period() {
        let mut rng = rand::thread_rng();
        for _ in 0..2000 {
            let a: i32 = rng.gen_range(-1_000_000..1_000_000);
            let k: i32 = rng.gen_range(-50..50);
            let n = normalize_angle(a);
            assert!((0..FULL_TURN).contains(&n), "normalize({}) = {}", a, n);
            assert_eq!(n, normalize_angle(a + k * FULL_TURN));
        }
    }

    #[test]
    fn test_normalize_boundaries() {
        assert_eq!(normalize_angle(0), 0);
        assert_eq!(normalize_angle(FULL_TURN), 0);
        assert_eq!(normalize_angle(-1), FULL_TURN - 1);
        assert_eq!(normalize_angle(-3 * FULL_TURN - 16), FULL_TURN - 16);
        assert_eq!(normalize_angle(5 * FULL_TURN + 8), 8);
    }

    #[test]
    fn test_set_rotation_reports_change_once() {
        let mut view = ViewState::new();
        let angle = normalize_angle(-90 * ANGLE_UNITS_PER_DEGREE);

        assert_eq!(view.set_rotation(Axis::Y, angle), Some(angle));
        assert_eq!(view.set_rotation(Axis::Y, angle), None);
        // Same angle a full turn away is also no change
        assert_eq!(view.set_rotation(Axis::Y, angle + FULL_TURN), None);
        assert_eq!(view.rotation(Axis::Y), angle);
        assert_eq!(view.rotation(Axis::X), 0);
    }

    #[test]
    fn test_rotate_by_wraps() {
        let mut view = ViewState::new();
        assert_eq!(view.rotate_by(Axis::Z, -8), Some(FULL_TURN - 8));
        assert_eq!(view.rotate_by(Axis::Z, 16), Some(8));
    }

    #[test]
    fn test_zoom_accumulates() {
        let mut view = ViewState::new();
        assert!(view.set_zoom(120.0));
        assert!(view.set_zoom(-240.0));
        assert!((view.zoom() - (INITIAL_ZOOM - 1.2)).abs() < 1e-6);
        // Zero delta still counts as a change
        assert!(view.set_zoom(0.0));
    }

    #[test]
    fn test_slice_defaults_and_updates() {
        let mut view = ViewState::new();
        for axis in Axis::ALL {
            assert_eq!(view.slice(axis, SliceBound::Low), 0);
            assert_eq!(view.slice(axis, SliceBound::High), SLICE_RESOLUTION);
        }

        assert!(view.set_slice(Axis::X, SliceBound::High, 800));
        assert!(!view.set_slice(Axis::X, SliceBound::High, 800));
        // Changing high must be detected even when it equals the low bound
        assert!(view.set_slice(Axis::Y, SliceBound::High, 0));

        // Out-of-range and inverted values are stored as given
        assert!(view.set_slice(Axis::Z, SliceBound::Low, 2000));
        assert_eq!(view.slice(Axis::Z, SliceBound::Low), 2000);
        assert!(view.set_slice(Axis::Z, SliceBound::High, -5));
        assert_eq!(view.slice(Axis::Z, SliceBound::High), -5);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(angle_to_degrees(90 * 16), 90.0);
        assert_eq!(angle_to_degrees(8), 0.5);
        assert_eq!(slice_fraction(800), 0.5);
        assert_eq!(slice_fraction(SLICE_RESOLUTION), 1.0);
    }

    #[test]
    fn test_camera_translation() {
        let view = ViewState::new();
        let origin = view.camera_matrix().transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(0.0, 0.0, -CAMERA_DISTANCE + INITIAL_ZOOM)).length() < 1e-5);
    }

    #[test]
    fn test_camera_rotation_order() {
        let mut view = ViewState::new();
        view.set_rotation(Axis::X, 90 * 16);
        view.set_rotation(Axis::Y, 90 * 16);

        let right_angle = std::f32::consts::FRAC_PI_2;
        let base = Mat4::from_translation(Vec3::new(0.0, 0.0, -CAMERA_DISTANCE + INITIAL_ZOOM));
        let x_then_y = base * Mat4::from_rotation_x(right_angle) * Mat4::from_rotation_y(right_angle);
        let y_then_x = base * Mat4::from_rotation_y(right_angle) * Mat4::from_rotation_x(right_angle);

        let camera = view.camera_matrix();
        assert!(camera.abs_diff_eq(x_then_y, 1e-5));
        assert!(!camera.abs_diff_eq(y_then_x, 1e-3));
    }
}
