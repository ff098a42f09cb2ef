use glam::{EulerRot, Mat3, Mat4, Quat, Vec3};
use std::f32::consts::PI;
use tidewater_common::Axis;

/// Perspective camera driven by the panel's position and rotation fields.
///
/// Rotation is stored per axis as a fraction of π (XYZ Euler order). Each
/// axis is edited on its own, but the orientation is rebuilt from all three
/// on every edit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    rotation: Vec3,
    orientation: Quat,
    /// Vertical field of view, radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        let mut camera = Self {
            position: Vec3::new(12.0, 1.8, 6.0),
            rotation: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            fov_y: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        };
        camera.look_at(Vec3::new(0.0, -9.0, 0.0));
        camera
    }
}

impl CameraState {
    /// Point the camera's -Z axis at `target`, keeping world +Y up.
    ///
    /// The rotation fields are re-derived so the next single-axis edit starts
    /// from the current view.
    pub fn look_at(&mut self, target: Vec3) {
        let forward = (target - self.position).normalize();
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward);
        self.orientation = Quat::from_mat3(&Mat3::from_cols(right, up, -forward)).normalize();
        let (x, y, z) = self.orientation.to_euler(EulerRot::XYZ);
        self.rotation = Vec3::new(x, y, z) / PI;
    }

    /// Rotation per axis, in fractions of π.
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn set_position_axis(&mut self, axis: Axis, value: f32) {
        self.position = axis.with(self.position, value);
    }

    /// Set one rotation axis (fraction of π) and rebuild the orientation from
    /// all three.
    pub fn set_rotation_axis(&mut self, axis: Axis, turns: f32) {
        self.rotation = axis.with(self.rotation, turns);
        let r = self.rotation * PI;
        self.orientation = Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z);
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position).inverse()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_looks_at_target() {
        let cam = CameraState::default();
        let to_target = (Vec3::new(0.0, -9.0, 0.0) - cam.position).normalize();
        assert!(cam.forward().dot(to_target) > 0.9999);
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn rotation_fields_reproduce_orientation() {
        let mut cam = CameraState::default();
        let before = cam.orientation();
        // Re-applying the derived value must not move the view.
        cam.set_rotation_axis(Axis::X, cam.rotation().x);
        assert!(cam.orientation().dot(before).abs() > 0.9999);
    }

    #[test]
    fn single_axis_edit_keeps_other_axes() {
        let mut cam = CameraState::default();
        cam.set_rotation_axis(Axis::Y, 0.5);
        cam.set_rotation_axis(Axis::Z, -0.1);
        cam.set_rotation_axis(Axis::X, 0.25);

        let r = cam.rotation();
        assert_eq!(r.y, 0.5);
        assert_eq!(r.z, -0.1);
        assert_eq!(r.x, 0.25);
        let expected = Quat::from_euler(EulerRot::XYZ, 0.25 * PI, 0.5 * PI, -0.1 * PI);
        assert_eq!(cam.orientation(), expected);
    }

    #[test]
    fn position_axis_edit_keeps_other_axes() {
        let mut cam = CameraState::default();
        cam.set_position_axis(Axis::Y, 4.0);
        assert_eq!(cam.position, Vec3::new(12.0, 4.0, 6.0));
    }

    #[test]
    fn zero_rotation_looks_down_negative_z() {
        let mut cam = CameraState::default();
        for axis in Axis::ALL {
            cam.set_rotation_axis(axis, 0.0);
        }
        assert!((cam.forward() - Vec3::NEG_Z).length() < 1e-6);
    }
}
