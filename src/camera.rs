//! Free-flying camera
//!
//! # Coordinate System
//!
//! Uses a **left-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive forward (into screen)
//!
//! # Orientation
//!
//! Orientation is stored as Euler angles in radians and composed as
//! `Rz * Ry * Rx`, like model transforms. Pitch is applied before yaw, so
//! looking up or down stays a pitch after any turn.
//!
//! - **x**: pitch, positive = look down
//! - **y**: yaw, positive = look right
//! - **z**: roll

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::window::InputState;

/// Units moved per frame while a movement key is held.
pub const DEFAULT_MOVE_SPEED: f32 = 0.5;
/// Degrees turned per frame while a rotation key is held.
pub const DEFAULT_ROTATION_SPEED: f32 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    rotation: Vec3,
    fov_degrees: f32,
    z_near: f32,
    z_far: f32,
    move_speed: f32,
    rotation_speed: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::ZERO, 90.0, 0.1, 300.0)
    }
}

impl Camera {
    /// Creates a camera with the default per-frame movement and rotation speeds.
    ///
    /// `near` and `far` only shape the projection matrix; nothing is clipped
    /// against them.
    pub fn new(position: Vec3, rotation: Vec3, fov_degrees: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            position,
            rotation,
            fov_degrees,
            z_near,
            z_far,
            move_speed: DEFAULT_MOVE_SPEED,
            rotation_speed: DEFAULT_ROTATION_SPEED,
        }
    }

    /// Overrides movement (units/frame) and rotation (degrees/frame) speeds.
    pub fn with_speeds(mut self, move_speed: f32, rotation_speed: f32) -> Self {
        self.move_speed = move_speed;
        self.rotation_speed = rotation_speed;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Euler angles in radians.
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    /// Computes the world-to-camera matrix.
    ///
    /// View = R^T * T(-position). The camera rotation is a pure rotation and
    /// therefore orthonormal, so its transpose is its exact inverse.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::rotation_zyx(self.rotation).transpose() * Mat4::translation(-self.position)
    }

    /// Translates a world-space point into camera space.
    pub fn world_to_camera(&self, v: Vec3) -> Vec3 {
        self.view_matrix().transform_point(v)
    }

    /// Applies one frame of movement from the input snapshot.
    ///
    /// Movement is along the world axes: left/right on X, up/down on Y.
    pub fn move_by(&mut self, input: &InputState) {
        let dx = axis(input.right, input.left);
        let dy = axis(input.up, input.down);
        self.position = self.position + Vec3::new(dx, dy, 0.0) * self.move_speed;
    }

    /// Applies one frame of rotation from the input snapshot.
    pub fn rotate_by(&mut self, input: &InputState) {
        let step = self.rotation_speed.to_radians();
        let yaw = axis(input.turn_right, input.turn_left);
        let pitch = axis(input.look_down, input.look_up);
        self.rotation = self.rotation + Vec3::new(pitch, yaw, 0.0) * step;
    }

    /// Move then rotate, once per frame.
    pub fn update(&mut self, input: &InputState) {
        self.move_by(input);
        self.rotate_by(input);
    }
}

/// +1, -1 or 0 for a pair of opposing keys.
fn axis(positive: bool, negative: bool) -> f32 {
    (positive as i8 - negative as i8) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn identity_camera_leaves_points_alone() {
        let camera = Camera::default();
        let p = Vec3::new(1.5, -2.0, 7.0);
        assert_eq!(camera.world_to_camera(p), p);
    }

    #[test]
    fn camera_position_is_subtracted() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, -5.0), Vec3::ZERO, 90.0, 0.1, 100.0);
        let p = camera.world_to_camera(Vec3::ZERO);
        assert_relative_eq!(p.z, 5.0);
    }

    #[test]
    fn yaw_right_brings_right_side_in_front() {
        let mut camera = Camera::default();
        camera.set_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0));
        let p = camera.world_to_camera(Vec3::new(4.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(p.z, 4.0, epsilon = 1e-5);
    }

    #[test]
    fn pitch_after_yaw_still_tilts_the_view() {
        let mut camera = Camera::default();
        camera.set_rotation(Vec3::new(30.0_f32.to_radians(), FRAC_PI_2, 0.0));
        // Straight ahead after the turn, on the horizon.
        let p = camera.world_to_camera(Vec3::new(10.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(p.y, 5.0, epsilon = 1e-4);
        assert_relative_eq!(p.z, 10.0 * 30.0_f32.to_radians().cos(), epsilon = 1e-4);
    }

    #[test]
    fn move_adds_fixed_delta_per_frame() {
        let mut camera = Camera::default();
        let input = InputState {
            right: true,
            up: true,
            ..InputState::default()
        };
        camera.move_by(&input);
        camera.move_by(&input);
        assert_eq!(camera.position(), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut camera = Camera::default();
        camera.move_by(&InputState {
            left: true,
            right: true,
            ..InputState::default()
        });
        assert_eq!(camera.position(), Vec3::ZERO);
    }

    #[test]
    fn rotate_uses_degrees_per_frame() {
        let mut camera = Camera::default().with_speeds(1.0, 10.0);
        camera.rotate_by(&InputState {
            turn_left: true,
            look_down: true,
            ..InputState::default()
        });
        assert_relative_eq!(camera.rotation().y, -10.0_f32.to_radians());
        assert_relative_eq!(camera.rotation().x, 10.0_f32.to_radians());
    }

    #[test]
    fn idle_input_changes_nothing() {
        let mut camera = Camera::default();
        camera.update(&InputState::default());
        assert_eq!(camera, Camera::default());
    }
}
