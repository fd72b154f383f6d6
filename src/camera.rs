//! Eye/target/up camera steered by pitch, yaw and roll angles.
//!
//! The look-at target and up vector are edited two ways: directly, by the
//! look-offset keys, and by the angle channels, which each rewrite one or two
//! components from the eye position when their angle changes. The two paths
//! are not reconciled, so moving the eye does not re-derive the target from
//! the stored angles until the next angle change.

use glam::Vec3;
use tracing::debug;

pub const PITCH_RANGE: (f32, f32) = (-179.0, 179.0);
pub const YAW_RANGE: (f32, f32) = (1.0, 179.0);
pub const ROLL_RANGE: (f32, f32) = (-89.0, 269.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub look: Vec3,
    pub up: Vec3,
    /// Degrees
    pub pitch: f32,
    /// Degrees. Starts outside its range until the first yaw change.
    pub yaw: f32,
    /// Degrees
    pub roll: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Camera {
            eye: Vec3::new(0.0, 0.0, 50.0),
            look: Vec3::ZERO,
            up: Vec3::Y,
            pitch: 0.0,
            yaw: -90.0,
            roll: 0.0,
        }
    }
}

impl Camera {
    /// Changes the pitch, clamps it and recomputes the target's X.
    pub fn adjust_pitch(&mut self, delta: f32) {
        self.pitch = (self.pitch + delta).clamp(PITCH_RANGE.0, PITCH_RANGE.1);
        self.look.x = self.eye.x * self.pitch.to_radians().cos();
        debug!(pitch = self.pitch, look_x = self.look.x, "pitch");
    }

    /// Changes the yaw, clamps it and recomputes the target's Y.
    pub fn adjust_yaw(&mut self, delta: f32) {
        self.yaw = (self.yaw + delta).clamp(YAW_RANGE.0, YAW_RANGE.1);
        self.look.y = self.eye.y * self.yaw.to_radians().cos();
        debug!(yaw = self.yaw, look_y = self.look.y, "yaw");
    }

    /// Changes the roll, clamps it and recomputes the up vector's X and Y.
    pub fn adjust_roll(&mut self, delta: f32) {
        self.roll = (self.roll + delta).clamp(ROLL_RANGE.0, ROLL_RANGE.1);
        let (sin, cos) = self.roll.to_radians().sin_cos();
        self.up.x = self.eye.x * cos;
        self.up.y = self.eye.y * sin;
        debug!(roll = self.roll, up_x = self.up.x, up_y = self.up.y, "roll");
    }

    /// Moves the target only.
    pub fn nudge_look(&mut self, offset: Vec3) {
        self.look += offset;
    }

    /// Moves eye and target together, keeping their offset.
    pub fn translate(&mut self, offset: Vec3) {
        self.eye += offset;
        self.look += offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math;

    fn in_range(value: f32, range: (f32, f32)) -> bool {
        value >= range.0 && value <= range.1
    }

    #[test]
    fn test_pitch_stays_clamped() {
        let mut camera = Camera::default();
        for _ in 0..500 {
            camera.adjust_pitch(1.0);
            assert!(in_range(camera.pitch, PITCH_RANGE));
        }
        assert_eq!(camera.pitch, 179.0);
        for _ in 0..1000 {
            camera.adjust_pitch(-1.0);
            assert!(in_range(camera.pitch, PITCH_RANGE));
        }
        assert_eq!(camera.pitch, -179.0);
    }

    #[test]
    fn test_yaw_stays_clamped() {
        let mut camera = Camera::default();
        camera.adjust_yaw(1.0);
        assert_eq!(camera.yaw, 1.0);
        for _ in 0..500 {
            camera.adjust_yaw(1.0);
            assert!(in_range(camera.yaw, YAW_RANGE));
        }
        assert_eq!(camera.yaw, 179.0);
        for _ in 0..500 {
            camera.adjust_yaw(-1.0);
            assert!(in_range(camera.yaw, YAW_RANGE));
        }
        assert_eq!(camera.yaw, 1.0);
    }

    #[test]
    fn test_roll_stays_clamped() {
        let mut camera = Camera::default();
        for step in [1.0, -1.0, 7.5, -3.0] {
            for _ in 0..400 {
                camera.adjust_roll(step);
                assert!(in_range(camera.roll, ROLL_RANGE));
            }
        }
        camera.adjust_roll(-1000.0);
        assert_eq!(camera.roll, -89.0);
        camera.adjust_roll(1000.0);
        assert_eq!(camera.roll, 269.0);
    }

    #[test]
    fn test_pitch_recomputes_look_x_from_eye() {
        let mut camera = Camera {
            eye: Vec3::new(10.0, 4.0, 50.0),
            ..Camera::default()
        };
        camera.adjust_pitch(60.0);
        assert!((camera.look.x - 5.0).abs() < 1e-4);
        assert_eq!(camera.look.y, 0.0);
    }

    #[test]
    fn test_yaw_recomputes_look_y_from_eye() {
        let mut camera = Camera {
            eye: Vec3::new(0.0, 8.0, 50.0),
            yaw: 59.0,
            ..Camera::default()
        };
        camera.adjust_yaw(1.0);
        assert!((camera.look.y - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_roll_recomputes_up_from_eye() {
        let mut camera = Camera {
            eye: Vec3::new(2.0, 6.0, 50.0),
            ..Camera::default()
        };
        camera.adjust_roll(90.0);
        assert!(camera.up.x.abs() < 1e-5);
        assert!((camera.up.y - 6.0).abs() < 1e-5);
        assert_eq!(camera.up.z, 0.0);
    }

    #[test]
    fn test_translate_keeps_offset() {
        let mut camera = Camera::default();
        let offset = camera.look - camera.eye;
        camera.translate(Vec3::new(1.0, -2.0, 3.0));
        assert_eq!(camera.look - camera.eye, offset);
        assert_eq!(camera.eye, Vec3::new(1.0, -2.0, 53.0));
    }

    #[test]
    fn test_moving_eye_leaves_angle_derived_target_alone() {
        let mut camera = Camera::default();
        camera.adjust_pitch(10.0);
        let look = camera.look;
        camera.eye.x += 5.0;
        assert_eq!(camera.look, look);
    }

    #[test]
    fn test_view_matrix_is_finite_after_roll_at_origin_axis() {
        let mut camera = Camera::default();
        camera.adjust_roll(1.0);
        assert_eq!(camera.up, Vec3::new(0.0, 0.0, 0.0));
        assert!(math::look_at(camera.eye, camera.look, camera.up).is_finite());
    }
}
