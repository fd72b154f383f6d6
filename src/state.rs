use crate::camera::Camera;
use crate::lighting::LightToggles;
use glam::Vec3;

/// Degrees added to `theta`/`alpha` per idle tick
pub const ROTATION_STEP: f32 = 0.05;
/// Degrees added to the fan angle per idle tick
pub const FAN_STEP: f32 = 1.0;

/// Application state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub camera: Camera,
    pub animation: Animation,
    pub lights: LightToggles,
}

/// Scene rotation and fan accumulators
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Animation {
    /// Axis shared by both scene rotations; components are set by the axis keys
    pub axis: Vec3,
    /// Rotation advanced while `rotate_theta` is set
    pub theta: f32,
    pub rotate_theta: bool,
    /// Rotation advanced while `rotate_alpha` is set
    pub alpha: f32,
    pub rotate_alpha: bool,
    pub fan_angle: f32,
    pub fan_rotate: bool,
}

impl Animation {
    /// Advances every enabled accumulator by one tick.
    pub fn tick(&mut self) {
        if self.rotate_theta {
            self.theta = advance(self.theta, ROTATION_STEP);
        }
        if self.rotate_alpha {
            self.alpha = advance(self.alpha, ROTATION_STEP);
        }
        if self.fan_rotate {
            self.fan_angle += FAN_STEP;
            if self.fan_angle > 360.0 {
                self.fan_angle = 0.0;
            }
        }
    }

    /// Sets one axis component to `sign` and flips the `theta` rotation.
    pub fn toggle_axis(&mut self, axis: usize, sign: f32) {
        self.axis[axis] = sign;
        self.rotate_theta = !self.rotate_theta;
    }
}

/// Adds `step` and wraps to zero once a full turn is reached.
fn advance(angle: f32, step: f32) -> f32 {
    let next = angle + step;
    if next >= 360.0 {
        0.0
    } else {
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_animation_does_nothing_by_default() {
        let mut animation = Animation::default();
        for _ in 0..100 {
            animation.tick();
        }
        assert_eq!(animation, Animation::default());
    }

    #[test]
    fn test_theta_wraps_within_a_turn() {
        let mut animation = Animation {
            rotate_theta: true,
            ..Animation::default()
        };
        let mut wrapped = false;
        for _ in 0..20_000 {
            let before = animation.theta;
            animation.tick();
            assert!(animation.theta >= 0.0 && animation.theta < 360.0);
            if animation.theta < before {
                assert_eq!(animation.theta, 0.0);
                wrapped = true;
            }
        }
        assert!(wrapped);
        assert_eq!(animation.alpha, 0.0);
    }

    #[test]
    fn test_alpha_wraps_at_360() {
        let mut animation = Animation {
            rotate_alpha: true,
            alpha: 359.98,
            ..Animation::default()
        };
        animation.tick();
        assert_eq!(animation.alpha, 0.0);
        animation.tick();
        assert_eq!(animation.alpha, ROTATION_STEP);
    }

    #[test]
    fn test_fan_wraps_past_360() {
        let mut animation = Animation {
            fan_rotate: true,
            fan_angle: 359.0,
            ..Animation::default()
        };
        animation.tick();
        assert_eq!(animation.fan_angle, 360.0);
        animation.tick();
        assert_eq!(animation.fan_angle, 0.0);
    }

    #[test]
    fn test_axis_keys_accumulate_components() {
        let mut animation = Animation::default();
        animation.toggle_axis(1, 1.0);
        assert!(animation.rotate_theta);
        animation.toggle_axis(0, -1.0);
        assert!(!animation.rotate_theta);
        assert_eq!(animation.axis, Vec3::new(-1.0, 1.0, 0.0));
    }
}
