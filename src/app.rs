//! Input handling and per-frame rendering, independent of any window system.

use crate::gl::Gl;
use crate::scene::{apply_lights, draw_scene};
use crate::state::AppState;
use glam::{Vec3, Vec4};
use tracing::{debug, info};

/// Key code delivered for Escape
pub const ESCAPE: char = '\u{1b}';

const CLEAR_COLOR: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);
/// Near-plane window and depth range of the projection
const FRUSTUM: [f32; 6] = [-10.0, 10.0, -10.0, 10.0, 5.0, 200.0];

/// Whether the event loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Non-printable keys the camera responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialKey {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
}

#[derive(Debug, Default)]
pub struct Application {
    pub state: AppState,
}

impl Application {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles a printable key (or Escape).
    pub fn on_key_down(&mut self, key: char) -> Flow {
        debug!(?key, "key down");
        let state = &mut self.state;
        match key {
            // Scene rotation axis; upper case turns the other way
            'x' => state.animation.toggle_axis(0, 1.0),
            'X' => state.animation.toggle_axis(0, -1.0),
            'y' => state.animation.toggle_axis(1, 1.0),
            'Y' => state.animation.toggle_axis(1, -1.0),
            'z' => state.animation.toggle_axis(2, 1.0),
            'Z' => state.animation.toggle_axis(2, -1.0),
            'u' | 'U' => state.animation.rotate_alpha = !state.animation.rotate_alpha,

            // Target offsets
            'a' => state.camera.nudge_look(Vec3::new(-1.0, 0.0, 0.0)),
            'd' => state.camera.nudge_look(Vec3::new(1.0, 0.0, 0.0)),
            'w' => state.camera.nudge_look(Vec3::new(0.0, 1.0, 0.0)),
            's' => state.camera.nudge_look(Vec3::new(0.0, -1.0, 0.0)),
            'q' => state.camera.nudge_look(Vec3::new(0.0, 0.0, -1.0)),
            'e' => state.camera.nudge_look(Vec3::new(0.0, 0.0, 1.0)),

            'p' => state.camera.adjust_pitch(1.0),
            'P' => state.camera.adjust_pitch(-1.0),
            'o' => state.camera.adjust_yaw(1.0),
            'O' => state.camera.adjust_yaw(-1.0),
            'r' => state.camera.adjust_roll(1.0),
            'R' => state.camera.adjust_roll(-1.0),

            'f' => state.animation.fan_rotate = !state.animation.fan_rotate,

            '0'..='2' => {
                let index = key as usize - '0' as usize;
                if let Some(on) = state.lights.toggle(index) {
                    debug!(light = index, on, "light toggled");
                }
            }

            ESCAPE => {
                info!("escape pressed, exiting");
                return Flow::Exit;
            }
            _ => {}
        }
        Flow::Continue
    }

    /// Moves eye and target together.
    pub fn on_special_key(&mut self, key: SpecialKey) -> Flow {
        debug!(?key, "special key");
        let offset = match key {
            SpecialKey::Up => Vec3::new(0.0, -1.0, 0.0),
            SpecialKey::Down => Vec3::new(0.0, 1.0, 0.0),
            SpecialKey::Left => Vec3::new(1.0, 0.0, 0.0),
            SpecialKey::Right => Vec3::new(-1.0, 0.0, 0.0),
            SpecialKey::PageUp => Vec3::new(0.0, 0.0, -1.0),
            SpecialKey::PageDown => Vec3::new(0.0, 0.0, 1.0),
        };
        self.state.camera.translate(offset);
        Flow::Continue
    }

    /// Advances the animation. Always asks for a redraw.
    pub fn on_idle_tick(&mut self) -> bool {
        self.state.animation.tick();
        true
    }

    /// Draws one frame.
    pub fn on_render<G: Gl>(&self, gl: &mut G) {
        let camera = &self.state.camera;
        let animation = &self.state.animation;
        let [left, right, bottom, top, near, far] = FRUSTUM;

        gl.clear(CLEAR_COLOR);
        gl.frustum(left, right, bottom, top, near, far);
        gl.look_at(camera.eye, camera.look, camera.up);

        let axis = animation.axis;
        gl.rotate(animation.alpha, axis.x, axis.y, axis.z);
        gl.rotate(animation.theta, axis.x, axis.y, axis.z);

        apply_lights(gl, &self.state.lights);
        draw_scene(gl);
        gl.flush();
    }
}
