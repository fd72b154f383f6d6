//! Immediate-mode, fixed-function command surface.
//!
//! Scene code talks to a `Gl` the way a classic OpenGL program talks to the
//! driver: scoped matrix pushes, material and light state, and vertices emitted
//! one at a time between `begin` and `end`. `graphics::Raster` draws the
//! commands; tests use the `Recorder` below to inspect them.

use crate::error::GlError;
use crate::lighting::LightSource;
use crate::primitives::Material;
use glam::{Mat4, Vec3, Vec4};

/// Maximum modelview stack depth, the minimum GL guarantees
pub const MAX_STACK_DEPTH: usize = 32;

/// Number of light units the pipeline evaluates
pub const MAX_LIGHTS: usize = 8;

/// How vertices between `begin` and `end` are assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Triangles,
    /// Every four vertices form an independent quad
    Quads,
    /// Vertices 2n, 2n+1, 2n+3, 2n+2 form quad n
    QuadStrip,
}

pub trait Gl {
    /// Fills the colour buffer and resets depth.
    fn clear(&mut self, color: Vec4);
    /// Replaces the projection with a perspective frustum.
    fn frustum(&mut self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32);
    /// Replaces the modelview matrix with a viewing transform.
    fn look_at(&mut self, eye: Vec3, center: Vec3, up: Vec3);

    fn push_matrix(&mut self);
    fn pop_matrix(&mut self);
    fn translate(&mut self, x: f32, y: f32, z: f32);
    fn scale(&mut self, x: f32, y: f32, z: f32);
    fn rotate(&mut self, angle_degrees: f32, x: f32, y: f32, z: f32);

    fn material(&mut self, material: &Material);
    /// Sets light unit `index`. The position is transformed by the current modelview.
    fn light(&mut self, index: usize, light: &LightSource);

    fn begin(&mut self, primitive: Primitive);
    fn end(&mut self);
    fn normal(&mut self, normal: Vec3);
    fn tex_coord(&mut self, s: f32, t: f32);
    fn vertex(&mut self, position: Vec3);

    /// Sphere centred on the origin, tessellated around the Z axis.
    fn solid_sphere(&mut self, radius: f32, slices: u32, stacks: u32);
    /// Torus in the XY plane around the Z axis.
    fn solid_torus(&mut self, inner_radius: f32, outer_radius: f32, sides: u32, rings: u32);

    fn flush(&mut self);
    /// Returns and clears the first error recorded since the last call.
    fn take_error(&mut self) -> Option<GlError>;
}

/// Modelview matrix stack shared by the `Gl` implementations
#[derive(Debug, Clone)]
pub struct MatrixStack {
    stack: Vec<Mat4>,
}

impl MatrixStack {
    pub fn new() -> Self {
        MatrixStack {
            stack: vec![Mat4::IDENTITY],
        }
    }

    pub fn top(&self) -> Mat4 {
        self.stack.last().copied().unwrap_or(Mat4::IDENTITY)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn load(&mut self, matrix: Mat4) {
        if let Some(top) = self.stack.last_mut() {
            *top = matrix;
        }
    }

    /// Post-multiplies the top of the stack, as GL does.
    pub fn multiply(&mut self, matrix: Mat4) {
        if let Some(top) = self.stack.last_mut() {
            *top *= matrix;
        }
    }

    pub fn push(&mut self) -> Result<(), GlError> {
        if self.depth() >= MAX_STACK_DEPTH {
            return Err(GlError::StackOverflow(self.depth()));
        }
        self.stack.push(self.top());
        Ok(())
    }

    pub fn pop(&mut self) -> Result<(), GlError> {
        if self.depth() <= 1 {
            return Err(GlError::StackUnderflow);
        }
        self.stack.pop();
        Ok(())
    }
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub use recorder::{Command, Recorder};
