//! Software fixed-function pipeline.
//!
//! Vertices are lit as they are emitted (smooth shading), clipped against the
//! near plane, projected, and filled into an RGBA pixel buffer with a depth
//! test. Texture coordinates are accepted but no texture unit is sampled.

use crate::error::GlError;
use crate::gl::{Gl, MatrixStack, Primitive, MAX_LIGHTS};
use crate::lighting::{LightSource, Spot};
use crate::math::{self, edge_function, to_rgba8};
use crate::primitives::Material;
use crate::tessellate::{self, Mesh};
use crate::vertex::{ScreenVertex, Vertex};
use glam::{Mat3, Mat4, Vec3, Vec4, Vec4Swizzles};

/// Scene ambient applied to every material, GL's default light model
const GLOBAL_AMBIENT: Vec4 = Vec4::new(0.2, 0.2, 0.2, 1.0);

/// Light unit with position and spot direction already in eye space
#[derive(Debug, Clone, Copy)]
struct EyeLight {
    ambient: Vec4,
    diffuse: Vec4,
    specular: Vec4,
    position: Vec4,
    spot: Option<Spot>,
}

/// Transforms captured when a batch of vertices starts
#[derive(Debug, Clone, Copy)]
struct VertexStage {
    modelview: Mat4,
    normal_matrix: Mat3,
}

pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    depth: Vec<f32>,
    projection: Mat4,
    modelview: MatrixStack,
    material: Material,
    lights: [Option<EyeLight>; MAX_LIGHTS],
    current_normal: Vec3,
    primitive: Option<(Primitive, VertexStage)>,
    batch: Vec<Vertex>,
    error: Option<GlError>,
}

impl Raster {
    pub fn new(width: usize, height: usize) -> Self {
        Raster {
            width,
            height,
            pixels: vec![0u8; width * height * 4],
            depth: vec![1.0; width * height],
            projection: Mat4::IDENTITY,
            modelview: MatrixStack::new(),
            material: Material::default(),
            lights: [None; MAX_LIGHTS],
            current_normal: Vec3::Z,
            primitive: None,
            batch: Vec::new(),
            error: None,
        }
    }

    /// Resizes the frame buffer; the contents are cleared to black.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![0u8; width * height * 4];
        self.depth = vec![1.0; width * height];
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// RGBA8 pixels, row-major from the top-left corner
    #[cfg(test)]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let offset = (y * self.width + x) * 4;
        [
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
            self.pixels[offset + 3],
        ]
    }

    fn record_error(&mut self, error: GlError) {
        self.error.get_or_insert(error);
    }

    /// Rejects commands that are not allowed between `begin` and `end`.
    fn outside_primitive(&mut self, command: &'static str) -> bool {
        if self.primitive.is_some() {
            self.record_error(GlError::InvalidOperation(command));
            return false;
        }
        true
    }

    fn vertex_stage(&self) -> VertexStage {
        let modelview = self.modelview.top();
        VertexStage {
            modelview,
            normal_matrix: Mat3::from_mat4(modelview).inverse().transpose(),
        }
    }

    /// Runs the vertex stage: eye-space lighting, then projection.
    fn shade(&self, stage: &VertexStage, position: Vec3, normal: Vec3) -> Vertex {
        let eye = stage.modelview.transform_point3(position);
        let normal = (stage.normal_matrix * normal).normalize_or_zero();
        Vertex {
            clip: self.projection * eye.extend(1.0),
            color: self.light_color(eye, normal),
        }
    }

    /// Fixed-function colour: global ambient plus each light's ambient,
    /// diffuse and specular terms, with a non-local viewer.
    fn light_color(&self, eye: Vec3, normal: Vec3) -> Vec4 {
        let material = &self.material;
        let mut color = GLOBAL_AMBIENT * material.ambient;

        for light in self.lights.iter().flatten() {
            let to_light = if light.position.w == 0.0 {
                light.position.xyz()
            } else {
                light.position.xyz() - eye
            }
            .normalize_or_zero();

            let spot = spot_factor(light.spot.as_ref(), to_light);
            if spot == 0.0 {
                continue;
            }

            let n_dot_l = normal.dot(to_light).max(0.0);
            let mut term = light.ambient * material.ambient + light.diffuse * material.diffuse * n_dot_l;
            if n_dot_l > 0.0 {
                let half = (to_light + Vec3::Z).normalize_or_zero();
                let highlight = normal.dot(half).max(0.0).powf(material.shininess);
                term += light.specular * material.specular * highlight;
            }
            color += term * spot;
        }

        color.xyz().extend(material.diffuse.w).clamp(Vec4::ZERO, Vec4::ONE)
    }

    fn to_screen(&self, vertex: &Vertex) -> Option<ScreenVertex> {
        let w = vertex.clip.w;
        if w <= 0.0 {
            return None;
        }
        let ndc = vertex.clip.xyz() / w;
        if !ndc.is_finite() {
            return None;
        }
        Some(ScreenVertex {
            screen_position: [
                (ndc.x + 1.0) * 0.5 * self.width as f32,
                (1.0 - ndc.y) * 0.5 * self.height as f32,
            ],
            depth: ndc.z * 0.5 + 0.5,
            color: vertex.color,
        })
    }

    /// Clips a triangle against the near plane and fills what is left.
    fn draw_clipped(&mut self, triangle: [Vertex; 3]) {
        let polygon = clip_near(&triangle);
        if polygon.len() < 3 {
            return;
        }
        let screen: Option<Vec<ScreenVertex>> = polygon.iter().map(|v| self.to_screen(v)).collect();
        let Some(screen) = screen else {
            return;
        };
        for i in 1..screen.len() - 1 {
            self.draw_triangle(&screen[0], &screen[i], &screen[i + 1]);
        }
    }

    /// Fills a screen-space triangle with interpolated colour and depth
    fn draw_triangle(&mut self, v0: &ScreenVertex, v1: &ScreenVertex, v2: &ScreenVertex) {
        if self.width == 0 || self.height == 0 {
            return;
        }

        // Compute bounding box of the triangle
        let min_x = v0.screen_position[0]
            .min(v1.screen_position[0])
            .min(v2.screen_position[0])
            .floor()
            .max(0.0) as usize;
        let max_x = v0.screen_position[0]
            .max(v1.screen_position[0])
            .max(v2.screen_position[0])
            .ceil()
            .min(self.width as f32 - 1.0) as usize;
        let min_y = v0.screen_position[1]
            .min(v1.screen_position[1])
            .min(v2.screen_position[1])
            .floor()
            .max(0.0) as usize;
        let max_y = v0.screen_position[1]
            .max(v1.screen_position[1])
            .max(v2.screen_position[1])
            .ceil()
            .min(self.height as f32 - 1.0) as usize;

        let area = edge_function(&v0.screen_position, &v1.screen_position, &v2.screen_position);
        if area == 0.0 || !area.is_finite() {
            return;
        }

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = [x as f32 + 0.5, y as f32 + 0.5];

                // Dividing by the signed area accepts either winding
                let w0 = edge_function(&v1.screen_position, &v2.screen_position, &p) / area;
                let w1 = edge_function(&v2.screen_position, &v0.screen_position, &p) / area;
                let w2 = edge_function(&v0.screen_position, &v1.screen_position, &p) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = v0.depth * w0 + v1.depth * w1 + v2.depth * w2;
                let offset = y * self.width + x;
                if !(0.0..=1.0).contains(&depth) || depth >= self.depth[offset] {
                    continue;
                }
                self.depth[offset] = depth;

                let color = v0.color * w0 + v1.color * w1 + v2.color * w2;
                let pixel_offset = offset * 4;
                self.pixels[pixel_offset..pixel_offset + 4].copy_from_slice(&to_rgba8(color));
            }
        }
    }

    fn draw_mesh(&mut self, mesh: &Mesh) {
        let stage = self.vertex_stage();
        let lit: Vec<Vertex> = mesh
            .vertices
            .iter()
            .map(|v| self.shade(&stage, v.position, v.normal))
            .collect();
        for &[a, b, c] in &mesh.triangles {
            self.draw_clipped([lit[a], lit[b], lit[c]]);
        }
    }
}

/// Contribution scale of a spot light toward a surface; cutoffs outside
/// 0..=90 degrees are not a valid cone and leave the light omnidirectional.
fn spot_factor(spot: Option<&Spot>, to_light: Vec3) -> f32 {
    match spot {
        Some(spot) if (0.0..=90.0).contains(&spot.cutoff) => {
            let cos = (-to_light).dot(spot.direction.normalize_or_zero());
            if cos < spot.cutoff.to_radians().cos() {
                0.0
            } else {
                1.0
            }
        }
        _ => 1.0,
    }
}

/// Sutherland-Hodgman against the clip-space near plane `z >= -w`.
fn clip_near(triangle: &[Vertex; 3]) -> Vec<Vertex> {
    let mut polygon = Vec::with_capacity(4);
    for i in 0..3 {
        let current = &triangle[i];
        let next = &triangle[(i + 1) % 3];
        let d_current = current.clip.z + current.clip.w;
        let d_next = next.clip.z + next.clip.w;

        if d_current >= 0.0 {
            polygon.push(*current);
        }
        if (d_current >= 0.0) != (d_next >= 0.0) {
            let t = d_current / (d_current - d_next);
            polygon.push(current.lerp(next, t));
        }
    }
    polygon
}

impl Gl for Raster {
    fn clear(&mut self, color: Vec4) {
        let rgba = to_rgba8(color);
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&rgba);
        }
        self.depth.fill(1.0);
    }

    fn frustum(&mut self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) {
        if near <= 0.0 || far <= near || left == right || bottom == top {
            self.record_error(GlError::InvalidOperation("degenerate frustum"));
            return;
        }
        self.projection = math::frustum(left, right, bottom, top, near, far);
    }

    fn look_at(&mut self, eye: Vec3, center: Vec3, up: Vec3) {
        if self.outside_primitive("look_at inside begin/end") {
            self.modelview.load(math::look_at(eye, center, up));
        }
    }

    fn push_matrix(&mut self) {
        if self.outside_primitive("push_matrix inside begin/end") {
            if let Err(e) = self.modelview.push() {
                self.record_error(e);
            }
        }
    }

    fn pop_matrix(&mut self) {
        if self.outside_primitive("pop_matrix inside begin/end") {
            if let Err(e) = self.modelview.pop() {
                self.record_error(e);
            }
        }
    }

    fn translate(&mut self, x: f32, y: f32, z: f32) {
        if self.outside_primitive("translate inside begin/end") {
            self.modelview
                .multiply(Mat4::from_translation(Vec3::new(x, y, z)));
        }
    }

    fn scale(&mut self, x: f32, y: f32, z: f32) {
        if self.outside_primitive("scale inside begin/end") {
            self.modelview.multiply(Mat4::from_scale(Vec3::new(x, y, z)));
        }
    }

    fn rotate(&mut self, angle_degrees: f32, x: f32, y: f32, z: f32) {
        if self.outside_primitive("rotate inside begin/end") {
            self.modelview
                .multiply(math::rotation(angle_degrees, Vec3::new(x, y, z)));
        }
    }

    fn material(&mut self, material: &Material) {
        self.material = *material;
    }

    fn light(&mut self, index: usize, light: &LightSource) {
        if index >= MAX_LIGHTS {
            self.record_error(GlError::InvalidOperation("light index out of range"));
            return;
        }
        let modelview = self.modelview.top();
        self.lights[index] = Some(EyeLight {
            ambient: light.ambient,
            diffuse: light.diffuse,
            specular: light.specular,
            position: modelview * light.position,
            spot: light.spot.map(|spot| Spot {
                direction: Mat3::from_mat4(modelview) * spot.direction,
                cutoff: spot.cutoff,
            }),
        });
    }

    fn begin(&mut self, primitive: Primitive) {
        if self.outside_primitive("begin inside begin/end") {
            self.batch.clear();
            self.primitive = Some((primitive, self.vertex_stage()));
        }
    }

    fn end(&mut self) {
        let Some((primitive, _)) = self.primitive.take() else {
            self.record_error(GlError::InvalidOperation("end without begin"));
            return;
        };

        let batch = std::mem::take(&mut self.batch);
        match primitive {
            Primitive::Triangles => {
                for t in batch.chunks_exact(3) {
                    self.draw_clipped([t[0], t[1], t[2]]);
                }
            }
            Primitive::Quads => {
                for q in batch.chunks_exact(4) {
                    self.draw_clipped([q[0], q[1], q[2]]);
                    self.draw_clipped([q[0], q[2], q[3]]);
                }
            }
            Primitive::QuadStrip => {
                let mut i = 0;
                while i + 3 < batch.len() {
                    let (a, b, c, d) = (batch[i], batch[i + 1], batch[i + 3], batch[i + 2]);
                    self.draw_clipped([a, b, c]);
                    self.draw_clipped([a, c, d]);
                    i += 2;
                }
            }
        }
        self.batch = batch;
        self.batch.clear();
    }

    fn normal(&mut self, normal: Vec3) {
        self.current_normal = normal;
    }

    fn tex_coord(&mut self, _s: f32, _t: f32) {}

    fn vertex(&mut self, position: Vec3) {
        let Some((_, stage)) = self.primitive else {
            self.record_error(GlError::InvalidOperation("vertex outside begin/end"));
            return;
        };
        let vertex = self.shade(&stage, position, self.current_normal);
        self.batch.push(vertex);
    }

    fn solid_sphere(&mut self, radius: f32, slices: u32, stacks: u32) {
        if self.outside_primitive("solid_sphere inside begin/end") {
            self.draw_mesh(&tessellate::sphere(radius, slices, stacks));
        }
    }

    fn solid_torus(&mut self, inner_radius: f32, outer_radius: f32, sides: u32, rings: u32) {
        if self.outside_primitive("solid_torus inside begin/end") {
            self.draw_mesh(&tessellate::torus(inner_radius, outer_radius, sides, rings));
        }
    }

    fn flush(&mut self) {}

    fn take_error(&mut self) -> Option<GlError> {
        self.error.take()
    }
}
