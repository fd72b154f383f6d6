//! Primitive shapes built from immediate-mode calls.

use crate::gl::{Gl, Primitive};
use crate::math::calculate_normal;
use glam::{Vec3, Vec4};

/// Surface reflectance used by the fixed-function lighting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub shininess: f32,
}

impl Material {
    /// Opaque material from RGB triples
    pub const fn new(ambient: [f32; 3], diffuse: [f32; 3], specular: [f32; 3], shininess: f32) -> Self {
        Material {
            ambient: Vec4::new(ambient[0], ambient[1], ambient[2], 1.0),
            diffuse: Vec4::new(diffuse[0], diffuse[1], diffuse[2], 1.0),
            specular: Vec4::new(specular[0], specular[1], specular[2], 1.0),
            shininess,
        }
    }

    /// Flat colour with a white highlight, used by `draw_box` and the textured cube
    pub const fn plain(r: f32, g: f32, b: f32) -> Self {
        Material::new([r, g, b], [r, g, b], [1.0, 1.0, 1.0], 60.0)
    }
}

impl Default for Material {
    /// GL's initial front material
    fn default() -> Self {
        Material {
            ambient: Vec4::new(0.2, 0.2, 0.2, 1.0),
            diffuse: Vec4::new(0.8, 0.8, 0.8, 1.0),
            specular: Vec4::new(0.0, 0.0, 0.0, 1.0),
            shininess: 0.0,
        }
    }
}

/// Unit cube corners
const CUBE_VERTICES: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0], // 0
    [1.0, -1.0, -1.0],  // 1
    [-1.0, -1.0, 1.0],  // 2
    [1.0, -1.0, 1.0],   // 3
    [-1.0, 1.0, -1.0],  // 4
    [1.0, 1.0, -1.0],   // 5
    [-1.0, 1.0, 1.0],   // 6
    [1.0, 1.0, 1.0],    // 7
];

/// Cube faces, counter-clockwise when seen from outside
const CUBE_FACES: [[usize; 4]; 6] = [
    [0, 1, 3, 2], // -Y
    [0, 2, 6, 4], // -X
    [2, 3, 7, 6], // +Z
    [1, 5, 7, 3], // +X
    [0, 4, 5, 1], // -Z
    [6, 7, 5, 4], // +Y
];

/// Texture corner for each vertex of a face
const FACE_TEX_COORDS: [[f32; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]];

/// Box corners, ordered for the two quad strips below
const BOX_VERTICES: [[f32; 3]; 8] = [
    [-1.0, 1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
    [1.0, 1.0, -1.0],
    [1.0, -1.0, 1.0],
    [1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, -1.0, -1.0],
];

/// Two strips of three quads each: top/right/bottom, then back/left/front
const BOX_STRIPS: [[usize; 8]; 2] = [[0, 1, 2, 3, 4, 5, 6, 7], [3, 5, 1, 7, 0, 6, 2, 4]];

fn corner(index: usize) -> Vec3 {
    Vec3::from_array(CUBE_VERTICES[index])
}

/// Emits the six cube faces. Each face normal precedes its vertices.
fn emit_cube_faces<G: Gl>(gl: &mut G) {
    gl.begin(Primitive::Quads);
    for face in CUBE_FACES.iter() {
        gl.normal(calculate_normal(corner(face[0]), corner(face[1]), corner(face[2])));
        for (&index, &[s, t]) in face.iter().zip(FACE_TEX_COORDS.iter()) {
            gl.tex_coord(s, t);
            gl.vertex(corner(index));
        }
    }
    gl.end();
}

/// Lit cube spanning `-size..size` on every axis
pub fn draw_cube<G: Gl>(gl: &mut G, material: &Material, size: f32) {
    gl.material(material);
    gl.push_matrix();
    gl.scale(size, size, size);
    emit_cube_faces(gl);
    gl.pop_matrix();
}

/// Unit cube with per-corner texture coordinates. Uses whatever material and
/// texture are current.
#[allow(dead_code)]
pub fn draw_textured_cube<G: Gl>(gl: &mut G) {
    emit_cube_faces(gl);
}

/// Flat-coloured unit box drawn as quad strips, without normals
#[allow(dead_code)]
pub fn draw_box<G: Gl>(gl: &mut G, r: f32, g: f32, b: f32) {
    gl.material(&Material::plain(r, g, b));
    for strip in BOX_STRIPS.iter() {
        gl.begin(Primitive::QuadStrip);
        for &index in strip.iter() {
            gl.vertex(Vec3::from_array(BOX_VERTICES[index]));
        }
        gl.end();
    }
}

pub fn draw_sphere<G: Gl>(gl: &mut G, material: &Material, radius: f32, slices: u32, stacks: u32) {
    gl.material(material);
    gl.push_matrix();
    gl.solid_sphere(radius, slices, stacks);
    gl.pop_matrix();
}

/// Torus lying flat, so its ring axis is vertical
pub fn draw_torus<G: Gl>(
    gl: &mut G,
    material: &Material,
    inner_radius: f32,
    outer_radius: f32,
    sides: u32,
    rings: u32,
) {
    gl.material(material);
    gl.push_matrix();
    gl.rotate(90.0, 1.0, 0.0, 0.0);
    gl.solid_torus(inner_radius, outer_radius, sides, rings);
    gl.pop_matrix();
}
