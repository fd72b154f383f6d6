//! The stadium, as a fixed sequence of scoped draw calls.

use crate::gl::Gl;
use crate::lighting::LightToggles;
use crate::primitives::{draw_cube, draw_sphere, draw_torus, Material};

const GRASS: Material = Material::new([0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.1, 0.1, 0.1], 0.05);
const WHITE: Material = Material::new([1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [0.1, 0.1, 0.1], 0.15);
const PITCH: Material = Material::new([0.5, 0.5, 0.5], [0.5, 0.5, 0.5], [0.1, 0.1, 0.1], 0.15);
const POLE: Material = PITCH;
const LAMP: Material = Material::new([1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [0.0, 0.0, 0.0], 1.0);

/// Gray level of the ground gallery and the three raised galleries
const GALLERY_SHADES: [f32; 4] = [1.0, 0.8, 0.6, 0.4];

fn gallery(level: f32) -> Material {
    Material::new([level; 3], [level; 3], [0.1, 0.1, 0.1], 0.15)
}

/// Three stumps and two bails, centred on the origin
pub fn draw_stumps<G: Gl>(gl: &mut G) {
    // Middle stump
    gl.push_matrix();
    gl.scale(0.05, 1.0, 0.05);
    gl.translate(0.0, 2.5, 0.0);
    draw_cube(gl, &WHITE, 2.5);
    gl.pop_matrix();

    // Left stump
    gl.push_matrix();
    gl.scale(0.05, 1.0, 0.05);
    gl.translate(-15.0, 2.5, 0.0);
    draw_cube(gl, &WHITE, 2.5);
    gl.pop_matrix();

    // Right stump
    gl.push_matrix();
    gl.scale(0.05, 1.0, 0.05);
    gl.translate(15.0, 2.5, 0.0);
    draw_cube(gl, &WHITE, 2.5);
    gl.pop_matrix();

    // Right bail
    gl.push_matrix();
    gl.scale(0.075, 0.05, 0.05);
    gl.translate(5.0, 100.0, 0.0);
    draw_cube(gl, &WHITE, 5.0);
    gl.pop_matrix();

    // Left bail
    gl.push_matrix();
    gl.scale(0.075, 0.05, 0.05);
    gl.translate(-5.0, 100.0, 0.0);
    draw_cube(gl, &WHITE, 5.0);
    gl.pop_matrix();
}

/// A pole hanging down from the origin with a lamp at its end
pub fn draw_flood_light<G: Gl>(gl: &mut G) {
    gl.push_matrix();
    gl.scale(0.05, 2.0, 0.05);
    gl.translate(0.0, -40.0, 0.0);
    draw_cube(gl, &POLE, 10.0);
    gl.pop_matrix();

    gl.push_matrix();
    gl.translate(0.0, -60.0, 0.0);
    draw_sphere(gl, &LAMP, 5.0, 20, 20);
    gl.pop_matrix();
}

pub fn draw_scene<G: Gl>(gl: &mut G) {
    // Ground, a sphere squashed into a disc
    gl.push_matrix();
    gl.scale(1.0, 0.005, 1.0);
    draw_sphere(gl, &GRASS, 50.0, 50, 50);
    gl.pop_matrix();

    // Ground gallery
    gl.push_matrix();
    gl.scale(1.0, 0.01, 1.0);
    gl.translate(0.0, 1.0, 0.0);
    draw_torus(gl, &gallery(GALLERY_SHADES[0]), 0.5, 50.5, 50, 50);
    gl.pop_matrix();

    // First gallery
    gl.push_matrix();
    gl.scale(1.0, 0.01, 1.0);
    gl.translate(0.0, 25.0, 0.0);
    draw_torus(gl, &gallery(GALLERY_SHADES[1]), 0.5, 51.0, 50, 50);
    gl.pop_matrix();

    // Second gallery
    gl.push_matrix();
    gl.scale(1.0, 0.01, 1.0);
    gl.translate(0.0, 50.0, 0.0);
    draw_torus(gl, &gallery(GALLERY_SHADES[2]), 0.5, 51.5, 50, 50);
    gl.pop_matrix();

    // Third gallery
    gl.push_matrix();
    gl.scale(1.0, 0.01, 1.0);
    gl.translate(0.0, 75.0, 0.0);
    draw_torus(gl, &gallery(GALLERY_SHADES[3]), 0.5, 52.0, 50, 50);
    gl.pop_matrix();

    // Pitch
    gl.push_matrix();
    gl.scale(1.0, 0.01, 2.0);
    gl.translate(0.0, 50.0, 0.0);
    draw_cube(gl, &PITCH, 5.0);
    gl.pop_matrix();

    // Creases
    gl.push_matrix();
    gl.scale(1.0, 0.01, 0.01);
    gl.translate(0.0, 55.0, 850.0);
    draw_cube(gl, &WHITE, 5.0);
    gl.pop_matrix();

    gl.push_matrix();
    gl.scale(1.0, 0.01, 0.01);
    gl.translate(0.0, 55.0, -850.0);
    draw_cube(gl, &WHITE, 5.0);
    gl.pop_matrix();

    // Stumps at both ends
    gl.push_matrix();
    gl.translate(0.0, 0.0, 10.0);
    draw_stumps(gl);
    gl.pop_matrix();

    gl.push_matrix();
    gl.translate(0.0, 0.0, -10.0);
    draw_stumps(gl);
    gl.pop_matrix();

    // Flood lights: far left, far right, near left, near right
    gl.push_matrix();
    gl.translate(-30.0, 100.0, -40.0);
    draw_flood_light(gl);
    gl.pop_matrix();

    gl.push_matrix();
    gl.translate(30.0, 100.0, -40.0);
    draw_flood_light(gl);
    gl.pop_matrix();

    gl.push_matrix();
    gl.translate(-30.0, 100.0, 40.0);
    draw_flood_light(gl);
    gl.pop_matrix();

    gl.push_matrix();
    gl.translate(30.0, 100.0, 40.0);
    draw_flood_light(gl);
    gl.pop_matrix();
}

/// Loads the switchable lights into light units 0..LIGHT_COUNT.
pub fn apply_lights<G: Gl>(gl: &mut G, toggles: &LightToggles) {
    for (index, source) in toggles.sources().iter().enumerate() {
        gl.light(index, source);
    }
}
