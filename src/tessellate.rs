//! Sphere and torus meshes, laid out the way GLUT's solid shapes are.

use glam::Vec3;
use std::f32::consts::{PI, TAU};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    pub position: Vec3,
    pub normal: Vec3,
}

/// Indexed triangle list
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    pub triangles: Vec<[usize; 3]>,
}

impl Mesh {
    /// Connects a `rows x columns` grid of vertices (row-major) into quads,
    /// two triangles each.
    fn stitch_grid(&mut self, rows: usize, columns: usize) {
        for row in 0..rows - 1 {
            for col in 0..columns - 1 {
                let a = row * columns + col;
                let b = a + columns;
                self.triangles.push([a, b, a + 1]);
                self.triangles.push([a + 1, b, b + 1]);
            }
        }
    }
}

/// Sphere around the Z axis: `slices` around it, `stacks` from +Z to -Z.
///
/// Returns an empty mesh for fewer than 3 slices or 2 stacks.
pub fn sphere(radius: f32, slices: u32, stacks: u32) -> Mesh {
    let mut mesh = Mesh::default();
    if slices < 3 || stacks < 2 {
        return mesh;
    }

    for stack in 0..=stacks {
        let phi = PI * stack as f32 / stacks as f32;
        let (sin_phi, cos_phi) = phi.sin_cos();
        for slice in 0..=slices {
            let theta = TAU * slice as f32 / slices as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            let normal = Vec3::new(cos_theta * sin_phi, sin_theta * sin_phi, cos_phi);
            mesh.vertices.push(MeshVertex {
                position: normal * radius,
                normal,
            });
        }
    }

    mesh.stitch_grid(stacks as usize + 1, slices as usize + 1);
    mesh
}

/// Torus in the XY plane around the Z axis, with a tube of `inner_radius`
/// swept along a circle of `outer_radius`.
///
/// Returns an empty mesh for fewer than 3 sides or 3 rings.
pub fn torus(inner_radius: f32, outer_radius: f32, sides: u32, rings: u32) -> Mesh {
    let mut mesh = Mesh::default();
    if sides < 3 || rings < 3 {
        return mesh;
    }

    for ring in 0..=rings {
        let phi = TAU * ring as f32 / rings as f32;
        let (sin_phi, cos_phi) = phi.sin_cos();
        for side in 0..=sides {
            let theta = TAU * side as f32 / sides as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            let distance = outer_radius + cos_theta * inner_radius;
            mesh.vertices.push(MeshVertex {
                position: Vec3::new(cos_phi * distance, sin_phi * distance, sin_theta * inner_radius),
                normal: Vec3::new(cos_phi * cos_theta, sin_phi * cos_theta, sin_theta),
            });
        }
    }

    mesh.stitch_grid(rings as usize + 1, sides as usize + 1);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_vertices_lie_on_radius() {
        let mesh = sphere(5.0, 20, 20);
        assert_eq!(mesh.vertices.len(), 21 * 21);
        assert_eq!(mesh.triangles.len(), 20 * 20 * 2);
        for v in &mesh.vertices {
            assert!((v.position.length() - 5.0).abs() < 1e-4);
            assert!((v.normal.length() - 1.0).abs() < 1e-5);
            assert!(v.normal.dot(v.position) > 0.0);
        }
    }

    #[test]
    fn test_sphere_spans_poles_along_z() {
        let mesh = sphere(2.0, 8, 4);
        let first = mesh.vertices.first().unwrap().position;
        let last = mesh.vertices.last().unwrap().position;
        assert!((first - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-5);
        assert!((last - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-5);
    }

    #[test]
    fn test_torus_vertices_lie_on_tube() {
        let mesh = torus(0.5, 50.5, 50, 50);
        assert_eq!(mesh.triangles.len(), 50 * 50 * 2);
        for v in &mesh.vertices {
            let ring_point = Vec3::new(v.position.x, v.position.y, 0.0).normalize() * 50.5;
            let tube = (v.position - ring_point).length();
            assert!((tube - 0.5).abs() < 1e-3, "tube radius {tube}");
            assert!((v.normal.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_torus_lies_in_xy_plane() {
        let mesh = torus(1.0, 10.0, 12, 24);
        for v in &mesh.vertices {
            assert!(v.position.z.abs() <= 1.0 + 1e-5);
        }
    }

    #[test]
    fn test_indices_stay_in_bounds() {
        for mesh in [sphere(1.0, 7, 5), torus(0.2, 1.0, 5, 9)] {
            let n = mesh.vertices.len();
            assert!(mesh.triangles.iter().flatten().all(|&i| i < n));
        }
    }

    #[test]
    fn test_degenerate_counts_give_empty_mesh() {
        assert!(sphere(1.0, 2, 10).triangles.is_empty());
        assert!(sphere(1.0, 10, 1).vertices.is_empty());
        assert!(torus(0.5, 1.0, 2, 10).triangles.is_empty());
    }
}
