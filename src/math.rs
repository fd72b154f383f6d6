use glam::{Mat4, Vec3, Vec4};

const DEGENERATE_EPSILON: f32 = 1e-8;

/// Edge function used in rasterization
pub fn edge_function(a: &[f32; 2], b: &[f32; 2], c: &[f32; 2]) -> f32 {
    (c[0] - a[0]) * (b[1] - a[1]) - (c[1] - a[1]) * (b[0] - a[0])
}

/// Calculates the face normal of a triangle as `(b - a) x (c - a)`.
///
/// The result is not normalized; its length is twice the triangle's area.
/// The pipeline normalizes normals before lighting, so callers may emit it as is.
pub fn calculate_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    let u = b - a;
    let v = c - a;
    Vec3::new(
        u.y * v.z - u.z * v.y,
        u.z * v.x - u.x * v.z,
        u.x * v.y - u.y * v.x,
    )
}

/// Builds a perspective projection for the given near-plane window, matching `glFrustum`.
pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let width = right - left;
    let height = top - bottom;
    let depth = far - near;
    Mat4::from_cols(
        Vec4::new(2.0 * near / width, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 * near / height, 0.0, 0.0),
        Vec4::new(
            (right + left) / width,
            (top + bottom) / height,
            -(far + near) / depth,
            -1.0,
        ),
        Vec4::new(0.0, 0.0, -2.0 * far * near / depth, 0.0),
    )
}

/// Builds a view matrix like `gluLookAt`.
///
/// A zero view direction looks down -Z, and an up vector that is zero or
/// parallel to the view direction is replaced by world Y (or Z when looking
/// straight along Y).
pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4 {
    let mut forward = center - eye;
    if forward.length_squared() < DEGENERATE_EPSILON {
        forward = Vec3::NEG_Z;
    }

    let mut up = up;
    if forward.cross(up).length_squared() < DEGENERATE_EPSILON {
        up = if forward.cross(Vec3::Y).length_squared() < DEGENERATE_EPSILON {
            Vec3::Z
        } else {
            Vec3::Y
        };
    }

    Mat4::look_to_rh(eye, forward, up)
}

/// Rotation by `angle_degrees` about `axis`, like `glRotatef`.
///
/// The axis does not need to be normalized; a zero axis yields the identity.
pub fn rotation(angle_degrees: f32, axis: Vec3) -> Mat4 {
    match axis.try_normalize() {
        Some(axis) => Mat4::from_axis_angle(axis, angle_degrees.to_radians()),
        None => Mat4::IDENTITY,
    }
}

/// Converts a 0-1 float colour to RGBA8, clamping each channel
pub fn to_rgba8(color: Vec4) -> [u8; 4] {
    let c = color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0;
    [
        c.x.round() as u8,
        c.y.round() as u8,
        c.z.round() as u8,
        c.w.round() as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_normal_of_unit_triangle_points_along_z() {
        let n = calculate_normal(Vec3::ZERO, Vec3::X, Vec3::Y);
        assert_eq!(n, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_normal_is_not_normalized() {
        let n = calculate_normal(Vec3::ZERO, Vec3::X * 2.0, Vec3::Y * 3.0);
        assert_eq!(n, Vec3::new(0.0, 0.0, 6.0));
    }

    #[test]
    fn test_normal_flips_with_winding() {
        let n = calculate_normal(Vec3::ZERO, Vec3::Y, Vec3::X);
        assert_eq!(n, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_edge_function_sign() {
        let a = [0.0, 0.0];
        let b = [4.0, 0.0];
        assert!(edge_function(&a, &b, &[1.0, 1.0]) < 0.0);
        assert!(edge_function(&a, &b, &[1.0, -1.0]) > 0.0);
        assert_eq!(edge_function(&a, &b, &[2.0, 0.0]), 0.0);
    }

    #[test]
    fn test_frustum_maps_near_and_far_planes() {
        let m = frustum(-10.0, 10.0, -10.0, 10.0, 5.0, 200.0);

        let near = m * Vec4::new(10.0, 10.0, -5.0, 1.0);
        let near = near / near.w;
        assert!((near.x - 1.0).abs() < 1e-5);
        assert!((near.y - 1.0).abs() < 1e-5);
        assert!((near.z + 1.0).abs() < 1e-5);

        let far = m * Vec4::new(0.0, 0.0, -200.0, 1.0);
        assert!((far.z / far.w - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_look_at_moves_target_onto_negative_z() {
        let view = look_at(Vec3::new(0.0, 0.0, 50.0), Vec3::ZERO, Vec3::Y);
        let target = view.transform_point3(Vec3::ZERO);
        assert!(approx(target, Vec3::new(0.0, 0.0, -50.0)));
    }

    #[test]
    fn test_look_at_survives_zero_up_vector() {
        let view = look_at(Vec3::new(0.0, 0.0, 50.0), Vec3::ZERO, Vec3::ZERO);
        assert!(view.is_finite());
        let target = view.transform_point3(Vec3::ZERO);
        assert!(approx(target, Vec3::new(0.0, 0.0, -50.0)));
    }

    #[test]
    fn test_look_at_survives_coincident_eye_and_target() {
        let view = look_at(Vec3::ONE, Vec3::ONE, Vec3::Y);
        assert!(view.is_finite());
    }

    #[test]
    fn test_rotation_about_zero_axis_is_identity() {
        assert_eq!(rotation(45.0, Vec3::ZERO), Mat4::IDENTITY);
    }

    #[test]
    fn test_rotation_normalizes_axis() {
        let m = rotation(90.0, Vec3::new(0.0, 5.0, 0.0));
        assert!(approx(m.transform_point3(Vec3::X), Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_to_rgba8_clamps() {
        assert_eq!(to_rgba8(Vec4::new(2.0, -1.0, 0.5, 1.0)), [255, 0, 128, 255]);
    }
}
