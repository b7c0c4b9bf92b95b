use glam::Vec3;

/// Build an orthonormal basis whose third axis is `normal`.
///
/// Branchless construction from Duff et al., "Building an Orthonormal Basis,
/// Revisited" (2017). `normal` must be normalized; the returned triple
/// `(e1, e2, e3)` is right-handed with `e3 == normal`.
pub fn create_onb_from_z(normal: Vec3) -> (Vec3, Vec3, Vec3) {
    let sign = 1.0_f32.copysign(normal.z);
    let a = -1.0 / (sign + normal.z);
    let b = normal.x * normal.y * a;

    let e1 = Vec3::new(
        1.0 + sign * normal.x * normal.x * a,
        sign * b,
        -sign * normal.x,
    );
    let e2 = Vec3::new(b, sign + normal.y * normal.y * a, -normal.y);

    (e1, e2, normal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_orthonormal(normal: Vec3) {
        let (e1, e2, e3) = create_onb_from_z(normal);

        assert!(e3.abs_diff_eq(normal, 1e-6));

        assert!((e1.length() - 1.0).abs() < 1e-5);
        assert!((e2.length() - 1.0).abs() < 1e-5);
        assert!((e3.length() - 1.0).abs() < 1e-5);

        assert!(e1.dot(e2).abs() < 1e-5);
        assert!(e2.dot(e3).abs() < 1e-5);
        assert!(e3.dot(e1).abs() < 1e-5);

        // Right-handed
        assert!(e1.cross(e2).abs_diff_eq(e3, 1e-5));
    }

    #[test]
    fn test_onb_axes() {
        assert_orthonormal(Vec3::X);
        assert_orthonormal(Vec3::Y);
        assert_orthonormal(Vec3::Z);
        assert_orthonormal(Vec3::NEG_Z);
    }

    #[test]
    fn test_onb_oblique() {
        assert_orthonormal(Vec3::new(1.0, 2.0, 3.0).normalize());
        assert_orthonormal(Vec3::new(-0.3, 0.8, -0.5).normalize());
        assert_orthonormal(Vec3::new(0.01, -0.02, -1.0).normalize());
    }
}
