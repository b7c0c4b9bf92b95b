// Affine transformations for ray tracing.
//
// A Transform keeps the forward matrix and its inverse side by side, so
// shapes can move rays into object space and hits back out without ever
// inverting a matrix during rendering.

use std::ops::Mul;

use glam::{Mat4, Vec3, Vec4};

use crate::Ray;

/// An invertible affine transformation with a cached inverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    m: Mat4,
    inv: Mat4,
}

impl Transform {
    /// The identity transformation.
    pub const IDENTITY: Transform = Transform {
        m: Mat4::IDENTITY,
        inv: Mat4::IDENTITY,
    };

    /// Create a transform from a matrix and its known inverse.
    ///
    /// The pair is not validated in release builds; a mismatched inverse
    /// silently corrupts every downstream intersection.
    pub fn new(m: Mat4, inv: Mat4) -> Self {
        let transform = Self { m, inv };
        debug_assert!(
            transform.is_consistent(),
            "matrix and inverse do not multiply to identity"
        );
        transform
    }

    /// Create a transform from a matrix, computing its inverse.
    pub fn from_matrix(m: Mat4) -> Self {
        Self::new(m, m.inverse())
    }

    /// Translation by `offset`.
    pub fn translation(offset: Vec3) -> Self {
        Self::new(
            Mat4::from_translation(offset),
            Mat4::from_translation(-offset),
        )
    }

    /// Non-uniform scaling. All components must be non-zero.
    pub fn scaling(factors: Vec3) -> Self {
        Self::new(
            Mat4::from_scale(factors),
            Mat4::from_scale(factors.recip()),
        )
    }

    /// Rotation around the X axis, angle in degrees.
    pub fn rotation_x(degrees: f32) -> Self {
        let m = Mat4::from_rotation_x(degrees.to_radians());
        Self::new(m, m.transpose())
    }

    /// Rotation around the Y axis, angle in degrees.
    pub fn rotation_y(degrees: f32) -> Self {
        let m = Mat4::from_rotation_y(degrees.to_radians());
        Self::new(m, m.transpose())
    }

    /// Rotation around the Z axis, angle in degrees.
    pub fn rotation_z(degrees: f32) -> Self {
        let m = Mat4::from_rotation_z(degrees.to_radians());
        Self::new(m, m.transpose())
    }

    /// The forward matrix.
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        self.m
    }

    /// The cached inverse matrix.
    #[inline]
    pub fn inverse_matrix(&self) -> Mat4 {
        self.inv
    }

    /// The inverse transformation. O(1): the cached matrices swap roles.
    #[inline]
    pub fn inverse(&self) -> Self {
        Self {
            m: self.inv,
            inv: self.m,
        }
    }

    /// Compose two transforms: `self` applied after `other`.
    pub fn compose(&self, other: &Transform) -> Self {
        Self {
            m: self.m * other.m,
            inv: other.inv * self.inv,
        }
    }

    /// True if `M · Minv` is the identity within 1e-5.
    pub fn is_consistent(&self) -> bool {
        (self.m * self.inv).abs_diff_eq(Mat4::IDENTITY, 1e-5)
    }

    /// Compare both matrices element-wise within `epsilon`.
    pub fn is_close(&self, other: &Transform, epsilon: f32) -> bool {
        self.m.abs_diff_eq(other.m, epsilon) && self.inv.abs_diff_eq(other.inv, epsilon)
    }

    /// Map a point, including translation and homogeneous normalization.
    pub fn apply_to_point(&self, point: Vec3) -> Vec3 {
        let p = self.m * point.extend(1.0);
        if p.w == 1.0 {
            p.truncate()
        } else {
            p.truncate() / p.w
        }
    }

    /// Map a free vector (w = 0): translation has no effect.
    pub fn apply_to_vector(&self, vector: Vec3) -> Vec3 {
        (self.m * Vec4::new(vector.x, vector.y, vector.z, 0.0)).truncate()
    }

    /// Map a surface normal through the inverse-transpose of the linear part.
    ///
    /// The result is not renormalized.
    pub fn apply_to_normal(&self, normal: Vec3) -> Vec3 {
        let inv = self.inv;
        Vec3::new(
            inv.x_axis.x * normal.x + inv.x_axis.y * normal.y + inv.x_axis.z * normal.z,
            inv.y_axis.x * normal.x + inv.y_axis.y * normal.y + inv.y_axis.z * normal.z,
            inv.z_axis.x * normal.x + inv.z_axis.y * normal.y + inv.z_axis.z * normal.z,
        )
    }

    /// Map a ray's origin and direction; range and depth are kept.
    pub fn apply_to_ray(&self, ray: &Ray) -> Ray {
        Ray {
            origin: self.apply_to_point(ray.origin),
            direction: self.apply_to_vector(ray.direction),
            ..*ray
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        self.compose(&rhs)
    }
}
