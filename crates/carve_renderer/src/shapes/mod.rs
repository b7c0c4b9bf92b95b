//! Shape trait and the geometric primitives.
//!
//! Every primitive lives in its own object space: a canonical unit-sized
//! surface placed in the world by a [`Transform`]. Intersection maps the
//! ray into object space with the inverse matrix, solves there, and maps
//! the hit back out.

mod box_shape;
mod cone;
mod cylinder;
mod plane;
mod sphere;

pub use box_shape::BoxShape;
pub use cone::Cone;
pub use cylinder::Cylinder;
pub use plane::Plane;
pub use sphere::Sphere;

use std::f32::consts::PI;

use carve_math::{Ray, Transform, Vec2, Vec3};

use crate::{HitRecord, Material};

/// Below this magnitude a ray component counts as parallel to an axis.
pub(crate) const PARALLEL_EPSILON: f32 = 1e-5;

/// Trait for solids that can be hit by rays.
///
/// Besides surface intersection, every shape answers point-containment
/// queries, which is what lets CSG nodes combine them.
pub trait Shape: Send + Sync {
    /// Nearest intersection with `t` within the ray's range.
    fn ray_intersection(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        self.ray_intersection_list(ray).into_iter().next()
    }

    /// All intersections within the ray's range, sorted by ascending `t`.
    fn ray_intersection_list(&self, ray: &Ray) -> Vec<HitRecord<'_>>;

    /// True if the world-space `point` lies strictly inside the solid.
    fn is_point_inside(&self, point: Vec3) -> bool;

    /// True if the ray hits the shape at all.
    fn quick_ray_intersection(&self, ray: &Ray) -> bool {
        self.ray_intersection(ray).is_some()
    }
}

/// An intersection found in object space, before mapping to world space.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LocalHit {
    pub t: f32,
    /// Outward normal in object space (any length)
    pub normal: Vec3,
    pub uv: Vec2,
}

impl LocalHit {
    pub fn new(t: f32, normal: Vec3, uv: Vec2) -> Self {
        Self { t, normal, uv }
    }

    /// Map to world space, flipping the normal to face the incoming ray.
    pub fn into_record<'a>(
        self,
        transform: &Transform,
        material: &'a Material,
        world_ray: &Ray,
        local_ray: &Ray,
    ) -> HitRecord<'a> {
        // n'·d' == n·d for a normal/vector pair mapped by the same transform,
        // so orientation can be decided in object space.
        let normal = if self.normal.dot(local_ray.direction) > 0.0 {
            -self.normal
        } else {
            self.normal
        };

        HitRecord {
            world_point: transform.apply_to_point(local_ray.at(self.t)),
            normal: transform.apply_to_normal(normal).normalize(),
            surface_point: self.uv,
            t: self.t,
            ray: *world_ray,
            material,
        }
    }
}

/// Map object-space hits to records, keeping only those in range, nearest first.
pub(crate) fn collect_hits<'a>(
    mut hits: Vec<LocalHit>,
    transform: &Transform,
    material: &'a Material,
    world_ray: &Ray,
    local_ray: &Ray,
) -> Vec<HitRecord<'a>> {
    hits.retain(|hit| hit.t.is_finite() && local_ray.in_range(hit.t));
    hits.sort_by(|a, b| a.t.total_cmp(&b.t));
    hits.into_iter()
        .map(|hit| hit.into_record(transform, material, world_ray, local_ray))
        .collect()
}

/// Real roots of `a t^2 + 2 half_b t + c = 0`, smaller first.
pub(crate) fn solve_quadratic(a: f32, half_b: f32, c: f32) -> Option<(f32, f32)> {
    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();
    let t1 = (-half_b - sqrtd) / a;
    let t2 = (-half_b + sqrtd) / a;
    Some((t1.min(t2), t1.max(t2)))
}

/// Azimuth of `(x, y)` around the z axis, normalized to [0, 1).
pub(crate) fn azimuth_u(x: f32, y: f32) -> f32 {
    let u = y.atan2(x) / (2.0 * PI);
    if u < 0.0 {
        u + 1.0
    } else {
        u
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_quadratic() {
        // (t - 1)(t - 3) = t^2 - 4t + 3
        let (t1, t2) = solve_quadratic(1.0, -2.0, 3.0).unwrap();
        assert!((t1 - 1.0).abs() < 1e-6);
        assert!((t2 - 3.0).abs() < 1e-6);

        // Negative leading coefficient still returns ascending roots
        let (t1, t2) = solve_quadratic(-1.0, 2.0, -3.0).unwrap();
        assert!((t1 - 1.0).abs() < 1e-6);
        assert!((t2 - 3.0).abs() < 1e-6);

        assert!(solve_quadratic(1.0, 0.0, 1.0).is_none());
    }

    #[test]
    fn test_azimuth_u() {
        assert_eq!(azimuth_u(1.0, 0.0), 0.0);
        assert!((azimuth_u(0.0, 1.0) - 0.25).abs() < 1e-6);
        assert!((azimuth_u(-1.0, 1e-7) - 0.5).abs() < 1e-6);
        assert!((azimuth_u(0.0, -1.0) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_local_hit_faces_ray() {
        let material = Material::default();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 2.0), Vec3::NEG_Z);

        // Outward normal along the ray gets flipped
        let hit = LocalHit::new(1.0, Vec3::NEG_Z, Vec2::ZERO).into_record(
            &Transform::IDENTITY,
            &material,
            &ray,
            &ray,
        );
        assert!(hit.normal.abs_diff_eq(Vec3::Z, 1e-6));
        assert!(hit.world_point.abs_diff_eq(Vec3::new(0.0, 0.0, 1.0), 1e-6));
    }
}
