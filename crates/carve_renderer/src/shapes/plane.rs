//! Infinite plane primitive.

use std::sync::Arc;

use carve_math::{Ray, Transform, Vec2, Vec3};

use super::{LocalHit, Shape, PARALLEL_EPSILON};
use crate::{HitRecord, Material};

/// The `z = 0` plane of its object space.
///
/// As a solid, the plane bounds the half-space `z < 0`.
pub struct Plane {
    transform: Transform,
    material: Arc<Material>,
}

impl Plane {
    /// Create a new plane.
    pub fn new(transform: Transform, material: Arc<Material>) -> Self {
        Self {
            transform,
            material,
        }
    }

    /// Object-space crossing parameter, or `None` if the ray runs parallel.
    fn crossing(local_ray: &Ray) -> Option<f32> {
        if local_ray.direction.z.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = -local_ray.origin.z / local_ray.direction.z;
        local_ray.in_range(t).then_some(t)
    }
}

impl Shape for Plane {
    fn ray_intersection(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        let local_ray = self.transform.inverse().apply_to_ray(ray);
        let t = Self::crossing(&local_ray)?;

        let p = local_ray.at(t);
        let uv = Vec2::new(p.x - p.x.floor(), p.y - p.y.floor());
        Some(LocalHit::new(t, Vec3::Z, uv).into_record(
            &self.transform,
            &self.material,
            ray,
            &local_ray,
        ))
    }

    fn ray_intersection_list(&self, ray: &Ray) -> Vec<HitRecord<'_>> {
        self.ray_intersection(ray).into_iter().collect()
    }

    fn is_point_inside(&self, point: Vec3) -> bool {
        self.transform.inverse().apply_to_point(point).z < 0.0
    }

    fn quick_ray_intersection(&self, ray: &Ray) -> bool {
        let local_ray = self.transform.inverse().apply_to_ray(ray);
        Self::crossing(&local_ray).is_some()
    }
}
