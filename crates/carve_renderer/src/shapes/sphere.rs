//! Sphere primitive for ray tracing.

use std::f32::consts::PI;
use std::sync::Arc;

use carve_math::{Ray, Transform, Vec2, Vec3};

use super::{azimuth_u, collect_hits, solve_quadratic, LocalHit, Shape};
use crate::{HitRecord, Material};

/// A unit sphere centered on the origin of its object space.
pub struct Sphere {
    transform: Transform,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(transform: Transform, material: Arc<Material>) -> Self {
        Self {
            transform,
            material,
        }
    }

    /// Parameters where the object-space ray crosses the unit sphere.
    fn roots(local_ray: &Ray) -> Option<(f32, f32)> {
        let origin = local_ray.origin;
        let dir = local_ray.direction;
        solve_quadratic(
            dir.length_squared(),
            origin.dot(dir),
            origin.length_squared() - 1.0,
        )
    }

    /// Hit at parameter `t`; the outward normal of the unit sphere is the point itself.
    fn local_hit(local_ray: &Ray, t: f32) -> LocalHit {
        let p = local_ray.at(t);
        let u = azimuth_u(p.x, p.y);
        let v = p.z.clamp(-1.0, 1.0).acos() / PI;
        LocalHit::new(t, p, Vec2::new(u, v))
    }
}

impl Shape for Sphere {
    fn ray_intersection(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        let local_ray = self.transform.inverse().apply_to_ray(ray);
        let (t1, t2) = Self::roots(&local_ray)?;

        // Find the nearest root in the acceptable range
        let t = if local_ray.in_range(t1) {
            t1
        } else if local_ray.in_range(t2) {
            t2
        } else {
            return None;
        };

        Some(Self::local_hit(&local_ray, t).into_record(
            &self.transform,
            &self.material,
            ray,
            &local_ray,
        ))
    }

    fn ray_intersection_list(&self, ray: &Ray) -> Vec<HitRecord<'_>> {
        let local_ray = self.transform.inverse().apply_to_ray(ray);
        let Some((t1, t2)) = Self::roots(&local_ray) else {
            return Vec::new();
        };

        let hits = vec![
            Self::local_hit(&local_ray, t1),
            Self::local_hit(&local_ray, t2),
        ];
        collect_hits(hits, &self.transform, &self.material, ray, &local_ray)
    }

    fn is_point_inside(&self, point: Vec3) -> bool {
        self.transform
            .inverse()
            .apply_to_point(point)
            .length_squared()
            < 1.0
    }

    fn quick_ray_intersection(&self, ray: &Ray) -> bool {
        let local_ray = self.transform.inverse().apply_to_ray(ray);
        match Self::roots(&local_ray) {
            Some((t1, t2)) => local_ray.in_range(t1) || local_ray.in_range(t2),
            None => false,
        }
    }
}
