//! Closed cone primitive.

use std::sync::Arc;

use carve_math::{Ray, Transform, Vec2, Vec3};

use super::{azimuth_u, collect_hits, solve_quadratic, LocalHit, Shape, PARALLEL_EPSILON};
use crate::{HitRecord, Material};

/// Cone with its base of radius 1 on `z = 0` and its apex at `(0, 0, 1)`,
/// closed by the base disk.
pub struct Cone {
    transform: Transform,
    material: Arc<Material>,
}

impl Cone {
    /// Create a new cone.
    pub fn new(transform: Transform, material: Arc<Material>) -> Self {
        Self {
            transform,
            material,
        }
    }

    /// Parameters where the ray meets the infinite double cone `x^2 + y^2 = (1 - z)^2`.
    fn lateral_roots(local_ray: &Ray) -> Vec<f32> {
        let o = local_ray.origin;
        let d = local_ray.direction;
        let h = 1.0 - o.z;

        let a = d.x * d.x + d.y * d.y - d.z * d.z;
        let half_b = o.x * d.x + o.y * d.y + h * d.z;
        let c = o.x * o.x + o.y * o.y - h * h;

        if a.abs() < PARALLEL_EPSILON {
            // Ray parallel to a generating line: the equation degenerates to linear
            if half_b.abs() < PARALLEL_EPSILON {
                return Vec::new();
            }
            return vec![-c / (2.0 * half_b)];
        }

        match solve_quadratic(a, half_b, c) {
            Some((t1, t2)) => vec![t1, t2],
            None => Vec::new(),
        }
    }

    fn local_hits(local_ray: &Ray) -> Vec<LocalHit> {
        let mut hits = Vec::with_capacity(3);

        for t in Self::lateral_roots(local_ray) {
            let p = local_ray.at(t);
            if !(0.0..=1.0).contains(&p.z) {
                continue;
            }

            let normal = Vec3::new(p.x, p.y, 1.0 - p.z);
            let normal = if normal.length_squared() < PARALLEL_EPSILON * PARALLEL_EPSILON {
                Vec3::Z
            } else {
                normal
            };
            hits.push(LocalHit::new(t, normal, Vec2::new(azimuth_u(p.x, p.y), p.z)));
        }

        // Base disk
        let d = local_ray.direction;
        if d.z.abs() > PARALLEL_EPSILON {
            let t = -local_ray.origin.z / d.z;
            let p = local_ray.at(t);
            if p.x * p.x + p.y * p.y <= 1.0 {
                let uv = Vec2::new((p.x + 1.0) / 2.0, (p.y + 1.0) / 2.0);
                hits.push(LocalHit::new(t, Vec3::NEG_Z, uv));
            }
        }

        hits
    }
}

impl Shape for Cone {
    fn ray_intersection_list(&self, ray: &Ray) -> Vec<HitRecord<'_>> {
        let local_ray = self.transform.inverse().apply_to_ray(ray);
        collect_hits(
            Self::local_hits(&local_ray),
            &self.transform,
            &self.material,
            ray,
            &local_ray,
        )
    }

    fn is_point_inside(&self, point: Vec3) -> bool {
        let p = self.transform.inverse().apply_to_point(point);
        let radius = 1.0 - p.z;
        p.z > 0.0 && p.z < 1.0 && p.x * p.x + p.y * p.y < radius * radius
    }

    fn quick_ray_intersection(&self, ray: &Ray) -> bool {
        let local_ray = self.transform.inverse().apply_to_ray(ray);
        Self::local_hits(&local_ray)
            .iter()
            .any(|hit| hit.t.is_finite() && local_ray.in_range(hit.t))
    }
}
