//! Axis-aligned box primitive, intersected with the slab method.

use std::sync::Arc;

use carve_math::{Ray, Transform, Vec2, Vec3};

use super::{collect_hits, LocalHit, Shape, PARALLEL_EPSILON};
use crate::{HitRecord, Material};

/// A box aligned with the axes of its object space.
pub struct BoxShape {
    min: Vec3,
    max: Vec3,
    transform: Transform,
    material: Arc<Material>,
}

impl BoxShape {
    /// Default corners when none are given: the cube `[-1, 1]^3`.
    pub const DEFAULT_MIN: Vec3 = Vec3::splat(-1.0);
    pub const DEFAULT_MAX: Vec3 = Vec3::splat(1.0);

    /// Create the default `[-1, 1]^3` box.
    pub fn new(transform: Transform, material: Arc<Material>) -> Self {
        Self::with_corners(Self::DEFAULT_MIN, Self::DEFAULT_MAX, transform, material)
    }

    /// Create a box spanning two opposite corners, given in any order.
    pub fn with_corners(a: Vec3, b: Vec3, transform: Transform, material: Arc<Material>) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
            transform,
            material,
        }
    }

    /// Entry and exit of the ray through the box: `(t, axis)` pairs.
    fn slabs(&self, local_ray: &Ray) -> Option<((f32, usize), (f32, usize))> {
        let origin = local_ray.origin;
        let dir = local_ray.direction;

        let mut near = (f32::NEG_INFINITY, 0);
        let mut far = (f32::INFINITY, 0);

        for axis in 0..3 {
            if dir[axis].abs() < PARALLEL_EPSILON {
                // Parallel to this slab: either always between its planes or never
                if origin[axis] < self.min[axis] || origin[axis] > self.max[axis] {
                    return None;
                }
                continue;
            }

            let t0 = (self.min[axis] - origin[axis]) / dir[axis];
            let t1 = (self.max[axis] - origin[axis]) / dir[axis];
            let (t_enter, t_exit) = if t0 < t1 { (t0, t1) } else { (t1, t0) };

            if t_enter > near.0 {
                near = (t_enter, axis);
            }
            if t_exit < far.0 {
                far = (t_exit, axis);
            }
            if near.0 > far.0 {
                return None;
            }
        }

        Some((near, far))
    }

    /// Hit on the face perpendicular to `axis`; uv spans the face's extent.
    fn local_hit(&self, local_ray: &Ray, t: f32, axis: usize) -> LocalHit {
        let p = local_ray.at(t);
        let (a, b) = ((axis + 1) % 3, (axis + 2) % 3);
        let extent = self.max - self.min;

        let u = ((p[a] - self.min[a]) / extent[a]).clamp(0.0, 1.0);
        let v = ((p[b] - self.min[b]) / extent[b]).clamp(0.0, 1.0);

        let mut normal = Vec3::ZERO;
        normal[axis] = 1.0;
        LocalHit::new(t, normal, Vec2::new(u, v))
    }
}

impl Shape for BoxShape {
    fn ray_intersection_list(&self, ray: &Ray) -> Vec<HitRecord<'_>> {
        let local_ray = self.transform.inverse().apply_to_ray(ray);
        let Some(((t_near, near_axis), (t_far, far_axis))) = self.slabs(&local_ray) else {
            return Vec::new();
        };

        let hits = vec![
            self.local_hit(&local_ray, t_near, near_axis),
            self.local_hit(&local_ray, t_far, far_axis),
        ];
        collect_hits(hits, &self.transform, &self.material, ray, &local_ray)
    }

    fn is_point_inside(&self, point: Vec3) -> bool {
        let p = self.transform.inverse().apply_to_point(point);
        p.cmpgt(self.min).all() && p.cmplt(self.max).all()
    }

    fn quick_ray_intersection(&self, ray: &Ray) -> bool {
        let local_ray = self.transform.inverse().apply_to_ray(ray);
        match self.slabs(&local_ray) {
            Some(((t_near, _), (t_far, _))) => {
                (t_near.is_finite() && local_ray.in_range(t_near))
                    || (t_far.is_finite() && local_ray.in_range(t_far))
            }
            None => false,
        }
    }
}
