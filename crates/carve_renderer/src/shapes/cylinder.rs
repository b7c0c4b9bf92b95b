//! Closed cylinder primitive.

use std::sync::Arc;

use carve_math::{Ray, Transform, Vec2, Vec3};

use super::{azimuth_u, collect_hits, solve_quadratic, LocalHit, Shape, PARALLEL_EPSILON};
use crate::{HitRecord, Material};

/// Cylinder of radius 1 around the z axis, spanning `0 <= z <= 1`,
/// closed by two flat caps.
pub struct Cylinder {
    transform: Transform,
    material: Arc<Material>,
}

impl Cylinder {
    /// Create a new cylinder.
    pub fn new(transform: Transform, material: Arc<Material>) -> Self {
        Self {
            transform,
            material,
        }
    }

    /// Every crossing of the object-space ray with the side and the caps.
    fn local_hits(local_ray: &Ray) -> Vec<LocalHit> {
        let o = local_ray.origin;
        let d = local_ray.direction;
        let mut hits = Vec::with_capacity(4);

        // Side wall: x^2 + y^2 = 1
        let a = d.x * d.x + d.y * d.y;
        if a >= PARALLEL_EPSILON * PARALLEL_EPSILON {
            let half_b = o.x * d.x + o.y * d.y;
            let c = o.x * o.x + o.y * o.y - 1.0;
            if let Some((t1, t2)) = solve_quadratic(a, half_b, c) {
                for t in [t1, t2] {
                    let p = local_ray.at(t);
                    if (0.0..=1.0).contains(&p.z) {
                        let uv = Vec2::new(azimuth_u(p.x, p.y), p.z);
                        hits.push(LocalHit::new(t, Vec3::new(p.x, p.y, 0.0), uv));
                    }
                }
            }
        }

        // Caps at z = 0 and z = 1
        if d.z.abs() > PARALLEL_EPSILON {
            for (z, normal) in [(0.0, Vec3::NEG_Z), (1.0, Vec3::Z)] {
                let t = (z - o.z) / d.z;
                let p = local_ray.at(t);
                if p.x * p.x + p.y * p.y <= 1.0 {
                    let uv = Vec2::new((p.x + 1.0) / 2.0, (p.y + 1.0) / 2.0);
                    hits.push(LocalHit::new(t, normal, uv));
                }
            }
        }

        hits
    }
}

impl Shape for Cylinder {
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
        p.x * p.x + p.y * p.y < 1.0 && p.z > 0.0 && p.z < 1.0
    }

    fn quick_ray_intersection(&self, ray: &Ray) -> bool {
        let local_ray = self.transform.inverse().apply_to_ray(ray);
        Self::local_hits(&local_ray)
            .iter()
            .any(|hit| hit.t.is_finite() && local_ray.in_range(hit.t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cylinder(transform: Transform) -> Cylinder {
        Cylinder::new(transform, Arc::new(Material::default()))
    }

    #[test]
    fn test_hit_through_caps() {
        let cyl = cylinder(Transform::IDENTITY);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 2.0), Vec3::NEG_Z);

        let hits = cyl.ray_intersection_list(&ray);
        assert_eq!(hits.len(), 2);
        assert!((hits[0].t - 1.0).abs() < 1e-6);
        assert!((hits[1].t - 2.0).abs() < 1e-6);
        assert!(hits[0].world_point.abs_diff_eq(Vec3::Z, 1e-6));
        assert!(hits[0].normal.abs_diff_eq(Vec3::Z, 1e-6));
        assert!(hits[1].normal.abs_diff_eq(Vec3::Z, 1e-6));
        assert!(hits[0].surface_point.abs_diff_eq(Vec2::new(0.5, 0.5), 1e-6));
    }

    #[test]
    fn test_hit_through_side() {
        let cyl = cylinder(Transform::IDENTITY);
        let ray = Ray::new(Vec3::new(-2.0, 0.0, 0.5), Vec3::X);

        let hits = cyl.ray_intersection_list(&ray);
        assert_eq!(hits.len(), 2);
        assert!((hits[0].t - 1.0).abs() < 1e-6);
        assert!((hits[1].t - 3.0).abs() < 1e-6);
        assert!(hits[0].world_point.abs_diff_eq(Vec3::new(-1.0, 0.0, 0.5), 1e-6));
        assert!(hits[0].normal.abs_diff_eq(Vec3::NEG_X, 1e-6));
        assert!(hits[1].normal.abs_diff_eq(Vec3::NEG_X, 1e-6));

        // Far side is at azimuth 0, halfway up
        assert!(hits[1].surface_point.abs_diff_eq(Vec2::new(0.0, 0.5), 1e-6));

        let nearest = cyl.ray_intersection(&ray).unwrap();
        assert!(nearest.is_close(&hits[0], 1e-6));
    }

    #[test]
    fn test_side_then_cap() {
        let cyl = cylinder(Transform::IDENTITY);
        // Enters through the wall and leaves through the top
        let ray = Ray::new(Vec3::new(-2.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 1.0));

        let hits = cyl.ray_intersection_list(&ray);
        assert_eq!(hits.len(), 2);
        assert!((hits[0].t - 0.5).abs() < 1e-6);
        assert!(hits[0].world_point.abs_diff_eq(Vec3::new(-1.0, 0.0, 0.5), 1e-6));
        assert!((hits[1].t - 1.0).abs() < 1e-6);
        assert!(hits[1].world_point.abs_diff_eq(Vec3::new(0.0, 0.0, 1.0), 1e-6));
        assert!(hits[1].normal.abs_diff_eq(Vec3::NEG_Z, 1e-6));
    }

    #[test]
    fn test_misses() {
        let cyl = cylinder(Transform::IDENTITY);

        for ray in [
            Ray::new(Vec3::new(-2.0, 0.0, 1.5), Vec3::X),
            Ray::new(Vec3::new(2.0, 0.0, 2.0), Vec3::NEG_Z),
            Ray::new(Vec3::new(-2.0, 0.0, 0.5), Vec3::NEG_X),
        ] {
            assert!(cyl.ray_intersection(&ray).is_none());
            assert!(!cyl.quick_ray_intersection(&ray));
        }
        assert!(cyl.quick_ray_intersection(&Ray::new(Vec3::new(-2.0, 0.0, 0.5), Vec3::X)));
    }

    #[test]
    fn test_is_point_inside() {
        let cyl = cylinder(Transform::scaling(Vec3::new(2.0, 2.0, 3.0)));

        assert!(cyl.is_point_inside(Vec3::new(1.5, 0.0, 1.0)));
        assert!(cyl.is_point_inside(Vec3::new(0.0, 0.0, 2.9)));
        assert!(!cyl.is_point_inside(Vec3::new(0.0, 0.0, 3.1)));
        assert!(!cyl.is_point_inside(Vec3::new(1.5, 1.5, 1.0)));
        assert!(!cyl.is_point_inside(Vec3::new(0.0, 0.0, -0.1)));
    }
}
