//! HitRecord: the result of a ray-surface intersection.

use std::cmp::Ordering;

use carve_math::{Ray, Vec2, Vec3};

use crate::Material;

/// Record of a ray-object intersection.
///
/// Records are ordered by `t`: sorting a list puts the nearest hit first.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection, in world space
    pub world_point: Vec3,
    /// Unit surface normal in world space (always points against the ray)
    pub normal: Vec3,
    /// Surface (u, v) coordinates, used for pigment lookup
    pub surface_point: Vec2,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// The ray that produced this hit
    pub ray: Ray,
    /// Material of the primitive that was hit
    pub material: &'a Material,
}

impl<'a> HitRecord<'a> {
    /// Compare geometry within `epsilon`. The material is ignored.
    pub fn is_close(&self, other: &HitRecord, epsilon: f32) -> bool {
        self.world_point.abs_diff_eq(other.world_point, epsilon)
            && self.normal.abs_diff_eq(other.normal, epsilon)
            && self.surface_point.abs_diff_eq(other.surface_point, epsilon)
            && (self.t - other.t).abs() < epsilon
            && self.ray.is_close(&other.ray, epsilon)
    }

    /// Total order by `t`, nearest first.
    #[inline]
    pub fn cmp_by_t(&self, other: &HitRecord) -> Ordering {
        self.t.total_cmp(&other.t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(material: &Material, t: f32) -> HitRecord<'_> {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        HitRecord {
            world_point: ray.at(t),
            normal: Vec3::NEG_X,
            surface_point: Vec2::new(0.5, 0.5),
            t,
            ray,
            material,
        }
    }

    #[test]
    fn test_is_close() {
        let material = Material::default();
        let a = record(&material, 1.0);
        let b = record(&material, 1.0);
        let c = record(&material, 2.0);

        assert!(a.is_close(&b, 1e-5));
        assert!(!a.is_close(&c, 1e-5));
    }

    #[test]
    fn test_sort_by_t_is_stable() {
        let first = Material::default();
        let second = Material::default();
        let mut hits = vec![
            record(&first, 3.0),
            record(&first, 1.0),
            record(&second, 1.0),
            record(&second, 2.0),
        ];

        hits.sort_by(|a, b| a.cmp_by_t(b));

        let ts: Vec<f32> = hits.iter().map(|h| h.t).collect();
        assert_eq!(ts, vec![1.0, 1.0, 2.0, 3.0]);

        // Equal t keeps insertion order
        assert!(std::ptr::eq(hits[0].material, &first));
        assert!(std::ptr::eq(hits[1].material, &second));
    }
}
