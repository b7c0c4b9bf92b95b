//! Constructive solid geometry.
//!
//! A [`Csg`] node combines two solids with a boolean operation and is itself
//! a [`Shape`], so nodes nest into trees. Intersections are computed from the
//! children's full hit lists: each child hit survives only if it lies on the
//! boundary of the combined solid, which is decided by asking the other child
//! whether the hit point is inside it.

use carve_math::{Ray, Vec3};

use crate::{HitRecord, Shape};

/// Boolean operation applied by a [`Csg`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsgOperation {
    /// Points in A or in B
    Union,
    /// Points in A and not in B
    Difference,
    /// Points in both A and B
    Intersection,
}

impl CsgOperation {
    /// Whether a hit on child A survives, given B's containment of the hit point.
    fn keeps_a(self, inside_b: bool) -> bool {
        match self {
            Self::Union | Self::Difference => !inside_b,
            Self::Intersection => inside_b,
        }
    }

    /// Whether a hit on child B survives, given A's containment of the hit point.
    fn keeps_b(self, inside_a: bool) -> bool {
        match self {
            Self::Union => !inside_a,
            Self::Difference | Self::Intersection => inside_a,
        }
    }
}

/// Binary CSG node owning its two operands.
pub struct Csg {
    operation: CsgOperation,
    a: Box<dyn Shape>,
    b: Box<dyn Shape>,
}

impl Csg {
    /// Combine `a` and `b` with `operation`.
    pub fn new(operation: CsgOperation, a: Box<dyn Shape>, b: Box<dyn Shape>) -> Self {
        Self { operation, a, b }
    }

    pub fn union(a: Box<dyn Shape>, b: Box<dyn Shape>) -> Self {
        Self::new(CsgOperation::Union, a, b)
    }

    /// `a` with `b` carved out of it.
    pub fn difference(a: Box<dyn Shape>, b: Box<dyn Shape>) -> Self {
        Self::new(CsgOperation::Difference, a, b)
    }

    pub fn intersection(a: Box<dyn Shape>, b: Box<dyn Shape>) -> Self {
        Self::new(CsgOperation::Intersection, a, b)
    }

    pub fn operation(&self) -> CsgOperation {
        self.operation
    }
}

impl Shape for Csg {
    fn ray_intersection_list(&self, ray: &Ray) -> Vec<HitRecord<'_>> {
        let is_intersection = self.operation == CsgOperation::Intersection;

        let hits_a = self.a.ray_intersection_list(ray);
        if hits_a.is_empty() && is_intersection {
            return Vec::new();
        }

        let hits_b = self.b.ray_intersection_list(ray);
        if hits_b.is_empty() && is_intersection {
            return Vec::new();
        }

        let mut hits: Vec<HitRecord<'_>> = hits_a
            .into_iter()
            .filter(|hit| self.operation.keeps_a(self.b.is_point_inside(hit.world_point)))
            .chain(
                hits_b
                    .into_iter()
                    .filter(|hit| self.operation.keeps_b(self.a.is_point_inside(hit.world_point))),
            )
            .collect();

        // Stable: on equal t, A's hit stays ahead of B's
        hits.sort_by(|x, y| x.cmp_by_t(y));
        hits
    }

    fn is_point_inside(&self, point: Vec3) -> bool {
        let inside_a = self.a.is_point_inside(point);
        match self.operation {
            CsgOperation::Union => inside_a || self.b.is_point_inside(point),
            CsgOperation::Difference => inside_a && !self.b.is_point_inside(point),
            CsgOperation::Intersection => inside_a && self.b.is_point_inside(point),
        }
    }

    fn quick_ray_intersection(&self, ray: &Ray) -> bool {
        match self.operation {
            CsgOperation::Union => {
                self.a.quick_ray_intersection(ray) || self.b.quick_ray_intersection(ray)
            }
            _ => self.ray_intersection(ray).is_some(),
        }
    }
}
