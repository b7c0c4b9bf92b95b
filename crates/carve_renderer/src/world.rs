//! The scene: a flat list of shapes tested one by one.

use carve_math::{Ray, Vec3};

use crate::{HitRecord, Shape};

/// A list of shapes to render.
///
/// Shapes are appended while the scene is built and only read afterwards,
/// so a `&World` can be shared between render threads.
pub struct World {
    shapes: Vec<Box<dyn Shape>>,
}

impl World {
    /// Create a new empty world.
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Add a shape to the world.
    pub fn add_shape(&mut self, shape: Box<dyn Shape>) {
        self.shapes.push(shape);
        log::debug!("World now holds {} shapes", self.shapes.len());
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Check if the world is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Nearest hit over all shapes. On equal `t`, the shape added first wins.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for shape in &self.shapes {
            if let Some(hit) = shape.ray_intersection(ray) {
                if closest.map_or(true, |best| hit.t < best.t) {
                    closest = Some(hit);
                }
            }
        }

        closest
    }

    /// True if any shape is hit by the ray.
    pub fn quick_ray_intersection(&self, ray: &Ray) -> bool {
        self.shapes.iter().any(|shape| shape.quick_ray_intersection(ray))
    }

    /// True if any shape contains the point.
    pub fn is_point_inside(&self, point: Vec3) -> bool {
        self.shapes.iter().any(|shape| shape.is_point_inside(point))
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
