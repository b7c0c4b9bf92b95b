use crate::Vec3;

/// Default lower bound of the ray parameter, guarding against a surface
/// intersecting the ray that just left it.
pub const DEFAULT_TMIN: f32 = 1e-5;

/// A ray in 3D space with a valid parameter range and a recursion depth.
///
/// Rays are plain values: transforming or extending one produces a new ray.
/// `depth` counts how many scattering events produced this ray (0 for
/// primary rays leaving the camera).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub tmin: f32,
    pub tmax: f32,
    pub depth: u32,
}

impl Ray {
    /// Create a primary ray with the default range `[DEFAULT_TMIN, +inf]`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            tmin: DEFAULT_TMIN,
            tmax: f32::INFINITY,
            depth: 0,
        }
    }

    /// Same ray with a different parameter range.
    pub fn with_range(self, tmin: f32, tmax: f32) -> Self {
        Self { tmin, tmax, ..self }
    }

    /// Same ray with a different recursion depth.
    pub fn with_depth(self, depth: u32) -> Self {
        Self { depth, ..self }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// True if `t` lies within `[tmin, tmax]` (inclusive).
    #[inline]
    pub fn in_range(&self, t: f32) -> bool {
        self.tmin <= t && t <= self.tmax
    }

    /// Compare origin and direction within `epsilon`. Range and depth are ignored.
    pub fn is_close(&self, other: &Ray, epsilon: f32) -> bool {
        self.origin.abs_diff_eq(other.origin, epsilon)
            && self.direction.abs_diff_eq(other.direction, epsilon)
    }
}
