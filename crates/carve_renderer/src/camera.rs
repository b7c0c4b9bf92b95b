//! Cameras: map a point of the screen to a ray.

use carve_math::{Ray, Transform, Vec3};

/// Camera looking down +X from a screen spanning `y ∈ [-aspect, aspect]`,
/// `z ∈ [-1, 1]`, placed in the world by its transform.
///
/// Screen coordinates `(u, v)` run from `(0, 0)` at the bottom-left corner to
/// `(1, 1)` at the top-right.
#[derive(Debug, Clone, Copy)]
pub enum Camera {
    /// Parallel rays, no perspective.
    Orthogonal {
        aspect_ratio: f32,
        transform: Transform,
    },
    /// Rays fanning out from an eye at `distance` behind the screen.
    Perspective {
        distance: f32,
        aspect_ratio: f32,
        transform: Transform,
    },
}

impl Camera {
    /// Create an orthogonal camera.
    pub fn orthogonal(aspect_ratio: f32, transform: Transform) -> Self {
        Self::Orthogonal {
            aspect_ratio,
            transform,
        }
    }

    /// Create a perspective camera with the eye `distance` units behind the screen.
    pub fn perspective(distance: f32, aspect_ratio: f32, transform: Transform) -> Self {
        Self::Perspective {
            distance,
            aspect_ratio,
            transform,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        match *self {
            Self::Orthogonal { aspect_ratio, .. } | Self::Perspective { aspect_ratio, .. } => {
                aspect_ratio
            }
        }
    }

    pub fn transform(&self) -> &Transform {
        match self {
            Self::Orthogonal { transform, .. } | Self::Perspective { transform, .. } => transform,
        }
    }

    /// Ray through the screen point `(u, v)`, in world space.
    pub fn fire_ray(&self, u: f32, v: f32) -> Ray {
        let ray = match *self {
            Self::Orthogonal { aspect_ratio, .. } => Ray::new(
                Vec3::new(-1.0, (1.0 - 2.0 * u) * aspect_ratio, 2.0 * v - 1.0),
                Vec3::X,
            ),
            Self::Perspective {
                distance,
                aspect_ratio,
                ..
            } => Ray::new(
                Vec3::new(-distance, 0.0, 0.0),
                Vec3::new(distance, (1.0 - 2.0 * u) * aspect_ratio, 2.0 * v - 1.0),
            ),
        };
        self.transform().apply_to_ray(&ray)
    }
}

impl Default for Camera {
    /// Perspective camera, square screen, eye one unit behind it.
    fn default() -> Self {
        Self::perspective(1.0, 1.0, Transform::IDENTITY)
    }
}
