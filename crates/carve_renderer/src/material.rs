//! Surface materials.

use crate::{Brdf, Color, Pigment};

/// Surface appearance: one BRDF and one emitted-radiance pigment.
///
/// Shapes hold materials behind an `Arc`, so many shapes can share one.
#[derive(Debug, Clone)]
pub struct Material {
    pub brdf: Brdf,
    pub emitted_radiance: Pigment,
}

impl Material {
    /// Create a new material.
    pub fn new(brdf: Brdf, emitted_radiance: Pigment) -> Self {
        Self {
            brdf,
            emitted_radiance,
        }
    }

    /// A non-emitting material with the given BRDF.
    pub fn from_brdf(brdf: Brdf) -> Self {
        Self::new(brdf, Pigment::Uniform(Color::ZERO))
    }
}

impl Default for Material {
    /// Diffuse white, no emission.
    fn default() -> Self {
        Self::from_brdf(Brdf::default())
    }
}
