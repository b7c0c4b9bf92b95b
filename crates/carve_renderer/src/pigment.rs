//! Pigments: functions from surface coordinates to colors.

use std::sync::Arc;

use carve_core::HdrImage;
use carve_math::Vec2;

use crate::Color;

/// Spatially varying color, looked up by (u, v) surface coordinates.
#[derive(Debug, Clone)]
pub enum Pigment {
    /// The same color everywhere.
    Uniform(Color),
    /// `steps` x `steps` checkerboard over the unit square.
    Checkered {
        color1: Color,
        color2: Color,
        steps: u32,
    },
    /// Bilinear lookup into an image; u runs along columns, v along rows.
    Image(Arc<HdrImage>),
}

impl Pigment {
    /// Create a checkerboard pigment.
    pub fn checkered(color1: Color, color2: Color, steps: u32) -> Self {
        Pigment::Checkered {
            color1,
            color2,
            steps,
        }
    }

    /// Get the color at the given surface coordinates.
    pub fn get_color(&self, uv: Vec2) -> Color {
        match self {
            Pigment::Uniform(color) => *color,
            Pigment::Checkered {
                color1,
                color2,
                steps,
            } => {
                let steps = *steps as f32;
                let int_u = (uv.x * steps).floor() as i64;
                let int_v = (uv.y * steps).floor() as i64;

                if (int_u + int_v).rem_euclid(2) == 0 {
                    *color1
                } else {
                    *color2
                }
            }
            Pigment::Image(image) => sample_bilinear(image, uv),
        }
    }
}

impl Default for Pigment {
    fn default() -> Self {
        Pigment::Uniform(Color::ONE)
    }
}

/// Bilinear interpolation between the four texels nearest to `uv`.
///
/// Texel centers sit at `(i + 0.5) / width`; lookups past the outermost
/// centers are clamped to the edge texels.
fn sample_bilinear(image: &HdrImage, uv: Vec2) -> Color {
    if image.width == 0 || image.height == 0 {
        return Color::ZERO;
    }

    let x = uv.x * image.width as f32 - 0.5;
    let y = uv.y * image.height as f32 - 0.5;
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;

    let col = |i: f32| (i as i64).clamp(0, image.width as i64 - 1) as u32;
    let row = |j: f32| (j as i64).clamp(0, image.height as i64 - 1) as u32;

    let c00 = image.get_pixel(col(x0), row(y0));
    let c10 = image.get_pixel(col(x0 + 1.0), row(y0));
    let c01 = image.get_pixel(col(x0), row(y0 + 1.0));
    let c11 = image.get_pixel(col(x0 + 1.0), row(y0 + 1.0));

    let top = c00.lerp(c10, fx);
    let bottom = c01.lerp(c11, fx);
    top.lerp(bottom, fy)
}
