//! RGB color type.

use carve_math::Vec3;

/// Color type alias (linear RGB radiance, unbounded above).
///
/// `x`, `y` and `z` hold the red, green and blue channels.
pub type Color = Vec3;

/// Channel accessors and comparisons for [`Color`].
pub trait ColorExt {
    fn r(&self) -> f32;
    fn g(&self) -> f32;
    fn b(&self) -> f32;

    /// Largest of the three channels.
    fn max_channel(&self) -> f32;

    /// Channel-wise comparison within `epsilon`.
    fn is_close(&self, other: Color, epsilon: f32) -> bool;
}

impl ColorExt for Color {
    #[inline]
    fn r(&self) -> f32 {
        self.x
    }

    #[inline]
    fn g(&self) -> f32 {
        self.y
    }

    #[inline]
    fn b(&self) -> f32 {
        self.z
    }

    #[inline]
    fn max_channel(&self) -> f32 {
        self.max_element()
    }

    fn is_close(&self, other: Color, epsilon: f32) -> bool {
        self.abs_diff_eq(other, epsilon)
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a color to 8-bit RGBA for previews.
///
/// Channels are gamma corrected, then clamped to [0, 1]. No tone mapping.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let to_byte = |c: f32| (255.0 * linear_to_gamma(c).clamp(0.0, 1.0)) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z), 255]
}
