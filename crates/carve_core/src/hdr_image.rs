//! High-dynamic-range pixel buffer.
//!
//! `HdrImage` is the render target of the image tracer and the backing
//! store of image pigments. Pixels are stored row-major with `(0, 0)` at the
//! top-left corner: the column index runs horizontally, the row index
//! vertically.

use std::path::Path;

use image::DynamicImage;
use thiserror::Error;

use crate::Color;

/// Errors that can occur while building or loading an image.
#[derive(Error, Debug)]
pub enum HdrImageError {
    #[error("Failed to load image {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Pixel buffer holds {actual} pixels, expected {width}x{height}")]
    InvalidDimensions {
        width: u32,
        height: u32,
        actual: usize,
    },
}

pub type HdrImageResult<T> = Result<T, HdrImageError>;

/// A floating-point RGB image.
#[derive(Clone, Debug, PartialEq)]
pub struct HdrImage {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Color>,
}

impl HdrImage {
    /// Create a new image filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Wrap an existing row-major pixel buffer.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> HdrImageResult<Self> {
        if pixels.len() != width as usize * height as usize {
            return Err(HdrImageError::InvalidDimensions {
                width,
                height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Load an image file through the `image` crate.
    ///
    /// Float formats (Radiance HDR, OpenEXR) are taken as linear radiance;
    /// 8/16-bit formats are assumed sRGB-encoded and linearized.
    pub fn open(path: impl AsRef<Path>) -> HdrImageResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| HdrImageError::Load {
            path: path.display().to_string(),
            source,
        })?;

        let image = Self::from_dynamic_image(&img);
        log::debug!(
            "Loaded image: {} ({}x{})",
            path.display(),
            image.width,
            image.height
        );

        Ok(image)
    }

    /// Convert a decoded image into linear radiance.
    pub fn from_dynamic_image(img: &DynamicImage) -> Self {
        let (width, height) = (img.width(), img.height());

        let pixels = match img {
            DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => img
                .to_rgb32f()
                .pixels()
                .map(|p| Color::new(p[0], p[1], p[2]))
                .collect(),
            _ => img
                .to_rgb8()
                .pixels()
                .map(|p| {
                    Color::new(
                        srgb_to_linear(p[0]),
                        srgb_to_linear(p[1]),
                        srgb_to_linear(p[2]),
                    )
                })
                .collect(),
        };

        Self {
            width,
            height,
            pixels,
        }
    }

    /// Returns true if `(x, y)` addresses a pixel of this image.
    #[inline]
    pub fn valid_coordinates(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    fn pixel_offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(
            self.valid_coordinates(x, y),
            "pixel ({x}, {y}) outside {}x{} image",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at column `x`, row `y`.
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        self.pixels[self.pixel_offset(x, y)]
    }

    /// Set the pixel at column `x`, row `y`.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        let offset = self.pixel_offset(x, y);
        self.pixels[offset] = color;
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }
}

/// Convert sRGB byte value to linear float.
fn srgb_to_linear(value: u8) -> f32 {
    let v = value as f32 / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColorExt;

    #[test]
    fn test_image_creation() {
        let img = HdrImage::new(7, 4);
        assert_eq!(img.width, 7);
        assert_eq!(img.height, 4);
        assert_eq!(img.pixels().len(), 28);
        assert!(img.pixels().iter().all(|&c| c == Color::ZERO));
    }

    #[test]
    fn test_coordinates() {
        let img = HdrImage::new(7, 4);

        assert!(img.valid_coordinates(0, 0));
        assert!(img.valid_coordinates(6, 3));
        assert!(!img.valid_coordinates(7, 0));
        assert!(!img.valid_coordinates(0, 4));
    }

    #[test]
    fn test_pixel_offset() {
        let img = HdrImage::new(7, 4);

        assert_eq!(img.pixel_offset(0, 0), 0);
        assert_eq!(img.pixel_offset(3, 2), 17);
        assert_eq!(img.pixel_offset(6, 3), 7 * 4 - 1);
    }

    #[test]
    fn test_get_set_pixel() {
        let mut img = HdrImage::new(7, 4);
        let reference = Color::new(1.0, 2.0, 3.0);

        img.set_pixel(3, 2, reference);
        assert!(img.get_pixel(3, 2).is_close(reference, 1e-6));
        assert_eq!(img.pixels()[17], reference);
        assert_eq!(img.get_pixel(2, 3), Color::ZERO);
    }

    #[test]
    fn test_from_pixels() {
        let pixels = vec![Color::ONE; 6];
        let img = HdrImage::from_pixels(3, 2, pixels).unwrap();
        assert_eq!(img.get_pixel(2, 1), Color::ONE);

        let err = HdrImage::from_pixels(3, 3, vec![Color::ONE; 6]).unwrap_err();
        assert!(matches!(
            err,
            HdrImageError::InvalidDimensions { actual: 6, .. }
        ));
    }

    #[test]
    fn test_from_dynamic_image_linearizes_srgb() {
        let raw = vec![0, 0, 0, 255, 255, 255, 128, 128, 128];
        let rgb = image::RgbImage::from_raw(3, 1, raw).unwrap();
        let img = HdrImage::from_dynamic_image(&DynamicImage::ImageRgb8(rgb));

        assert_eq!(img.width, 3);
        assert_eq!(img.height, 1);
        assert!(img.get_pixel(0, 0).is_close(Color::ZERO, 1e-6));
        assert!(img.get_pixel(1, 0).is_close(Color::ONE, 1e-6));

        // Mid-gray is darker in linear
        let mid = img.get_pixel(2, 0).r();
        assert!(mid > 0.1 && mid < 0.5);
    }

    #[test]
    fn test_from_dynamic_image_keeps_float_data() {
        let raw = vec![2.0, 0.5, 0.25, 10.0, 0.0, 1.0];
        let rgb = image::Rgb32FImage::from_raw(1, 2, raw).unwrap();
        let img = HdrImage::from_dynamic_image(&DynamicImage::ImageRgb32F(rgb));

        assert!(img.get_pixel(0, 0).is_close(Color::new(2.0, 0.5, 0.25), 1e-6));
        assert!(img.get_pixel(0, 1).is_close(Color::new(10.0, 0.0, 1.0), 1e-6));
    }

    #[test]
    fn test_open_round_trip() {
        let _ = env_logger::builder().is_test(true).try_init();

        let path = std::env::temp_dir().join("carve_core_open_round_trip.png");
        let raw = vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
        image::RgbImage::from_raw(2, 2, raw)
            .unwrap()
            .save(&path)
            .unwrap();

        let img = HdrImage::open(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!((img.width, img.height), (2, 2));
        assert!(img.get_pixel(0, 0).is_close(Color::new(1.0, 0.0, 0.0), 1e-6));
        assert!(img.get_pixel(1, 0).is_close(Color::new(0.0, 1.0, 0.0), 1e-6));
        assert!(img.get_pixel(0, 1).is_close(Color::new(0.0, 0.0, 1.0), 1e-6));
        assert!(img.get_pixel(1, 1).is_close(Color::ONE, 1e-6));
    }

    #[test]
    fn test_open_missing_file() {
        let err = HdrImage::open("/definitely/not/here.png").unwrap_err();
        assert!(matches!(err, HdrImageError::Load { .. }));
    }

    #[test]
    fn test_srgb_to_linear() {
        assert!((srgb_to_linear(0) - 0.0).abs() < 0.001);
        assert!((srgb_to_linear(255) - 1.0).abs() < 0.001);

        let mid = srgb_to_linear(128);
        assert!(mid < 0.5);
        assert!(mid > 0.1);
    }
}
