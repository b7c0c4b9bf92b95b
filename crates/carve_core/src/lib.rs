//! Carve Core - color and HDR pixel buffer types.
//!
//! This crate provides:
//!
//! - **Colors**: `Color`, an RGB triple of linear radiance values
//! - **HDR images**: `HdrImage`, the floating-point pixel buffer that the
//!   image tracer renders into and that image pigments sample from
//!
//! # Example
//!
//! ```ignore
//! use carve_core::{Color, HdrImage};
//!
//! let mut image = HdrImage::new(640, 480);
//! image.set_pixel(10, 20, Color::new(1.0, 0.5, 0.25));
//! let texture = HdrImage::open("marble.png")?;
//! ```

pub mod color;
pub mod hdr_image;

// Re-export commonly used types
pub use color::{color_to_rgba, linear_to_gamma, Color, ColorExt};
pub use hdr_image::{HdrImage, HdrImageError, HdrImageResult};
