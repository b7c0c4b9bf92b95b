//! Drives a renderer over every pixel of an image.

use std::time::Instant;

use rayon::prelude::*;

use carve_core::HdrImage;
use carve_math::Ray;

use crate::bucket::{generate_buckets, render_bucket, BucketResult};
use crate::{Camera, Color, Pcg, Renderer};

/// Pairs an output image with a camera.
///
/// Pixel `(0, 0)` is the top-left corner of the image, which the camera
/// sees at screen coordinates `(0, 1)`.
pub struct ImageTracer {
    pub image: HdrImage,
    pub camera: Camera,
    /// Antialiasing: each pixel is split in `samples_per_side^2` cells,
    /// each sampled once at a random point. Zero fires one ray through the
    /// pixel center.
    pub samples_per_side: u32,
}

impl ImageTracer {
    pub fn new(image: HdrImage, camera: Camera) -> Self {
        Self {
            image,
            camera,
            samples_per_side: 0,
        }
    }

    pub fn with_samples_per_side(mut self, samples_per_side: u32) -> Self {
        self.samples_per_side = samples_per_side;
        self
    }

    /// Ray through the point `(u_pixel, v_pixel)` of pixel `(col, row)`,
    /// both offsets in pixel units from its top-left corner.
    pub fn fire_ray(&self, col: u32, row: u32, u_pixel: f32, v_pixel: f32) -> Ray {
        let u = (col as f32 + u_pixel) / self.image.width as f32;
        let v = 1.0 - (row as f32 + v_pixel) / self.image.height as f32;
        self.camera.fire_ray(u, v)
    }

    /// Ray through the center of pixel `(col, row)`.
    pub fn fire_ray_centered(&self, col: u32, row: u32) -> Ray {
        self.fire_ray(col, row, 0.5, 0.5)
    }

    /// Estimate the color of one pixel.
    pub fn render_pixel<R>(&self, col: u32, row: u32, renderer: &R, pcg: &mut Pcg) -> Color
    where
        R: Renderer + ?Sized,
    {
        let n = self.samples_per_side;
        if n == 0 {
            return renderer.compute_radiance(&self.fire_ray_centered(col, row), pcg);
        }

        let mut cum_color = Color::ZERO;
        for inter_row in 0..n {
            for inter_col in 0..n {
                let u_pixel = (inter_col as f32 + pcg.random_float()) / n as f32;
                let v_pixel = (inter_row as f32 + pcg.random_float()) / n as f32;
                let ray = self.fire_ray(col, row, u_pixel, v_pixel);
                cum_color += renderer.compute_radiance(&ray, pcg);
            }
        }

        cum_color / (n * n) as f32
    }

    /// Render every pixel in order, drawing all randomness from `pcg`.
    pub fn fire_all_rays<R>(&mut self, renderer: &R, pcg: &mut Pcg)
    where
        R: Renderer + ?Sized,
    {
        let start = Instant::now();

        for row in 0..self.image.height {
            for col in 0..self.image.width {
                let color = self.render_pixel(col, row, renderer, pcg);
                self.image.set_pixel(col, row, color);
            }
        }

        log::info!(
            "Rendered {}x{} image in {:.2?}",
            self.image.width,
            self.image.height,
            start.elapsed()
        );
    }

    /// Render buckets in parallel, bucket `i` drawing from `Pcg::new(seed, i)`.
    ///
    /// The result depends on `seed` and `bucket_size` only, not on the
    /// number of threads.
    pub fn fire_all_rays_par<R>(&mut self, renderer: &R, seed: u64, bucket_size: u32)
    where
        R: Renderer + ?Sized,
    {
        let start = Instant::now();
        let buckets = generate_buckets(self.image.width, self.image.height, bucket_size);
        log::info!(
            "Rendering {}x{} image in {} buckets on {} threads",
            self.image.width,
            self.image.height,
            buckets.len(),
            rayon::current_num_threads()
        );

        let tracer = &*self;
        let results: Vec<BucketResult> = buckets
            .par_iter()
            .map(|bucket| BucketResult::new(*bucket, render_bucket(bucket, tracer, renderer, seed)))
            .collect();

        for result in &results {
            for (col, row, color) in result.iter_pixels() {
                self.image.set_pixel(col, row, color);
            }
        }

        log::info!("Render finished in {:.2?}", start.elapsed());
    }

    /// Consume the tracer, returning the rendered image.
    pub fn into_image(self) -> HdrImage {
        self.image
    }
}
