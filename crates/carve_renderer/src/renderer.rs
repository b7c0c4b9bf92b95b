//! Radiance estimators.
//!
//! A renderer turns one camera ray into a color. Three strategies share the
//! same contract:
//! - `OnOffRenderer`: silhouettes, for checking geometry
//! - `FlatRenderer`: unlit pigment plus emission, for checking materials
//! - `PathTracer`: Monte Carlo light transport with Russian roulette

use serde::{Deserialize, Serialize};

use carve_core::ColorExt;
use carve_math::Ray;

use crate::{Color, Pcg, World};

/// Cap on the Russian roulette survival probability, so that every path
/// has some chance to terminate.
pub const ROULETTE_SURVIVAL_CAP: f32 = 0.99;

/// Anything that computes the radiance carried back along a ray.
///
/// Renderers are shared by all render threads; each thread passes its own
/// PCG stream.
pub trait Renderer: Sync {
    fn compute_radiance(&self, ray: &Ray, pcg: &mut Pcg) -> Color;
}

impl<F> Renderer for F
where
    F: Fn(&Ray, &mut Pcg) -> Color + Sync,
{
    fn compute_radiance(&self, ray: &Ray, pcg: &mut Pcg) -> Color {
        self(ray, pcg)
    }
}

/// `color` where the ray hits anything, `background_color` elsewhere.
pub struct OnOffRenderer<'a> {
    pub world: &'a World,
    pub background_color: Color,
    pub color: Color,
}

impl<'a> OnOffRenderer<'a> {
    /// White shapes on a black background.
    pub fn new(world: &'a World) -> Self {
        Self {
            world,
            background_color: Color::ZERO,
            color: Color::ONE,
        }
    }
}

impl Renderer for OnOffRenderer<'_> {
    fn compute_radiance(&self, ray: &Ray, _pcg: &mut Pcg) -> Color {
        if self.world.quick_ray_intersection(ray) {
            self.color
        } else {
            self.background_color
        }
    }
}

/// Pigment plus emitted radiance at the nearest hit, with no lighting at all.
pub struct FlatRenderer<'a> {
    pub world: &'a World,
    pub background_color: Color,
}

impl<'a> FlatRenderer<'a> {
    pub fn new(world: &'a World, background_color: Color) -> Self {
        Self {
            world,
            background_color,
        }
    }
}

impl Renderer for FlatRenderer<'_> {
    fn compute_radiance(&self, ray: &Ray, _pcg: &mut Pcg) -> Color {
        match self.world.ray_intersection(ray) {
            Some(hit) => {
                let material = hit.material;
                material.brdf.pigment().get_color(hit.surface_point)
                    + material.emitted_radiance.get_color(hit.surface_point)
            }
            None => self.background_color,
        }
    }
}

/// Recursive Monte Carlo path tracer.
///
/// Each hit spawns `num_of_rays` scattered rays one level deeper. Paths are
/// cut off past `max_depth`; from `russian_roulette_limit` on, they are also
/// killed at random with a probability tied to the surface albedo, and the
/// survivors are reweighted to keep the estimate unbiased.
pub struct PathTracer<'a> {
    pub world: &'a World,
    pub background_color: Color,
    pub num_of_rays: u32,
    pub max_depth: u32,
    pub russian_roulette_limit: u32,
}

impl<'a> PathTracer<'a> {
    pub fn new(world: &'a World) -> Self {
        Self {
            world,
            background_color: Color::ZERO,
            num_of_rays: 10,
            max_depth: 2,
            russian_roulette_limit: 3,
        }
    }

    pub fn with_background(mut self, background_color: Color) -> Self {
        self.background_color = background_color;
        self
    }

    /// Set scattered rays per hit and the two depth limits.
    pub fn with_sampling(
        mut self,
        num_of_rays: u32,
        max_depth: u32,
        russian_roulette_limit: u32,
    ) -> Self {
        self.num_of_rays = num_of_rays;
        self.max_depth = max_depth;
        self.russian_roulette_limit = russian_roulette_limit;
        self
    }
}

impl Renderer for PathTracer<'_> {
    fn compute_radiance(&self, ray: &Ray, pcg: &mut Pcg) -> Color {
        if ray.depth > self.max_depth {
            return Color::ZERO;
        }

        let Some(hit) = self.world.ray_intersection(ray) else {
            return self.background_color;
        };

        let material = hit.material;
        let mut hit_color = material.brdf.pigment().get_color(hit.surface_point);
        let emitted = material.emitted_radiance.get_color(hit.surface_point);
        let hit_luminosity = hit_color.max_channel();

        if ray.depth >= self.russian_roulette_limit {
            let q = hit_luminosity.clamp(0.0, ROULETTE_SURVIVAL_CAP);
            if q <= 0.0 || pcg.random_float() > q {
                return emitted;
            }
            hit_color /= q;
        }

        let mut cum_radiance = Color::ZERO;
        if hit_luminosity > 0.0 && self.num_of_rays > 0 {
            for _ in 0..self.num_of_rays {
                let new_ray = material.brdf.scatter_ray(
                    pcg,
                    hit.ray.direction,
                    hit.world_point,
                    hit.normal,
                    ray.depth + 1,
                );
                cum_radiance += hit_color * self.compute_radiance(&new_ray, pcg);
            }
            cum_radiance /= self.num_of_rays as f32;
        }

        emitted + cum_radiance
    }
}

/// Which radiance estimator to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RendererKind {
    OnOff,
    Flat,
    #[default]
    PathTracer,
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub renderer: RendererKind,
    /// Color returned by rays that escape the scene
    pub background: Color,
    /// Scattered rays per path-tracer hit
    pub num_of_rays: u32,
    /// Deepest bounce the path tracer follows
    pub max_depth: u32,
    /// Depth from which Russian roulette kicks in
    pub russian_roulette_limit: u32,
    /// Antialiasing: `samples_per_side^2` jittered samples per pixel, 0 for one centered ray
    pub samples_per_side: u32,
    /// PCG initial state
    pub seed: u64,
    /// PCG sequence, for serial rendering
    pub sequence: u64,
    /// Tile edge in pixels, for parallel rendering
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            renderer: RendererKind::PathTracer,
            background: Color::ZERO,
            num_of_rays: 10,
            max_depth: 2,
            russian_roulette_limit: 3,
            samples_per_side: 0,
            seed: 42,
            sequence: 54,
            bucket_size: crate::DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    /// Build the configured renderer over `world`.
    pub fn build_renderer<'a>(&self, world: &'a World) -> Box<dyn Renderer + 'a> {
        match self.renderer {
            RendererKind::OnOff => Box::new(OnOffRenderer {
                world,
                background_color: self.background,
                color: Color::ONE,
            }),
            RendererKind::Flat => Box::new(FlatRenderer::new(world, self.background)),
            RendererKind::PathTracer => Box::new(
                PathTracer::new(world)
                    .with_background(self.background)
                    .with_sampling(
                        self.num_of_rays,
                        self.max_depth,
                        self.russian_roulette_limit,
                    ),
            ),
        }
    }

    /// The PCG stream for serial rendering.
    pub fn pcg(&self) -> Pcg {
        Pcg::new(self.seed, self.sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Brdf, Material, Pigment, Sphere};
    use carve_math::{Transform, Vec3};
    use std::sync::Arc;

    fn enclosure(emitted: f32, reflectance: f32) -> World {
        let material = Material::new(
            Brdf::diffuse(Pigment::Uniform(Color::ONE * reflectance)),
            Pigment::Uniform(Color::ONE * emitted),
        );
        let mut world = World::new();
        world.add_shape(Box::new(Sphere::new(Transform::IDENTITY, Arc::new(material))));
        world
    }

    #[test]
    fn test_furnace() {
        let mut pcg = Pcg::default();

        // Inside a closed emitting sphere every bounce adds e * rho^n
        for _ in 0..5 {
            let emitted = pcg.random_float();
            let reflectance = pcg.random_float() * 0.9;
            let world = enclosure(emitted, reflectance);

            let tracer = PathTracer::new(&world).with_sampling(1, 100, 101);
            let ray = Ray::new(Vec3::ZERO, Vec3::X);
            let color = tracer.compute_radiance(&ray, &mut pcg);

            let expected = emitted / (1.0 - reflectance);
            for channel in [color.r(), color.g(), color.b()] {
                assert!(
                    (channel - expected).abs() <= 1e-3 * expected.max(1.0),
                    "got {channel}, expected {expected}"
                );
            }
        }
    }

    #[test]
    fn test_russian_roulette_is_unbiased() {
        let (emitted, reflectance) = (0.5, 0.5);
        let world = enclosure(emitted, reflectance);
        let tracer = PathTracer::new(&world).with_sampling(1, 1000, 0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let mut pcg = Pcg::new(7, 11);
        let samples = 4000;
        let mean = (0..samples)
            .map(|_| tracer.compute_radiance(&ray, &mut pcg).r())
            .sum::<f32>()
            / samples as f32;

        let expected = emitted / (1.0 - reflectance);
        assert!(
            (mean - expected).abs() < 0.05 * expected,
            "mean {mean}, expected {expected}"
        );
    }

    #[test]
    fn test_depth_cutoff() {
        let world = enclosure(1.0, 0.5);
        let tracer = PathTracer::new(&world).with_sampling(1, 2, 10);

        let ray = Ray::new(Vec3::ZERO, Vec3::X).with_depth(3);
        let color = tracer.compute_radiance(&ray, &mut Pcg::default());
        assert_eq!(color, Color::ZERO);

        // At the limit the ray is still traced
        let ray = Ray::new(Vec3::ZERO, Vec3::X).with_depth(2);
        let color = tracer.compute_radiance(&ray, &mut Pcg::default());
        assert!(color.r() >= 1.0);
    }

    #[test]
    fn test_background_on_miss() {
        let world = enclosure(1.0, 0.5);
        let background = Color::new(0.1, 0.2, 0.3);
        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::X);

        let tracer = PathTracer::new(&world).with_background(background);
        assert_eq!(tracer.compute_radiance(&ray, &mut Pcg::default()), background);

        let flat = FlatRenderer::new(&world, background);
        assert_eq!(flat.compute_radiance(&ray, &mut Pcg::default()), background);
    }

    #[test]
    fn test_black_surface_stops_paths() {
        // No reflectance: only the emission comes back and no randomness is used
        let world = enclosure(0.7, 0.0);
        let tracer = PathTracer::new(&world).with_sampling(4, 10, 10);

        let mut pcg = Pcg::default();
        let color = tracer.compute_radiance(&Ray::new(Vec3::ZERO, Vec3::X), &mut pcg);
        assert!(color.is_close(Color::splat(0.7), 1e-6));
        assert_eq!(pcg, Pcg::default());
    }

    #[test]
    fn test_flat_renderer() {
        let material = Material::new(
            Brdf::diffuse(Pigment::Uniform(Color::new(0.25, 0.5, 0.0))),
            Pigment::Uniform(Color::new(0.0, 0.25, 1.0)),
        );
        let mut world = World::new();
        world.add_shape(Box::new(Sphere::new(
            Transform::translation(Vec3::new(3.0, 0.0, 0.0)),
            Arc::new(material),
        )));

        let flat = FlatRenderer::new(&world, Color::ZERO);
        let color = flat.compute_radiance(&Ray::new(Vec3::ZERO, Vec3::X), &mut Pcg::default());
        assert!(color.is_close(Color::new(0.25, 0.75, 1.0), 1e-6));
    }

    #[test]
    fn test_on_off_renderer() {
        let world = enclosure(0.0, 0.0);
        let renderer = OnOffRenderer::new(&world);

        let hit = Ray::new(Vec3::new(-3.0, 0.0, 0.0), Vec3::X);
        let miss = Ray::new(Vec3::new(-3.0, 0.0, 0.0), Vec3::NEG_X);
        assert_eq!(renderer.compute_radiance(&hit, &mut Pcg::default()), Color::ONE);
        assert_eq!(renderer.compute_radiance(&miss, &mut Pcg::default()), Color::ZERO);
    }

    #[test]
    fn test_config_defaults_and_json() {
        let config = RenderConfig::default();
        assert_eq!(config.renderer, RendererKind::PathTracer);
        assert_eq!(config.num_of_rays, 10);
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.russian_roulette_limit, 3);
        assert_eq!(config.pcg(), Pcg::default());

        // Missing fields fall back to their defaults
        let config: RenderConfig =
            serde_json::from_str(r#"{ "renderer": "flat", "background": [0.5, 0.5, 1.0] }"#)
                .unwrap();
        assert_eq!(config.renderer, RendererKind::Flat);
        assert_eq!(config.background, Color::new(0.5, 0.5, 1.0));
        assert_eq!(config.bucket_size, crate::DEFAULT_BUCKET_SIZE);

        let json = serde_json::to_string(&config).unwrap();
        let back: RenderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_build_renderer() {
        let world = enclosure(0.0, 0.0);
        let ray = Ray::new(Vec3::new(-3.0, 0.0, 0.0), Vec3::NEG_X);
        let background = Color::new(0.0, 1.0, 0.0);

        for renderer in [RendererKind::OnOff, RendererKind::Flat, RendererKind::PathTracer] {
            let config = RenderConfig {
                renderer,
                background,
                ..RenderConfig::default()
            };
            let built = config.build_renderer(&world);
            assert_eq!(built.compute_radiance(&ray, &mut Pcg::default()), background);
        }
    }
}
