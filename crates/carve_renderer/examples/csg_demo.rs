//! CSG demo scene.
//!
//! Renders a few boolean solids on a checkered floor and saves an 8-bit PNG.
//!
//! ```text
//! cargo run --release --example csg_demo [config.json] [output.png]
//! ```
//!
//! The optional JSON file holds a `RenderConfig`; missing fields keep their
//! defaults. Set `RUST_LOG=debug` for scene construction details.

use std::sync::Arc;

use anyhow::{Context, Result};
use carve_core::color_to_rgba;
use carve_renderer::{
    BoxShape, Brdf, Camera, Color, Cone, Csg, Cylinder, HdrImage, ImageTracer, Material, Pcg,
    Pigment, Plane, RenderConfig, RendererKind, Sphere, Transform, Vec3, World,
};
use rand::Rng;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => load_config(&path)?,
        None => RenderConfig {
            renderer: RendererKind::PathTracer,
            background: Color::new(0.6, 0.7, 0.9),
            num_of_rays: 6,
            max_depth: 4,
            samples_per_side: 2,
            ..RenderConfig::default()
        },
    };
    let output = args.next().unwrap_or_else(|| "csg_demo.png".to_string());
    log::info!("Render config: {config:?}");

    let world = build_scene(&mut config.pcg());
    log::info!("Scene has {} top-level shapes", world.len());

    let camera = Camera::perspective(
        1.0,
        WIDTH as f32 / HEIGHT as f32,
        Transform::rotation_z(-20.0)
            * Transform::translation(Vec3::new(-5.0, 0.0, 1.0))
            * Transform::rotation_y(10.0),
    );

    let renderer = config.build_renderer(&world);
    let mut tracer = ImageTracer::new(HdrImage::new(WIDTH, HEIGHT), camera)
        .with_samples_per_side(config.samples_per_side);
    tracer.fire_all_rays_par(renderer.as_ref(), config.seed, config.bucket_size);

    save_png(&tracer.into_image(), &output)?;
    log::info!("Saved to {output}");
    Ok(())
}

fn load_config(path: &str) -> Result<RenderConfig> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read config {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid render config in {path}"))
}

fn diffuse(color: Color) -> Arc<Material> {
    Arc::new(Material::from_brdf(Brdf::diffuse(Pigment::Uniform(color))))
}

fn build_scene(pcg: &mut Pcg) -> World {
    let mut world = World::new();

    // Floor
    let floor = Material::from_brdf(Brdf::diffuse(Pigment::checkered(
        Color::new(0.3, 0.5, 0.1),
        Color::new(0.1, 0.2, 0.5),
        4,
    )));
    world.add_shape(Box::new(Plane::new(
        Transform::translation(Vec3::new(0.0, 0.0, -1.0)),
        Arc::new(floor),
    )));

    // A cube with a spherical bite taken out of it
    let red = diffuse(Color::new(0.8, 0.2, 0.2));
    world.add_shape(Box::new(Csg::difference(
        Box::new(BoxShape::new(Transform::IDENTITY, red.clone())),
        Box::new(Sphere::new(
            Transform::translation(Vec3::new(-1.0, -0.5, 0.8)) * Transform::scaling(Vec3::splat(0.9)),
            red,
        )),
    )));

    // Lens: two overlapping spheres, kept where they meet
    let mirror = Arc::new(Material::from_brdf(Brdf::specular(Pigment::Uniform(
        Color::splat(0.9),
    ))));
    world.add_shape(Box::new(Csg::intersection(
        Box::new(Sphere::new(
            Transform::translation(Vec3::new(1.0, 2.6, 0.0)),
            mirror.clone(),
        )),
        Box::new(Sphere::new(
            Transform::translation(Vec3::new(1.0, 3.4, 0.0)),
            mirror,
        )),
    )));

    // Pillar topped by a cone, with a hole drilled through
    let stone = diffuse(Color::new(0.7, 0.7, 0.6));
    let pillar = Csg::union(
        Box::new(Cylinder::new(
            Transform::translation(Vec3::new(1.5, -2.5, -1.0))
                * Transform::scaling(Vec3::new(0.5, 0.5, 1.5)),
            stone.clone(),
        )),
        Box::new(Cone::new(
            Transform::translation(Vec3::new(1.5, -2.5, 0.5)) * Transform::scaling(Vec3::splat(0.7)),
            stone.clone(),
        )),
    );
    world.add_shape(Box::new(Csg::difference(
        Box::new(pillar),
        Box::new(Cylinder::new(
            Transform::translation(Vec3::new(0.5, -2.5, -0.2))
                * Transform::rotation_y(90.0)
                * Transform::scaling(Vec3::new(0.2, 0.2, 2.0)),
            stone,
        )),
    )));

    // Scattered pebbles
    for _ in 0..12 {
        let x = pcg.gen_range(-2.0..4.0);
        let y = pcg.gen_range(-4.0..4.0);
        let radius = pcg.gen_range(0.1..0.25);
        let color = Color::new(pcg.gen(), pcg.gen(), pcg.gen());
        log::debug!("Pebble at ({x:.2}, {y:.2}) radius {radius:.2}");

        world.add_shape(Box::new(Sphere::new(
            Transform::translation(Vec3::new(x, y, -1.0 + radius))
                * Transform::scaling(Vec3::splat(radius)),
            diffuse(color),
        )));
    }

    // Overhead light
    let light = Material::new(
        Brdf::diffuse(Pigment::Uniform(Color::ZERO)),
        Pigment::Uniform(Color::splat(4.0)),
    );
    world.add_shape(Box::new(Sphere::new(
        Transform::translation(Vec3::new(0.0, 0.0, 8.0)) * Transform::scaling(Vec3::splat(2.0)),
        Arc::new(light),
    )));

    world
}

fn save_png(image: &HdrImage, path: &str) -> Result<()> {
    let bytes: Vec<u8> = image
        .pixels()
        .iter()
        .flat_map(|&color| color_to_rgba(color))
        .collect();

    image::save_buffer(path, &bytes, image.width, image.height, image::ColorType::Rgba8)
        .with_context(|| format!("Failed to save {path}"))
}
