//! Carve Renderer - CSG geometry and CPU path tracing.
//!
//! Scenes are built from transformed primitives (spheres, planes, boxes,
//! cylinders, cones) that can be combined into CSG trees, collected in a
//! [`World`], and rendered through a [`Camera`] by one of the radiance
//! estimators in [`renderer`].
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use carve_renderer::*;
//!
//! let mut world = World::new();
//! let material = Arc::new(Material::default());
//! world.add_shape(Box::new(Csg::difference(
//!     Box::new(Sphere::new(Transform::IDENTITY, material.clone())),
//!     Box::new(BoxShape::new(Transform::scaling(Vec3::splat(0.7)), material)),
//! )));
//!
//! let mut tracer = ImageTracer::new(HdrImage::new(640, 480), Camera::default());
//! tracer.fire_all_rays_par(&PathTracer::new(&world), 42, DEFAULT_BUCKET_SIZE);
//! ```

mod brdf;
mod bucket;
mod camera;
mod csg;
mod hit_record;
mod image_tracer;
mod material;
mod pcg;
mod pigment;
pub mod renderer;
mod shapes;
mod world;

pub use brdf::{Brdf, DEFAULT_THRESHOLD_ANGLE, SCATTERED_RAY_TMIN};
pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use csg::{Csg, CsgOperation};
pub use hit_record::HitRecord;
pub use image_tracer::ImageTracer;
pub use material::Material;
pub use pcg::Pcg;
pub use pigment::Pigment;
pub use renderer::{
    FlatRenderer, OnOffRenderer, PathTracer, RenderConfig, Renderer, RendererKind,
    ROULETTE_SURVIVAL_CAP,
};
pub use shapes::{BoxShape, Cone, Cylinder, Plane, Shape, Sphere};
pub use world::World;

/// Re-export color and image types from carve_core
pub use carve_core::{Color, HdrImage};

/// Re-export math types from carve_math
pub use carve_math::{Ray, Transform, Vec2, Vec3};
