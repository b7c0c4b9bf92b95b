//! BRDFs: how a surface redistributes incoming light.
//!
//! Each BRDF can be evaluated for a pair of directions (used by deterministic
//! renderers) and can stochastically pick one outgoing direction (used by the
//! path tracer).

use std::f32::consts::PI;

use carve_math::{create_onb_from_z, Ray, Vec2, Vec3};

use crate::{Color, Pcg, Pigment};

/// Default tolerance when matching incoming and outgoing angles of a mirror (0.1°).
pub const DEFAULT_THRESHOLD_ANGLE: f32 = PI / 1800.0;

/// Lower bound of the parameter range for scattered rays.
pub const SCATTERED_RAY_TMIN: f32 = 1e-3;

/// Bidirectional reflectance distribution function.
#[derive(Debug, Clone)]
pub enum Brdf {
    /// Ideal Lambertian reflector.
    Diffuse { pigment: Pigment, reflectance: f32 },
    /// Ideal mirror.
    Specular {
        pigment: Pigment,
        threshold_angle: f32,
    },
}

impl Brdf {
    /// Lambertian BRDF with unit reflectance.
    pub fn diffuse(pigment: Pigment) -> Self {
        Brdf::Diffuse {
            pigment,
            reflectance: 1.0,
        }
    }

    /// Mirror BRDF with the default angular threshold.
    pub fn specular(pigment: Pigment) -> Self {
        Brdf::Specular {
            pigment,
            threshold_angle: DEFAULT_THRESHOLD_ANGLE,
        }
    }

    /// The surface albedo.
    pub fn pigment(&self) -> &Pigment {
        match self {
            Brdf::Diffuse { pigment, .. } | Brdf::Specular { pigment, .. } => pigment,
        }
    }

    /// Radiance response for light arriving along `in_dir` and leaving along `out_dir`.
    pub fn eval(&self, normal: Vec3, in_dir: Vec3, out_dir: Vec3, uv: Vec2) -> Color {
        match self {
            Brdf::Diffuse {
                pigment,
                reflectance,
            } => pigment.get_color(uv) * (reflectance / PI),
            Brdf::Specular {
                pigment,
                threshold_angle,
            } => {
                let normal = normal.normalize();
                let theta_in = normal.dot(in_dir.normalize()).clamp(-1.0, 1.0).acos();
                let theta_out = normal.dot(out_dir.normalize()).clamp(-1.0, 1.0).acos();

                if (theta_in - theta_out).abs() < *threshold_angle {
                    pigment.get_color(uv)
                } else {
                    Color::ZERO
                }
            }
        }
    }

    /// Pick one outgoing ray for a ray travelling along `incoming_dir` that
    /// hit `interaction_point`.
    ///
    /// Diffuse surfaces draw two floats from `pcg`; mirrors draw none.
    pub fn scatter_ray(
        &self,
        pcg: &mut Pcg,
        incoming_dir: Vec3,
        interaction_point: Vec3,
        normal: Vec3,
        depth: u32,
    ) -> Ray {
        let direction = match self {
            Brdf::Diffuse { .. } => {
                // Cosine-weighted hemisphere sample: the pdf cos(theta)/pi
                // cancels the cosine term of the rendering equation.
                let (e1, e2, e3) = create_onb_from_z(normal.normalize());
                let cos_theta_sq = pcg.random_float();
                let cos_theta = cos_theta_sq.sqrt();
                let sin_theta = (1.0 - cos_theta_sq).max(0.0).sqrt();
                let phi = 2.0 * PI * pcg.random_float();

                e1 * (phi.cos() * sin_theta) + e2 * (phi.sin() * sin_theta) + e3 * cos_theta
            }
            Brdf::Specular { .. } => {
                let ray_dir = incoming_dir.normalize();
                let normal = normal.normalize();
                ray_dir - normal * 2.0 * normal.dot(ray_dir)
            }
        };

        Ray::new(interaction_point, direction)
            .with_range(SCATTERED_RAY_TMIN, f32::INFINITY)
            .with_depth(depth)
    }
}

impl Default for Brdf {
    fn default() -> Self {
        Brdf::diffuse(Pigment::default())
    }
}
