//! Recursive path tracing integrator.

use crate::hittable::{HitRecord, Hittable};
use crate::sampling::{random_in_hemisphere, random_unit_vector};
use crate::world::World;
use crate::{Color, RenderParams};
use glint_math::{Interval, Ray};
use rand::RngCore;

/// Closest hit distance accepted, to avoid re-hitting the surface a ray
/// just left.
pub const T_MIN: f32 = 0.001;

/// How surfaces are shaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    /// Materials scatter and emit normally
    #[default]
    Materials,
    /// Colour is the remapped surface normal; no bounces
    Normals,
    /// Ignore materials and bounce grey diffuse rays
    DiffuseOnly {
        /// Sample the hemisphere directly instead of normal + unit vector
        hemisphere: bool,
    },
}

impl ShadingMode {
    pub fn from_params(params: &RenderParams) -> Self {
        if params.normal_material {
            ShadingMode::Normals
        } else if params.disable_materials {
            ShadingMode::DiffuseOnly {
                hemisphere: params.disable_lambertian,
            }
        } else {
            ShadingMode::Materials
        }
    }
}

/// Computes the radiance arriving along a ray.
#[derive(Debug, Clone, Copy, Default)]
pub struct Integrator {
    mode: ShadingMode,
}

impl Integrator {
    pub fn new(mode: ShadingMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ShadingMode {
        self.mode
    }

    /// Compute the color seen by a ray, following at most `depth` bounces.
    pub fn ray_color(&self, ray: &Ray, world: &World, depth: u32, rng: &mut dyn RngCore) -> Color {
        // Out of bounces: no more light is gathered
        if depth == 0 {
            return Color::ZERO;
        }

        let mut rec = HitRecord::default();
        if !world.hit(ray, Interval::from_min(T_MIN), &mut rec) {
            return world.background().color(ray);
        }

        match self.mode {
            ShadingMode::Normals => 0.5 * (rec.normal + Color::ONE),
            ShadingMode::DiffuseOnly { hemisphere } => {
                let direction = if hemisphere {
                    random_in_hemisphere(rng, rec.normal)
                } else {
                    rec.normal + random_unit_vector(rng)
                };
                let bounce = Ray::new(rec.p, direction);
                0.5 * self.ray_color(&bounce, world, depth - 1, rng)
            }
            ShadingMode::Materials => {
                let emission = rec.material.emitted(rec.u, rec.v, rec.p);
                match rec.material.scatter(ray, &rec, rng) {
                    Some(result) => {
                        let incoming = self.ray_color(&result.scattered, world, depth - 1, rng);
                        emission + result.attenuation * incoming
                    }
                    None => emission,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::SolidBackground;
    use crate::material::{DiffuseLight, Lambertian, Metal};
    use crate::sphere::Sphere;
    use glint_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn single_sphere_world(material: Arc<dyn crate::Material>, background: Color) -> World {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, material);
        World::new(vec![Box::new(sphere) as Box<dyn Hittable>], Box::new(SolidBackground::new(background))).expect("builds")
    }

    #[test]
    fn test_mode_from_params() {
        let params = RenderParams::default();
        assert_eq!(ShadingMode::from_params(&params), ShadingMode::Materials);

        let params = RenderParams {
            normal_material: true,
            ..Default::default()
        };
        assert_eq!(ShadingMode::from_params(&params), ShadingMode::Normals);

        let params = RenderParams {
            disable_materials: true,
            disable_lambertian: true,
            ..Default::default()
        };
        assert_eq!(
            ShadingMode::from_params(&params),
            ShadingMode::DiffuseOnly { hemisphere: true }
        );
    }

    #[test]
    fn test_zero_depth_is_black() {
        let world = single_sphere_world(Arc::new(Lambertian::new(Color::ONE)), Color::ONE);
        let mut rng = StdRng::seed_from_u64(0);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        // Even a ray that escapes to a white background
        assert_eq!(Integrator::default().ray_color(&ray, &world, 0, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_miss_returns_background() {
        let world = single_sphere_world(Arc::new(Lambertian::new(Color::ONE)), Color::new(0.2, 0.4, 0.6));
        let mut rng = StdRng::seed_from_u64(0);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        let color = Integrator::default().ray_color(&ray, &world, 5, &mut rng);
        assert_eq!(color, Color::new(0.2, 0.4, 0.6));
    }

    #[test]
    fn test_normal_mode() {
        let world = single_sphere_world(Arc::new(Lambertian::new(Color::ONE)), Color::ZERO);
        let mut rng = StdRng::seed_from_u64(0);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let color = Integrator::new(ShadingMode::Normals).ray_color(&ray, &world, 1, &mut rng);
        assert!((color - Color::new(0.5, 0.5, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_mirror_reflection_at_depth_two() {
        // Mirror facing the camera; the reflection escapes to the background
        let world = single_sphere_world(Arc::new(Metal::new(Color::splat(0.8), 0.0)), Color::new(0.5, 1.0, 0.25));
        let mut rng = StdRng::seed_from_u64(0);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let color = Integrator::default().ray_color(&ray, &world, 2, &mut rng);
        assert!((color - Color::new(0.4, 0.8, 0.2)).length() < 1e-5);

        // One bounce only: the reflected ray gets depth 0
        let color = Integrator::default().ray_color(&ray, &world, 1, &mut rng);
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_emitter_adds_emission() {
        let world = single_sphere_world(Arc::new(DiffuseLight::new(Color::splat(3.0))), Color::ONE);
        let mut rng = StdRng::seed_from_u64(0);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let color = Integrator::default().ray_color(&ray, &world, 4, &mut rng);
        assert_eq!(color, Color::splat(3.0));
    }

    #[test]
    fn test_black_scene_creates_no_energy() {
        // Black diffuse sphere in a black void
        let world = single_sphere_world(Arc::new(Lambertian::new(Color::ZERO)), Color::ZERO);
        let mut rng = StdRng::seed_from_u64(12);
        let integrator = Integrator::default();

        for i in 0..100 {
            let x = (i as f32 / 50.0) - 1.0;
            let ray = Ray::new(Vec3::ZERO, Vec3::new(x, 0.1, -1.0));
            assert_eq!(integrator.ray_color(&ray, &world, 8, &mut rng), Color::ZERO);
        }
    }

    #[test]
    fn test_diffuse_only_halves_per_bounce() {
        // Each bounce halves the light; one bounce into a white sky is 0.5
        let world = single_sphere_world(Arc::new(Lambertian::new(Color::ONE)), Color::ONE);
        let mut rng = StdRng::seed_from_u64(5);
        let integrator = Integrator::new(ShadingMode::DiffuseOnly { hemisphere: false });

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let color = integrator.ray_color(&ray, &world, 3, &mut rng);
        assert!(color.max_element() <= 0.5 + 1e-6);
        assert!(color.x == color.y && color.y == color.z);
    }
}
