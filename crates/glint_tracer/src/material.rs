//! Material trait for surface scattering.

use crate::hittable::HitRecord;
use crate::sampling::{gen_f32, random_in_unit_sphere, random_unit_vector};
use crate::texture::{SolidColor, Texture};
use glint_math::{reflect, refract, Ray, Vec3, Vec3Ext};
use rand::RngCore;
use std::sync::Arc;

/// Color type alias (linear RGB, unbounded above for emitters)
pub type Color = Vec3;

/// Result of a successful scatter.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Colour multiplied into whatever the scattered ray brings back
    pub attenuation: Color,
    /// The outgoing ray, starting at the hit point
    pub scattered: Ray,
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult>;

    /// Light emitted at the given surface point. Black unless overridden.
    fn emitted(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        Color::ZERO
    }
}

fn solid(color: Color) -> Arc<dyn Texture> {
    Arc::new(SolidColor::new(color))
}

/// Lambertian (diffuse) material.
#[derive(Clone)]
pub struct Lambertian {
    albedo: Arc<dyn Texture>,
}

impl Lambertian {
    /// Create a new Lambertian material with a constant albedo.
    pub fn new(albedo: Color) -> Self {
        Self::with_texture(solid(albedo))
    }

    pub fn with_texture(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(&self, _ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if scatter_direction.near_zero() {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.albedo.value(rec.u, rec.v, rec.p),
            scattered: Ray::new(rec.p, scatter_direction),
        })
    }
}

/// Metal (specular) material.
#[derive(Clone)]
pub struct Metal {
    albedo: Arc<dyn Texture>,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror. Values above 1.0 are clamped.
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self::with_texture(solid(albedo), fuzz)
    }

    pub fn with_texture(albedo: Arc<dyn Texture>, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.min(1.0),
        }
    }
}

impl Material for Metal {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().unit(), rec.normal);
        let scattered_dir = reflected + self.fuzz * random_in_unit_sphere(rng);

        // Fuzz can push the reflection below the surface
        if scattered_dir.dot(rec.normal) > 0.0 {
            Some(ScatterResult {
                attenuation: self.albedo.value(rec.u, rec.v, rec.p),
                scattered: Ray::new(rec.p, scattered_dir),
            })
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
#[derive(Clone)]
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
    tint: Arc<dyn Texture>,
}

impl Dielectric {
    /// Clear dielectric.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self::with_texture(ior, solid(Color::ONE))
    }

    /// Dielectric whose transmitted and reflected light is tinted by `tint`.
    pub fn with_texture(ior: f32, tint: Arc<dyn Texture>) -> Self {
        Self { ior, tint }
    }

    /// Schlick's approximation for reflectance
    fn reflectance(cosine: f32, ior: f32) -> f32 {
        let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let refraction_ratio = if rec.front_face { 1.0 / self.ior } else { self.ior };

        let unit_direction = ray_in.direction().unit();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction = if cannot_refract || Self::reflectance(cos_theta, refraction_ratio) > gen_f32(rng) {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        Some(ScatterResult {
            attenuation: self.tint.value(rec.u, rec.v, rec.p),
            scattered: Ray::new(rec.p, direction),
        })
    }
}

/// Diffuse light emitter.
#[derive(Clone)]
pub struct DiffuseLight {
    emit: Arc<dyn Texture>,
}

impl DiffuseLight {
    /// Create a new diffuse light with the given emission color.
    pub fn new(emit: Color) -> Self {
        Self::with_texture(solid(emit))
    }

    pub fn with_texture(emit: Arc<dyn Texture>) -> Self {
        Self { emit }
    }
}

impl Material for DiffuseLight {
    fn scatter(&self, _ray_in: &Ray, _rec: &HitRecord, _rng: &mut dyn RngCore) -> Option<ScatterResult> {
        None
    }

    fn emitted(&self, u: f32, v: f32, p: Vec3) -> Color {
        self.emit.value(u, v, p)
    }
}

/// Phase function for participating media: scatter in any direction.
#[derive(Clone)]
pub struct Isotropic {
    albedo: Arc<dyn Texture>,
}

impl Isotropic {
    pub fn new(albedo: Color) -> Self {
        Self::with_texture(solid(albedo))
    }

    pub fn with_texture(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }
}

impl Material for Isotropic {
    fn scatter(&self, _ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        Some(ScatterResult {
            attenuation: self.albedo.value(rec.u, rec.v, rec.p),
            scattered: Ray::new(rec.p, random_in_unit_sphere(rng)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record_at_origin<'a>(material: &'a dyn Material, normal: Vec3, front_face: bool) -> HitRecord<'a> {
        HitRecord {
            p: Vec3::ZERO,
            normal,
            material,
            u: 0.5,
            v: 0.5,
            t: 1.0,
            front_face,
        }
    }

    #[test]
    fn test_lambertian_scatters_into_normal_hemisphere() {
        let material = Lambertian::new(Color::new(0.5, 0.25, 1.0));
        let rec = record_at_origin(&material, Vec3::Y, true);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..200 {
            let result = material.scatter(&ray, &rec, &mut rng).expect("lambertian always scatters");
            assert_eq!(result.attenuation, Color::new(0.5, 0.25, 1.0));
            assert_eq!(result.scattered.origin(), rec.p);
            // normal + unit vector never points below the surface
            assert!(result.scattered.direction().dot(Vec3::Y) >= -1e-5);
        }
    }

    #[test]
    fn test_metal_mirror_reflection() {
        let material = Metal::new(Color::new(0.8, 0.8, 0.8), 0.0);
        let rec = record_at_origin(&material, Vec3::Y, true);
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let mut rng = StdRng::seed_from_u64(5);

        let result = material.scatter(&ray, &rec, &mut rng).expect("mirror reflects");
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((result.scattered.direction() - expected).length() < 1e-5);
        assert_eq!(result.attenuation, Color::splat(0.8));
    }

    #[test]
    fn test_metal_absorbs_grazing_fuzz() {
        // Reflection is parallel to the surface, so any fuzz below it absorbs
        let material = Metal::new(Color::ONE, 1.0);
        let rec = record_at_origin(&material, Vec3::Y, true);
        let ray = Ray::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::X);
        let mut rng = StdRng::seed_from_u64(9);

        let mut absorbed = 0;
        for _ in 0..200 {
            match material.scatter(&ray, &rec, &mut rng) {
                Some(result) => assert!(result.scattered.direction().dot(rec.normal) > 0.0),
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_metal_fuzz_clamped() {
        let material = Metal::new(Color::ONE, 3.0);
        assert_eq!(material.fuzz, 1.0);
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let material = Dielectric::new(1.5);
        // Inside the glass, leaving at a steep angle
        let rec = record_at_origin(&material, Vec3::NEG_Y, false);
        let incoming = Vec3::new(1.0, 0.2, 0.0);
        let ray = Ray::new(Vec3::new(-1.0, -0.2, 0.0), incoming);
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..50 {
            let result = material.scatter(&ray, &rec, &mut rng).expect("dielectric always scatters");
            let expected = reflect(incoming.normalize(), Vec3::NEG_Y);
            assert!((result.scattered.direction() - expected).length() < 1e-5);
            assert_eq!(result.attenuation, Color::ONE);
        }
    }

    #[test]
    fn test_dielectric_head_on_mostly_refracts() {
        let material = Dielectric::new(1.5);
        let rec = record_at_origin(&material, Vec3::Y, true);
        let ray = Ray::new(Vec3::Y, Vec3::NEG_Y);
        let mut rng = StdRng::seed_from_u64(21);

        // Schlick gives 4% reflectance at normal incidence
        let transmitted = (0..1000)
            .filter_map(|_| material.scatter(&ray, &rec, &mut rng))
            .filter(|result| result.scattered.direction().y < 0.0)
            .count();
        assert!(transmitted > 900, "only {transmitted} of 1000 rays refracted");
    }

    #[test]
    fn test_diffuse_light_emits_without_scattering() {
        let material = DiffuseLight::new(Color::splat(4.0));
        let rec = record_at_origin(&material, Vec3::Y, true);
        let ray = Ray::new(Vec3::Y, Vec3::NEG_Y);
        let mut rng = StdRng::seed_from_u64(0);

        assert!(material.scatter(&ray, &rec, &mut rng).is_none());
        assert_eq!(material.emitted(0.0, 0.0, Vec3::ZERO), Color::splat(4.0));
    }

    #[test]
    fn test_non_emissive_materials_emit_black() {
        assert_eq!(Lambertian::new(Color::ONE).emitted(0.3, 0.3, Vec3::ONE), Color::ZERO);
        assert_eq!(Metal::new(Color::ONE, 0.0).emitted(0.3, 0.3, Vec3::ONE), Color::ZERO);
        assert_eq!(Isotropic::new(Color::ONE).emitted(0.3, 0.3, Vec3::ONE), Color::ZERO);
    }

    #[test]
    fn test_isotropic_scatters_from_hit_point() {
        let material = Isotropic::new(Color::splat(0.5));
        let mut rec = record_at_origin(&material, Vec3::X, true);
        rec.p = Vec3::new(1.0, 2.0, 3.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::ONE);
        let mut rng = StdRng::seed_from_u64(8);

        let result = material.scatter(&ray, &rec, &mut rng).expect("isotropic always scatters");
        assert_eq!(result.scattered.origin(), rec.p);
        assert!(result.scattered.direction().length_squared() < 1.0);
        assert_eq!(result.attenuation, Color::splat(0.5));
    }
}
