//! Constant-density participating medium (smoke, fog).

use crate::hittable::{HitRecord, Hittable};
use crate::material::{Isotropic, Material};
use crate::texture::Texture;
use crate::Color;
use glint_math::{Aabb, Interval, Ray, Vec3};
use std::sync::Arc;

/// A volume of uniform density filling a closed boundary.
///
/// Rays that enter the boundary scatter after a random free-flight
/// distance, or pass straight through if that distance exceeds the
/// path length inside. The boundary must be convex.
pub struct ConstantMedium {
    boundary: Box<dyn Hittable>,
    neg_inv_density: f32,
    phase_function: Arc<dyn Material>,
}

impl ConstantMedium {
    pub fn new(boundary: Box<dyn Hittable>, density: f32, albedo: Color) -> Self {
        Self::with_phase(boundary, density, Arc::new(Isotropic::new(albedo)))
    }

    pub fn with_texture(boundary: Box<dyn Hittable>, density: f32, albedo: Arc<dyn Texture>) -> Self {
        Self::with_phase(boundary, density, Arc::new(Isotropic::with_texture(albedo)))
    }

    fn with_phase(boundary: Box<dyn Hittable>, density: f32, phase_function: Arc<dyn Material>) -> Self {
        Self {
            boundary,
            neg_inv_density: -1.0 / density,
            phase_function,
        }
    }

    /// Intersect against a specific free-flight sample `u` in (0, 1].
    fn hit_with_sample<'a>(&'a self, ray: &Ray, ray_t: Interval, u: f32, rec: &mut HitRecord<'a>) -> bool {
        let mut entry = HitRecord::default();
        if !self.boundary.hit(ray, Interval::UNIVERSE, &mut entry) {
            return false;
        }

        let mut exit = HitRecord::default();
        if !self.boundary.hit(ray, Interval::from_min(entry.t + 0.0001), &mut exit) {
            return false;
        }

        let mut t_enter = entry.t.max(ray_t.min);
        let t_exit = exit.t.min(ray_t.max);
        if t_enter >= t_exit {
            return false;
        }
        if t_enter < 0.0 {
            t_enter = 0.0;
        }

        let ray_length = ray.direction().length();
        let distance_inside_boundary = (t_exit - t_enter) * ray_length;
        let hit_distance = self.neg_inv_density * u.ln();
        if hit_distance > distance_inside_boundary {
            return false;
        }

        rec.t = t_enter + hit_distance / ray_length;
        rec.p = ray.at(rec.t);
        // Arbitrary; isotropic scattering ignores both
        rec.normal = Vec3::X;
        rec.front_face = true;
        rec.u = 0.0;
        rec.v = 0.0;
        rec.material = self.phase_function.as_ref();

        true
    }
}

impl Hittable for ConstantMedium {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        // rand's [0, 1) flipped to (0, 1] keeps ln() finite
        let u = 1.0 - rand::random::<f32>();
        self.hit_with_sample(ray, ray_t, u, rec)
    }

    fn bounding_box(&self) -> Option<Aabb> {
        self.boundary.bounding_box()
    }

    fn kind(&self) -> &'static str {
        "ConstantMedium"
    }
}
