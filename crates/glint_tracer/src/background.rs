//! Radiance for rays that leave the scene.

use crate::hittable::{HitRecord, Hittable};
use crate::material::{DiffuseLight, Material};
use crate::sphere::Sphere;
use crate::texture::ImageTexture;
use crate::{Color, SceneError};
use glint_math::{Interval, Ray, Vec3, Vec3Ext};
use std::path::Path;
use std::sync::Arc;

/// Colour seen along a ray that hits nothing.
pub trait Background: Send + Sync {
    fn color(&self, ray: &Ray) -> Color;
}

/// The same colour in every direction.
#[derive(Debug, Clone, Copy)]
pub struct SolidBackground {
    color: Color,
}

impl SolidBackground {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Background for SolidBackground {
    fn color(&self, _ray: &Ray) -> Color {
        self.color
    }
}

/// Vertical blend from white straight down to sky blue straight up.
#[derive(Debug, Clone, Copy)]
pub struct GradientBackground {
    bottom: Color,
    top: Color,
}

impl GradientBackground {
    pub fn new(bottom: Color, top: Color) -> Self {
        Self { bottom, top }
    }
}

impl Default for GradientBackground {
    fn default() -> Self {
        Self::new(Color::ONE, Color::new(0.5, 0.7, 1.0))
    }
}

impl Background for GradientBackground {
    fn color(&self, ray: &Ray) -> Color {
        let t = 0.5 * (ray.direction().unit().y + 1.0);
        self.bottom * (1.0 - t) + self.top * t
    }
}

/// Environment image wrapped on a large emissive sphere around the origin.
pub struct ImageBackground {
    sphere: Sphere,
}

impl ImageBackground {
    /// Radius of the environment sphere.
    pub const RADIUS: f32 = 1000.0;

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        Ok(Self::from_texture(ImageTexture::open(path)?))
    }

    pub fn from_texture(texture: ImageTexture) -> Self {
        let material = Arc::new(DiffuseLight::with_texture(Arc::new(texture)));
        Self {
            sphere: Sphere::new(Vec3::ZERO, Self::RADIUS, material),
        }
    }
}

impl Background for ImageBackground {
    fn color(&self, ray: &Ray) -> Color {
        let mut rec = HitRecord::default();
        // Rays starting outside the sphere and pointing away see nothing
        if !self.sphere.hit(ray, Interval::from_min(0.0001), &mut rec) {
            return Color::ZERO;
        }
        rec.material.emitted(rec.u, rec.v, rec.p)
    }
}
