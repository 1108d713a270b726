//! Instancing wrappers that move or rotate another hittable.
//!
//! The wrapped object is intersected in its own frame: the incoming ray
//! goes through the inverse transform, the hit comes back through the
//! forward one.

use crate::hittable::{HitRecord, Hittable};
use glint_math::{Aabb, Interval, Mat4, Mat4Ext, Ray, Vec3};

/// Offsets a hittable by a fixed vector.
pub struct Translate {
    object: Box<dyn Hittable>,
    offset: Vec3,
    bbox: Option<Aabb>,
}

impl Translate {
    pub fn new(object: Box<dyn Hittable>, offset: Vec3) -> Self {
        let bbox = object.bounding_box().map(|b| b.translate(offset));
        Self {
            object,
            offset,
            bbox,
        }
    }
}

impl Hittable for Translate {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let moved = Ray::new(ray.origin() - self.offset, ray.direction());
        if !self.object.hit(&moved, ray_t, rec) {
            return false;
        }

        // Direction is unchanged, so the face orientation still holds
        rec.p += self.offset;
        true
    }

    fn bounding_box(&self) -> Option<Aabb> {
        self.bbox
    }

    fn kind(&self) -> &'static str {
        "Translate"
    }
}

/// Rotates a hittable about the world Y axis.
pub struct RotateY {
    object: Box<dyn Hittable>,
    transform: Mat4,
    inv_transform: Mat4,
    bbox: Option<Aabb>,
}

impl RotateY {
    /// Rotate by `degrees`, counter-clockwise looking down -Y.
    pub fn new(object: Box<dyn Hittable>, degrees: f32) -> Self {
        let transform = Mat4::from_rotation_y(degrees.to_radians());
        let inv_transform = transform.inverse();
        // Conservative box from the eight rotated corners
        let bbox = object.bounding_box().map(|b| transform.transform_aabb(&b));

        Self {
            object,
            transform,
            inv_transform,
            bbox,
        }
    }
}

impl Hittable for RotateY {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let local_ray = Ray::new(
            self.inv_transform.transform_point3(ray.origin()),
            self.inv_transform.transform_vector3(ray.direction()),
        );
        if !self.object.hit(&local_ray, ray_t, rec) {
            return false;
        }

        // Rotation preserves t and the sign of dot(direction, normal)
        rec.p = self.transform.transform_point3(rec.p);
        rec.normal = self.transform.transform_vector3(rec.normal);
        true
    }

    fn bounding_box(&self) -> Option<Aabb> {
        self.bbox
    }

    fn kind(&self) -> &'static str {
        "RotateY"
    }
}
