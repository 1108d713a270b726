//! Axis-aligned box built from six rectangles.

use crate::hittable::{HitRecord, Hittable, HittableList};
use crate::material::Material;
use crate::rect::AxisRect;
use glint_math::{Aabb, Interval, Ray, Vec3};
use std::sync::Arc;

/// A closed rectangular prism between two corners.
///
/// Named `Cuboid` so it doesn't shadow `std::boxed::Box`.
pub struct Cuboid {
    bbox: Aabb,
    sides: HittableList,
}

impl Cuboid {
    pub fn new(a: Vec3, b: Vec3, material: Arc<dyn Material>) -> Self {
        let bbox = Aabb::from_points(a, b);
        let (min, max) = (bbox.minimum, bbox.maximum);

        let mut sides = HittableList::new();
        sides.add(Box::new(AxisRect::xy(min.x, max.x, min.y, max.y, max.z, material.clone())));
        sides.add(Box::new(AxisRect::xy(min.x, max.x, min.y, max.y, min.z, material.clone())));
        sides.add(Box::new(AxisRect::xz(min.x, max.x, min.z, max.z, max.y, material.clone())));
        sides.add(Box::new(AxisRect::xz(min.x, max.x, min.z, max.z, min.y, material.clone())));
        sides.add(Box::new(AxisRect::yz(min.y, max.y, min.z, max.z, max.x, material.clone())));
        sides.add(Box::new(AxisRect::yz(min.y, max.y, min.z, max.z, min.x, material)));

        Self { bbox, sides }
    }
}

impl Hittable for Cuboid {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        self.sides.hit(ray, ray_t, rec)
    }

    fn bounding_box(&self) -> Option<Aabb> {
        Some(self.bbox)
    }

    fn kind(&self) -> &'static str {
        "Cuboid"
    }
}
