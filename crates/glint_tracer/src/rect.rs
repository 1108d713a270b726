//! Axis-aligned rectangles: the XY, XZ and YZ planes.

use crate::hittable::{HitRecord, Hittable};
use crate::material::Material;
use glint_math::{Aabb, Interval, Ray, Vec3, Vec3Ext};
use std::sync::Arc;

/// Half thickness given to the flat axis so the bounding box has volume.
const PLANE_PADDING: f32 = 0.0001;

/// Which axis-aligned plane a rectangle lies in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectPlane {
    /// Constant z, spans x and y
    Xy,
    /// Constant y, spans x and z
    Xz,
    /// Constant x, spans y and z
    Yz,
}

impl RectPlane {
    /// (first in-plane axis, second in-plane axis, fixed axis)
    fn axes(self) -> (usize, usize, usize) {
        match self {
            RectPlane::Xy => (0, 1, 2),
            RectPlane::Xz => (0, 2, 1),
            RectPlane::Yz => (1, 2, 0),
        }
    }

    fn normal(self) -> Vec3 {
        match self {
            RectPlane::Xy => Vec3::Z,
            RectPlane::Xz => Vec3::Y,
            RectPlane::Yz => Vec3::X,
        }
    }
}

/// A rectangle lying in an axis-aligned plane at offset `k`.
pub struct AxisRect {
    plane: RectPlane,
    a: Interval,
    b: Interval,
    k: f32,
    material: Arc<dyn Material>,
}

impl AxisRect {
    /// Rectangle spanning `a` and `b` along the plane's two in-plane axes.
    pub fn new(plane: RectPlane, a: (f32, f32), b: (f32, f32), k: f32, material: Arc<dyn Material>) -> Self {
        Self {
            plane,
            a: Interval::new(a.0.min(a.1), a.0.max(a.1)),
            b: Interval::new(b.0.min(b.1), b.0.max(b.1)),
            k,
            material,
        }
    }

    /// `x0..x1` by `y0..y1` at `z = k`.
    pub fn xy(x0: f32, x1: f32, y0: f32, y1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        Self::new(RectPlane::Xy, (x0, x1), (y0, y1), k, material)
    }

    /// `x0..x1` by `z0..z1` at `y = k`.
    pub fn xz(x0: f32, x1: f32, z0: f32, z1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        Self::new(RectPlane::Xz, (x0, x1), (z0, z1), k, material)
    }

    /// `y0..y1` by `z0..z1` at `x = k`.
    pub fn yz(y0: f32, y1: f32, z0: f32, z1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        Self::new(RectPlane::Yz, (y0, y1), (z0, z1), k, material)
    }

    pub fn plane(&self) -> RectPlane {
        self.plane
    }
}

impl Hittable for AxisRect {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let (axis_a, axis_b, fixed) = self.plane.axes();
        let origin = ray.origin();
        let direction = ray.direction();

        // A zero direction component gives +-inf or NaN, both rejected here
        let t = (self.k - origin.axis(fixed)) / direction.axis(fixed);
        if !ray_t.contains(t) {
            return false;
        }

        let a = origin.axis(axis_a) + t * direction.axis(axis_a);
        let b = origin.axis(axis_b) + t * direction.axis(axis_b);
        if !self.a.contains(a) || !self.b.contains(b) {
            return false;
        }

        rec.t = t;
        rec.p = ray.at(t);
        rec.u = (a - self.a.min) / self.a.size();
        rec.v = (b - self.b.min) / self.b.size();
        rec.set_face_normal(ray, self.plane.normal());
        rec.material = self.material.as_ref();

        true
    }

    fn bounding_box(&self) -> Option<Aabb> {
        let (axis_a, axis_b, fixed) = self.plane.axes();
        let mut minimum = Vec3::ZERO;
        let mut maximum = Vec3::ZERO;
        minimum[axis_a] = self.a.min;
        maximum[axis_a] = self.a.max;
        minimum[axis_b] = self.b.min;
        maximum[axis_b] = self.b.max;
        minimum[fixed] = self.k - PLANE_PADDING;
        maximum[fixed] = self.k + PLANE_PADDING;
        Some(Aabb::new(minimum, maximum))
    }

    fn kind(&self) -> &'static str {
        match self.plane {
            RectPlane::Xy => "XyRect",
            RectPlane::Xz => "XzRect",
            RectPlane::Yz => "YzRect",
        }
    }
}
