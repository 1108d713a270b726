use crate::{Interval, Ray, Vec3};

/// Axis-Aligned Bounding Box used by the BVH for conservative rejection.
///
/// Invariant: `minimum[axis] <= maximum[axis]` on every axis. Use
/// [`Aabb::from_points`] when the corner order is not known.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub minimum: Vec3,
    pub maximum: Vec3,
}

impl Aabb {
    /// Create a box from corners that are already ordered.
    pub const fn new(minimum: Vec3, maximum: Vec3) -> Self {
        Self { minimum, maximum }
    }

    /// Create an AABB from two arbitrary corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self {
            minimum: a.min(b),
            maximum: a.max(b),
        }
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            minimum: box0.minimum.min(box1.minimum),
            maximum: box0.maximum.max(box1.maximum),
        }
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, axis: usize) -> Interval {
        Interval::new(self.minimum[axis], self.maximum[axis])
    }

    /// Test if a ray intersects this AABB within the given interval.
    ///
    /// Slab method. A zero direction component gives an infinite inverse,
    /// and the IEEE comparisons below then resolve the axis correctly:
    /// the slab is either the whole line or empty.
    pub fn hit(&self, r: &Ray, mut ray_t: Interval) -> bool {
        for axis in 0..3 {
            let inv_d = 1.0 / r.direction[axis];
            let mut t0 = (self.minimum[axis] - r.origin[axis]) * inv_d;
            let mut t1 = (self.maximum[axis] - r.origin[axis]) * inv_d;
            if inv_d < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            ray_t.min = if t0 > ray_t.min { t0 } else { ray_t.min };
            ray_t.max = if t1 < ray_t.max { t1 } else { ray_t.max };
            if ray_t.max <= ray_t.min {
                return false;
            }
        }
        true
    }

    /// Translate (move) the AABB by an offset vector.
    pub fn translate(&self, offset: Vec3) -> Aabb {
        Aabb::new(self.minimum + offset, self.maximum + offset)
    }

    /// The eight corners of the box.
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.minimum, self.maximum);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }
}

impl std::fmt::Display for Aabb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:.2},{:.2},{:.2}) - ({:.2},{:.2},{:.2})",
            self.minimum.x,
            self.minimum.y,
            self.minimum.z,
            self.maximum.x,
            self.maximum.y,
            self.maximum.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::from_points(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_aabb_from_points_orders_corners() {
        let aabb = Aabb::from_points(Vec3::new(10.0, 0.0, 5.0), Vec3::new(0.0, 10.0, -5.0));

        assert_eq!(aabb.minimum, Vec3::new(0.0, 0.0, -5.0));
        assert_eq!(aabb.maximum, Vec3::new(10.0, 10.0, 5.0));
    }

    #[test]
    fn test_aabb_hit() {
        let aabb = unit_box();

        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Pointing away
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(!aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Interval ends before the box
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(!aabb.hit(&ray, Interval::new(0.0, 3.0)));
    }

    #[test]
    fn test_aabb_zero_direction_components() {
        let aabb = unit_box();

        // Origin outside the X slab with zero X direction: can never enter
        let ray = Ray::new(Vec3::new(5.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(!aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Origin inside the X and Y slabs with zero X and Y direction
        let ray = Ray::new(Vec3::new(0.5, -0.5, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Two zero components, origin outside the Y slab
        let ray = Ray::new(Vec3::new(0.0, 3.0, -5.0), Vec3::new(0.0, 0.0, 2.0));
        assert!(!aabb.hit(&ray, Interval::new(0.0, 100.0)));
    }

    #[test]
    fn test_aabb_corner_relabeling_symmetry() {
        let a = Vec3::new(-2.0, 1.0, 3.0);
        let b = Vec3::new(4.0, -1.0, 0.5);
        let forward = Aabb::from_points(a, b);
        let backward = Aabb::from_points(b, a);

        let rays = [
            Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::new(0.05, 0.0, 1.0)),
            Ray::new(Vec3::new(10.0, 10.0, 10.0), Vec3::new(-1.0, -1.0, -1.0)),
            Ray::new(Vec3::new(-10.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0)),
            Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
        ];
        for ray in &rays {
            let range = Interval::new(0.001, f32::INFINITY);
            assert_eq!(forward.hit(ray, range), backward.hit(ray, range));
        }
    }

    #[test]
    fn test_aabb_surrounding() {
        let box1 = Aabb::from_points(Vec3::ZERO, Vec3::new(5.0, 5.0, 5.0));
        let box2 = Aabb::from_points(Vec3::new(3.0, -3.0, 3.0), Vec3::new(10.0, 10.0, 10.0));
        let surrounding = Aabb::surrounding(&box1, &box2);

        assert_eq!(surrounding.minimum, Vec3::new(0.0, -3.0, 0.0));
        assert_eq!(surrounding.maximum, Vec3::new(10.0, 10.0, 10.0));
    }

    #[test]
    fn test_aabb_surrounding_is_idempotent_and_commutative() {
        let a = Aabb::from_points(Vec3::new(-1.0, 2.0, 0.0), Vec3::new(1.0, 3.0, 4.0));
        let b = Aabb::from_points(Vec3::new(0.5, -2.0, 1.0), Vec3::new(6.0, 0.0, 2.0));
        let c = Aabb::from_points(Vec3::new(-7.0, 0.0, -1.0), Vec3::new(-6.0, 9.0, 0.0));

        assert_eq!(Aabb::surrounding(&a, &a), a);
        assert_eq!(Aabb::surrounding(&a, &b), Aabb::surrounding(&b, &a));

        let left = Aabb::surrounding(&Aabb::surrounding(&a, &b), &c);
        let right = Aabb::surrounding(&a, &Aabb::surrounding(&c, &b));
        assert_eq!(left, right);
    }

    #[test]
    fn test_aabb_translate() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::ONE);
        let translated = aabb.translate(Vec3::new(5.0, 0.0, 0.0));

        assert_eq!(translated.minimum, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(translated.maximum, Vec3::new(6.0, 1.0, 1.0));
    }

    #[test]
    fn test_aabb_axis_interval() {
        let aabb = Aabb::from_points(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(aabb.axis_interval(1), Interval::new(2.0, 5.0));
    }
}
