// Transform utilities for Mat4
//
// Extends glam::Mat4 with the pieces the hittable transforms need.
// glam::Mat4 already provides transform_point3(), transform_vector3() and inverse().

use glam::{Mat4, Vec3};
use crate::Aabb;

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Transform an axis-aligned bounding box.
    /// Computes the bounding box of all 8 transformed corners, so the result
    /// is conservative (looser than the true rotated volume).
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb;
}

impl Mat4Ext for Mat4 {
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        let mut result_min = Vec3::INFINITY;
        let mut result_max = Vec3::NEG_INFINITY;

        for corner in aabb.corners() {
            let p = self.transform_point3(corner);
            result_min = result_min.min(p);
            result_max = result_max.max(p);
        }

        Aabb::new(result_min, result_max)
    }
}
