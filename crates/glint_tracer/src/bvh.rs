//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree over hittables. Each level splits on a randomly chosen
//! axis at the median of the objects' minimum corners.

use crate::diagnostics::{Counted, HitCounts};
use crate::hittable::{HitRecord, Hittable};
use crate::SceneError;
use glint_math::{Aabb, Interval, Ray};
use rand::{Rng, RngCore};

/// Internal node of the hierarchy.
///
/// Children are either further nodes or the scene's own hittables. A
/// partition holding a single object leaves `right` empty rather than
/// duplicating the leaf.
pub struct BvhNode {
    left: Box<dyn Hittable>,
    right: Option<Box<dyn Hittable>>,
    bbox: Aabb,
    depth: usize,
}

impl BvhNode {
    /// Build a BVH over `objects` using the thread-local generator for axis choice.
    pub fn new(objects: Vec<Box<dyn Hittable>>) -> Result<Self, SceneError> {
        Self::with_rng(objects, &mut rand::thread_rng(), None)
    }

    /// Build with an explicit generator, optionally counting hit tests on
    /// every node and leaf.
    pub fn with_rng(
        objects: Vec<Box<dyn Hittable>>,
        rng: &mut dyn RngCore,
        counts: Option<&HitCounts>,
    ) -> Result<Self, SceneError> {
        let count = objects.len();
        let node = Self::build(objects, rng, counts)?;
        log::debug!("Built BVH over {} objects, depth {}", count, node.depth());
        Ok(node)
    }

    fn build(
        objects: Vec<Box<dyn Hittable>>,
        rng: &mut dyn RngCore,
        counts: Option<&HitCounts>,
    ) -> Result<Self, SceneError> {
        let axis = rng.gen_range(0..3);

        // Key every object by its box's minimum corner on the chosen axis
        let mut keyed = objects
            .into_iter()
            .map(|object| {
                let bbox = object
                    .bounding_box()
                    .ok_or(SceneError::MissingBoundingBox { kind: object.kind() })?;
                Ok((bbox, object))
            })
            .collect::<Result<Vec<_>, SceneError>>()?;

        keyed.sort_by(|(a, _), (b, _)| {
            a.minimum[axis]
                .partial_cmp(&b.minimum[axis])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        match keyed.len() {
            0 => Err(SceneError::EmptyBvh),
            1 => {
                let (bbox, object) = keyed.remove(0);
                Ok(Self {
                    left: Counted::wrap(object, counts),
                    right: None,
                    bbox,
                    depth: 1,
                })
            }
            2 => {
                let (right_box, right) = keyed.remove(1);
                let (left_box, left) = keyed.remove(0);
                Ok(Self {
                    left: Counted::wrap(left, counts),
                    right: Some(Counted::wrap(right, counts)),
                    bbox: Aabb::surrounding(&left_box, &right_box),
                    depth: 1,
                })
            }
            n => {
                let right_half: Vec<_> = keyed.split_off(n / 2).into_iter().map(|(_, o)| o).collect();
                let left_half: Vec<_> = keyed.into_iter().map(|(_, o)| o).collect();

                let left = Self::build(left_half, rng, counts)?;
                let right = Self::build(right_half, rng, counts)?;
                let bbox = Aabb::surrounding(&left.bbox, &right.bbox);
                let depth = 1 + left.depth.max(right.depth);

                Ok(Self {
                    left: Counted::wrap(Box::new(left), counts),
                    right: Some(Counted::wrap(Box::new(right), counts)),
                    bbox,
                    depth,
                })
            }
        }
    }

    /// Number of node levels below and including this one.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Hittable for BvhNode {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        if !self.bbox.hit(ray, ray_t) {
            return false;
        }

        let hit_left = self.left.hit(ray, ray_t, rec);

        // Only accept right hits closer than the left one
        let right_max = if hit_left { rec.t } else { ray_t.max };
        let hit_right = match &self.right {
            Some(right) => right.hit(ray, ray_t.with_max(right_max), rec),
            None => false,
        };

        hit_left || hit_right
    }

    fn bounding_box(&self) -> Option<Aabb> {
        Some(self.bbox)
    }

    fn kind(&self) -> &'static str {
        "BvhNode"
    }
}
