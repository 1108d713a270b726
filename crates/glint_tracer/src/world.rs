//! The scene as the renderer sees it: geometry plus a background.

use crate::background::Background;
use crate::bvh::BvhNode;
use crate::diagnostics::{Counted, HitCounts};
use crate::hittable::{HitRecord, Hittable, HittableList};
use crate::SceneError;
use glint_math::{Aabb, Interval, Ray};

/// How the top-level objects are organised.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorldOptions<'a> {
    /// Test every object in order instead of building a BVH.
    pub disable_bvh: bool,
    /// Count hit tests into this session's counters.
    pub hit_counts: Option<&'a HitCounts>,
}

/// Top-level geometry and the background for escaping rays.
///
/// Read-only once built, so renders can share it across threads.
pub struct World {
    root: Box<dyn Hittable>,
    background: Box<dyn Background>,
    object_count: usize,
}

impl World {
    /// Build a world with a BVH over `objects`.
    pub fn new(objects: Vec<Box<dyn Hittable>>, background: Box<dyn Background>) -> Result<Self, SceneError> {
        Self::with_options(objects, background, &WorldOptions::default())
    }

    pub fn with_options(
        objects: Vec<Box<dyn Hittable>>,
        background: Box<dyn Background>,
        options: &WorldOptions<'_>,
    ) -> Result<Self, SceneError> {
        let object_count = objects.len();
        let counts = options.hit_counts;

        let root: Box<dyn Hittable> = if options.disable_bvh {
            let list: HittableList = objects
                .into_iter()
                .map(|object| Counted::wrap(object, counts))
                .collect::<Vec<_>>()
                .into();
            Box::new(list)
        } else {
            Box::new(BvhNode::with_rng(objects, &mut rand::thread_rng(), counts)?)
        };

        log::info!(
            "World built: {} objects, BVH {}",
            object_count,
            if options.disable_bvh { "disabled" } else { "enabled" }
        );

        Ok(Self {
            root: Counted::wrap(root, counts),
            background,
            object_count,
        })
    }

    pub fn background(&self) -> &dyn Background {
        self.background.as_ref()
    }

    /// Number of top-level objects the world was built from.
    pub fn object_count(&self) -> usize {
        self.object_count
    }
}

impl Hittable for World {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        self.root.hit(ray, ray_t, rec)
    }

    fn bounding_box(&self) -> Option<Aabb> {
        self.root.bounding_box()
    }

    fn kind(&self) -> &'static str {
        "World"
    }
}
