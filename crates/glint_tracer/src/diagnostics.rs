//! Per-session intersection counters.
//!
//! Counting is opt-in: scene construction wraps hittables in [`Counted`]
//! when a [`HitCounts`] is supplied, so an uncounted render pays nothing.

use crate::hittable::{HitRecord, Hittable};
use glint_math::{Aabb, Interval, Ray};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Hit-test call counts keyed by hittable kind.
///
/// Owned by whoever drives the render; counters are shared with the
/// [`Counted`] wrappers through `Arc`s handed out at construction time.
#[derive(Debug, Default)]
pub struct HitCounts {
    counters: Mutex<BTreeMap<&'static str, Arc<AtomicU64>>>,
}

impl HitCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared counter for `kind`, created on first use.
    pub fn counter(&self, kind: &'static str) -> Arc<AtomicU64> {
        let mut counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
        counters.entry(kind).or_default().clone()
    }

    /// Current totals, sorted by kind.
    pub fn snapshot(&self) -> Vec<(&'static str, u64)> {
        let counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
        counters
            .iter()
            .map(|(kind, count)| (*kind, count.load(Ordering::Relaxed)))
            .collect()
    }

    /// Total across every kind.
    pub fn total(&self) -> u64 {
        self.snapshot().iter().map(|(_, count)| count).sum()
    }

    /// Log the totals at info level.
    pub fn log_report(&self) {
        let snapshot = self.snapshot();
        if snapshot.is_empty() {
            log::info!("Hit counts: none recorded");
            return;
        }
        log::info!("Hit counts:");
        for (kind, count) in snapshot {
            log::info!("  {kind:<16} {count}");
        }
    }
}

/// Decorator that counts every hit test against the wrapped object.
pub struct Counted {
    inner: Box<dyn Hittable>,
    counter: Arc<AtomicU64>,
}

impl Counted {
    pub fn new(inner: Box<dyn Hittable>, counts: &HitCounts) -> Self {
        let counter = counts.counter(inner.kind());
        Self { inner, counter }
    }

    /// Wrap `inner` when counting is on, otherwise hand it back unchanged.
    pub fn wrap(inner: Box<dyn Hittable>, counts: Option<&HitCounts>) -> Box<dyn Hittable> {
        match counts {
            Some(counts) => Box::new(Counted::new(inner, counts)),
            None => inner,
        }
    }
}

impl Hittable for Counted {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        self.counter.fetch_add(1, Ordering::Relaxed);
        self.inner.hit(ray, ray_t, rec)
    }

    fn bounding_box(&self) -> Option<Aabb> {
        self.inner.bounding_box()
    }

    fn kind(&self) -> &'static str {
        self.inner.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use crate::sphere::Sphere;
    use crate::Color;
    use glint_math::Vec3;

    fn sphere() -> Box<dyn Hittable> {
        Box::new(Sphere::new(Vec3::new(0.0, 0.0, -2.0), 1.0, Arc::new(Lambertian::new(Color::ONE))))
    }

    #[test]
    fn test_counted_counts_every_call() {
        let counts = HitCounts::new();
        let counted = Counted::wrap(sphere(), Some(&counts));
        let hit = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let miss = Ray::new(Vec3::ZERO, Vec3::Z);

        let mut rec = HitRecord::default();
        assert!(counted.hit(&hit, Interval::from_min(0.001), &mut rec));
        assert!(!counted.hit(&miss, Interval::from_min(0.001), &mut rec));
        assert!(counted.hit(&hit, Interval::from_min(0.001), &mut rec));

        assert_eq!(counts.snapshot(), vec![("Sphere", 3)]);
        assert_eq!(counted.kind(), "Sphere");
    }

    #[test]
    fn test_counters_are_shared_per_kind() {
        let counts = HitCounts::new();
        let a = Counted::new(sphere(), &counts);
        let b = Counted::new(sphere(), &counts);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let mut rec = HitRecord::default();
        a.hit(&ray, Interval::from_min(0.001), &mut rec);
        b.hit(&ray, Interval::from_min(0.001), &mut rec);
        assert_eq!(counts.total(), 2);
    }

    #[test]
    fn test_wrap_without_counts_is_passthrough() {
        let wrapped = Counted::wrap(sphere(), None);
        assert_eq!(wrapped.kind(), "Sphere");
        assert!(wrapped.bounding_box().is_some());
    }

    #[test]
    fn test_sessions_are_independent() {
        let first = HitCounts::new();
        let second = HitCounts::new();
        first.counter("Sphere").fetch_add(5, Ordering::Relaxed);

        assert_eq!(first.total(), 5);
        assert!(second.snapshot().is_empty());
    }
}
