use glam::Vec3;

use crate::{BoundingBox, Ray};

/// The capability a piece of geometry needs for the tree to index and query
/// it; the geometry-specific intersection math stays with the implementor.
///
/// `hit()` must report only distances inside
/// `ray.min_distance..ray.max_distance` - the tree relies on that when it
/// compares candidates from different leaves.
pub trait Primitive {
    fn bounds(&self) -> BoundingBox;

    fn center(&self) -> Vec3;

    /// Nearest intersection distance along `ray`, if any.
    fn hit(&self, ray: &Ray) -> Option<f32>;

    /// Whether `ray` intersects at all; override when the implementor can
    /// answer cheaper than a full nearest-hit computation.
    fn hit_any(&self, ray: &Ray) -> bool {
        self.hit(ray).is_some()
    }
}

/// The nearest hit found by a tree query.
#[derive(Clone, Copy, Debug)]
pub struct Hit<'a, P> {
    pub primitive: &'a P,
    pub distance: f32,
}
