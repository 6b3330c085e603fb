use std::ops::{Add, AddAssign};

use glam::Vec3;

use crate::Ray;

/// An axis-aligned bounding box.
///
/// The default box is empty (`min > max`); growing it by a point or by
/// another box tightens it around whatever it has absorbed so far.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    min: Vec3,
    max: Vec3,
}

impl BoundingBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        points.into_iter().collect()
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Total surface area, `2 * (sx*sy + sy*sz + sx*sz)`.
    ///
    /// An empty box reports zero area so that it contributes nothing to SAH
    /// costs.
    pub fn area(&self) -> f32 {
        if !self.is_set() {
            return 0.0;
        }

        let extent = self.extent();

        2.0 * (extent.x * extent.y
            + extent.y * extent.z
            + extent.z * extent.x)
    }

    pub fn is_set(&self) -> bool {
        self.min.x != Self::default().min.x
    }

    pub fn contains(&self, other: &Self) -> bool {
        self.min.cmple(other.min).all() && self.max.cmpge(other.max).all()
    }

    pub fn grow(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Intersects `ray` with the box's three slabs and returns the entry and
    /// exit distances of the overlapping parametric interval.
    ///
    /// The ray's per-axis sign bits select the near and far bound without
    /// branching; a negative entry distance means the ray starts inside the
    /// box. Whether the interval overlaps `0..ray.max_distance` is the
    /// caller's concern.
    pub fn intersect_slab(&self, ray: &Ray) -> Option<(f32, f32)> {
        let bounds = [self.min, self.max];

        let mut t_entry = (bounds[ray.sign[0]].x - ray.origin.x)
            * ray.inv_direction.x;
        let mut t_exit = (bounds[1 - ray.sign[0]].x - ray.origin.x)
            * ray.inv_direction.x;

        let ty_entry = (bounds[ray.sign[1]].y - ray.origin.y)
            * ray.inv_direction.y;
        let ty_exit = (bounds[1 - ray.sign[1]].y - ray.origin.y)
            * ray.inv_direction.y;

        if t_entry > ty_exit || ty_entry > t_exit {
            return None;
        }

        t_entry = t_entry.max(ty_entry);
        t_exit = t_exit.min(ty_exit);

        let tz_entry = (bounds[ray.sign[2]].z - ray.origin.z)
            * ray.inv_direction.z;
        let tz_exit = (bounds[1 - ray.sign[2]].z - ray.origin.z)
            * ray.inv_direction.z;

        if t_entry > tz_exit || tz_entry > t_exit {
            return None;
        }

        t_entry = t_entry.max(tz_entry);
        t_exit = t_exit.min(tz_exit);

        Some((t_entry, t_exit))
    }

    /// Whether `ray` passes through the box within its travel limit.
    pub fn intersects(&self, ray: &Ray) -> bool {
        self.intersect_slab(ray)
            .map_or(false, |(t_entry, t_exit)| {
                t_entry < ray.max_distance && t_exit > 0.0
            })
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            min: Vec3::MAX,
            max: Vec3::MIN,
        }
    }
}

impl Add<Vec3> for BoundingBox {
    type Output = Self;

    fn add(mut self, rhs: Vec3) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign<Vec3> for BoundingBox {
    fn add_assign(&mut self, rhs: Vec3) {
        self.grow(rhs);
    }
}

impl FromIterator<Vec3> for BoundingBox {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Vec3>,
    {
        let mut this = Self::default();

        for item in iter {
            this += item;
        }

        this
    }
}

impl Add<Self> for BoundingBox {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign<Self> for BoundingBox {
    fn add_assign(&mut self, rhs: Self) {
        if rhs.is_set() {
            self.grow(rhs.min);
            self.grow(rhs.max);
        }
    }
}

impl FromIterator<Self> for BoundingBox {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Self>,
    {
        let mut this = Self::default();

        for item in iter {
            this += item;
        }

        this
    }
}
