//! Test geometry: the tree itself owns no intersection math, so the suites
//! bring their own spheres and triangles.

#![allow(dead_code)]

use glam::Vec3;
use rand::rngs::StdRng;
use rand::Rng;
use strahl::{BoundingBox, Primitive, Ray};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl Primitive for Sphere {
    fn bounds(&self) -> BoundingBox {
        BoundingBox::new(
            self.center - Vec3::splat(self.radius),
            self.center + Vec3::splat(self.radius),
        )
    }

    fn center(&self) -> Vec3 {
        self.center
    }

    fn hit(&self, ray: &Ray) -> Option<f32> {
        let oc = ray.origin - self.center;
        let b = oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;
        let discriminant = b * b - c;

        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();

        [-b - sqrt_d, -b + sqrt_d].into_iter().find(|&t| {
            t > ray.min_distance && t < ray.max_distance
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }
}

impl Primitive for Triangle {
    fn bounds(&self) -> BoundingBox {
        BoundingBox::from_points([self.a, self.b, self.c])
    }

    fn center(&self) -> Vec3 {
        (self.a + self.b + self.c) / 3.0
    }

    fn hit(&self, ray: &Ray) -> Option<f32> {
        // Moller-Trumbore
        let e1 = self.b - self.a;
        let e2 = self.c - self.a;
        let p = ray.direction.cross(e2);
        let det = e1.dot(p);

        if det.abs() < 1e-8 {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = ray.origin - self.a;
        let u = s.dot(p) * inv_det;

        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(e1);
        let v = ray.direction.dot(q) * inv_det;

        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = e2.dot(q) * inv_det;

        (t > ray.min_distance && t < ray.max_distance).then_some(t)
    }
}

/// One enum so a scene can mix both kinds behind a single `P`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Triangle(Triangle),
}

impl Primitive for Shape {
    fn bounds(&self) -> BoundingBox {
        match self {
            Shape::Sphere(sphere) => sphere.bounds(),
            Shape::Triangle(triangle) => triangle.bounds(),
        }
    }

    fn center(&self) -> Vec3 {
        match self {
            Shape::Sphere(sphere) => Primitive::center(sphere),
            Shape::Triangle(triangle) => Primitive::center(triangle),
        }
    }

    fn hit(&self, ray: &Ray) -> Option<f32> {
        match self {
            Shape::Sphere(sphere) => sphere.hit(ray),
            Shape::Triangle(triangle) => triangle.hit(ray),
        }
    }
}

pub fn random_point(rng: &mut StdRng, spread: f32) -> Vec3 {
    Vec3::new(
        rng.gen_range(-spread..spread),
        rng.gen_range(-spread..spread),
        rng.gen_range(-spread..spread),
    )
}

pub fn random_shapes(rng: &mut StdRng, count: usize) -> Vec<Shape> {
    (0..count)
        .map(|idx| {
            let center = random_point(rng, 100.0);

            if idx % 2 == 0 {
                Shape::Sphere(Sphere::new(
                    center,
                    rng.gen_range(0.1..3.0),
                ))
            } else {
                let b = center + random_point(rng, 4.0);
                let c = center + random_point(rng, 4.0);

                Shape::Triangle(Triangle::new(center, b, c))
            }
        })
        .collect()
}

pub fn random_rays(rng: &mut StdRng, count: usize) -> Vec<Ray> {
    (0..count)
        .map(|_| {
            let origin = random_point(rng, 150.0);
            let target = random_point(rng, 50.0);

            Ray::new(origin, target - origin)
        })
        .collect()
}

/// Reference answer: test every primitive, keep the closest valid hit.
pub fn brute_force<P>(primitives: &[P], ray: &Ray) -> Option<(usize, f32)>
where
    P: Primitive,
{
    let mut best: Option<(usize, f32)> = None;

    for (idx, primitive) in primitives.iter().enumerate() {
        let Some(distance) = primitive.hit(ray) else {
            continue;
        };

        if best.map_or(true, |(_, best_distance)| distance < best_distance) {
            best = Some((idx, distance));
        }
    }

    best
}
