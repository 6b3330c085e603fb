//! A bounding volume hierarchy for ray queries.
//!
//! Given a set of primitives, [`Bvh::build()`] constructs a binary tree of
//! nested bounding boxes using the surface area heuristic; the tree then
//! answers nearest-hit ([`Bvh::intersect()`]) and any-hit
//! ([`Bvh::intersect_any()`]) queries without testing every primitive.
//!
//! Construction happens once, at scene-load time - the finished tree is
//! immutable and can be queried from any number of threads. When the scene
//! changes, build a new tree and swap it in wholesale.

mod axis;
mod bounding_box;
mod bvh;
mod config;
mod error;
mod primitive;
mod ray;

pub use self::axis::*;
pub use self::bounding_box::*;
pub use self::bvh::*;
pub use self::config::*;
pub use self::error::*;
pub use self::primitive::*;
pub use self::ray::*;
