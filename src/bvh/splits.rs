mod binned;
mod spatial;
mod sweep;

use crate::{Axis, BoundingBox, BvhConfig};

use super::builder::BuildPrimitive;

/// SAH cost of keeping `count` primitives together under `bounds`.
pub(crate) fn sah_cost(
    config: &BvhConfig,
    count: usize,
    bounds: BoundingBox,
) -> f32 {
    config.traversal_cost
        + config.intersection_cost * (count as f32) * bounds.area()
}

/// A costed binary partition of a node's primitives.
///
/// For object splits every entry lands wholly on one side; the spatial pass
/// may instead put a clipped copy of a straddling entry on both sides.
pub(crate) struct SplitCandidate {
    pub axis: Axis,
    pub cost: f32,
    pub left: Vec<BuildPrimitive>,
    pub right: Vec<BuildPrimitive>,
}

/// Finds the cheapest way to split a node, or `None` when nothing beats
/// keeping it whole.
///
/// Object splits use the exact sweep up to the bin threshold and the binned
/// approximation above it; with spatial splits enabled, the clipping pass
/// competes against the object candidate and the cheaper one wins.
pub(crate) fn find_best(
    prims: &[BuildPrimitive],
    bounds: BoundingBox,
    config: &BvhConfig,
) -> Option<SplitCandidate> {
    let object = if prims.len() > config.bin_threshold {
        binned::find(prims, bounds, config)
    } else {
        sweep::find(prims, config)
    };

    if !config.spatial_splits {
        return object;
    }

    let spatial = spatial::find(prims, bounds, config);

    match (object, spatial) {
        (Some(object), Some(spatial)) => {
            if object.cost <= spatial.cost {
                Some(object)
            } else {
                Some(spatial)
            }
        }
        (object, spatial) => object.or(spatial),
    }
}
