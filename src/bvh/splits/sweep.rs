use crate::bvh::builder::BuildPrimitive;
use crate::{Axis, BoundingBox, BvhConfig};

use super::{sah_cost, SplitCandidate};

/// Exact sweep over all three axes.
///
/// Primitives get sorted by center per axis; prefix boxes grow left to right
/// while suffix boxes come from one reverse pass, so every boundary is
/// costed incrementally in O(n log n) per axis.
pub(crate) fn find(
    prims: &[BuildPrimitive],
    config: &BvhConfig,
) -> Option<SplitCandidate> {
    if prims.len() < 2 {
        return None;
    }

    let mut best: Option<(Axis, usize, f32)> = None;

    for axis in Axis::all() {
        let sorted = sorted_by_center(prims, axis);

        let mut suffix = vec![BoundingBox::default(); sorted.len()];
        let mut bounds = BoundingBox::default();

        for (idx, prim) in sorted.iter().enumerate().rev() {
            bounds += prim.bounds;
            suffix[idx] = bounds;
        }

        let mut left_bounds = BoundingBox::default();

        for boundary in 1..sorted.len() {
            left_bounds += sorted[boundary - 1].bounds;

            let cost = sah_cost(config, boundary, left_bounds)
                + sah_cost(
                    config,
                    sorted.len() - boundary,
                    suffix[boundary],
                );

            if best.map_or(true, |(_, _, best_cost)| cost < best_cost) {
                best = Some((axis, boundary, cost));
            }
        }
    }

    best.map(|(axis, boundary, cost)| {
        let mut sorted = sorted_by_center(prims, axis);
        let right = sorted.split_off(boundary);

        SplitCandidate {
            axis,
            cost,
            left: sorted,
            right,
        }
    })
}

fn sorted_by_center(
    prims: &[BuildPrimitive],
    axis: Axis,
) -> Vec<BuildPrimitive> {
    let mut sorted = prims.to_vec();

    sorted.sort_by(|a, b| a.center[axis].total_cmp(&b.center[axis]));
    sorted
}
