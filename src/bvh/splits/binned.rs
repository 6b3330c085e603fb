use crate::bvh::builder::BuildPrimitive;
use crate::{Axis, BoundingBox, BvhConfig};

use super::{sah_cost, SplitCandidate};

#[derive(Clone, Copy, Default)]
struct Bin {
    count: usize,
    bounds: BoundingBox,
}

/// Binned approximation along the node's longest axis.
///
/// Centers map to `floor(k * (center - min))` with
/// `k = bins * epsilon / extent`; the index is clamped so a center sitting
/// exactly on the far bound stays inside the last bin. The `bins - 1`
/// boundaries are then costed from prefix/suffix unions.
pub(crate) fn find(
    prims: &[BuildPrimitive],
    bounds: BoundingBox,
    config: &BvhConfig,
) -> Option<SplitCandidate> {
    let axis = Axis::longest(bounds.extent());
    let extent = bounds.extent()[axis];

    if extent <= 0.0 {
        // All centers coincide on the widest axis, so every primitive would
        // land in one bin anyway
        return None;
    }

    let bin_count = config.bin_threshold;
    let k = (bin_count as f32) * config.binning_epsilon / extent;
    let min = bounds.min()[axis];

    let bin_of = |prim: &BuildPrimitive| -> usize {
        ((k * (prim.center[axis] - min)) as usize).min(bin_count - 1)
    };

    let mut bins = vec![Bin::default(); bin_count];

    for prim in prims {
        let bin = &mut bins[bin_of(prim)];

        bin.count += 1;
        bin.bounds += prim.bounds;
    }

    // ---

    let mut suffix = vec![(0, BoundingBox::default()); bin_count];
    let mut suffix_count = 0;
    let mut suffix_bounds = BoundingBox::default();

    for (idx, bin) in bins.iter().enumerate().rev() {
        suffix_count += bin.count;
        suffix_bounds += bin.bounds;
        suffix[idx] = (suffix_count, suffix_bounds);
    }

    let mut best: Option<(usize, f32)> = None;
    let mut left_count = 0;
    let mut left_bounds = BoundingBox::default();

    for boundary in 1..bin_count {
        left_count += bins[boundary - 1].count;
        left_bounds += bins[boundary - 1].bounds;

        let (right_count, right_bounds) = suffix[boundary];

        if left_count == 0 || right_count == 0 {
            continue;
        }

        let cost = sah_cost(config, left_count, left_bounds)
            + sah_cost(config, right_count, right_bounds);

        if best.map_or(true, |(_, best_cost)| cost < best_cost) {
            best = Some((boundary, cost));
        }
    }

    best.map(|(boundary, cost)| {
        let (left, right): (Vec<_>, Vec<_>) = prims
            .iter()
            .copied()
            .partition(|prim| bin_of(prim) < boundary);

        SplitCandidate {
            axis,
            cost,
            left,
            right,
        }
    })
}
