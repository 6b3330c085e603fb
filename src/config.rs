/// Build-time tunables, passed explicitly into [`crate::Bvh::build()`].
///
/// The defaults reproduce the classic SAH setup: equal traversal and
/// intersection weights, sixteen object-split bins, and a fine 256-bin grid
/// for the spatial pass.
#[derive(Clone, Copy, Debug)]
pub struct BvhConfig {
    /// SAH weight of visiting one node.
    pub traversal_cost: f32,

    /// SAH weight of one ray-primitive test.
    pub intersection_cost: f32,

    /// Above this many primitives a node uses the binned strategy instead of
    /// the exact per-axis sweep; it doubles as the bin count.
    pub bin_threshold: usize,

    /// Scale-factor guard keeping a center sitting exactly on a node's far
    /// bound from rounding into a non-existent bin.
    pub binning_epsilon: f32,

    /// Bin count for the spatial-split pass; substantially finer than the
    /// object-split binning so clipped geometry is resolved well.
    pub spatial_bin_count: usize,

    /// Enables the spatial-split (SBVH) pass: each node also considers a
    /// geometry-clipping split and keeps whichever candidate is cheaper.
    pub spatial_splits: bool,

    /// At or below this many primitives a node always becomes a leaf.
    pub min_leaf_size: usize,
}

impl Default for BvhConfig {
    fn default() -> Self {
        Self {
            traversal_cost: 1.0,
            intersection_cost: 1.0,
            bin_threshold: 16,
            binning_epsilon: 0.99999,
            spatial_bin_count: 256,
            spatial_splits: false,
            min_leaf_size: 1,
        }
    }
}
