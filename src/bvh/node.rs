use std::ops::Range;

use crate::{Axis, BoundingBox};

/// A single node of the flattened tree.
///
/// Children and leaf entries are indices into the tree's arenas rather than
/// boxed pointers, keeping the whole hierarchy in two contiguous arrays.
#[derive(Clone, Copy, Debug)]
pub enum BvhNode {
    Internal {
        bounds: BoundingBox,
        left_id: BvhNodeId,
        right_id: BvhNodeId,
        axis: Axis,
    },

    Leaf {
        bounds: BoundingBox,
        primitives_ref: PrimitivesRef,
    },
}

impl BvhNode {
    pub fn bounds(&self) -> BoundingBox {
        match self {
            BvhNode::Internal { bounds, .. } => *bounds,
            BvhNode::Leaf { bounds, .. } => *bounds,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, BvhNode::Leaf { .. })
    }
}

impl Default for BvhNode {
    fn default() -> Self {
        BvhNode::Leaf {
            bounds: Default::default(),
            primitives_ref: Default::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BvhNodeId(u32);

impl BvhNodeId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn root() -> Self {
        Self(0)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// A leaf's slice of the tree's primitive-index array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PrimitivesRef {
    start: u32,
    end: u32,
}

impl PrimitivesRef {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn range(self) -> Range<usize> {
        (self.start as usize)..(self.end as usize)
    }

    pub fn len(self) -> usize {
        (self.end - self.start) as usize
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}
