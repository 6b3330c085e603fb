use glam::Vec3;

use crate::{Axis, BoundingBox, BvhConfig, Primitive};

use super::node::{BvhNode, BvhNodeId, PrimitivesRef};
use super::splits;

/// Build-time handle: the primitive's index plus cached bounds and center.
///
/// The spatial pass clones these with clipped bounds; the index always
/// points back at the original primitive.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BuildPrimitive {
    pub id: u32,
    pub bounds: BoundingBox,
    pub center: Vec3,
}

/// Builds the tree top-down and flattens it into the node arena plus the
/// leaf primitive-index array; the root lands at index zero.
pub(crate) fn run<P>(
    primitives: &[P],
    config: &BvhConfig,
) -> (Vec<BvhNode>, Vec<u32>)
where
    P: Primitive,
{
    let prims: Vec<_> = primitives
        .iter()
        .enumerate()
        .map(|(id, primitive)| BuildPrimitive {
            id: id as u32,
            bounds: primitive.bounds(),
            center: primitive.center(),
        })
        .collect();

    let root = build_node(prims, config);

    let mut nodes = Vec::new();
    let mut indices = Vec::new();

    flatten(root, &mut nodes, &mut indices);

    (nodes, indices)
}

enum BuildNode {
    Internal {
        bounds: BoundingBox,
        left: Box<BuildNode>,
        right: Box<BuildNode>,
        axis: Axis,
    },

    Leaf {
        bounds: BoundingBox,
        primitives: Vec<u32>,
    },
}

impl BuildNode {
    fn bounds(&self) -> BoundingBox {
        match self {
            BuildNode::Internal { bounds, .. } => *bounds,
            BuildNode::Leaf { bounds, .. } => *bounds,
        }
    }
}

fn build_node(prims: Vec<BuildPrimitive>, config: &BvhConfig) -> BuildNode {
    let bounds: BoundingBox = prims.iter().map(|prim| prim.bounds).collect();

    if prims.len() <= config.min_leaf_size {
        return leaf(bounds, prims);
    }

    let split = splits::find_best(&prims, bounds, config)
        .filter(|split| {
            split.cost < splits::sah_cost(config, prims.len(), bounds)
        });

    let Some(split) = split else {
        return leaf(bounds, prims);
    };

    let left = build_node(split.left, config);
    let right = build_node(split.right, config);

    BuildNode::Internal {
        bounds: left.bounds() + right.bounds(),
        left: Box::new(left),
        right: Box::new(right),
        axis: split.axis,
    }
}

fn leaf(bounds: BoundingBox, prims: Vec<BuildPrimitive>) -> BuildNode {
    let mut primitives: Vec<_> =
        prims.into_iter().map(|prim| prim.id).collect();

    // Fragments of one primitive can meet again in a single leaf; testing it
    // twice would be wasted work
    primitives.sort_unstable();
    primitives.dedup();

    BuildNode::Leaf { bounds, primitives }
}

fn flatten(
    node: BuildNode,
    nodes: &mut Vec<BvhNode>,
    indices: &mut Vec<u32>,
) -> BvhNodeId {
    let id = nodes.len();

    nodes.push(BvhNode::default());

    let node = match node {
        BuildNode::Leaf { bounds, primitives } => {
            let start = indices.len() as u32;

            indices.extend(primitives);

            BvhNode::Leaf {
                bounds,
                primitives_ref: PrimitivesRef::new(
                    start,
                    indices.len() as u32,
                ),
            }
        }

        BuildNode::Internal {
            bounds,
            left,
            right,
            axis,
        } => {
            let left_id = flatten(*left, nodes, indices);
            let right_id = flatten(*right, nodes, indices);

            BvhNode::Internal {
                bounds,
                left_id,
                right_id,
                axis,
            }
        }
    };

    nodes[id] = node;

    BvhNodeId::new(id as u32)
}
