mod builder;
mod node;
mod splits;

pub use self::node::*;

use crate::{BvhConfig, Error, Hit, Primitive, Ray};

/// An immutable bounding volume hierarchy over a set of primitives.
///
/// Built once with [`Self::build()`], then queried freely; queries only read
/// shared data, so a published tree can serve any number of threads at once.
#[derive(Clone, Debug)]
pub struct Bvh<P> {
    primitives: Vec<P>,
    nodes: Vec<BvhNode>,
    indices: Vec<u32>,
}

impl<P> Bvh<P>
where
    P: Primitive,
{
    /// Builds the hierarchy; fails only when `primitives` is empty.
    pub fn build(
        primitives: Vec<P>,
        config: BvhConfig,
    ) -> Result<Self, Error> {
        if primitives.is_empty() {
            return Err(Error::EmptyScene);
        }

        let (nodes, indices) = builder::run(&primitives, &config);

        let this = Self {
            primitives,
            nodes,
            indices,
        };

        log::debug!(
            "Built bvh; primitives={}, nodes={}, leaves={}, depth={}",
            this.primitives.len(),
            this.nodes.len(),
            this.nodes.iter().filter(|node| node.is_leaf()).count(),
            this.depth(),
        );

        Ok(this)
    }

    /// Nearest hit along `ray` within its `(min_distance, max_distance)`
    /// range; `None` is a normal outcome, not an error.
    pub fn intersect(&self, ray: &Ray) -> Option<Hit<'_, P>> {
        self.intersect_node(BvhNodeId::root(), ray)
    }

    /// Whether anything hits along `ray`; stops at the first hit found.
    pub fn intersect_any(&self, ray: &Ray) -> bool {
        self.intersect_any_node(BvhNodeId::root(), ray)
    }

    pub fn primitives(&self) -> &[P] {
        &self.primitives
    }

    /// The node arena; the root sits at [`BvhNodeId::root()`].
    ///
    /// Exposed for structure introspection - walking the tree and checking
    /// bounds nesting, leaf contents and so on.
    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Resolves a leaf's [`PrimitivesRef`] into primitive indices.
    pub fn primitive_ids(&self, primitives_ref: PrimitivesRef) -> &[u32] {
        &self.indices[primitives_ref.range()]
    }

    pub fn depth(&self) -> usize {
        self.depth_of(BvhNodeId::root())
    }

    fn depth_of(&self, id: BvhNodeId) -> usize {
        match self.node(id) {
            BvhNode::Leaf { .. } => 1,

            BvhNode::Internal {
                left_id, right_id, ..
            } => {
                1 + self.depth_of(*left_id).max(self.depth_of(*right_id))
            }
        }
    }

    fn node(&self, id: BvhNodeId) -> &BvhNode {
        &self.nodes[id.get() as usize]
    }

    fn intersect_node(
        &self,
        id: BvhNodeId,
        ray: &Ray,
    ) -> Option<Hit<'_, P>> {
        let node = self.node(id);

        if !node.bounds().intersects(ray) {
            return None;
        }

        match node {
            BvhNode::Leaf { primitives_ref, .. } => {
                let mut best: Option<Hit<'_, P>> = None;

                for &prim_id in &self.indices[primitives_ref.range()] {
                    let primitive = &self.primitives[prim_id as usize];

                    let Some(distance) = primitive.hit(ray) else {
                        continue;
                    };

                    if distance <= ray.min_distance
                        || distance >= ray.max_distance
                    {
                        continue;
                    }

                    if best
                        .as_ref()
                        .map_or(true, |best| distance < best.distance)
                    {
                        best = Some(Hit {
                            primitive,
                            distance,
                        });
                    }
                }

                best
            }

            BvhNode::Internal {
                left_id,
                right_id,
                axis,
                ..
            } => {
                // Descend first into the child on the side the ray is
                // heading towards
                let (near_id, far_id) = if ray.sign[axis.idx()] == 1 {
                    (*right_id, *left_id)
                } else {
                    (*left_id, *right_id)
                };

                let near = self.intersect_node(near_id, ray);
                let far = self.intersect_node(far_id, ray);

                // Children's boxes can overlap, so when both sides report a
                // hit the distances decide - the near side doesn't
                // automatically win
                match (near, far) {
                    (Some(near), Some(far)) => {
                        if near.distance <= far.distance {
                            Some(near)
                        } else {
                            Some(far)
                        }
                    }

                    (near, far) => near.or(far),
                }
            }
        }
    }

    fn intersect_any_node(&self, id: BvhNodeId, ray: &Ray) -> bool {
        let node = self.node(id);

        if !node.bounds().intersects(ray) {
            return false;
        }

        match node {
            BvhNode::Leaf { primitives_ref, .. } => {
                self.indices[primitives_ref.range()].iter().any(
                    |&prim_id| {
                        self.primitives[prim_id as usize].hit_any(ray)
                    },
                )
            }

            BvhNode::Internal {
                left_id, right_id, ..
            } => {
                self.intersect_any_node(*left_id, ray)
                    || self.intersect_any_node(*right_id, ray)
            }
        }
    }
}
