use glam::Vec3;

/// A ray with the per-axis data the slab test needs precomputed once.
///
/// `sign[axis]` is `1` when the inverse direction is negative on that axis,
/// so `bounds[sign[axis]]` is always the near bound of a box.
///
/// `min_distance` is the self-intersection epsilon below which hits are
/// rejected; `max_distance` is the current travel limit, which the renderer
/// may shrink as closer hits are found elsewhere.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub inv_direction: Vec3,
    pub sign: [usize; 3],
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Ray {
    pub const DEFAULT_EPSILON: f32 = 0.001;

    /// Creates a ray with the default epsilon and an unbounded travel limit;
    /// `direction` gets normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        let direction = direction.normalize();
        let inv_direction = direction.recip();

        Self {
            origin,
            direction,
            inv_direction,
            sign: [
                (inv_direction.x < 0.0) as usize,
                (inv_direction.y < 0.0) as usize,
                (inv_direction.z < 0.0) as usize,
            ],
            min_distance: Self::DEFAULT_EPSILON,
            max_distance: f32::MAX,
        }
    }

    pub fn with_range(mut self, min_distance: f32, max_distance: f32) -> Self {
        self.min_distance = min_distance;
        self.max_distance = max_distance;
        self
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}
