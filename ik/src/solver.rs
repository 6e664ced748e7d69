use {
    crate::{chain::Chain, skeleton::Skeleton},
    smallvec::SmallVec,
    ultraviolet::Vec3,
};

/// Effector displacement below which [`IkSolver::update`] does nothing.
pub const DEFAULT_EPSILON: f32 = 1e-4;

/// Directions shorter than this are considered degenerate.
const MIN_DIRECTION: f32 = 1e-6;

/// Pulls the tip of `chain` to `target` and re-anchors the root.
///
/// The chain is first hung from `target`: walking from the tip towards the
/// root, every joint is placed at its rest length from the following one,
/// keeping its previous direction. The whole chain is then translated back
/// so the root keeps its original position. The effector bone itself is
/// never touched.
///
/// Chains with less than two joints are left as is.
pub fn solve(skeleton: &mut Skeleton, chain: &Chain, target: Vec3) {
    let joints = chain.joints();
    if joints.len() < 2 {
        return;
    }

    let old: SmallVec<[Vec3; 16]> =
        joints.iter().map(|&id| skeleton.position(id)).collect();

    let tip = joints.len() - 1;
    let mut new = old.clone();
    new[tip] = target;

    let mut last_direction = None;
    for k in (0..tip).rev() {
        let direction = normalized(old[k] - new[k + 1])
            .or(last_direction)
            .or_else(|| normalized(old[k] - old[k + 1]))
            .unwrap_or_else(|| {
                tracing::debug!(
                    "Joint {} has no usable direction, hanging it down",
                    k
                );
                -Vec3::unit_y()
            });

        new[k] = new[k + 1] + direction * chain.rest_lengths()[k];
        last_direction = Some(direction);
    }

    let offset = new[0] - old[0];
    for (&id, &position) in joints.iter().zip(&new) {
        skeleton.set_position(id, position - offset);
    }
}

fn normalized(v: Vec3) -> Option<Vec3> {
    let mag = v.mag();
    if mag.is_finite() && mag > MIN_DIRECTION {
        Some(v / mag)
    } else {
        None
    }
}

/// Runs [`solve`] once the effector actually moved.
#[derive(Clone, Copy, Debug)]
pub struct IkSolver {
    epsilon: f32,
    last_target: Option<Vec3>,
}

impl Default for IkSolver {
    fn default() -> Self {
        IkSolver::new(DEFAULT_EPSILON)
    }
}

impl IkSolver {
    pub fn new(epsilon: f32) -> Self {
        IkSolver {
            epsilon,
            last_target: None,
        }
    }

    /// Treats `target` as already solved.
    pub fn with_last_target(mut self, target: Vec3) -> Self {
        self.last_target = Some(target);
        self
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    pub fn last_target(&self) -> Option<Vec3> {
        self.last_target
    }

    /// Forgets last solved target so the next update always solves.
    pub fn reset(&mut self) {
        self.last_target = None;
    }

    /// Solves towards the current position of the chain's effector bone.
    /// Returns `true` if chain was updated.
    pub fn update(&mut self, skeleton: &mut Skeleton, chain: &Chain) -> bool {
        let target = skeleton.position(chain.effector());
        self.solve_towards(skeleton, chain, target)
    }

    /// Solves towards `target` unless it is within epsilon of the last
    /// solved target.
    /// Returns `true` if chain was updated.
    pub fn solve_towards(
        &mut self,
        skeleton: &mut Skeleton,
        chain: &Chain,
        target: Vec3,
    ) -> bool {
        if let Some(last) = self.last_target {
            if (target - last).mag() <= self.epsilon {
                return false;
            }
        }

        tracing::trace!("Solving chain towards {:?}", target);
        solve(skeleton, chain, target);
        self.last_target = Some(target);
        true
    }
}
