use crate::skeleton::{BoneId, Skeleton};

/// Rest length used when chain is created without explicit lengths.
pub const DEFAULT_SEGMENT_LENGTH: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ChainError {
    #[error(
        "Chain of {joints} joints requires {} rest lengths, got {lengths}",
        .joints.saturating_sub(1)
    )]
    RestLengthCount { joints: usize, lengths: usize },

    #[error("Rest length {length} of segment {segment} is not positive")]
    NonPositiveLength { segment: usize, length: f32 },

    #[error("Bone {0:?} does not belong to the skeleton")]
    UnknownBone(BoneId),
}

/// Simple path of joints in a [`Skeleton`] driven by an effector marker.
///
/// `joints[0]` is the anchored root. The last joint is pulled to the
/// effector position on every solve. The effector itself is a separate
/// bone and is never moved by the solver.
#[derive(Clone, Debug, PartialEq)]
pub struct Chain {
    joints: Vec<BoneId>,
    rest_lengths: Vec<f32>,
    effector: BoneId,
}

impl Chain {
    /// Creates chain with the same rest length for every segment.
    pub fn new(
        joints: Vec<BoneId>,
        effector: BoneId,
        segment_length: f32,
    ) -> Result<Self, ChainError> {
        let lengths = vec![segment_length; joints.len().saturating_sub(1)];
        Chain::with_rest_lengths(joints, effector, lengths)
    }

    /// Creates chain with per-segment rest lengths.
    /// `rest_lengths[i]` is the length between `joints[i]` and
    /// `joints[i + 1]`.
    pub fn with_rest_lengths(
        joints: Vec<BoneId>,
        effector: BoneId,
        rest_lengths: Vec<f32>,
    ) -> Result<Self, ChainError> {
        if rest_lengths.len() != joints.len().saturating_sub(1) {
            return Err(ChainError::RestLengthCount {
                joints: joints.len(),
                lengths: rest_lengths.len(),
            });
        }

        if let Some((segment, &length)) = rest_lengths
            .iter()
            .enumerate()
            .find(|(_, length)| !(**length > 0.0) || !length.is_finite())
        {
            return Err(ChainError::NonPositiveLength { segment, length });
        }

        Ok(Chain {
            joints,
            rest_lengths,
            effector,
        })
    }

    /// Chain following first children from `root`, with rest lengths
    /// measured from the current bone positions.
    pub fn measured(
        skeleton: &Skeleton,
        root: BoneId,
        effector: BoneId,
    ) -> Result<Self, ChainError> {
        for &id in &[root, effector] {
            if skeleton.get(id).is_none() {
                return Err(ChainError::UnknownBone(id));
            }
        }

        let joints = skeleton.path_to_leaf(root);
        let lengths = joints
            .windows(2)
            .map(|pair| {
                (skeleton.position(pair[1]) - skeleton.position(pair[0])).mag()
            })
            .collect();

        Chain::with_rest_lengths(joints, effector, lengths)
    }

    pub fn joints(&self) -> &[BoneId] {
        &self.joints
    }

    pub fn root(&self) -> Option<BoneId> {
        self.joints.first().copied()
    }

    pub fn effector(&self) -> BoneId {
        self.effector
    }

    pub fn rest_lengths(&self) -> &[f32] {
        &self.rest_lengths
    }

    pub fn set_rest_length(
        &mut self,
        segment: usize,
        length: f32,
    ) -> Result<(), ChainError> {
        if !(length > 0.0) || !length.is_finite() {
            return Err(ChainError::NonPositiveLength { segment, length });
        }
        match self.rest_lengths.get_mut(segment) {
            Some(slot) => {
                *slot = length;
                Ok(())
            }
            None => Err(ChainError::RestLengthCount {
                joints: self.joints.len(),
                lengths: segment + 1,
            }),
        }
    }

    /// Appends joint to the tip of the chain.
    ///
    /// `rest_length` is the length of the new segment and is ignored for
    /// the first joint of an empty chain.
    pub fn push_joint(
        &mut self,
        joint: BoneId,
        rest_length: f32,
    ) -> Result<(), ChainError> {
        if !self.joints.is_empty() {
            if !(rest_length > 0.0) || !rest_length.is_finite() {
                return Err(ChainError::NonPositiveLength {
                    segment: self.rest_lengths.len(),
                    length: rest_length,
                });
            }
            self.rest_lengths.push(rest_length);
        }
        self.joints.push(joint);
        Ok(())
    }

    /// Last joint, the one pulled to the effector.
    pub fn tip(&self) -> Option<BoneId> {
        self.joints.last().copied()
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }
}
