//! Marker chains over a scanned body and a distance-constrained
//! inverse kinematics solver driving them.
//!
//! Bones live in a [`Skeleton`] arena and refer to each other by [`BoneId`].
//! A [`Chain`] selects a simple path of joints from the arena together with
//! the effector marker that drags it around.

mod chain;
mod pick;
mod skeleton;
mod solver;

pub use self::{
    chain::{Chain, ChainError, DEFAULT_SEGMENT_LENGTH},
    pick::{ColorGenerator, PickColor},
    skeleton::{Bone, BoneId, Skeleton, Walk},
    solver::{solve, IkSolver, DEFAULT_EPSILON},
};
