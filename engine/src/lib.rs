//! Session glue of the annotation tool.
//!
//! Connects the bone chain and its solver from [`ik`] and the mesh
//! segmentation from [`anthropometry_patches`] with camera, picking and
//! drawing.

pub mod camera;
pub mod config;
pub mod mesh;
pub mod picking;
pub mod render;
pub mod segmentation;
pub mod session;

pub use self::{
    camera::{ProjectionError, SceneCamera, Viewport},
    config::Config,
    segmentation::Segmentation,
    session::{Selection, Session, SessionError},
};
