//! Segmentation of a body scan into normal-coherent patches.
//!
//! Vertices start as singleton sets in a [`UnionFind`]. Every
//! [`PatchBuilder::merge_pass`] groups them into patches, averages their
//! normals and joins neighbouring patches facing the same way.
//! [`FeatureMap`] then turns the final partition into a per-vertex
//! boundary signal.

mod feature;
mod graph;
mod patch;
mod union_find;

pub use self::{
    feature::{feature_color, patch_colors, FeatureMap},
    graph::{GraphError, SurfaceMesh, VertexGraph},
    patch::{
        Patch, Patches, PassReport, PatchBuilder, SegmentError,
        DEFAULT_ANGLE_THRESHOLD,
    },
    union_find::{OutOfRange, UnionFind},
};
