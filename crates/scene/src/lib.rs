//! Scene graph: a tree of spatial nodes rendered together.
//!
//! # Invariants
//! - The root node exclusively owns every other node.
//! - A node's parent link and its parent's child list always agree.
//! - All mutations go through explicit operations on [`SceneGraph`].

pub mod graph;

pub use graph::{Color, Geometry, Material, MaterialKind, Node, NodeKind, SceneError, SceneGraph};
