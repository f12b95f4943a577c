//! Shared types for the texcube workspace.
//!
//! Kept dependency-light so every other crate can use them: node identifiers,
//! spatial transforms, and viewport dimensions.

mod types;

pub use types::{Axis, Dimensions, NodeId, Transform};
