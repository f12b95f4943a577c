//! wgpu render backend for the scene graph.
//!
//! Draws every mesh node as an instanced box (textured, lit or unlit by its
//! material) and every axes helper as coloured lines.
//!
//! # Invariants
//! - Renderer never mutates the scene.
//! - A texture that fails to load degrades to plain white, never to an error
//!   at draw time.
//! - Colours pass through unconverted: textures upload as linear `Rgba8Unorm`
//!   and hosts should prefer a non-sRGB surface format.

mod gpu;
mod shaders;
pub mod texture;

pub use gpu::{RenderError, WgpuRenderer};
pub use texture::{TextureError, TextureImage};
