//! Rendering adapter: everything between the scene graph and a concrete GPU
//! backend.
//!
//! # Invariants
//! - A render surface never mutates the scene.
//! - Camera aspect equals viewport width / height after every resize.
//! - The applied device pixel ratio never exceeds the configured maximum.
//!
//! The [`RenderSurface`] trait is the seam between the frame loop and a
//! backend. [`TextSurface`] is a headless implementation used by the CLI and
//! by tests; the wgpu backend lives in `texcube-render-wgpu`.

pub mod camera;
pub mod controls;
mod renderer;
pub mod viewport;

pub use camera::PerspectiveCamera;
pub use controls::OrbitControls;
pub use renderer::{RenderSurface, TextSurface};
pub use viewport::{DEFAULT_MAX_PIXEL_RATIO, Viewport, clamp_pixel_ratio};
