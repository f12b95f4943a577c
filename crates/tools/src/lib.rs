//! Developer tooling: live-editing bindings and read-only scene inspection.
//!
//! # Invariants
//! - Panel writes are clamped to the binding's range and snapped to its step
//!   before they touch the scene.
//! - The inspector never mutates the scene.

mod inspector;
pub mod panel;

pub use inspector::{NodeReport, SceneInspector, SceneSummary};
pub use panel::{DebugPanel, PanelError, SliderBinding};
