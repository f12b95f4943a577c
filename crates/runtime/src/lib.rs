//! Frame loop and application context.
//!
//! All state the demo needs (scene, camera, controls, panel, clock, viewport)
//! lives in one [`AppContext`] built at startup. Hosts feed it
//! [`texcube_input::SceneEvent`]s and call [`AppContext::tick`] once per
//! display refresh.
//!
//! # Invariants
//! - Within a tick: controls update, then scene mutation, then render.
//! - Ticks are strictly sequential; everything runs on the host's event thread.
//! - The clock never runs backwards.

pub mod clock;
pub mod config;
mod context;
pub mod demo;
pub mod fullscreen;

pub use clock::{Clock, FrameStats};
pub use config::{ConfigError, SceneConfig};
pub use context::AppContext;
pub use demo::DemoScene;
pub use fullscreen::{FullscreenError, Presentation, WindowedOnly, toggle_fullscreen};
