//! Input: host events mapped onto a small typed event vocabulary.
//!
//! # Invariants
//! - The application context consumes [`SceneEvent`]s, never raw windowing
//!   events, so desktop and headless hosts share the same handling.
//! - Events are delivered in the order they were pushed.

pub mod event;
pub mod pointer;
pub mod queue;

pub use event::{PointerButton, SceneEvent};
pub use pointer::{ClickTracker, PointerTracker};
pub use queue::EventQueue;
