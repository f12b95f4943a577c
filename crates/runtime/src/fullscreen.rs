//! Windowed/fullscreen presentation toggle.

#[derive(Debug, thiserror::Error)]
pub enum FullscreenError {
    #[error("fullscreen is not supported by this host")]
    Unsupported,
    #[error("fullscreen request refused: {0}")]
    Refused(String),
}

/// The host window's presentation state.
pub trait Presentation {
    fn is_fullscreen(&self) -> bool;
    fn enter_fullscreen(&self) -> Result<(), FullscreenError>;
    fn exit_fullscreen(&self) -> Result<(), FullscreenError>;
}

/// Flip between windowed and fullscreen. A refused request leaves the
/// presentation unchanged and is only logged.
pub fn toggle_fullscreen(presentation: &impl Presentation) {
    let result = if presentation.is_fullscreen() {
        presentation.exit_fullscreen()
    } else {
        presentation.enter_fullscreen()
    };
    match result {
        Ok(()) => tracing::debug!("fullscreen: {}", presentation.is_fullscreen()),
        Err(e) => tracing::debug!("fullscreen toggle ignored: {e}"),
    }
}

/// Presentation for hosts without a window, such as the headless CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowedOnly;

impl Presentation for WindowedOnly {
    fn is_fullscreen(&self) -> bool {
        false
    }

    fn enter_fullscreen(&self) -> Result<(), FullscreenError> {
        Err(FullscreenError::Unsupported)
    }

    fn exit_fullscreen(&self) -> Result<(), FullscreenError> {
        Ok(())
    }
}
