use texcube_common::Dimensions;

/// Pointer buttons the camera controls care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Orbit around the target.
    Primary,
    /// Pan the target in the screen plane.
    Secondary,
}

/// Something the application context reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    /// Window inner size (logical pixels) or device pixel ratio changed.
    Resized {
        dimensions: Dimensions,
        scale_factor: f64,
    },
    /// Switch between windowed and fullscreen presentation.
    ToggleFullscreen,
    /// Pointer moved by (dx, dy) logical pixels with a button held.
    PointerDrag {
        button: PointerButton,
        dx: f32,
        dy: f32,
    },
    /// Wheel input in notches; positive zooms in.
    Zoom(f32),
    /// Debug panel slider `index` was set to `value`.
    SetSlider { index: usize, value: f32 },
    /// Show or hide the debug panel.
    TogglePanel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resized_is_constructible() {
        let e = SceneEvent::Resized {
            dimensions: Dimensions::new(800, 600),
            scale_factor: 1.0,
        };
        assert!(matches!(e, SceneEvent::Resized { .. }));
    }

    #[test]
    fn drag_carries_button() {
        let e = SceneEvent::PointerDrag {
            button: PointerButton::Secondary,
            dx: 1.0,
            dy: -2.0,
        };
        assert!(matches!(
            e,
            SceneEvent::PointerDrag {
                button: PointerButton::Secondary,
                ..
            }
        ));
    }
}
