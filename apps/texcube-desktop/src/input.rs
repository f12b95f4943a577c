//! Translation from winit window events to scene events.

use texcube_common::Dimensions;
use texcube_input::{PointerButton, SceneEvent};
use winit::dpi::PhysicalSize;
use winit::event::{MouseButton, MouseScrollDelta};
use winit::keyboard::KeyCode;

/// Logical pixels of trackpad scroll that count as one wheel notch.
const PIXELS_PER_NOTCH: f64 = 100.0;

pub fn key_action(key: KeyCode) -> Option<SceneEvent> {
    match key {
        KeyCode::KeyF => Some(SceneEvent::ToggleFullscreen),
        KeyCode::F1 => Some(SceneEvent::TogglePanel),
        _ => None,
    }
}

/// Left button orbits, right button pans.
pub fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        _ => None,
    }
}

/// Wheel notches, positive when scrolling toward the scene.
pub fn wheel_notches(delta: MouseScrollDelta, scale_factor: f64) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(p) => {
            (p.y / scale_factor.max(f64::EPSILON) / PIXELS_PER_NOTCH) as f32
        }
    }
}

pub fn logical_dimensions(size: PhysicalSize<u32>, scale_factor: f64) -> Dimensions {
    let logical = size.to_logical::<f64>(scale_factor);
    Dimensions::new(logical.width.round() as u32, logical.height.round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(
            key_action(KeyCode::KeyF),
            Some(SceneEvent::ToggleFullscreen)
        );
        assert_eq!(key_action(KeyCode::F1), Some(SceneEvent::TogglePanel));
        assert_eq!(key_action(KeyCode::KeyW), None);
    }

    #[test]
    fn buttons_map_to_pointer_roles() {
        let left = pointer_button(MouseButton::Left);
        assert_eq!(left, Some(PointerButton::Primary));
        let right = pointer_button(MouseButton::Right);
        assert_eq!(right, Some(PointerButton::Secondary));
        assert_eq!(pointer_button(MouseButton::Middle), None);
    }

    #[test]
    fn wheel_lines_and_pixels() {
        let lines = MouseScrollDelta::LineDelta(0.0, -2.0);
        assert_eq!(wheel_notches(lines, 1.0), -2.0);
        let px = MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 200.0));
        assert!((wheel_notches(px, 2.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn physical_size_converts_to_logical() {
        let dims = logical_dimensions(PhysicalSize::new(3840, 2160), 2.0);
        assert_eq!(dims, Dimensions::new(1920, 1080));
        let tiny = logical_dimensions(PhysicalSize::new(0, 0), 1.0);
        assert_eq!((tiny.width, tiny.height), (1, 1));
    }
}
