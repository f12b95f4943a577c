//! Turns raw pointer samples into drag events and double-click detections.

use crate::event::{PointerButton, SceneEvent};
use std::time::{Duration, Instant};

/// Tracks the held button and last cursor position.
#[derive(Debug, Default)]
pub struct PointerTracker {
    held: Option<PointerButton>,
    last: Option<(f64, f64)>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held(&self) -> Option<PointerButton> {
        self.held
    }

    /// The most recently pressed button drives the drag.
    pub fn press(&mut self, button: PointerButton) {
        self.held = Some(button);
    }

    pub fn release(&mut self, button: PointerButton) {
        if self.held == Some(button) {
            self.held = None;
        }
    }

    /// Cursor left the window; the next sample starts a fresh delta.
    pub fn leave(&mut self) {
        self.last = None;
    }

    /// Record a cursor position in logical pixels. Yields a drag event when a
    /// button is held and a previous sample exists.
    pub fn moved(&mut self, x: f64, y: f64) -> Option<SceneEvent> {
        let prev = self.last.replace((x, y));
        let button = self.held?;
        let (px, py) = prev?;
        Some(SceneEvent::PointerDrag {
            button,
            dx: (x - px) as f32,
            dy: (y - py) as f32,
        })
    }

    pub fn position(&self) -> Option<(f64, f64)> {
        self.last
    }
}

/// Detects double clicks from a stream of primary-button presses.
#[derive(Debug)]
pub struct ClickTracker {
    interval: Duration,
    slop: f64,
    last_press: Option<(Instant, (f64, f64))>,
}

impl Default for ClickTracker {
    fn default() -> Self {
        Self::new(Duration::from_millis(400), 4.0)
    }
}

impl ClickTracker {
    pub fn new(interval: Duration, slop: f64) -> Self {
        Self {
            interval,
            slop,
            last_press: None,
        }
    }

    /// Register a press at `at`, cursor at `pos`. Returns true when this press
    /// completes a double click. A completed double click is consumed, so a
    /// third quick press starts a new pair.
    pub fn press(&mut self, at: Instant, pos: (f64, f64)) -> bool {
        if let Some((t, p)) = self.last_press {
            let close_in_time = at.saturating_duration_since(t) <= self.interval;
            let close_in_space =
                (pos.0 - p.0).abs() <= self.slop && (pos.1 - p.1).abs() <= self.slop;
            if close_in_time && close_in_space {
                self.last_press = None;
                return true;
            }
        }
        self.last_press = Some((at, pos));
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_drag_without_button() {
        let mut p = PointerTracker::new();
        assert_eq!(p.moved(10.0, 10.0), None);
        assert_eq!(p.moved(20.0, 15.0), None);
    }

    #[test]
    fn drag_reports_delta() {
        let mut p = PointerTracker::new();
        p.moved(10.0, 10.0);
        p.press(PointerButton::Primary);
        let e = p.moved(13.0, 8.0);
        assert_eq!(
            e,
            Some(SceneEvent::PointerDrag {
                button: PointerButton::Primary,
                dx: 3.0,
                dy: -2.0,
            })
        );
        p.release(PointerButton::Primary);
        assert_eq!(p.moved(20.0, 20.0), None);
    }

    #[test]
    fn first_sample_after_leave_is_not_a_jump() {
        let mut p = PointerTracker::new();
        p.press(PointerButton::Secondary);
        p.moved(0.0, 0.0);
        p.leave();
        assert_eq!(p.moved(500.0, 500.0), None);
        assert!(p.moved(501.0, 500.0).is_some());
    }

    #[test]
    fn releasing_other_button_keeps_drag() {
        let mut p = PointerTracker::new();
        p.press(PointerButton::Secondary);
        p.release(PointerButton::Primary);
        assert_eq!(p.held(), Some(PointerButton::Secondary));
    }

    #[test]
    fn double_click_within_interval() {
        let mut c = ClickTracker::default();
        let t0 = Instant::now();
        assert!(!c.press(t0, (5.0, 5.0)));
        assert!(c.press(t0 + Duration::from_millis(200), (6.0, 5.0)));
    }

    #[test]
    fn slow_clicks_are_not_double() {
        let mut c = ClickTracker::default();
        let t0 = Instant::now();
        assert!(!c.press(t0, (5.0, 5.0)));
        assert!(!c.press(t0 + Duration::from_millis(900), (5.0, 5.0)));
    }

    #[test]
    fn distant_clicks_are_not_double() {
        let mut c = ClickTracker::default();
        let t0 = Instant::now();
        assert!(!c.press(t0, (5.0, 5.0)));
        assert!(!c.press(t0 + Duration::from_millis(100), (50.0, 5.0)));
    }

    #[test]
    fn triple_click_fires_once() {
        let mut c = ClickTracker::default();
        let t0 = Instant::now();
        let ms = Duration::from_millis;
        assert!(!c.press(t0, (0.0, 0.0)));
        assert!(c.press(t0 + ms(100), (0.0, 0.0)));
        assert!(!c.press(t0 + ms(200), (0.0, 0.0)));
    }
}
