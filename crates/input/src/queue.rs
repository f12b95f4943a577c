use crate::event::SceneEvent;
use std::collections::VecDeque;

/// FIFO of pending scene events.
///
/// Host callbacks push; the application context drains between callbacks.
/// Everything runs on one thread, so no synchronisation is involved.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<SceneEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: SceneEvent) {
        tracing::trace!(?event, "queued");
        self.events.push_back(event);
    }

    pub fn pop(&mut self) -> Option<SceneEvent> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order() {
        let mut q = EventQueue::new();
        q.push(SceneEvent::ToggleFullscreen);
        q.push(SceneEvent::Zoom(1.0));
        assert_eq!(q.len(), 2);
        assert_eq!(q.pop(), Some(SceneEvent::ToggleFullscreen));
        assert_eq!(q.pop(), Some(SceneEvent::Zoom(1.0)));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn popping_every_event_empties_queue() {
        let mut q = EventQueue::new();
        q.push(SceneEvent::TogglePanel);
        assert!(!q.is_empty());
        assert_eq!(q.pop(), Some(SceneEvent::TogglePanel));
        assert!(q.is_empty());
    }
}
