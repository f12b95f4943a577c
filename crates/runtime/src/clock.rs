use std::time::{Duration, Instant};

/// Monotonic elapsed-time counter.
///
/// Reads are taken at a caller-supplied instant so hosts and tests control
/// time. A read at an instant earlier than a previous read returns the
/// previous value: the clock never rewinds.
#[derive(Debug, Clone)]
pub struct Clock {
    start: Instant,
    latest: Duration,
}

impl Clock {
    pub fn new(start: Instant) -> Self {
        Self {
            start,
            latest: Duration::ZERO,
        }
    }

    pub fn elapsed_at(&mut self, now: Instant) -> Duration {
        let e = now.saturating_duration_since(self.start);
        if e > self.latest {
            self.latest = e;
        }
        self.latest
    }

    /// Restart counting from `now`.
    pub fn reset(&mut self, now: Instant) {
        self.start = now;
        self.latest = Duration::ZERO;
    }
}

/// Per-frame timing, fed by the wall-clock delta between ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub frame: u64,
    pub delta: Duration,
    pub elapsed: Duration,
    /// Exponentially smoothed frames per second.
    pub fps: f32,
}

impl FrameStats {
    const SMOOTHING: f32 = 0.1;

    pub fn record(&mut self, delta: Duration, elapsed: Duration) {
        self.frame += 1;
        self.delta = delta;
        self.elapsed = elapsed;
        let secs = delta.as_secs_f32();
        if secs > 0.0 {
            let instant = 1.0 / secs;
            self.fps = if self.fps == 0.0 {
                instant
            } else {
                self.fps + (instant - self.fps) * Self::SMOOTHING
            };
        }
    }

    /// Frame time in milliseconds.
    pub fn frame_ms(&self) -> f32 {
        self.delta.as_secs_f32() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_grows_with_time() {
        let t0 = Instant::now();
        let mut clock = Clock::new(t0);
        assert_eq!(clock.elapsed_at(t0), Duration::ZERO);
        assert_eq!(
            clock.elapsed_at(t0 + Duration::from_secs(3)),
            Duration::from_secs(3)
        );
    }

    #[test]
    fn clock_never_rewinds() {
        let t0 = Instant::now();
        let mut clock = Clock::new(t0);
        clock.elapsed_at(t0 + Duration::from_secs(5));
        assert_eq!(
            clock.elapsed_at(t0 + Duration::from_secs(1)),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn reset_restarts() {
        let t0 = Instant::now();
        let mut clock = Clock::new(t0);
        clock.elapsed_at(t0 + Duration::from_secs(5));
        let t1 = t0 + Duration::from_secs(6);
        clock.reset(t1);
        assert_eq!(
            clock.elapsed_at(t1 + Duration::from_millis(500)),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn stats_track_delta_and_fps() {
        let mut stats = FrameStats::default();
        stats.record(Duration::from_millis(20), Duration::from_millis(20));
        assert_eq!(stats.frame, 1);
        assert!((stats.fps - 50.0).abs() < 1e-3);
        assert!((stats.frame_ms() - 20.0).abs() < 1e-3);

        stats.record(Duration::from_millis(10), Duration::from_millis(30));
        assert_eq!(stats.frame, 2);
        assert!((stats.fps - 55.0).abs() < 1e-3);
    }

    #[test]
    fn zero_delta_keeps_fps() {
        let mut stats = FrameStats::default();
        stats.record(Duration::ZERO, Duration::ZERO);
        assert_eq!(stats.fps, 0.0);
        assert_eq!(stats.frame, 1);
    }
}
