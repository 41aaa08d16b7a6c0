/// Per-pass and rolling frame statistics
use std::time::{Duration, Instant};

use crate::schedule::Deadline;

/// Figures shown in the HUD
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stats {
    /// Triangles that survived culling in the last pass
    pub polygons_drawn: usize,
    /// Frames per second over the last completed window
    pub fps: f32,
    /// Frames produced in the current window
    pub frame_count: u32,
}

impl Stats {
    /// Count a finished render pass toward the current FPS window
    pub fn record_frame(&mut self) {
        self.frame_count += 1;
    }
}

/// Periodic FPS average over fixed windows
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window: Deadline,
    window_start: Instant,
}

impl FpsCounter {
    pub fn new(window: Duration, now: Instant) -> Self {
        Self {
            window: Deadline::new(window, now),
            window_start: now,
        }
    }

    /// Close the window once it has elapsed, publishing the average.
    /// Returns true when `stats.fps` was updated.
    pub fn update(&mut self, now: Instant, stats: &mut Stats) -> bool {
        if !self.window.poll(now) {
            return false;
        }
        let elapsed = now.duration_since(self.window_start).as_secs_f32();
        if elapsed > 0.0 {
            stats.fps = stats.frame_count as f32 / elapsed;
        }
        stats.frame_count = 0;
        self.window_start = now;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_window() {
        let start = Instant::now();
        let mut counter = FpsCounter::new(Duration::from_millis(1000), start);
        let mut stats = Stats::default();

        for _ in 0..30 {
            stats.record_frame();
        }
        assert!(!counter.update(start + Duration::from_millis(500), &mut stats));
        assert_eq!(stats.frame_count, 30);
        assert_eq!(stats.fps, 0.0);

        assert!(counter.update(start + Duration::from_millis(1000), &mut stats));
        assert!((stats.fps - 30.0).abs() < 1e-3);
        assert_eq!(stats.frame_count, 0);
    }

    #[test]
    fn test_fps_over_longer_window() {
        let start = Instant::now();
        let mut counter = FpsCounter::new(Duration::from_millis(1000), start);
        let mut stats = Stats::default();

        for _ in 0..40 {
            stats.record_frame();
        }
        assert!(counter.update(start + Duration::from_millis(2000), &mut stats));
        assert!((stats.fps - 20.0).abs() < 1e-3);
    }
}
