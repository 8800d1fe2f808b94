//! Frame timing for the render loop.
//!
//! The point dynamics use a fixed step of one frame, so the clock exists for
//! bookkeeping rather than integration: frame counting, a periodic FPS
//! estimate for diagnostics, and pause/resume.

use std::time::{Duration, Instant};

/// How often the FPS estimate is refreshed.
const FPS_INTERVAL: Duration = Duration::from_millis(500);

/// Per-frame bookkeeping for a vsync-paced loop.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_frame: Instant,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    paused: bool,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            paused: false,
        }
    }

    /// Record one frame. Returns the delta in seconds; zero while paused
    /// (paused frames are not counted).
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        if self.paused {
            self.delta_secs = 0.0;
            return 0.0;
        }
        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        let since_fps = now.duration_since(self.fps_update_time);
        if since_fps >= FPS_INTERVAL {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / since_fps.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }
        self.delta_secs
    }

    /// Seconds since the last unpaused frame.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Seconds since the clock was created.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Unpaused frames recorded so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Most recent FPS estimate (zero until the first interval elapses).
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume after a pause without counting the paused span as a delta.
    pub fn resume(&mut self) {
        if self.paused {
            self.last_frame = Instant::now();
            self.paused = false;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn counts_frames_and_reports_delta() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        thread::sleep(Duration::from_millis(5));
        let delta = clock.tick();
        assert!(delta > 0.0);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn paused_frames_do_not_count() {
        let mut clock = FrameClock::new();
        clock.tick();
        clock.pause();
        assert!(clock.is_paused());
        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn resume_does_not_report_the_paused_span() {
        let mut clock = FrameClock::new();
        clock.tick();
        clock.pause();
        thread::sleep(Duration::from_millis(20));
        clock.resume();
        let delta = clock.tick();
        assert!(delta < 0.02);
    }
}
