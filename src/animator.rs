//! The start/stop handle around a point field.
//!
//! The browser-style way to run an animation like this is an infinite
//! self-scheduling callback. Here the loop is explicit instead: an
//! [`Animator`] is a cancellable repeating task whose `tick` the window loop
//! calls once per redraw. Start and stop are observable state transitions,
//! which makes teardown testable: after `stop()`, no tick, click, or resize
//! touches the field.

use glam::Vec2;

use crate::field::PointField;
use crate::time::FrameClock;

/// Drives a [`PointField`] one frame at a time between `start` and `stop`.
#[derive(Debug)]
pub struct Animator {
    field: PointField,
    clock: FrameClock,
    running: bool,
}

impl Animator {
    /// Wrap a field. The animator starts stopped; call [`start`](Self::start).
    pub fn new(field: PointField) -> Self {
        Self {
            field,
            clock: FrameClock::new(),
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            log::info!(
                "animator started: {} points on {}x{}",
                self.field.len(),
                self.field.config().width,
                self.field.config().height,
            );
        }
    }

    /// Stop permanently for this surface. Subsequent ticks and input are
    /// no-ops; a leak of either is a lifecycle defect.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            log::info!("animator stopped after {} frames", self.clock.frame());
        }
    }

    /// Advance one frame if running and not paused. Returns whether the
    /// field stepped.
    pub fn tick(&mut self) -> bool {
        if !self.running || self.clock.is_paused() {
            return false;
        }
        self.clock.tick();
        self.field.step();
        true
    }

    /// Inject a click at a surface position.
    pub fn click(&mut self, pos: Vec2) {
        if self.running {
            self.field.click(pos);
        }
    }

    /// Adopt a new surface size.
    pub fn resize(&mut self, width: f32, height: f32) {
        if self.running {
            self.field.resize(width, height);
            log::debug!("field resized to {width}x{height}");
        }
    }

    /// Suspend or resume stepping without tearing the animator down.
    pub fn toggle_pause(&mut self) {
        self.clock.toggle_pause();
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    pub fn field(&self) -> &PointField {
        &self.field
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldConfig;

    fn animator() -> Animator {
        Animator::new(PointField::new(FieldConfig::sparse(), Some(99)))
    }

    #[test]
    fn tick_is_a_noop_until_started() {
        let mut a = animator();
        let before: Vec<_> = a.field().points().to_vec();
        assert!(!a.tick());
        assert_eq!(a.field().points(), &before[..]);

        a.start();
        assert!(a.tick());
        assert_ne!(a.field().points(), &before[..]);
    }

    #[test]
    fn paused_animator_does_not_step() {
        let mut a = animator();
        a.start();
        a.toggle_pause();
        let before: Vec<_> = a.field().points().to_vec();
        assert!(!a.tick());
        assert_eq!(a.field().points(), &before[..]);

        a.toggle_pause();
        assert!(a.tick());
    }

    #[test]
    fn stop_detaches_every_mutation_path() {
        let mut a = animator();
        a.start();
        a.tick();
        a.stop();

        let before: Vec<_> = a.field().points().to_vec();
        let (w, h) = (a.field().config().width, a.field().config().height);

        assert!(!a.tick());
        a.click(Vec2::new(50.0, 50.0));
        a.resize(10.0, 10.0);

        assert_eq!(a.field().points(), &before[..]);
        assert_eq!(a.field().config().width, w);
        assert_eq!(a.field().config().height, h);
    }
}
