//! Pointer handling for the animation window.
//!
//! [`Pointer`] consumes raw winit window events and exposes the two things
//! the animation consumes: the latest cursor position relative to the
//! surface's top-left corner, and the click positions that accumulated since
//! the last frame. Press events carry no coordinates of their own, so a click
//! is recorded at the tracked cursor position.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, WindowEvent};

/// Cursor tracking and click queueing between frames.
#[derive(Debug, Default)]
pub struct Pointer {
    position: Option<Vec2>,
    clicks: Vec<Vec2>,
}

impl Pointer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest cursor position in surface pixels, if the cursor has entered
    /// the surface at all.
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    /// Drain the clicks recorded since the last call. Called once per frame
    /// by the render loop.
    pub fn take_clicks(&mut self) -> Vec<Vec2> {
        std::mem::take(&mut self.clicks)
    }

    /// Feed a window event into the tracker.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => {
                self.left();
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                self.pressed();
            }
            _ => {}
        }
    }

    fn moved(&mut self, position: Vec2) {
        self.position = Some(position);
    }

    fn left(&mut self) {
        self.position = None;
    }

    fn pressed(&mut self) {
        if let Some(pos) = self.position {
            self.clicks.push(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_cursor_position() {
        let mut pointer = Pointer::new();
        assert_eq!(pointer.position(), None);
        pointer.moved(Vec2::new(120.0, 80.0));
        assert_eq!(pointer.position(), Some(Vec2::new(120.0, 80.0)));
        pointer.left();
        assert_eq!(pointer.position(), None);
    }

    #[test]
    fn clicks_record_the_tracked_position() {
        let mut pointer = Pointer::new();
        pointer.moved(Vec2::new(10.0, 20.0));
        pointer.pressed();
        pointer.moved(Vec2::new(30.0, 40.0));
        pointer.pressed();

        let clicks = pointer.take_clicks();
        assert_eq!(clicks, vec![Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0)]);
        // Drained.
        assert!(pointer.take_clicks().is_empty());
    }

    #[test]
    fn press_before_any_cursor_motion_is_dropped() {
        let mut pointer = Pointer::new();
        pointer.pressed();
        assert!(pointer.take_clicks().is_empty());
    }
}
