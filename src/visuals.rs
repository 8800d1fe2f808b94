//! Visual configuration for the point field.
//!
//! Rendering options are separate from the dynamics: the same field can be
//! drawn as bare lines or as a constellation with glowing markers. Built
//! through the closure passed to `with_visuals`:
//!
//! ```ignore
//! FieldAnimation::new()
//!     .with_visuals(|v| {
//!         v.line_color(Vec3::new(0.0, 1.0, 1.0));
//!         v.line_alpha(0.4);
//!         v.markers(true);
//!     })
//!     .run()
//! ```

use glam::Vec3;

/// How the points and their links are drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldVisuals {
    pub(crate) background: Vec3,
    pub(crate) line_color: Vec3,
    /// Base line opacity; multiplied by the distance fade when enabled.
    pub(crate) line_alpha: f32,
    /// Line thickness in pixels.
    pub(crate) line_width: f32,
    /// Scale line opacity by `1 - dist / link_distance`.
    pub(crate) distance_fade: bool,
    /// Draw a filled circle per point.
    pub(crate) markers: bool,
    pub(crate) marker_color: Vec3,
    /// Marker radius in pixels.
    pub(crate) marker_radius: f32,
}

impl FieldVisuals {
    pub fn new() -> Self {
        Self {
            background: Vec3::new(0.04, 0.04, 0.04),
            line_color: Vec3::new(0.0, 1.0, 1.0),
            line_alpha: 0.4,
            line_width: 0.6,
            distance_fade: true,
            markers: true,
            marker_color: Vec3::new(0.0, 1.0, 1.0),
            marker_radius: 1.5,
        }
    }

    /// Clear color behind the field (RGB, 0.0-1.0).
    pub fn background(&mut self, color: Vec3) -> &mut Self {
        self.background = color;
        self
    }

    pub fn line_color(&mut self, color: Vec3) -> &mut Self {
        self.line_color = color;
        self
    }

    /// Base opacity of links. With distance fade enabled this is the opacity
    /// of a zero-length link; without it, of every link.
    pub fn line_alpha(&mut self, alpha: f32) -> &mut Self {
        self.line_alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn line_width(&mut self, width: f32) -> &mut Self {
        self.line_width = width.max(0.0);
        self
    }

    pub fn distance_fade(&mut self, enabled: bool) -> &mut Self {
        self.distance_fade = enabled;
        self
    }

    /// Whether to draw point markers at all. One of the source styles renders
    /// links only.
    pub fn markers(&mut self, enabled: bool) -> &mut Self {
        self.markers = enabled;
        self
    }

    pub fn marker_color(&mut self, color: Vec3) -> &mut Self {
        self.marker_color = color;
        self
    }

    pub fn marker_radius(&mut self, radius: f32) -> &mut Self {
        self.marker_radius = radius.max(0.0);
        self
    }
}

impl Default for FieldVisuals {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_methods_chain() {
        let mut v = FieldVisuals::new();
        v.line_alpha(0.1).line_width(2.0).distance_fade(false).markers(false);
        assert_eq!(v.line_alpha, 0.1);
        assert_eq!(v.line_width, 2.0);
        assert!(!v.distance_fade);
        assert!(!v.markers);
    }

    #[test]
    fn alpha_is_clamped() {
        let mut v = FieldVisuals::new();
        v.line_alpha(3.0);
        assert_eq!(v.line_alpha, 1.0);
        v.line_alpha(-1.0);
        assert_eq!(v.line_alpha, 0.0);
    }
}
