//! Policies applied to points after each integration step.
//!
//! The boundary policy decides what happens when a point's position leaves
//! the surface, and the resize policy decides what happens to existing points
//! when the surface changes size. Both are explicit, named choices; a field
//! uses exactly one of each.

use crate::point::Point;

/// What to do when a point crosses a surface edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Boundary {
    /// Reflect off the edge: the position is clamped to the crossed edge and
    /// that axis's velocity is pointed back toward the interior. Clamping
    /// guarantees at most one sign flip per crossing.
    Bounce,

    /// Toroidal topology: a point leaving one edge reappears at the opposite
    /// edge with its velocity unchanged.
    #[default]
    Wrap,
}

impl Boundary {
    /// Apply this policy to one point against a `width x height` surface.
    pub fn apply(&self, p: &mut Point, width: f32, height: f32) {
        match self {
            Boundary::Bounce => {
                if p.position.x < 0.0 {
                    p.position.x = 0.0;
                    p.velocity.x = p.velocity.x.abs();
                } else if p.position.x > width {
                    p.position.x = width;
                    p.velocity.x = -p.velocity.x.abs();
                }
                if p.position.y < 0.0 {
                    p.position.y = 0.0;
                    p.velocity.y = p.velocity.y.abs();
                } else if p.position.y > height {
                    p.position.y = height;
                    p.velocity.y = -p.velocity.y.abs();
                }
            }
            Boundary::Wrap => {
                if p.position.x < 0.0 {
                    p.position.x += width;
                } else if p.position.x > width {
                    p.position.x -= width;
                }
                if p.position.y < 0.0 {
                    p.position.y += height;
                } else if p.position.y > height {
                    p.position.y -= height;
                }
            }
        }
    }
}

/// What to do with existing points when the surface is resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizePolicy {
    /// Leave positions untouched. Points outside the new bounds are corrected
    /// by the boundary policy on the next step.
    #[default]
    Keep,

    /// Give every point a fresh random position inside the new bounds,
    /// keeping its velocity and alpha.
    Rescatter,
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn bounce_flips_velocity_once_per_crossing() {
        let mut p = Point::new(Vec2::new(-0.2, 50.0), Vec2::new(-0.25, 0.1));
        Boundary::Bounce.apply(&mut p, 800.0, 600.0);
        assert_eq!(p.position.x, 0.0);
        assert_eq!(p.velocity.x, 0.25);
        assert_eq!(p.velocity.y, 0.1);

        // Back inside: a second application leaves it alone.
        p.position += p.velocity;
        Boundary::Bounce.apply(&mut p, 800.0, 600.0);
        assert_eq!(p.velocity.x, 0.25);
    }

    #[test]
    fn bounce_clamps_on_far_edges() {
        let mut p = Point::new(Vec2::new(800.3, 600.1), Vec2::new(0.25, 0.2));
        Boundary::Bounce.apply(&mut p, 800.0, 600.0);
        assert_eq!(p.position, Vec2::new(800.0, 600.0));
        assert_eq!(p.velocity, Vec2::new(-0.25, -0.2));
    }

    #[test]
    fn wrap_teleports_to_opposite_edge() {
        let mut p = Point::new(Vec2::new(-0.1, 600.2), Vec2::new(-0.25, 0.25));
        Boundary::Wrap.apply(&mut p, 800.0, 600.0);
        assert!((p.position.x - 799.9).abs() < 1e-4);
        assert!((p.position.y - 0.2).abs() < 1e-3);
        // Velocity is untouched.
        assert_eq!(p.velocity, Vec2::new(-0.25, 0.25));
    }

    #[test]
    fn interior_points_are_untouched() {
        for boundary in [Boundary::Bounce, Boundary::Wrap] {
            let mut p = Point::new(Vec2::new(400.0, 300.0), Vec2::new(0.1, -0.1));
            boundary.apply(&mut p, 800.0, 600.0);
            assert_eq!(p.position, Vec2::new(400.0, 300.0));
            assert_eq!(p.velocity, Vec2::new(0.1, -0.1));
        }
    }
}
