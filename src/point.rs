//! The animated point itself: a 2D position/velocity pair with a render alpha.

use glam::Vec2;
use rand::Rng;

/// Range of the per-point render alpha assigned at spawn time.
const ALPHA_MIN: f32 = 0.3;
const ALPHA_SPREAD: f32 = 0.3;

/// A single animated point.
///
/// Positions live in pixel space with the origin at the surface's top-left
/// corner. Velocity is expressed in pixels per frame; integration is one
/// Euler step per display frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Render opacity of the point marker, in `[0, 1]`.
    pub alpha: f32,
}

impl Point {
    /// Create a point with a fixed position and velocity, fully opaque.
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            alpha: 1.0,
        }
    }

    /// Spawn a point uniformly at random inside `[0, width) x [0, height)`.
    ///
    /// A zero-area surface degenerates to points at the origin.
    pub fn random_in<R: Rng>(rng: &mut R, width: f32, height: f32, max_speed: f32) -> Self {
        Self {
            position: random_position(rng, width, height),
            velocity: random_velocity(rng, max_speed),
            alpha: random_alpha(rng),
        }
    }

    /// Spawn a point within `scatter` pixels of `center` (uniform angle,
    /// uniform radius). A scatter of zero lands exactly on `center`.
    pub fn scattered_around<R: Rng>(
        rng: &mut R,
        center: Vec2,
        scatter: f32,
        max_speed: f32,
    ) -> Self {
        let offset = if scatter > 0.0 {
            let angle = rng.gen::<f32>() * std::f32::consts::TAU;
            Vec2::from_angle(angle) * (rng.gen::<f32>() * scatter)
        } else {
            Vec2::ZERO
        };
        Self {
            position: center + offset,
            velocity: random_velocity(rng, max_speed),
            alpha: random_alpha(rng),
        }
    }
}

/// Uniform position in `[0, width) x [0, height)`, origin if the surface has
/// no area on an axis.
pub(crate) fn random_position<R: Rng>(rng: &mut R, width: f32, height: f32) -> Vec2 {
    let x = if width > 0.0 {
        rng.gen_range(0.0..width)
    } else {
        0.0
    };
    let y = if height > 0.0 {
        rng.gen_range(0.0..height)
    } else {
        0.0
    };
    Vec2::new(x, y)
}

fn random_velocity<R: Rng>(rng: &mut R, max_speed: f32) -> Vec2 {
    Vec2::new(
        rng.gen_range(-max_speed..=max_speed),
        rng.gen_range(-max_speed..=max_speed),
    )
}

fn random_alpha<R: Rng>(rng: &mut R) -> f32 {
    ALPHA_MIN + rng.gen::<f32>() * ALPHA_SPREAD
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn random_points_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let p = Point::random_in(&mut rng, 800.0, 600.0, 0.25);
            assert!(p.position.x >= 0.0 && p.position.x < 800.0);
            assert!(p.position.y >= 0.0 && p.position.y < 600.0);
            assert!(p.velocity.x.abs() <= 0.25);
            assert!(p.velocity.y.abs() <= 0.25);
            assert!(p.alpha >= 0.3 && p.alpha <= 0.6);
        }
    }

    #[test]
    fn zero_area_surface_collapses_to_origin() {
        let mut rng = StdRng::seed_from_u64(7);
        let p = Point::random_in(&mut rng, 0.0, 0.0, 0.25);
        assert_eq!(p.position, Vec2::ZERO);
    }

    #[test]
    fn scatter_respects_radius() {
        let mut rng = StdRng::seed_from_u64(42);
        let center = Vec2::new(100.0, 50.0);
        for _ in 0..200 {
            let p = Point::scattered_around(&mut rng, center, 30.0, 0.25);
            assert!(p.position.distance(center) <= 30.0);
        }
    }

    #[test]
    fn zero_scatter_lands_on_center() {
        let mut rng = StdRng::seed_from_u64(42);
        let center = Vec2::new(12.0, 34.0);
        let p = Point::scattered_around(&mut rng, center, 0.0, 0.25);
        assert_eq!(p.position, center);
    }
}
