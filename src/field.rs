//! The point set and its per-frame dynamics.
//!
//! A [`PointField`] owns an ordered collection of [`Point`]s and mutates it in
//! place once per frame: one Euler integration step, then the configured
//! boundary policy. It also answers the proximity query that drives line
//! rendering and grows the set in response to clicks. The set never shrinks.
//!
//! All randomness flows through a single RNG owned by the field, seedable for
//! deterministic tests.

use glam::Vec2;
use rand::{rngs::StdRng, SeedableRng};

use crate::point::{random_position, Point};
use crate::rules::{Boundary, ResizePolicy};

/// Static configuration of a point field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Surface width in pixels.
    pub width: f32,
    /// Surface height in pixels.
    pub height: f32,
    /// Number of points seeded at creation.
    pub seed_count: usize,
    /// Velocity components are drawn uniformly from `[-max_speed, max_speed]`,
    /// in pixels per frame.
    pub max_speed: f32,
    /// Maximum Euclidean distance, in pixels, at which two points are linked.
    pub link_distance: f32,
    /// How many points a click inserts.
    pub click_batch: usize,
    /// Radius, in pixels, within which clicked-in points scatter around the
    /// click position. Zero places them exactly on it.
    pub click_scatter: f32,
    pub boundary: Boundary,
    pub resize: ResizePolicy,
}

impl FieldConfig {
    /// Sparse constellation: few points, long links, reflective edges, one
    /// point per click.
    pub fn sparse() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            seed_count: 10,
            max_speed: 0.25,
            link_distance: 150.0,
            click_batch: 1,
            click_scatter: 0.0,
            boundary: Boundary::Bounce,
            resize: ResizePolicy::Keep,
        }
    }

    /// Dense mesh: many points, shorter links, wraparound edges, five points
    /// scattered around each click, rescatter on resize.
    pub fn mesh() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            seed_count: 75,
            max_speed: 0.25,
            link_distance: 120.0,
            click_batch: 5,
            click_scatter: 30.0,
            boundary: Boundary::Wrap,
            resize: ResizePolicy::Rescatter,
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::mesh()
    }
}

/// A proximity link between the points at indices `a` and `b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub dist: f32,
}

/// Line opacity for a link: `1 - dist / max`, clamped to `[0, 1]`.
///
/// Monotonically decreasing in distance; a degenerate `max` yields zero.
pub fn link_alpha(dist: f32, max: f32) -> f32 {
    if max <= 0.0 {
        return 0.0;
    }
    (1.0 - dist / max).clamp(0.0, 1.0)
}

/// A mutable set of points animated against a pixel-space surface.
#[derive(Debug)]
pub struct PointField {
    config: FieldConfig,
    points: Vec<Point>,
    rng: StdRng,
}

impl PointField {
    /// Seed `config.seed_count` points inside the surface. Pass a seed for
    /// deterministic behavior; `None` seeds from the OS.
    pub fn new(config: FieldConfig, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let points = (0..config.seed_count)
            .map(|_| Point::random_in(&mut rng, config.width, config.height, config.max_speed))
            .collect();
        Self {
            config,
            points,
            rng,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Advance every point by exactly one velocity step, then apply the
    /// boundary policy.
    pub fn step(&mut self) {
        self.integrate();
        self.apply_boundary();
    }

    /// The integration half of [`step`](Self::step): `position += velocity`,
    /// no boundary correction. Positions may briefly exceed the surface.
    pub fn integrate(&mut self) {
        for p in &mut self.points {
            p.position += p.velocity;
        }
    }

    /// The correction half of [`step`](Self::step).
    pub fn apply_boundary(&mut self) {
        let (w, h) = (self.config.width, self.config.height);
        let boundary = self.config.boundary;
        for p in &mut self.points {
            boundary.apply(p, w, h);
        }
    }

    /// All unordered pairs strictly closer than the link distance.
    pub fn links(&self) -> Vec<Link> {
        let max = self.config.link_distance;
        let mut links = Vec::new();
        for i in 0..self.points.len() {
            for j in (i + 1)..self.points.len() {
                let dist = self.points[i].position.distance(self.points[j].position);
                if dist < max {
                    links.push(Link { a: i, b: j, dist });
                }
            }
        }
        links
    }

    /// Insert the configured click batch around `pos`.
    pub fn click(&mut self, pos: Vec2) {
        for _ in 0..self.config.click_batch {
            let p = Point::scattered_around(
                &mut self.rng,
                pos,
                self.config.click_scatter,
                self.config.max_speed,
            );
            self.points.push(p);
        }
    }

    /// Adopt new surface bounds, handling existing points per the resize
    /// policy.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.config.width = width;
        self.config.height = height;
        if self.config.resize == ResizePolicy::Rescatter {
            for p in &mut self.points {
                p.position = random_position(&mut self.rng, width, height);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(config: FieldConfig) -> PointField {
        PointField::new(config, Some(1234))
    }

    #[test]
    fn seeds_the_configured_count_inside_bounds() {
        let f = field(FieldConfig::mesh());
        assert_eq!(f.len(), 75);
        for p in f.points() {
            assert!(p.position.x >= 0.0 && p.position.x < 800.0);
            assert!(p.position.y >= 0.0 && p.position.y < 600.0);
        }
    }

    #[test]
    fn integrate_is_one_exact_euler_step() {
        let mut f = field(FieldConfig::sparse());
        let before: Vec<_> = f.points().to_vec();
        f.integrate();
        for (prev, now) in before.iter().zip(f.points()) {
            assert_eq!(now.position, prev.position + prev.velocity);
            assert_eq!(now.velocity, prev.velocity);
        }
    }

    #[test]
    fn integrated_positions_stay_within_one_speed_of_bounds() {
        let mut f = field(FieldConfig::sparse());
        f.integrate();
        let s = f.config().max_speed;
        for p in f.points() {
            assert!(p.position.x >= -s && p.position.x <= 800.0 + s);
            assert!(p.position.y >= -s && p.position.y <= 600.0 + s);
        }
    }

    #[test]
    fn links_require_strictly_less_than_threshold() {
        let mut f = field(FieldConfig {
            seed_count: 0,
            ..FieldConfig::sparse()
        });
        f.points.push(Point::new(Vec2::new(0.0, 0.0), Vec2::ZERO));
        f.points.push(Point::new(Vec2::new(100.0, 0.0), Vec2::ZERO));
        f.points.push(Point::new(Vec2::new(200.0, 0.0), Vec2::ZERO));

        let links = f.links();
        // (0,0)-(100,0) and (100,0)-(200,0) are within 150; (0,0)-(200,0) is not.
        assert_eq!(links.len(), 2);
        assert!(links.iter().any(|l| l.a == 0 && l.b == 1));
        assert!(links.iter().any(|l| l.a == 1 && l.b == 2));

        // Exactly at the threshold: no link.
        f.points[1].position.x = 150.0;
        let links = f.links();
        assert!(!links.iter().any(|l| l.a == 0 && l.b == 1));
    }

    #[test]
    fn link_alpha_is_clamped_and_monotone() {
        assert_eq!(link_alpha(0.0, 120.0), 1.0);
        assert_eq!(link_alpha(120.0, 120.0), 0.0);
        assert_eq!(link_alpha(240.0, 120.0), 0.0);
        let mut prev = f32::INFINITY;
        for d in [0.0, 30.0, 60.0, 90.0, 119.0] {
            let a = link_alpha(d, 120.0);
            assert!(a <= prev);
            assert!((0.0..=1.0).contains(&a));
            prev = a;
        }
    }

    #[test]
    fn click_grows_by_batch_within_scatter() {
        let mut f = field(FieldConfig::mesh());
        let before = f.len();
        let pos = Vec2::new(320.0, 240.0);
        f.click(pos);
        assert_eq!(f.len(), before + 5);
        for p in &f.points()[before..] {
            assert!(p.position.distance(pos) <= 30.0);
        }
    }

    #[test]
    fn single_click_variant_lands_exactly_on_cursor() {
        let mut f = field(FieldConfig::sparse());
        let before = f.len();
        let pos = Vec2::new(11.0, 22.0);
        f.click(pos);
        assert_eq!(f.len(), before + 1);
        assert_eq!(f.points()[before].position, pos);
    }

    #[test]
    fn resize_keep_leaves_positions_for_next_bounce() {
        let mut f = field(FieldConfig::sparse());
        let before: Vec<_> = f.points().to_vec();
        f.resize(100.0, 100.0);
        for (prev, now) in before.iter().zip(f.points()) {
            assert_eq!(now.position, prev.position);
        }
        // The next step pulls strays back inside.
        f.step();
        for p in f.points() {
            assert!(p.position.x >= 0.0 && p.position.x <= 100.0);
            assert!(p.position.y >= 0.0 && p.position.y <= 100.0);
        }
    }

    #[test]
    fn resize_rescatter_moves_points_into_new_bounds() {
        let mut f = field(FieldConfig::mesh());
        f.resize(100.0, 50.0);
        for p in f.points() {
            assert!(p.position.x >= 0.0 && p.position.x < 100.0);
            assert!(p.position.y >= 0.0 && p.position.y < 50.0);
        }
    }
}
