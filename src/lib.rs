//! # Pointfield
//!
//! Animated 2D point fields with proximity-line rendering: the "plexus"
//! background effect as a windowed Rust application.
//!
//! A [`PointField`](field::PointField) holds a set of points with per-frame
//! velocities. Every display frame each point advances one Euler step, a
//! boundary policy keeps it on the surface (bounce or wrap), and every pair
//! of points closer than a threshold is joined by a line whose opacity fades
//! with distance. Clicks inject new points at the cursor.
//!
//! ## Quick Start
//!
//! ```ignore
//! use pointfield::prelude::*;
//!
//! fn main() -> Result<(), RunError> {
//!     FieldAnimation::new()
//!         .with_seed_count(75)
//!         .with_boundary(Boundary::Wrap)
//!         .with_link_distance(120.0)
//!         .with_visuals(|v| {
//!             v.line_color(Vec3::new(0.0, 1.0, 1.0));
//!             v.markers(true);
//!         })
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! - **Field**: the mutable point set plus its dynamics (step, links,
//!   clicks, resize). Pure CPU code, deterministic under a seeded RNG.
//! - **Boundary policy**: an explicit, named choice between reflection
//!   ([`Boundary::Bounce`](rules::Boundary)) and toroidal wraparound
//!   ([`Boundary::Wrap`](rules::Boundary)).
//! - **Animator**: a start/stop handle around the field. The frame loop is
//!   a cancellable repeating task, not an unbounded recursive callback;
//!   teardown is an observable state transition.
//! - **Visuals**: rendering options (colors, line width, markers, distance
//!   fade), independent of the dynamics.
//!
//! Two presets mirror the classic variants of the effect:
//! [`FieldConfig::sparse`](field::FieldConfig::sparse) (10 points, long
//! reflective links) and [`FieldConfig::mesh`](field::FieldConfig::mesh)
//! (75 points, wraparound, click bursts).

pub mod animator;
pub mod error;
pub mod field;
mod gpu;
pub mod input;
pub mod point;
pub mod rules;
mod simulation;
pub mod time;
pub mod visuals;

pub use animator::Animator;
pub use error::{GpuError, RunError};
pub use field::{link_alpha, FieldConfig, Link, PointField};
pub use glam::Vec2;
pub use input::Pointer;
pub use point::Point;
pub use rules::{Boundary, ResizePolicy};
pub use simulation::FieldAnimation;
pub use time::FrameClock;
pub use visuals::FieldVisuals;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use pointfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::animator::Animator;
    pub use crate::error::RunError;
    pub use crate::field::{FieldConfig, PointField};
    pub use crate::rules::{Boundary, ResizePolicy};
    pub use crate::simulation::FieldAnimation;
    pub use crate::time::FrameClock;
    pub use crate::visuals::FieldVisuals;
    pub use glam::{Vec2, Vec3};
}
