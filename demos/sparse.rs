//! Sparse constellation variant.
//!
//! Ten points on a dark surface, links up to 150 px with a constant faint
//! opacity, reflective edges, and one new point per click at the exact
//! cursor position. No point markers - the lines carry the effect.
//!
//! Run with: `cargo run --example sparse`

use pointfield::prelude::*;

fn main() {
    env_logger::init();

    let result = FieldAnimation::new()
        .with_config(FieldConfig::sparse())
        .with_title("pointfield - sparse")
        .with_visuals(|v| {
            v.background(Vec3::new(0.02, 0.02, 0.03));
            v.line_color(Vec3::new(0.12, 0.93, 0.93));
            v.line_alpha(0.1);
            v.line_width(2.0);
            v.distance_fade(false);
            v.markers(false);
        })
        .run();

    if let Err(e) = result {
        eprintln!("sparse: {}", e);
        std::process::exit(1);
    }
}
