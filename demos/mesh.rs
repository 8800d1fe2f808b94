//! Dense mesh variant.
//!
//! Seventy-five cyan points with wraparound edges, links up to 120 px whose
//! opacity fades with distance, and circular markers per point. A click
//! bursts five new points within 30 px of the cursor; resizing rescatters
//! the whole field.
//!
//! Run with: `cargo run --example mesh`

use pointfield::prelude::*;

fn main() {
    env_logger::init();

    let result = FieldAnimation::new()
        .with_config(FieldConfig::mesh())
        .with_title("pointfield - mesh")
        .with_visuals(|v| {
            v.background(Vec3::new(0.04, 0.04, 0.04));
            v.line_color(Vec3::new(0.0, 1.0, 1.0));
            v.line_alpha(0.4);
            v.line_width(0.6);
            v.distance_fade(true);
            v.markers(true);
            v.marker_color(Vec3::new(0.0, 1.0, 1.0));
            v.marker_radius(1.5);
        })
        .run();

    if let Err(e) = result {
        eprintln!("mesh: {}", e);
        std::process::exit(1);
    }
}
