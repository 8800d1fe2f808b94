//! CPU-side tessellation of one frame.
//!
//! The field's state is turned into flat instance arrays here, on the CPU,
//! where the math is unit-testable; the shaders only expand instances into
//! quads. Positions stay in surface pixels until the vertex stage.

use bytemuck::{Pod, Zeroable};

use crate::field::{link_alpha, PointField};
use crate::visuals::FieldVisuals;

/// One link line: endpoints in surface pixels plus a resolved opacity.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LineInstance {
    pub a: [f32; 2],
    pub b: [f32; 2],
    pub alpha: f32,
}

/// One point marker: center in surface pixels plus the point's own alpha.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PointInstance {
    pub center: [f32; 2],
    pub alpha: f32,
}

/// Everything the GPU needs for one frame.
#[derive(Debug, Default)]
pub struct FrameGeometry {
    pub lines: Vec<LineInstance>,
    pub points: Vec<PointInstance>,
}

/// Tessellate the current field state under the given visual settings.
pub fn build_frame(field: &PointField, visuals: &FieldVisuals) -> FrameGeometry {
    let max = field.config().link_distance;
    let points = field.points();

    let lines = field
        .links()
        .into_iter()
        .map(|link| {
            let fade = if visuals.distance_fade {
                link_alpha(link.dist, max)
            } else {
                1.0
            };
            LineInstance {
                a: points[link.a].position.to_array(),
                b: points[link.b].position.to_array(),
                alpha: visuals.line_alpha * fade,
            }
        })
        .collect();

    let markers = if visuals.markers {
        points
            .iter()
            .map(|p| PointInstance {
                center: p.position.to_array(),
                alpha: p.alpha.clamp(0.0, 1.0),
            })
            .collect()
    } else {
        Vec::new()
    };

    FrameGeometry {
        lines,
        points: markers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldConfig;

    fn mesh_field() -> PointField {
        PointField::new(FieldConfig::mesh(), Some(5))
    }

    #[test]
    fn one_line_instance_per_link() {
        let field = mesh_field();
        let frame = build_frame(&field, &FieldVisuals::new());
        assert_eq!(frame.lines.len(), field.links().len());
        assert_eq!(frame.points.len(), field.len());
    }

    #[test]
    fn instance_alphas_stay_in_range() {
        let field = mesh_field();
        let frame = build_frame(&field, &FieldVisuals::new());
        for line in &frame.lines {
            assert!((0.0..=1.0).contains(&line.alpha));
        }
        for point in &frame.points {
            assert!((0.0..=1.0).contains(&point.alpha));
        }
    }

    #[test]
    fn disabling_markers_drops_point_instances() {
        let field = mesh_field();
        let mut visuals = FieldVisuals::new();
        visuals.markers(false);
        let frame = build_frame(&field, &visuals);
        assert!(frame.points.is_empty());
        assert_eq!(frame.lines.len(), field.links().len());
    }

    #[test]
    fn constant_fade_uses_the_base_alpha() {
        let field = mesh_field();
        let mut visuals = FieldVisuals::new();
        visuals.distance_fade(false).line_alpha(0.1);
        let frame = build_frame(&field, &visuals);
        for line in &frame.lines {
            assert!((line.alpha - 0.1).abs() < 1e-6);
        }
    }
}
