//! Shape generation for 2D primitives
//!
//! Everything is emitted as a plain triangle list in screen space.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use super::vertex::Vertex;

/// Segments used for a full circle
pub const CIRCLE_SEGMENTS: u32 = 24;
/// Segments used per rounded corner
pub const CORNER_SEGMENTS: u32 = 6;

/// Axis-aligned filled rectangle (two triangles)
pub fn rect(out: &mut Vec<Vertex>, pos: Vec2, size: Vec2, color: [f32; 4]) {
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }
    let (x0, y0) = (pos.x, pos.y);
    let (x1, y1) = (pos.x + size.x, pos.y + size.y);

    out.push(Vertex::new(x0, y0, color));
    out.push(Vertex::new(x1, y0, color));
    out.push(Vertex::new(x0, y1, color));

    out.push(Vertex::new(x0, y1, color));
    out.push(Vertex::new(x1, y0, color));
    out.push(Vertex::new(x1, y1, color));
}

/// Filled pie slice from `start` to `end` (radians)
pub fn fan(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radius: f32,
    start: f32,
    end: f32,
    segments: u32,
    color: [f32; 4],
) {
    let span = end - start;
    for i in 0..segments {
        let theta1 = start + (i as f32 / segments as f32) * span;
        let theta2 = start + ((i + 1) as f32 / segments as f32) * span;

        // Triangle from center to edge
        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

/// Filled circle
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4]) {
    fan(out, center, radius, 0.0, TAU, CIRCLE_SEGMENTS, color);
}

/// Filled rectangle with rounded corners
///
/// The radius is clamped to half the shorter side.
pub fn rounded_rect(out: &mut Vec<Vertex>, pos: Vec2, size: Vec2, radius: f32, color: [f32; 4]) {
    let r = radius.min(size.x / 2.0).min(size.y / 2.0).max(0.0);
    if r == 0.0 {
        rect(out, pos, size, color);
        return;
    }

    // Centre column plus left/right strips between the corners
    rect(out, Vec2::new(pos.x + r, pos.y), Vec2::new(size.x - 2.0 * r, size.y), color);
    rect(out, Vec2::new(pos.x, pos.y + r), Vec2::new(r, size.y - 2.0 * r), color);
    rect(
        out,
        Vec2::new(pos.x + size.x - r, pos.y + r),
        Vec2::new(r, size.y - 2.0 * r),
        color,
    );

    // Corners (y points down, so angles run clockwise on screen)
    let corners = [
        (Vec2::new(pos.x + r, pos.y + r), PI),
        (Vec2::new(pos.x + size.x - r, pos.y + r), -FRAC_PI_2),
        (Vec2::new(pos.x + size.x - r, pos.y + size.y - r), 0.0),
        (Vec2::new(pos.x + r, pos.y + size.y - r), FRAC_PI_2),
    ];
    for (center, start) in corners {
        fan(out, center, r, start, start + FRAC_PI_2, CORNER_SEGMENTS, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    fn bounds(vertices: &[Vertex]) -> (Vec2, Vec2) {
        vertices.iter().fold(
            (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
            |(lo, hi), v| {
                let p = Vec2::from(v.position);
                (lo.min(p), hi.max(p))
            },
        )
    }

    #[test]
    fn test_rect_is_two_triangles() {
        let mut out = Vec::new();
        rect(&mut out, Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), WHITE);
        assert_eq!(out.len(), 6);
        let (lo, hi) = bounds(&out);
        assert_eq!(lo, Vec2::new(1.0, 2.0));
        assert_eq!(hi, Vec2::new(4.0, 6.0));
    }

    #[test]
    fn test_empty_rect_emits_nothing() {
        let mut out = Vec::new();
        rect(&mut out, Vec2::ZERO, Vec2::new(0.0, 5.0), WHITE);
        assert!(out.is_empty());
    }

    #[test]
    fn test_circle_vertex_count() {
        let mut out = Vec::new();
        circle(&mut out, Vec2::new(10.0, 10.0), 8.0, WHITE);
        assert_eq!(out.len(), (CIRCLE_SEGMENTS * 3) as usize);
        let (lo, hi) = bounds(&out);
        assert!((lo.x - 2.0).abs() < 0.01 && (hi.x - 18.0).abs() < 0.01);
    }

    #[test]
    fn test_rounded_rect_stays_in_bounds() {
        let mut out = Vec::new();
        rounded_rect(&mut out, Vec2::new(10.0, 20.0), Vec2::new(40.0, 80.0), 8.0, WHITE);
        assert_eq!(out.len(), 3 * 6 + 4 * (CORNER_SEGMENTS * 3) as usize);
        let (lo, hi) = bounds(&out);
        assert!(lo.x >= 10.0 - 0.01 && lo.y >= 20.0 - 0.01);
        assert!(hi.x <= 50.0 + 0.01 && hi.y <= 100.0 + 0.01);
    }

    #[test]
    fn test_rounded_rect_radius_clamped() {
        let mut out = Vec::new();
        rounded_rect(&mut out, Vec2::ZERO, Vec2::new(8.0, 28.0), 40.0, WHITE);
        let (lo, hi) = bounds(&out);
        assert!(lo.x >= -0.01 && hi.x <= 8.01);
    }
}
