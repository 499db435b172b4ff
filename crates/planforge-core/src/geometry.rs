//! Distance and containment primitives shared by snapping and hit testing.
//!
//! Everything here is total over finite input: zero-length segments are
//! special-cased so no NaN leaks out.

use kurbo::{Point, Vec2};

/// Euclidean distance between two points.
pub fn distance(p1: Point, p2: Point) -> f64 {
    (p2 - p1).hypot()
}

/// Clamped projection parameter of `point` onto segment `a`→`b`.
///
/// Returns `t ∈ [0, 1]`, or `0.0` when the segment is degenerate.
pub fn project_onto_segment(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let len_sq = seg.hypot2();
    if len_sq == 0.0 {
        return 0.0;
    }
    ((point - a).dot(seg) / len_sq).clamp(0.0, 1.0)
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    if seg.hypot2() == 0.0 {
        return distance(point, a);
    }
    let t = project_onto_segment(point, a, b);
    let proj = a + seg * t;
    distance(point, proj)
}

/// Unit direction of `a`→`b`, or zero for a degenerate segment.
pub fn unit_direction(a: Point, b: Point) -> Vec2 {
    let seg = b - a;
    let len = seg.hypot();
    if len == 0.0 { Vec2::ZERO } else { seg / len }
}

/// Even-odd ray casting test against an ordered vertex ring.
///
/// Rings with fewer than three vertices contain nothing. Points on the left
/// or bottom edge of an axis-aligned ring count as inside, points on the
/// right or top edge as outside.
pub fn point_in_polygon(point: Point, vertices: &[Point]) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (pi, pj) = (vertices[i], vertices[j]);
        if (pi.y > point.y) != (pj.y > point.y) {
            let x_cross = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
