//! Snap functionality for aligning the cursor to the grid, wall endpoints
//! and angle increments.

use crate::geometry::distance;
use crate::plan::Wall;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Grid spacing in meters.
pub const GRID_SIZE: f64 = 0.25;

/// Angle snap increment in degrees.
pub const ANGLE_SNAP_INCREMENT: f64 = 15.0;

/// Radius within which wall endpoints attract the cursor, in meters.
pub const MAGNETIC_SNAP_THRESHOLD: f64 = 0.3;

/// Snap mode for placing points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapMode {
    /// No snapping.
    Off,
    /// Snap to grid intersections.
    Grid,
    /// Snap to wall endpoints, falling back to the grid.
    #[default]
    Magnetic,
}

impl SnapMode {
    /// Cycle to the next snap mode.
    pub fn next(self) -> Self {
        match self {
            SnapMode::Off => SnapMode::Grid,
            SnapMode::Grid => SnapMode::Magnetic,
            SnapMode::Magnetic => SnapMode::Off,
        }
    }
}

/// What a snapped point was attracted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapKind {
    /// Left where it was.
    None,
    /// A grid intersection.
    Grid,
    /// An endpoint of an existing wall.
    WallEndpoint,
}

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The snapped point.
    pub point: Point,
    /// What the point snapped to.
    pub kind: SnapKind,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self { point, kind: SnapKind::None }
    }
}

/// Round a value to the nearest multiple of `grid_size`.
pub fn snap(value: f64, grid_size: f64) -> f64 {
    (value / grid_size).round() * grid_size
}

/// Snap a point to the nearest grid intersection.
pub fn snap_point(point: Point, grid_size: f64) -> Point {
    Point::new(snap(point.x, grid_size), snap(point.y, grid_size))
}

/// Snap to the closest wall endpoint within `threshold`, else to the grid.
///
/// Endpoints are visited wall by wall in plan order, `start` before `end`.
/// Only a strictly closer endpoint replaces the current best, so on an exact
/// tie the first endpoint visited wins.
pub fn magnetic_snap(point: Point, walls: &[Wall], threshold: f64, grid_size: f64) -> SnapResult {
    let mut best: Option<Point> = None;
    let mut best_dist = threshold;

    for wall in walls {
        for endpoint in [wall.start, wall.end] {
            let dist = distance(point, endpoint);
            if dist < best_dist {
                best_dist = dist;
                best = Some(endpoint);
            }
        }
    }

    match best {
        Some(endpoint) => SnapResult { point: endpoint, kind: SnapKind::WallEndpoint },
        None => SnapResult { point: snap_point(point, grid_size), kind: SnapKind::Grid },
    }
}

/// Snap a point according to `mode`.
pub fn snap_with_mode(
    point: Point,
    mode: SnapMode,
    walls: &[Wall],
    threshold: f64,
    grid_size: f64,
) -> SnapResult {
    match mode {
        SnapMode::Off => SnapResult::none(point),
        SnapMode::Grid => SnapResult { point: snap_point(point, grid_size), kind: SnapKind::Grid },
        SnapMode::Magnetic => magnetic_snap(point, walls, threshold, grid_size),
    }
}

/// Round an angle in radians to the nearest multiple of `increment_degrees`.
pub fn angle_snap(angle: f64, increment_degrees: f64) -> f64 {
    let step = increment_degrees.to_radians();
    (angle / step).round() * step
}

/// Move `end` so that start→end lies on a snapped angle, keeping its length.
///
/// A zero-length segment is returned unchanged.
pub fn constrain_line(start: Point, end: Point, increment_degrees: f64) -> Point {
    let delta = end - start;
    let length = delta.hypot();
    if length == 0.0 {
        return end;
    }
    let angle = angle_snap(delta.atan2(), increment_degrees);
    start + Vec2::from_angle(angle) * length
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    fn wall(id: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> Wall {
        Wall::new(id, Point::new(x0, y0), Point::new(x1, y1))
    }

    #[test]
    fn test_snap() {
        assert!((snap(0.3, 0.25) - 0.25).abs() < 1e-12);
        assert!((snap(0.4, 0.25) - 0.5).abs() < 1e-12);
        assert!((snap(-0.6, 0.25) - -0.5).abs() < 1e-12);
        assert_eq!(snap_point(Point::new(23.0, 47.0), 20.0), Point::new(20.0, 40.0));
    }

    #[test]
    fn test_magnetic_snap_to_endpoint() {
        let walls = vec![wall("w1", 0.0, 0.0, 5.0, 0.0)];
        let result = magnetic_snap(Point::new(0.05, 0.05), &walls, 0.3, GRID_SIZE);
        assert_eq!(result.point, Point::new(0.0, 0.0));
        assert_eq!(result.kind, SnapKind::WallEndpoint);
    }

    #[test]
    fn test_magnetic_snap_grid_fallback() {
        let walls = vec![wall("w1", 0.0, 0.0, 5.0, 0.0)];
        let result = magnetic_snap(Point::new(2.5, 2.5), &walls, 0.3, GRID_SIZE);
        assert_eq!(result.point, Point::new(2.5, 2.5));
        assert_eq!(result.kind, SnapKind::Grid);

        let result = magnetic_snap(Point::new(2.6, 2.4), &walls, 0.3, GRID_SIZE);
        assert_eq!(result.point, Point::new(2.5, 2.5));
    }

    #[test]
    fn test_magnetic_snap_prefers_closer_endpoint() {
        let walls = vec![wall("w1", 0.0, 0.0, 1.0, 0.0), wall("w2", 1.1, 0.0, 3.0, 0.0)];
        let result = magnetic_snap(Point::new(1.08, 0.0), &walls, 0.3, GRID_SIZE);
        assert_eq!(result.point, Point::new(1.1, 0.0));
    }

    #[test]
    fn test_magnetic_snap_tie_first_wins() {
        // Both candidate endpoints are exactly 1.0 away from the origin.
        let walls = vec![wall("w1", 1.0, 0.0, 9.0, 9.0), wall("w2", -1.0, 0.0, -9.0, 9.0)];
        let result = magnetic_snap(Point::ZERO, &walls, 1.5, GRID_SIZE);
        assert_eq!(result.point, Point::new(1.0, 0.0));

        let reversed = vec![walls[1].clone(), walls[0].clone()];
        let result = magnetic_snap(Point::ZERO, &reversed, 1.5, GRID_SIZE);
        assert_eq!(result.point, Point::new(-1.0, 0.0));
    }

    #[test]
    fn test_magnetic_snap_threshold_is_exclusive() {
        let walls = vec![wall("w1", 0.3, 0.0, 5.0, 0.0)];
        let result = magnetic_snap(Point::ZERO, &walls, 0.3, 1.0);
        assert_eq!(result.kind, SnapKind::Grid);
    }

    #[test]
    fn test_snap_mode() {
        let walls = vec![wall("w1", 0.0, 0.0, 5.0, 0.0)];
        let p = Point::new(0.05, 0.1);
        assert_eq!(snap_with_mode(p, SnapMode::Off, &walls, 0.3, GRID_SIZE).point, p);
        assert_eq!(snap_with_mode(p, SnapMode::Grid, &walls, 0.3, GRID_SIZE).kind, SnapKind::Grid);
        assert_eq!(
            snap_with_mode(p, SnapMode::Magnetic, &walls, 0.3, GRID_SIZE).kind,
            SnapKind::WallEndpoint
        );
        assert_eq!(SnapMode::Off.next(), SnapMode::Grid);
        assert_eq!(SnapMode::Magnetic.next(), SnapMode::Off);
    }

    #[test]
    fn test_angle_snap() {
        assert!((angle_snap(7f64.to_radians(), 15.0) - 0.0).abs() < 1e-12);
        assert!((angle_snap(8f64.to_radians(), 15.0) - 15f64.to_radians()).abs() < 1e-12);
        assert!((angle_snap(PI * 0.49, 15.0) - PI / 2.0).abs() < 1e-12);
        assert!((angle_snap(-PI * 0.26, 45.0) - -PI / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_constrain_line_horizontal() {
        let start = Point::new(1.0, 1.0);
        let end = Point::new(11.0, 1.5);
        let constrained = constrain_line(start, end, ANGLE_SNAP_INCREMENT);
        assert!((constrained.y - 1.0).abs() < 1e-9);
        assert!((distance(start, constrained) - distance(start, end)).abs() < 1e-9);
    }

    #[test]
    fn test_constrain_line_diagonal() {
        let constrained = constrain_line(Point::ZERO, Point::new(3.0, 3.1), 45.0);
        assert!((constrained.x - constrained.y).abs() < 1e-9);
    }

    #[test]
    fn test_constrain_line_zero_length() {
        let p = Point::new(2.0, 2.0);
        assert_eq!(constrain_line(p, p, ANGLE_SNAP_INCREMENT), p);
    }

    proptest! {
        #[test]
        fn prop_snap_idempotent(v in -1e6f64..1e6, g in 0.01f64..10.0) {
            let once = snap(v, g);
            prop_assert_eq!(snap(once, g), once);
        }
    }
}
