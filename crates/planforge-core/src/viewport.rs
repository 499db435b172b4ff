//! Viewport module for pan/zoom transforms between screen and world space.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Pixels per meter at "100%" zoom.
pub const DEFAULT_ZOOM: f64 = 50.0;

/// Convert a screen point to world coordinates: `(screen - pan) / zoom`.
///
/// `zoom` must be positive.
pub fn screen_to_world(screen_point: Point, pan: Vec2, zoom: f64) -> Point {
    ((screen_point - pan).to_vec2() / zoom).to_point()
}

/// Convert a world point to screen coordinates: `world * zoom + pan`.
pub fn world_to_screen(world_point: Point, pan: Vec2, zoom: f64) -> Point {
    (world_point.to_vec2() * zoom).to_point() + pan
}

/// Viewport manages the 2D view transform of the plan editor.
///
/// It handles panning (translation) and zooming (scaling) operations,
/// converting between screen pixels and world meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Current translation offset in screen pixels.
    pub pan: Vec2,
    /// Current zoom level in pixels per meter.
    pub zoom: f64,
    /// Minimum allowed zoom level.
    pub min_zoom: f64,
    /// Maximum allowed zoom level.
    pub max_zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: DEFAULT_ZOOM,
            min_zoom: 5.0,
            max_zoom: 500.0,
        }
    }
}

impl Viewport {
    /// Create a new viewport with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        screen_to_world(screen_point, self.pan, self.zoom)
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        world_to_screen(world_point, self.pan, self.zoom)
    }

    /// Pan the view by a delta in screen pixels.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Zoom the view, keeping the world point under `screen_point` fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let world_point = self.screen_to_world(screen_point);
        self.zoom = new_zoom;

        let new_screen = self.world_to_screen(world_point);
        self.pan += screen_point - new_screen;
    }

    /// Reset to the default pan and zoom.
    pub fn reset(&mut self) {
        self.pan = Vec2::ZERO;
        self.zoom = DEFAULT_ZOOM;
    }
}
