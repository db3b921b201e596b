//! Viewport transform: pan/zoom state and screen ↔ canvas mapping.
//!
//! The rendering transform is `translate(pan_x, pan_y)` followed by
//! `scale(zoom)` with the origin at the wall's top-left corner. Pan lives in
//! screen space, so panning speed does not depend on zoom; drag deltas for
//! items are divided by zoom so a drag feels 1:1 at every zoom level.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ZOOM, MAX_ZOOM, MIN_WHEEL_ZOOM_STEP, MIN_ZOOM, WHEEL_ZOOM_SPEED};

/// A point or delta in either screen or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise `self - other`.
    #[must_use]
    pub fn delta_from(self, other: Point) -> Point {
        Point { x: self.x - other.x, y: self.y - other.y }
    }
}

/// Camera state for one open wall session. Never persisted.
///
/// `pan_x` / `pan_y` are in CSS pixels.
/// `zoom` is a scale factor kept within `[MIN_ZOOM, MAX_ZOOM]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: DEFAULT_ZOOM }
    }
}

impl Camera {
    /// Restore the initial view: no pan, default zoom.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Add `delta` to the zoom factor, clamp, and round to two decimals so the
    /// displayed percentage never drifts.
    pub fn zoom_by(&mut self, delta: f64) {
        self.set_zoom(self.zoom + delta);
    }

    /// Set the zoom factor directly, with the same clamping and rounding as
    /// [`Camera::zoom_by`]. Non-finite input leaves the zoom unchanged.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            return;
        }
        let clamped = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.zoom = ((clamped * 100.0).round() / 100.0).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Zoom for a vertical wheel delta. Scrolling up zooms in. Small deltas
    /// from trackpads and high-resolution wheels still move by one step.
    pub fn zoom_by_wheel(&mut self, dy: f64) {
        if !dy.is_finite() || dy.abs() < f64::EPSILON {
            return;
        }
        let delta = -dy * WHEEL_ZOOM_SPEED;
        let delta = if delta.abs() < MIN_WHEEL_ZOOM_STEP { MIN_WHEEL_ZOOM_STEP.copysign(delta) } else { delta };
        self.zoom_by(delta);
    }

    /// Shift the pan offset by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Convert a screen-space delta to a canvas-space delta.
    #[must_use]
    pub fn to_canvas_delta(&self, screen_delta: Point) -> Point {
        Point { x: screen_delta.x / self.zoom, y: screen_delta.y / self.zoom }
    }

    /// Convert a screen-space point (CSS pixels) to canvas coordinates.
    #[must_use]
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point { x: (screen.x - self.pan_x) / self.zoom, y: (screen.y - self.pan_y) / self.zoom }
    }

    /// Convert a canvas-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point { x: canvas.x * self.zoom + self.pan_x, y: canvas.y * self.zoom + self.pan_y }
    }

    /// Convert a screen-space distance (pixels) to canvas units.
    #[must_use]
    pub fn screen_dist_to_canvas(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Zoom as a whole percentage for display.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn zoom_percent(&self) -> i64 {
        (self.zoom * 100.0).round() as i64
    }
}
