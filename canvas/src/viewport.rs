#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ZOOM, MIN_ZOOM};

/// A point in either screen or floor space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// Per-floor pan/zoom state.
///
/// `pan_x` / `pan_y` are in screen pixels.
/// `zoom` is a scale factor (1.0 = no zoom), always within [`MIN_ZOOM`, `MAX_ZOOM`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

/// Sparse viewport update. Only present fields are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewportPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pan_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pan_y: Option<f64>,
}

/// Clamp a zoom factor into the allowed range.
#[must_use]
pub fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

impl Viewport {
    /// Convert a screen-space point (pixels) to floor coordinates.
    #[must_use]
    pub fn screen_to_floor(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a floor-space point to screen coordinates (pixels).
    #[must_use]
    pub fn floor_to_screen(&self, floor: Point) -> Point {
        Point {
            x: floor.x * self.zoom + self.pan_x,
            y: floor.y * self.zoom + self.pan_y,
        }
    }

    /// Convert a floor-space distance to a screen-space distance.
    #[must_use]
    pub fn floor_dist_to_screen(&self, floor_dist: f64) -> f64 {
        floor_dist * self.zoom
    }

    /// The pan offset as a point.
    #[must_use]
    pub fn pan(&self) -> Point {
        Point::new(self.pan_x, self.pan_y)
    }

    /// Set the zoom factor, clamped.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = clamp_zoom(zoom);
    }

    /// Multiply the zoom factor, clamped.
    pub fn zoom_by(&mut self, factor: f64) {
        self.set_zoom(self.zoom * factor);
    }

    /// Set the pan offset.
    pub fn set_pan(&mut self, pan: Point) {
        self.pan_x = pan.x;
        self.pan_y = pan.y;
    }

    /// Back to zoom 1 and no pan.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Merge a sparse update. Zoom is clamped like every other zoom change.
    pub fn apply(&mut self, patch: &ViewportPatch) {
        if let Some(zoom) = patch.zoom {
            self.set_zoom(zoom);
        }
        if let Some(x) = patch.pan_x {
            self.pan_x = x;
        }
        if let Some(y) = patch.pan_y {
            self.pan_y = y;
        }
    }
}
