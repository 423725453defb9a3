//! Pure geometry helpers on floor-space points.
//!
//! Every function here is total: degenerate input (zero-length segments,
//! inverted rectangles) yields a defined result rather than an error.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

use crate::consts::STRAIGHTEN_TOLERANCE;
use crate::viewport::Point;

/// Projection parameter of `p` onto segment `a`-`b`, clamped to [0, 1].
/// `None` for a zero-length segment.
fn projection(p: Point, a: Point, b: Point) -> Option<f64> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return None;
    }
    let t = ((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq;
    Some(t.clamp(0.0, 1.0))
}

/// Closest point to `p` on segment `a`-`b`. Returns `a` when `a == b`.
#[must_use]
pub fn closest_point_on_segment(p: Point, a: Point, b: Point) -> Point {
    match projection(p, a, b) {
        Some(t) => Point::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y)),
        None => a,
    }
}

/// Distance from `p` to segment `a`-`b`. Degenerates to point distance when `a == b`.
#[must_use]
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    p.distance(closest_point_on_segment(p, a, b))
}

/// Direction of the segment from `a` to `b` in radians.
#[must_use]
pub fn segment_angle(a: Point, b: Point) -> f64 {
    (b.y - a.y).atan2(b.x - a.x)
}

#[must_use]
pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Snap a freshly drawn segment onto the horizontal or vertical axis.
///
/// A mostly-horizontal drag (`|dx| >= |dy|`) whose vertical deviation is under
/// the tolerance keeps the start y; a mostly-vertical drag keeps the start x.
/// Anything else returns `end` unchanged.
#[must_use]
pub fn straighten(start: Point, end: Point) -> Point {
    let dx = (end.x - start.x).abs();
    let dy = (end.y - start.y).abs();
    if dx >= dy {
        if dy < STRAIGHTEN_TOLERANCE {
            return Point::new(end.x, start.y);
        }
    } else if dx < STRAIGHTEN_TOLERANCE {
        return Point::new(start.x, end.y);
    }
    end
}

/// Axis-aligned rectangle in floor space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

/// Rectangle spanned by two arbitrary corners, with non-negative size.
#[must_use]
pub fn normalized_rect(a: Point, b: Point) -> Rect {
    Rect {
        x: a.x.min(b.x),
        y: a.y.min(b.y),
        width: (b.x - a.x).abs(),
        height: (b.y - a.y).abs(),
    }
}

/// A rectangle corner, used for resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Corner {
    Nw,
    Ne,
    Sw,
    Se,
}

impl Corner {
    /// Hit-test order for handles.
    pub const ALL: [Corner; 4] = [Corner::Nw, Corner::Ne, Corner::Sw, Corner::Se];

    fn is_west(self) -> bool {
        matches!(self, Self::Nw | Self::Sw)
    }

    fn is_north(self) -> bool {
        matches!(self, Self::Nw | Self::Ne)
    }

    /// Position of this corner on `r`.
    #[must_use]
    pub fn of(self, r: &Rect) -> Point {
        let x = if self.is_west() { r.x } else { r.x + r.width };
        let y = if self.is_north() { r.y } else { r.y + r.height };
        Point::new(x, y)
    }
}

/// Drag `corner` of `r` to `p`, keeping the opposite corner fixed.
///
/// Width and height never drop below `min`; when clamped, the dragged side
/// stops at `min` from the fixed side.
#[must_use]
pub fn resize_from_corner(r: &Rect, corner: Corner, p: Point, min: f64) -> Rect {
    let (x, width) = if corner.is_west() {
        let right = r.x + r.width;
        let width = (right - p.x).max(min);
        (right - width, width)
    } else {
        (r.x, (p.x - r.x).max(min))
    };
    let (y, height) = if corner.is_north() {
        let bottom = r.y + r.height;
        let height = (bottom - p.y).max(min);
        (bottom - height, height)
    } else {
        (r.y, (p.y - r.y).max(min))
    };
    Rect { x, y, width, height }
}
