//! Default floor layouts: generated outline walls and outline snapping.
//!
//! A floor without a background image gets a fixed outline derived from its
//! template. [`ensure_default_layout`] is the single entry point; it is safe to
//! call any number of times and only emits walls when the floor has none for
//! its current template.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use tracing::debug;

use crate::consts::{
    HOUSE_OUTLINE_HEIGHT, HOUSE_OUTLINE_WIDTH, HOUSE_ROOF_HEIGHT, OUTLINE_CENTER_X, OUTLINE_CENTER_Y,
    OUTLINE_SNAP_DISTANCE, RECT_OUTLINE_HEIGHT, RECT_OUTLINE_WIDTH,
};
use crate::doc::{DocStore, FloorId, Outline, OutlinePart, Wall};
use crate::floor::{Floor, Template};
use crate::geom::Rect;
use crate::viewport::Point;

/// What a layout reconciliation changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutChange {
    /// Outline walls that were generated.
    pub created: Vec<Wall>,
}

impl LayoutChange {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
    }
}

/// Centred rectangle of the given size around the outline centre.
fn centred(width: f64, height: f64) -> Rect {
    Rect {
        x: OUTLINE_CENTER_X - width / 2.0,
        y: OUTLINE_CENTER_Y - height / 2.0,
        width,
        height,
    }
}

/// Body of the house outline; also the snapping target for outdoor floors.
#[must_use]
pub fn house_bounds() -> Rect {
    centred(HOUSE_OUTLINE_WIDTH, HOUSE_OUTLINE_HEIGHT)
}

/// Bounds of the rectangle outline.
#[must_use]
pub fn rectangle_bounds() -> Rect {
    centred(RECT_OUTLINE_WIDTH, RECT_OUTLINE_HEIGHT)
}

/// The four sides of `r` as outline walls.
fn box_walls(r: Rect, floor_id: FloorId, template: Template) -> Vec<Wall> {
    let (left, right) = (r.x, r.x + r.width);
    let (top, bottom) = (r.y, r.y + r.height);
    let side = |part, a: Point, b: Point| Wall::generated(a, b, floor_id, Outline { template, part });
    vec![
        side(OutlinePart::Left, Point::new(left, top), Point::new(left, bottom)),
        side(OutlinePart::Right, Point::new(right, top), Point::new(right, bottom)),
        side(OutlinePart::Top, Point::new(left, top), Point::new(right, top)),
        side(OutlinePart::Bottom, Point::new(left, bottom), Point::new(right, bottom)),
    ]
}

/// Fresh outline walls for `template`. Empty for templates without an outline.
#[must_use]
pub fn outline_walls(template: Template, floor_id: FloorId) -> Vec<Wall> {
    match template {
        Template::Rectangle => box_walls(rectangle_bounds(), floor_id, template),
        Template::House => {
            let body = house_bounds();
            let mut walls = box_walls(body, floor_id, template);
            let eave_left = Point::new(body.x, body.y);
            let eave_right = Point::new(body.x + body.width, body.y);
            let peak = Point::new(OUTLINE_CENTER_X, body.y - HOUSE_ROOF_HEIGHT);
            let outline = |part| Outline { template, part };
            walls.push(Wall::generated(eave_left, peak, floor_id, outline(OutlinePart::RoofLeft)));
            walls.push(Wall::generated(peak, eave_right, floor_id, outline(OutlinePart::RoofRight)));
            walls
        }
        Template::None | Template::Custom => Vec::new(),
    }
}

/// Make `floor`'s generated outline match its template.
///
/// Floors with a background image are left alone. Walls are only ever added:
/// the outline is emitted when no wall on the floor carries the current
/// template, so repeated calls are no-ops. Walls from an earlier template stay,
/// along with any doors and windows placed on them.
pub fn ensure_default_layout(floor: &Floor, doc: &mut DocStore) -> LayoutChange {
    let mut change = LayoutChange::default();
    if floor.background.is_some() {
        return change;
    }

    let has_outline = doc
        .walls_on(floor.id)
        .any(|w| w.outline.is_some_and(|o| o.template == floor.template));
    if !has_outline {
        for wall in outline_walls(floor.template, floor.id) {
            change.created.push(wall.clone());
            doc.insert_wall(wall);
        }
    }

    if !change.is_empty() {
        debug!(
            floor = %floor.id,
            template = ?floor.template,
            created = change.created.len(),
            "default layout reconciled"
        );
    }
    change
}

/// Snap a point onto the nearest edge of the house outline.
///
/// Edges are tried left, right, top, bottom; the first with the smallest
/// distance wins. Only the coordinate across that edge changes, and only when
/// the distance is under [`OUTLINE_SNAP_DISTANCE`].
#[must_use]
pub fn snap_to_house_outline(p: Point) -> Point {
    let body = house_bounds();
    let (left, right) = (body.x, body.x + body.width);
    let (top, bottom) = (body.y, body.y + body.height);
    let candidates = [
        (Point::new(left, p.y), (p.x - left).abs()),
        (Point::new(right, p.y), (p.x - right).abs()),
        (Point::new(p.x, top), (p.y - top).abs()),
        (Point::new(p.x, bottom), (p.y - bottom).abs()),
    ];
    let mut nearest = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.1 < nearest.1 {
            nearest = *candidate;
        }
    }
    if nearest.1 < OUTLINE_SNAP_DISTANCE { nearest.0 } else { p }
}
