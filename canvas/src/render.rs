//! Scene building: the active floor as a flat list of screen-space shapes.
//!
//! This module turns engine state into a serialisable [`Scene`] for whatever
//! surface the host draws on. It reads [`EngineCore`] and never mutates it.
//! Shapes are listed bottom first; the host paints them in order.
//!
//! Geometry is converted from floor space with the active viewport. Stroke
//! widths, handle radii, font sizes and label offsets are screen pixels and
//! do not scale with zoom, except the camera marker and its glyph.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::PI;

use serde::Serialize;

use crate::doc::{Camera, FloorId, Opening, OpeningKind, Room, Wall};
use crate::engine::EngineCore;
use crate::geom::{Corner, normalized_rect, straighten};
use crate::input::{RenameTarget, Selection, Tool};
use crate::viewport::{Point, Viewport};

const WALL_COLOR: &str = "#374151";
const TEMPLATE_WALL_COLOR: &str = "#9CA3AF";
const SELECTED_COLOR: &str = "#3B82F6";
const HANDLE_OUTLINE_COLOR: &str = "#FFFFFF";
const DOOR_COLOR: &str = "#F59E0B";
const DOOR_LABEL_COLOR: &str = "#D97706";
const WINDOW_COLOR: &str = "#3B82F6";
const WINDOW_LABEL_COLOR: &str = "#2563EB";
const ROOM_BORDER_COLOR: &str = "#9CA3AF";
const ROOM_FILL: &str = "rgba(249, 250, 251, 0.3)";
const ROOM_LABEL_COLOR: &str = "#374151";
const CAMERA_FILL: &str = "#1F2937";
const CAMERA_GLYPH_COLOR: &str = "#FFFFFF";
const CAMERA_LABEL_COLOR: &str = "#1F2937";
const PREVIEW_COLOR: &str = "#6B7280";

const WALL_WIDTH_PX: f64 = 4.0;
const TEMPLATE_WALL_WIDTH_PX: f64 = 2.0;
const TEMPLATE_WALL_DASH: [f64; 2] = [5.0, 5.0];
const WALL_HANDLE_RADIUS_PX: f64 = 6.0;

/// Half the door leaf, in floor units.
const DOOR_HALF_WIDTH: f64 = 15.0;
/// Half the window frame, in floor units.
const WINDOW_HALF_WIDTH: f64 = 12.0;
/// Offset and length of the two window sill ticks, in floor units.
const WINDOW_TICK: f64 = 8.0;
/// Door/window letters sit this far above the anchor.
const OPENING_LABEL_OFFSET_PX: f64 = 20.0;

const ROOM_DASH: [f64; 2] = [6.0, 3.0];
const ROOM_HANDLE_RADIUS_PX: f64 = 4.0;

/// Gap between a camera marker and its name label.
const CAMERA_LABEL_GAP_PX: f64 = 4.0;
/// Glyph size relative to the on-screen marker size.
const CAMERA_GLYPH_RATIO: f64 = 0.4;
const CAMERA_HANDLE_RADIUS_PX: f64 = 6.0;

const LABEL_FONT_PX: f64 = 12.0;
const ROOM_LABEL_FONT_PX: f64 = 14.0;

/// Line style. `dash` is an on/off pattern in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: &'static str,
    pub width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<[f64; 2]>,
}

impl Stroke {
    #[must_use]
    pub fn solid(color: &'static str, width: f64) -> Self {
        Self { color, width, dash: None }
    }

    #[must_use]
    pub fn dashed(color: &'static str, width: f64, dash: [f64; 2]) -> Self {
        Self { color, width, dash: Some(dash) }
    }
}

/// How a text label is positioned relative to `at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    /// Centred on both axes.
    Center,
    /// Centred horizontally, top edge at `at`.
    Top,
}

/// One drawable primitive in screen space.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    /// Circular arc, angles in radians, swept clockwise on screen.
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        stroke: Stroke,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        fill: Option<&'static str>,
        stroke: Stroke,
    },
    Circle {
        center: Point,
        radius: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        fill: Option<&'static str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        stroke: Option<Stroke>,
    },
    Text {
        at: Point,
        text: String,
        color: &'static str,
        size: f64,
        anchor: TextAnchor,
        /// The label is an open inline rename and `text` is the edit buffer.
        editing: bool,
    },
}

/// Everything needed to draw the active floor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub floor: FloorId,
    pub viewport: Viewport,
    /// Background image data URL, drawn under everything at the viewport transform.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    pub shapes: Vec<Shape>,
}

/// Build the scene for the active floor.
#[must_use]
pub fn build_scene(core: &EngineCore) -> Scene {
    let floor = core.active_floor();
    let view = floor.viewport;
    let selection = core.selection();
    let mut shapes = Vec::new();

    // Layer 1: walls, then the selected wall's endpoint handles on top of all walls.
    for wall in core.doc.walls_on(floor.id) {
        push_wall(&mut shapes, &view, wall, selection == Some(Selection::Wall(wall.id)));
    }
    if let Some(Selection::Wall(id)) = selection
        && let Some(wall) = core.doc.wall(&id)
    {
        for end in [wall.start, wall.end] {
            shapes.push(handle(view.floor_to_screen(end), WALL_HANDLE_RADIUS_PX, true));
        }
    }

    // Layer 2: openings.
    for door in core.doc.openings_on(floor.id, OpeningKind::Door) {
        push_door(&mut shapes, &view, door);
    }
    for window in core.doc.openings_on(floor.id, OpeningKind::Window) {
        push_window(&mut shapes, &view, window);
    }

    // Layer 3: rooms.
    for room in core.doc.rooms_on(floor.id) {
        let (text, editing) = label_text(core, RenameTarget::Room(room.id), &room.name);
        push_room(&mut shapes, &view, room, selection == Some(Selection::Room(room.id)), text, editing);
    }

    // Layer 4: cameras.
    for camera in core.doc.cameras_on(floor.id) {
        let (text, editing) = label_text(core, RenameTarget::Camera(camera.id), &camera.name);
        push_camera(&mut shapes, &view, camera, selection == Some(Selection::Camera(camera.id)), text, editing);
    }

    // Layer 5: live draw preview.
    push_preview(&mut shapes, &view, core);

    Scene { floor: floor.id, viewport: view, background: floor.background.clone(), shapes }
}

/// The label to show: the rename buffer while that entity is being renamed.
fn label_text(core: &EngineCore, target: RenameTarget, name: &str) -> (String, bool) {
    match core.rename() {
        Some(rename) if rename.target == target => (rename.buffer.clone(), true),
        _ => (name.to_owned(), false),
    }
}

// =============================================================
// Entity shapes
// =============================================================

fn push_wall(shapes: &mut Vec<Shape>, view: &Viewport, wall: &Wall, selected: bool) {
    let stroke = if wall.is_template() {
        Stroke::dashed(TEMPLATE_WALL_COLOR, TEMPLATE_WALL_WIDTH_PX, TEMPLATE_WALL_DASH)
    } else if selected {
        Stroke::solid(SELECTED_COLOR, WALL_WIDTH_PX)
    } else {
        Stroke::solid(WALL_COLOR, WALL_WIDTH_PX)
    };
    shapes.push(Shape::Line { from: view.floor_to_screen(wall.start), to: view.floor_to_screen(wall.end), stroke });
}

fn push_door(shapes: &mut Vec<Shape>, view: &Viewport, door: &Opening) {
    let center = door.position();
    let at = |dx: f64, dy: f64| view.floor_to_screen(rotate(center, dx, dy, door.angle));

    shapes.push(Shape::Line {
        from: at(-DOOR_HALF_WIDTH, 0.0),
        to: at(DOOR_HALF_WIDTH, 0.0),
        stroke: Stroke::solid(DOOR_COLOR, 3.0),
    });
    // Swing: from the hinge-side end of the leaf a quarter turn towards the wall normal.
    shapes.push(Shape::Arc {
        center: view.floor_to_screen(center),
        radius: view.floor_dist_to_screen(DOOR_HALF_WIDTH),
        start_angle: door.angle + PI,
        end_angle: door.angle + 1.5 * PI,
        stroke: Stroke::dashed(DOOR_COLOR, 1.0, [3.0, 2.0]),
    });
    push_opening_label(shapes, view, center, "T", DOOR_LABEL_COLOR);
}

fn push_window(shapes: &mut Vec<Shape>, view: &Viewport, window: &Opening) {
    let center = window.position();
    let at = |dx: f64, dy: f64| view.floor_to_screen(rotate(center, dx, dy, window.angle));

    shapes.push(Shape::Line {
        from: at(-WINDOW_HALF_WIDTH, 0.0),
        to: at(WINDOW_HALF_WIDTH, 0.0),
        stroke: Stroke::solid(WINDOW_COLOR, 2.0),
    });
    for dx in [-WINDOW_TICK, WINDOW_TICK] {
        shapes.push(Shape::Line {
            from: at(dx, 0.0),
            to: at(dx, -WINDOW_TICK),
            stroke: Stroke::dashed(WINDOW_COLOR, 1.0, [2.0, 1.0]),
        });
    }
    push_opening_label(shapes, view, center, "F", WINDOW_LABEL_COLOR);
}

fn push_opening_label(shapes: &mut Vec<Shape>, view: &Viewport, center: Point, letter: &str, color: &'static str) {
    let anchor = view.floor_to_screen(center);
    shapes.push(Shape::Text {
        at: Point::new(anchor.x, anchor.y - OPENING_LABEL_OFFSET_PX),
        text: letter.to_owned(),
        color,
        size: LABEL_FONT_PX,
        anchor: TextAnchor::Top,
        editing: false,
    });
}

fn push_room(shapes: &mut Vec<Shape>, view: &Viewport, room: &Room, selected: bool, text: String, editing: bool) {
    let rect = room.rect();
    let origin = view.floor_to_screen(room.origin());
    let width = view.floor_dist_to_screen(rect.width);
    let height = view.floor_dist_to_screen(rect.height);
    let border = if selected { SELECTED_COLOR } else { ROOM_BORDER_COLOR };

    shapes.push(Shape::Rect {
        x: origin.x,
        y: origin.y,
        width,
        height,
        fill: Some(ROOM_FILL),
        stroke: Stroke::dashed(border, 2.0, ROOM_DASH),
    });
    shapes.push(Shape::Text {
        at: Point::new(origin.x + width / 2.0, origin.y + height / 2.0),
        text,
        color: ROOM_LABEL_COLOR,
        size: ROOM_LABEL_FONT_PX,
        anchor: TextAnchor::Center,
        editing,
    });
    if selected {
        for corner in Corner::ALL {
            shapes.push(handle(view.floor_to_screen(corner.of(&rect)), ROOM_HANDLE_RADIUS_PX, false));
        }
    }
}

fn push_camera(shapes: &mut Vec<Shape>, view: &Viewport, camera: &Camera, selected: bool, text: String, editing: bool) {
    let center = view.floor_to_screen(camera.position());
    let size = view.floor_dist_to_screen(camera.size);
    let half = size / 2.0;

    shapes.push(Shape::Circle {
        center,
        radius: half,
        fill: Some(CAMERA_FILL),
        stroke: selected.then(|| Stroke::solid(SELECTED_COLOR, 2.0)),
    });
    shapes.push(Shape::Text {
        at: center,
        text: camera.kind.glyph().to_owned(),
        color: CAMERA_GLYPH_COLOR,
        size: size * CAMERA_GLYPH_RATIO,
        anchor: TextAnchor::Center,
        editing: false,
    });
    shapes.push(Shape::Text {
        at: Point::new(center.x, center.y + half + CAMERA_LABEL_GAP_PX),
        text,
        color: CAMERA_LABEL_COLOR,
        size: LABEL_FONT_PX,
        anchor: TextAnchor::Top,
        editing,
    });
    if selected {
        shapes.push(handle(Point::new(center.x + half, center.y + half), CAMERA_HANDLE_RADIUS_PX, false));
    }
}

fn push_preview(shapes: &mut Vec<Shape>, view: &Viewport, core: &EngineCore) {
    match core.input.preview() {
        Some((Tool::Wall, anchor, current)) => shapes.push(Shape::Line {
            from: view.floor_to_screen(anchor),
            to: view.floor_to_screen(straighten(anchor, current)),
            stroke: Stroke::dashed(PREVIEW_COLOR, 4.0, [8.0, 4.0]),
        }),
        Some((Tool::Room, anchor, current)) => {
            let rect = normalized_rect(anchor, current);
            let origin = view.floor_to_screen(Point::new(rect.x, rect.y));
            shapes.push(Shape::Rect {
                x: origin.x,
                y: origin.y,
                width: view.floor_dist_to_screen(rect.width),
                height: view.floor_dist_to_screen(rect.height),
                fill: None,
                stroke: Stroke::dashed(PREVIEW_COLOR, 2.0, [5.0, 3.0]),
            });
        }
        _ => {}
    }
}

// =============================================================
// Helpers
// =============================================================

/// A filled selection handle, optionally with a white outline.
fn handle(center: Point, radius: f64, outlined: bool) -> Shape {
    Shape::Circle {
        center,
        radius,
        fill: Some(SELECTED_COLOR),
        stroke: outlined.then(|| Stroke::solid(HANDLE_OUTLINE_COLOR, 2.0)),
    }
}

/// `center + (dx, dy)` rotated by `angle` around `center`.
fn rotate(center: Point, dx: f64, dy: f64, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    Point::new(center.x + dx * cos - dy * sin, center.y + dx * sin + dy * cos)
}
