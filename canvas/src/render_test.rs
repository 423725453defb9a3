#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::CameraKind;
use crate::input::{Button, Modifiers};
use crate::viewport::ViewportPatch;

// =============================================================
// Helpers
// =============================================================

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn bare_core() -> EngineCore {
    let mut core = EngineCore::new("Erdgeschoss");
    let ids: Vec<_> = core.doc.walls_on(core.active_floor_id()).map(|w| w.id).collect();
    for id in ids {
        core.doc.remove_wall(&id);
    }
    core
}

fn click(core: &mut EngineCore, x: f64, y: f64) {
    core.on_pointer_down(pt(x, y), Button::Primary, Modifiers::default());
    core.on_pointer_up(pt(x, y), Button::Primary, Modifiers::default());
}

fn lines(scene: &Scene) -> Vec<(Point, Point, Stroke)> {
    scene
        .shapes
        .iter()
        .filter_map(|s| match s {
            Shape::Line { from, to, stroke } => Some((*from, *to, *stroke)),
            _ => None,
        })
        .collect()
}

fn texts(scene: &Scene) -> Vec<(&str, bool)> {
    scene
        .shapes
        .iter()
        .filter_map(|s| match s {
            Shape::Text { text, editing, .. } => Some((text.as_str(), *editing)),
            _ => None,
        })
        .collect()
}

fn handles(scene: &Scene) -> usize {
    scene
        .shapes
        .iter()
        .filter(|s| matches!(s, Shape::Circle { fill: Some(SELECTED_COLOR), .. }))
        .count()
}

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

// =============================================================
// Walls
// =============================================================

#[test]
fn outline_walls_render_dashed_and_neutral() {
    let core = EngineCore::new("Erdgeschoss");
    let scene = build_scene(&core);
    let walls = lines(&scene);
    assert_eq!(walls.len(), 4);
    for (_, _, stroke) in walls {
        assert_eq!(stroke, Stroke::dashed(TEMPLATE_WALL_COLOR, 2.0, [5.0, 5.0]));
    }
}

#[test]
fn drawn_wall_is_solid_and_highlights_when_selected() {
    let mut core = bare_core();
    core.set_tool(Tool::Wall);
    core.on_pointer_down(pt(0.0, 0.0), Button::Primary, Modifiers::default());
    core.on_pointer_up(pt(200.0, 0.0), Button::Primary, Modifiers::default());
    assert_eq!(lines(&build_scene(&core))[0].2, Stroke::solid(WALL_COLOR, 4.0));

    core.set_tool(Tool::Select);
    click(&mut core, 100.0, 5.0);
    let scene = build_scene(&core);
    assert_eq!(lines(&scene)[0].2, Stroke::solid(SELECTED_COLOR, 4.0));
    assert_eq!(handles(&scene), 2);
}

#[test]
fn walls_follow_viewport() {
    let mut core = bare_core();
    let id = core.active_floor_id();
    assert!(core.update_viewport(&id, &ViewportPatch { zoom: Some(2.0), pan_x: Some(10.0), pan_y: Some(20.0) }).is_ok());
    core.doc.insert_wall(Wall::new(pt(0.0, 0.0), pt(100.0, 50.0), id));
    let scene = build_scene(&core);
    let (from, to, _) = lines(&scene)[0];
    assert_eq!(from, pt(10.0, 20.0));
    assert_eq!(to, pt(210.0, 120.0));
    assert_eq!(scene.viewport.zoom, 2.0);
}

// =============================================================
// Openings
// =============================================================

#[test]
fn door_on_vertical_wall_is_rotated() {
    let mut core = EngineCore::new("Erdgeschoss");
    core.set_tool(Tool::Door);
    click(&mut core, 210.0, 300.0);
    let scene = build_scene(&core);
    let (from, to, stroke) = lines(&scene)[4];
    assert_eq!(stroke.color, DOOR_COLOR);
    assert!(close(from, pt(200.0, 285.0)), "{from:?}");
    assert!(close(to, pt(200.0, 315.0)), "{to:?}");
    assert!(scene.shapes.iter().any(|s| matches!(s, Shape::Arc { radius, .. } if *radius == 15.0)));
    assert!(texts(&scene).contains(&("T", false)));
}

#[test]
fn window_has_frame_ticks_and_letter() {
    let mut core = bare_core();
    let id = core.active_floor_id();
    core.doc.insert_wall(Wall::new(pt(0.0, 0.0), pt(200.0, 0.0), id));
    core.set_tool(Tool::Window);
    click(&mut core, 100.0, 5.0);
    let scene = build_scene(&core);
    let window: Vec<_> = lines(&scene).into_iter().filter(|(_, _, s)| s.color == WINDOW_COLOR).collect();
    assert_eq!(window.len(), 3);
    assert!(close(window[0].0, pt(88.0, 0.0)));
    assert!(close(window[0].1, pt(112.0, 0.0)));
    assert!(texts(&scene).contains(&("F", false)));
}

// =============================================================
// Rooms / cameras
// =============================================================

#[test]
fn selected_room_gets_corner_handles() {
    let mut core = bare_core();
    core.set_tool(Tool::Room);
    core.on_pointer_down(pt(100.0, 100.0), Button::Primary, Modifiers::default());
    core.on_pointer_up(pt(300.0, 200.0), Button::Primary, Modifiers::default());
    assert_eq!(handles(&build_scene(&core)), 0);

    core.set_tool(Tool::Select);
    click(&mut core, 200.0, 150.0);
    let scene = build_scene(&core);
    assert_eq!(handles(&scene), 4);
    assert!(scene.shapes.iter().any(|s| matches!(
        s,
        Shape::Rect { x, y, width, height, stroke, .. }
            if (*x, *y, *width, *height) == (100.0, 100.0, 200.0, 100.0) && stroke.color == SELECTED_COLOR
    )));
    assert!(texts(&scene).contains(&("Raum 1", false)));
}

#[test]
fn camera_marker_scales_with_zoom() {
    let mut core = bare_core();
    core.on_drop(pt(100.0, 100.0), CameraKind::Dome);
    core.zoom_in();
    let scene = build_scene(&core);
    let radius = scene.shapes.iter().find_map(|s| match s {
        Shape::Circle { radius, fill: Some(CAMERA_FILL), .. } => Some(*radius),
        _ => None,
    });
    assert!(radius.is_some_and(|r| (r - 24.0).abs() < 1e-9));
    assert!(texts(&scene).contains(&("Dome 1", false)));
}

#[test]
fn selected_camera_shows_ring_and_resize_handle() {
    let mut core = bare_core();
    core.on_drop(pt(100.0, 100.0), CameraKind::Ptz);
    click(&mut core, 100.0, 100.0);
    let scene = build_scene(&core);
    assert!(scene.shapes.iter().any(|s| matches!(
        s,
        Shape::Circle { fill: Some(CAMERA_FILL), stroke: Some(ring), .. } if ring.color == SELECTED_COLOR
    )));
    assert!(scene.shapes.iter().any(|s| matches!(
        s,
        Shape::Circle { center, fill: Some(SELECTED_COLOR), .. } if *center == pt(120.0, 120.0)
    )));
}

#[test]
fn rename_buffer_replaces_label() {
    let mut core = bare_core();
    core.on_drop(pt(100.0, 100.0), CameraKind::Bullet);
    core.click_label(pt(100.0, 130.0));
    core.edit_rename("Einfahrt");
    let scene = build_scene(&core);
    assert!(texts(&scene).contains(&("Einfahrt", true)));
    assert!(!texts(&scene).iter().any(|(t, _)| *t == "Bullet 1"));
}

// =============================================================
// Preview / background
// =============================================================

#[test]
fn wall_preview_is_straightened() {
    let mut core = bare_core();
    core.set_tool(Tool::Wall);
    core.on_pointer_down(pt(0.0, 0.0), Button::Primary, Modifiers::default());
    core.on_pointer_move(pt(100.0, 8.0), Modifiers::default());
    let scene = build_scene(&core);
    let (from, to, stroke) = lines(&scene)[0];
    assert_eq!((from, to), (pt(0.0, 0.0), pt(100.0, 0.0)));
    assert_eq!(stroke.color, PREVIEW_COLOR);
}

#[test]
fn room_preview_is_normalized() {
    let mut core = bare_core();
    core.set_tool(Tool::Room);
    core.on_pointer_down(pt(200.0, 200.0), Button::Primary, Modifiers::default());
    core.on_pointer_move(pt(100.0, 150.0), Modifiers::default());
    let scene = build_scene(&core);
    assert_eq!(
        scene.shapes,
        vec![Shape::Rect {
            x: 100.0,
            y: 150.0,
            width: 100.0,
            height: 50.0,
            fill: None,
            stroke: Stroke::dashed(PREVIEW_COLOR, 2.0, [5.0, 3.0]),
        }]
    );
}

#[test]
fn background_is_passed_through() {
    let mut core = EngineCore::new("Erdgeschoss");
    core.set_background("data:image/png;base64,AA==".into());
    let scene = build_scene(&core);
    assert_eq!(scene.background.as_deref(), Some("data:image/png;base64,AA=="));
    assert_eq!(scene.floor, core.active_floor_id());
}

#[test]
fn other_floors_are_not_drawn() {
    let mut core = bare_core();
    core.on_drop(pt(100.0, 100.0), CameraKind::Dome);
    core.add_floor(None);
    let scene = build_scene(&core);
    assert!(!scene.shapes.iter().any(|s| matches!(s, Shape::Circle { .. })));
}

#[test]
fn scene_serializes_with_shape_tags() {
    let core = EngineCore::new("Erdgeschoss");
    let json = serde_json::to_value(build_scene(&core)).unwrap_or_default();
    assert_eq!(json["shapes"][0]["shape"], "line");
    assert_eq!(json["shapes"][0]["stroke"]["dash"][0], 5.0);
    assert!(json.get("background").is_none());
}
