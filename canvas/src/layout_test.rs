#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::{Opening, OpeningKind};

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn floor_with(template: Template) -> Floor {
    Floor::new("Erdgeschoss".into(), template)
}

fn outline_count(doc: &DocStore, floor: &Floor, template: Template) -> usize {
    doc.walls_on(floor.id)
        .filter(|w| w.outline.is_some_and(|o| o.template == template))
        .count()
}

fn part(doc: &DocStore, floor: &Floor, part: OutlinePart) -> Option<Wall> {
    doc.walls_on(floor.id)
        .find(|w| w.outline.is_some_and(|o| o.part == part))
        .cloned()
}

// =============================================================
// Outline geometry
// =============================================================

#[test]
fn rectangle_outline_is_four_closed_walls() {
    let walls = outline_walls(Template::Rectangle, FloorId::nil());
    assert_eq!(walls.len(), 4);
    assert!(walls.iter().all(Wall::is_template));
    let left = &walls[0];
    assert_eq!((left.start, left.end), (pt(200.0, 150.0), pt(200.0, 450.0)));
    let bottom = &walls[3];
    assert_eq!((bottom.start, bottom.end), (pt(200.0, 450.0), pt(600.0, 450.0)));
}

#[test]
fn house_outline_has_gable() {
    let walls = outline_walls(Template::House, FloorId::nil());
    assert_eq!(walls.len(), 6);
    let roof_left = &walls[4];
    let roof_right = &walls[5];
    assert_eq!((roof_left.start, roof_left.end), (pt(250.0, 200.0), pt(400.0, 150.0)));
    assert_eq!((roof_right.start, roof_right.end), (pt(400.0, 150.0), pt(550.0, 200.0)));
}

#[test]
fn no_outline_for_none_or_custom() {
    assert!(outline_walls(Template::None, FloorId::nil()).is_empty());
    assert!(outline_walls(Template::Custom, FloorId::nil()).is_empty());
}

// =============================================================
// ensure_default_layout
// =============================================================

#[test]
fn ensure_generates_rectangle_once() {
    let floor = floor_with(Template::Rectangle);
    let mut doc = DocStore::new();
    let first = ensure_default_layout(&floor, &mut doc);
    assert_eq!(first.created.len(), 4);
    let second = ensure_default_layout(&floor, &mut doc);
    assert!(second.is_empty());
    assert_eq!(outline_count(&doc, &floor, Template::Rectangle), 4);
}

#[test]
fn ensure_skips_floor_with_background() {
    let mut floor = floor_with(Template::Custom);
    floor.background = Some("data:image/png;base64,AA==".into());
    let mut doc = DocStore::new();
    assert!(ensure_default_layout(&floor, &mut doc).is_empty());
    assert!(doc.is_empty());
}

#[test]
fn ensure_ignores_user_walls() {
    let floor = floor_with(Template::Rectangle);
    let mut doc = DocStore::new();
    doc.insert_wall(Wall::new(pt(0.0, 0.0), pt(10.0, 0.0), floor.id));
    assert_eq!(ensure_default_layout(&floor, &mut doc).created.len(), 4);
    assert_eq!(doc.walls_on(floor.id).count(), 5);
}

#[test]
fn ensure_leaves_other_floors_alone() {
    let a = floor_with(Template::Rectangle);
    let b = floor_with(Template::Rectangle);
    let mut doc = DocStore::new();
    ensure_default_layout(&a, &mut doc);
    let change = ensure_default_layout(&b, &mut doc);
    assert_eq!(change.created.len(), 4);
    assert_eq!(doc.walls_on(a.id).count(), 4);
}

#[test]
fn template_change_adds_outline_and_keeps_openings() {
    let mut floor = floor_with(Template::Rectangle);
    let mut doc = DocStore::new();
    ensure_default_layout(&floor, &mut doc);
    let Some(left) = part(&doc, &floor, OutlinePart::Left) else {
        unreachable!("rectangle outline has a left wall");
    };
    let door = Opening::on_wall(OpeningKind::Door, pt(200.0, 300.0), &left);
    let door_id = door.id;
    doc.insert_opening(door);

    floor.template = Template::House;
    let change = ensure_default_layout(&floor, &mut doc);
    assert_eq!(change.created.len(), 6);
    assert_eq!(outline_count(&doc, &floor, Template::Rectangle), 4);
    assert_eq!(outline_count(&doc, &floor, Template::House), 6);
    assert!(doc.opening(&door_id).is_some());
    assert!(ensure_default_layout(&floor, &mut doc).is_empty());
}

#[test]
fn partially_deleted_outline_is_not_regenerated() {
    let floor = floor_with(Template::Rectangle);
    let mut doc = DocStore::new();
    ensure_default_layout(&floor, &mut doc);
    if let Some(top) = part(&doc, &floor, OutlinePart::Top) {
        doc.remove_wall(&top.id);
    }
    assert!(ensure_default_layout(&floor, &mut doc).is_empty());
    assert_eq!(outline_count(&doc, &floor, Template::Rectangle), 3);
}

// =============================================================
// snap_to_house_outline
// =============================================================

#[test]
fn snap_near_left_edge() {
    assert_eq!(snap_to_house_outline(pt(230.0, 310.0)), pt(250.0, 310.0));
}

#[test]
fn snap_near_bottom_edge_from_outside() {
    assert_eq!(snap_to_house_outline(pt(420.0, 440.0)), pt(420.0, 400.0));
}

#[test]
fn snap_picks_closest_edge() {
    // 20 from the right edge, 30 from the top edge.
    assert_eq!(snap_to_house_outline(pt(530.0, 230.0)), pt(550.0, 230.0));
}

#[test]
fn no_snap_when_far_from_every_edge() {
    assert_eq!(snap_to_house_outline(pt(400.0, 300.0)), pt(400.0, 300.0));
    assert_eq!(snap_to_house_outline(pt(-100.0, -100.0)), pt(-100.0, -100.0));
}

#[test]
fn snap_threshold_is_exclusive() {
    assert_eq!(snap_to_house_outline(pt(200.0, 300.0)), pt(200.0, 300.0));
}
