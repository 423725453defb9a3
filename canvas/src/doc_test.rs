#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Helpers
// =============================================================

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn camera_on(floor_id: FloorId, x: f64, y: f64) -> Camera {
    Camera::new(CameraKind::Dome, "Dome 1".into(), pt(x, y), floor_id)
}

fn room_on(floor_id: FloorId) -> Room {
    Room::new("Raum 1".into(), Rect { x: 0.0, y: 0.0, width: 100.0, height: 80.0 }, floor_id)
}

// =============================================================
// CameraKind
// =============================================================

#[test]
fn camera_kind_parses_case_insensitively() {
    assert_eq!("dome".parse::<CameraKind>(), Ok(CameraKind::Dome));
    assert_eq!("BULLET".parse::<CameraKind>(), Ok(CameraKind::Bullet));
    assert_eq!("Ptz".parse::<CameraKind>(), Ok(CameraKind::Ptz));
}

#[test]
fn camera_kind_rejects_unknown() {
    let err = "fisheye".parse::<CameraKind>();
    assert_eq!(err, Err(ParseCameraKindError("fisheye".into())));
}

#[test]
fn camera_kind_display_round_trips_through_parse() {
    for kind in CameraKind::ALL {
        assert_eq!(kind.to_string().parse::<CameraKind>(), Ok(kind));
    }
}

#[test]
fn camera_kind_serializes_lowercase() {
    let json = serde_json::to_value(CameraKind::Ptz).unwrap_or_default();
    assert_eq!(json, serde_json::json!("ptz"));
}

// =============================================================
// Camera
// =============================================================

#[test]
fn camera_new_uses_default_size() {
    let cam = camera_on(Uuid::new_v4(), 10.0, 20.0);
    assert_eq!(cam.size, 40.0);
    assert_eq!(cam.position(), pt(10.0, 20.0));
}

#[test]
fn camera_contains_is_half_size_box() {
    let cam = camera_on(Uuid::new_v4(), 100.0, 100.0);
    assert!(cam.contains(pt(119.0, 81.0)));
    assert!(!cam.contains(pt(120.0, 100.0)));
}

// =============================================================
// Wall
// =============================================================

#[test]
fn user_wall_is_not_template() {
    let wall = Wall::new(pt(0.0, 0.0), pt(10.0, 0.0), Uuid::new_v4());
    assert!(!wall.is_template());
}

#[test]
fn generated_wall_is_template() {
    let outline = Outline { template: Template::Rectangle, part: OutlinePart::Left };
    let wall = Wall::generated(pt(0.0, 0.0), pt(0.0, 10.0), Uuid::new_v4(), outline);
    assert!(wall.is_template());
    assert_eq!(wall.outline, Some(outline));
}

#[test]
fn wall_geometry_helpers() {
    let wall = Wall::new(pt(0.0, 0.0), pt(10.0, 0.0), Uuid::new_v4());
    assert_eq!(wall.midpoint(), pt(5.0, 0.0));
    assert_eq!(wall.angle(), 0.0);
    assert_eq!(wall.distance_to(pt(5.0, 4.0)), 4.0);
    assert_eq!(wall.closest_point(pt(5.0, 4.0)), pt(5.0, 0.0));
}

#[test]
fn opening_takes_wall_angle_and_ids() {
    let wall = Wall::new(pt(0.0, 0.0), pt(0.0, 10.0), Uuid::new_v4());
    let door = Opening::on_wall(OpeningKind::Door, pt(0.0, 5.0), &wall);
    assert_eq!(door.wall_id, wall.id);
    assert_eq!(door.floor_id, wall.floor_id);
    assert_eq!(door.angle, wall.angle());
}

// =============================================================
// DocStore: cameras
// =============================================================

#[test]
fn store_starts_empty() {
    let store = DocStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
}

#[test]
fn update_camera_merges_patch() {
    let mut store = DocStore::new();
    let cam = camera_on(Uuid::new_v4(), 0.0, 0.0);
    let id = cam.id;
    store.insert_camera(cam);

    assert!(store.update_camera(&id, &CameraPatch { x: Some(7.0), ..Default::default() }));
    let cam = store.camera(&id).cloned().unwrap_or_else(|| camera_on(Uuid::nil(), -1.0, -1.0));
    assert_eq!(cam.x, 7.0);
    assert_eq!(cam.y, 0.0);
    assert_eq!(cam.name, "Dome 1");
}

#[test]
fn update_missing_camera_returns_false() {
    let mut store = DocStore::new();
    assert!(!store.update_camera(&Uuid::new_v4(), &CameraPatch::name("x".into())));
}

#[test]
fn remove_missing_camera_is_noop() {
    let mut store = DocStore::new();
    store.insert_camera(camera_on(Uuid::new_v4(), 0.0, 0.0));
    assert!(store.remove_camera(&Uuid::new_v4()).is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn cameras_on_filters_by_floor() {
    let mut store = DocStore::new();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    store.insert_camera(camera_on(a, 0.0, 0.0));
    store.insert_camera(camera_on(b, 0.0, 0.0));
    store.insert_camera(camera_on(a, 5.0, 5.0));
    assert_eq!(store.cameras_on(a).count(), 2);
    assert_eq!(store.cameras_on(b).count(), 1);
    assert_eq!(store.cameras().count(), 3);
}

// =============================================================
// DocStore: wall cascade
// =============================================================

#[test]
fn remove_wall_cascades_to_its_openings_only() {
    let mut store = DocStore::new();
    let floor = Uuid::new_v4();
    let wall_a = Wall::new(pt(0.0, 0.0), pt(100.0, 0.0), floor);
    let wall_b = Wall::new(pt(0.0, 50.0), pt(100.0, 50.0), floor);
    let door_a = Opening::on_wall(OpeningKind::Door, pt(10.0, 0.0), &wall_a);
    let window_a = Opening::on_wall(OpeningKind::Window, pt(60.0, 0.0), &wall_a);
    let door_b = Opening::on_wall(OpeningKind::Door, pt(10.0, 50.0), &wall_b);
    let (wall_a_id, door_a_id, window_a_id, door_b_id) = (wall_a.id, door_a.id, window_a.id, door_b.id);
    store.insert_wall(wall_a);
    store.insert_wall(wall_b);
    store.insert_opening(door_a);
    store.insert_opening(window_a);
    store.insert_opening(door_b);

    let removed = store.remove_wall(&wall_a_id);
    let Some((wall, orphans)) = removed else {
        unreachable!("wall should have been removed");
    };
    assert_eq!(wall.id, wall_a_id);
    assert_eq!(orphans, vec![door_a_id, window_a_id]);
    assert!(store.opening(&door_a_id).is_none());
    assert!(store.opening(&window_a_id).is_none());
    assert!(store.opening(&door_b_id).is_some());
}

#[test]
fn remove_missing_wall_keeps_openings() {
    let mut store = DocStore::new();
    let wall = Wall::new(pt(0.0, 0.0), pt(100.0, 0.0), Uuid::new_v4());
    store.insert_opening(Opening::on_wall(OpeningKind::Window, pt(5.0, 0.0), &wall));
    assert!(store.remove_wall(&Uuid::new_v4()).is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn update_wall_sets_endpoints() {
    let mut store = DocStore::new();
    let wall = Wall::new(pt(0.0, 0.0), pt(100.0, 0.0), Uuid::new_v4());
    let id = wall.id;
    store.insert_wall(wall);
    assert!(store.update_wall(&id, &WallPatch { end: Some(pt(50.0, 50.0)), ..Default::default() }));
    assert_eq!(store.wall(&id).map(|w| (w.start, w.end)), Some((pt(0.0, 0.0), pt(50.0, 50.0))));
}

#[test]
fn openings_on_filters_kind() {
    let mut store = DocStore::new();
    let floor = Uuid::new_v4();
    let wall = Wall::new(pt(0.0, 0.0), pt(100.0, 0.0), floor);
    store.insert_opening(Opening::on_wall(OpeningKind::Door, pt(5.0, 0.0), &wall));
    store.insert_opening(Opening::on_wall(OpeningKind::Window, pt(50.0, 0.0), &wall));
    store.insert_opening(Opening::on_wall(OpeningKind::Window, pt(80.0, 0.0), &wall));
    assert_eq!(store.openings_on(floor, OpeningKind::Door).count(), 1);
    assert_eq!(store.openings_on(floor, OpeningKind::Window).count(), 2);
}

// =============================================================
// DocStore: rooms
// =============================================================

#[test]
fn update_room_merges_patch() {
    let mut store = DocStore::new();
    let room = room_on(Uuid::new_v4());
    let id = room.id;
    store.insert_room(room);
    assert!(store.update_room(&id, &RoomPatch::name("Küche".into())));
    assert!(store.update_room(&id, &RoomPatch { width: Some(250.0), ..Default::default() }));
    let room = store.room(&id).map(|r| (r.name.clone(), r.width, r.height));
    assert_eq!(room, Some(("Küche".to_owned(), 250.0, 80.0)));
}

#[test]
fn room_patch_rect_sets_all_geometry() {
    let patch = RoomPatch::rect(Rect { x: 1.0, y: 2.0, width: 3.0, height: 4.0 });
    assert_eq!(patch.x, Some(1.0));
    assert_eq!(patch.height, Some(4.0));
    assert!(patch.name.is_none());
}

// =============================================================
// DocStore: floor removal
// =============================================================

#[test]
fn remove_floor_drops_only_that_floor() {
    let mut store = DocStore::new();
    let doomed = Uuid::new_v4();
    let kept = Uuid::new_v4();
    let wall = Wall::new(pt(0.0, 0.0), pt(100.0, 0.0), doomed);
    store.insert_opening(Opening::on_wall(OpeningKind::Door, pt(5.0, 0.0), &wall));
    store.insert_wall(wall);
    store.insert_camera(camera_on(doomed, 0.0, 0.0));
    store.insert_room(room_on(doomed));
    store.insert_camera(camera_on(kept, 0.0, 0.0));
    store.insert_room(room_on(kept));

    let removed = store.remove_floor(doomed);
    assert_eq!(removed.len(), 4);
    assert_eq!(removed.cameras.len(), 1);
    assert_eq!(removed.walls.len(), 1);
    assert_eq!(removed.openings.len(), 1);
    assert_eq!(removed.rooms.len(), 1);
    assert_eq!(store.len(), 2);
    assert_eq!(store.cameras_on(kept).count(), 1);
    assert_eq!(store.rooms_on(kept).count(), 1);
}

#[test]
fn remove_unknown_floor_removes_nothing() {
    let mut store = DocStore::new();
    store.insert_camera(camera_on(Uuid::new_v4(), 0.0, 0.0));
    assert!(store.remove_floor(Uuid::new_v4()).is_empty());
    assert_eq!(store.len(), 1);
}
