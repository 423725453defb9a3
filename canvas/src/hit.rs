//! Hit-testing against plan entities on a single floor.
//!
//! Every query takes a point in floor space and only considers entities on the
//! given floor. Within a category the first entity in insertion order wins,
//! except for [`nearest_wall`], which looks for the global minimum.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{
    CAMERA_HANDLE_SIZE, CAMERA_LABEL_HEIGHT_PX, OPENING_ERASE_BOX, ROOM_HANDLE_SIZE, WALL_ENDPOINT_GRAB,
    WALL_ERASE_DISTANCE, WALL_SELECT_DISTANCE, WALL_SNAP_DISTANCE,
};
use crate::doc::{Camera, DocStore, FloorId, ObjectId, Opening, OpeningKind, Room, Wall};
use crate::geom::Corner;
use crate::viewport::Point;

/// Which part of a wall the select tool grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallGrip {
    Start,
    End,
    Whole,
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Resize handle of the selected camera.
    CameraHandle(ObjectId),
    Camera(ObjectId),
    RoomCorner(ObjectId, Corner),
    Room(ObjectId),
    Wall(ObjectId, WallGrip),
    Opening(ObjectId, OpeningKind),
}

impl Hit {
    #[must_use]
    pub fn id(&self) -> ObjectId {
        match *self {
            Self::CameraHandle(id)
            | Self::Camera(id)
            | Self::RoomCorner(id, _)
            | Self::Room(id)
            | Self::Wall(id, _)
            | Self::Opening(id, _) => id,
        }
    }
}

// =============================================================
// Per-category queries
// =============================================================

#[must_use]
pub fn camera_at(doc: &DocStore, floor: FloorId, p: Point) -> Option<&Camera> {
    doc.cameras_on(floor).find(|c| c.contains(p))
}

/// Whether `p` is on the resize handle at the lower-right corner of `camera`.
#[must_use]
pub fn on_camera_handle(camera: &Camera, p: Point) -> bool {
    let half = camera.size / 2.0;
    (camera.x + half - p.x).abs() < CAMERA_HANDLE_SIZE && (camera.y + half - p.y).abs() < CAMERA_HANDLE_SIZE
}

#[must_use]
pub fn room_at(doc: &DocStore, floor: FloorId, p: Point) -> Option<&Room> {
    doc.rooms_on(floor).find(|r| r.rect().contains(p))
}

/// Corner handle of `room` under `p`, tried nw, ne, sw, se.
#[must_use]
pub fn room_corner_at(room: &Room, p: Point) -> Option<Corner> {
    let rect = room.rect();
    Corner::ALL.into_iter().find(|corner| {
        let c = corner.of(&rect);
        (c.x - p.x).abs() < ROOM_HANDLE_SIZE && (c.y - p.y).abs() < ROOM_HANDLE_SIZE
    })
}

/// First wall strictly closer than `max_dist` to `p`.
#[must_use]
pub fn wall_at(doc: &DocStore, floor: FloorId, p: Point, max_dist: f64) -> Option<&Wall> {
    doc.walls_on(floor).find(|w| w.distance_to(p) < max_dist)
}

/// Endpoint grab takes precedence over translating the whole wall.
#[must_use]
pub fn wall_grip(wall: &Wall, p: Point) -> WallGrip {
    if p.distance(wall.start) < WALL_ENDPOINT_GRAB {
        WallGrip::Start
    } else if p.distance(wall.end) < WALL_ENDPOINT_GRAB {
        WallGrip::End
    } else {
        WallGrip::Whole
    }
}

#[must_use]
pub fn opening_at(doc: &DocStore, floor: FloorId, kind: OpeningKind, p: Point) -> Option<&Opening> {
    doc.openings_on(floor, kind)
        .find(|o| (o.x - p.x).abs() < OPENING_ERASE_BOX && (o.y - p.y).abs() < OPENING_ERASE_BOX)
}

/// The wall closest to `p` and the projected point on it.
///
/// Considers every wall on the floor and keeps the global minimum; only walls
/// strictly closer than [`WALL_SNAP_DISTANCE`] qualify. Ties keep the earlier wall.
#[must_use]
pub fn nearest_wall(doc: &DocStore, floor: FloorId, p: Point) -> Option<(&Wall, Point)> {
    let mut best: Option<(&Wall, f64)> = None;
    for wall in doc.walls_on(floor) {
        let d = wall.distance_to(p);
        if d < WALL_SNAP_DISTANCE && best.is_none_or(|(_, min)| d < min) {
            best = Some((wall, d));
        }
    }
    best.map(|(wall, _)| (wall, wall.closest_point(p)))
}

// =============================================================
// Tool-level hit tests
// =============================================================

/// Select-tool hit test: cameras, then rooms, then walls.
///
/// The resize handle of `selected_camera` is checked before any camera body.
/// Inside a room its corner handles win over the body. A wall within the
/// select distance resolves to an endpoint grip when the pointer is near one.
#[must_use]
pub fn select_hit(doc: &DocStore, floor: FloorId, p: Point, selected_camera: Option<ObjectId>) -> Option<Hit> {
    if let Some(camera) = selected_camera.and_then(|id| doc.camera(&id))
        && camera.floor_id == floor
        && on_camera_handle(camera, p)
    {
        return Some(Hit::CameraHandle(camera.id));
    }
    if let Some(camera) = camera_at(doc, floor, p) {
        return Some(Hit::Camera(camera.id));
    }
    if let Some(room) = room_at(doc, floor, p) {
        return Some(match room_corner_at(room, p) {
            Some(corner) => Hit::RoomCorner(room.id, corner),
            None => Hit::Room(room.id),
        });
    }
    wall_at(doc, floor, p, WALL_SELECT_DISTANCE).map(|wall| Hit::Wall(wall.id, wall_grip(wall, p)))
}

/// Eraser hit test: cameras, rooms, walls, doors, windows, first hit only.
#[must_use]
pub fn erase_hit(doc: &DocStore, floor: FloorId, p: Point) -> Option<Hit> {
    if let Some(camera) = camera_at(doc, floor, p) {
        return Some(Hit::Camera(camera.id));
    }
    if let Some(room) = room_at(doc, floor, p) {
        return Some(Hit::Room(room.id));
    }
    if let Some(wall) = wall_at(doc, floor, p, WALL_ERASE_DISTANCE) {
        return Some(Hit::Wall(wall.id, WallGrip::Whole));
    }
    [OpeningKind::Door, OpeningKind::Window]
        .into_iter()
        .find_map(|kind| opening_at(doc, floor, kind, p).map(|o| Hit::Opening(o.id, kind)))
}

/// Name label under `p`: camera labels first, then room labels.
///
/// A camera label sits directly below its marker, as wide as two markers and
/// a fixed screen height tall. A room label covers the whole room.
#[must_use]
pub fn label_at(doc: &DocStore, floor: FloorId, p: Point, zoom: f64) -> Option<Hit> {
    let label_height = CAMERA_LABEL_HEIGHT_PX / zoom;
    let camera = doc.cameras_on(floor).find(|c| {
        let top = c.y + c.size / 2.0;
        (c.x - p.x).abs() < c.size && p.y >= top && p.y <= top + label_height
    });
    if let Some(camera) = camera {
        return Some(Hit::Camera(camera.id));
    }
    room_at(doc, floor, p).map(|room| Hit::Room(room.id))
}
