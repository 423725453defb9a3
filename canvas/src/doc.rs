//! Document model: plan entities, their sparse updates, and the in-memory store.
//!
//! This module defines everything that can sit on a floor: security cameras,
//! walls, openings (doors and windows) and rooms. Every entity carries the id
//! of the floor it belongs to; the store itself is flat and floor-agnostic,
//! with `*_on(floor_id)` accessors doing the per-floor filtering.
//!
//! `DocStore` is the only owner of entity data. The input engine refers to
//! entities by id and mutates them exclusively through the store's command
//! methods, which keeps the wall -> opening cascade in one place.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::DEFAULT_CAMERA_SIZE;
use crate::floor::Template;
use crate::geom::{self, Rect};
use crate::viewport::Point;

/// Unique identifier for a plan entity.
pub type ObjectId = Uuid;

/// Unique identifier for a floor.
pub type FloorId = Uuid;

// =============================================================
// Cameras
// =============================================================

/// The three camera variants offered by the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraKind {
    Dome,
    Bullet,
    Ptz,
}

impl CameraKind {
    pub const ALL: [CameraKind; 3] = [CameraKind::Dome, CameraKind::Bullet, CameraKind::Ptz];

    /// Capitalised display label, used for generated names and material lines.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Dome => "Dome",
            Self::Bullet => "Bullet",
            Self::Ptz => "Ptz",
        }
    }

    /// Icon glyph drawn inside the camera marker.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Dome => "🔴",
            Self::Bullet => "🔷",
            Self::Ptz => "⚡",
        }
    }
}

impl fmt::Display for CameraKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dome => "dome",
            Self::Bullet => "bullet",
            Self::Ptz => "ptz",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown camera kind: {0} (expected dome, bullet or ptz)")]
pub struct ParseCameraKindError(pub String);

impl FromStr for CameraKind {
    type Err = ParseCameraKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dome" => Ok(Self::Dome),
            "bullet" => Ok(Self::Bullet),
            "ptz" => Ok(Self::Ptz),
            _ => Err(ParseCameraKindError(s.to_owned())),
        }
    }
}

/// A security camera placed on a floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub id: ObjectId,
    pub kind: CameraKind,
    pub name: String,
    /// Centre of the marker in floor coordinates.
    pub x: f64,
    pub y: f64,
    /// Marker edge length in floor units.
    pub size: f64,
    pub floor_id: FloorId,
}

impl Camera {
    /// A new camera with a fresh id and the default marker size.
    #[must_use]
    pub fn new(kind: CameraKind, name: String, at: Point, floor_id: FloorId) -> Self {
        Self { id: Uuid::new_v4(), kind, name, x: at.x, y: at.y, size: DEFAULT_CAMERA_SIZE, floor_id }
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Whether `p` falls inside the square marker.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        let half = self.size / 2.0;
        (self.x - p.x).abs() < half && (self.y - p.y).abs() < half
    }
}

/// Sparse update for a camera.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

impl CameraPatch {
    #[must_use]
    pub fn position(at: Point) -> Self {
        Self { x: Some(at.x), y: Some(at.y), ..Default::default() }
    }

    #[must_use]
    pub fn name(name: String) -> Self {
        Self { name: Some(name), ..Default::default() }
    }
}

// =============================================================
// Walls
// =============================================================

/// Which piece of a generated outline a template wall is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlinePart {
    Left,
    Right,
    Top,
    Bottom,
    RoofLeft,
    RoofRight,
}

/// Marks a wall as generated outline geometry for a given template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    pub template: Template,
    pub part: OutlinePart,
}

/// A straight wall segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub id: ObjectId,
    pub start: Point,
    pub end: Point,
    pub floor_id: FloorId,
    /// Present only on template walls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<Outline>,
}

impl Wall {
    /// A new user-drawn wall with a fresh id.
    #[must_use]
    pub fn new(start: Point, end: Point, floor_id: FloorId) -> Self {
        Self { id: Uuid::new_v4(), start, end, floor_id, outline: None }
    }

    /// A new template wall belonging to a generated outline.
    #[must_use]
    pub fn generated(start: Point, end: Point, floor_id: FloorId, outline: Outline) -> Self {
        Self { outline: Some(outline), ..Self::new(start, end, floor_id) }
    }

    #[must_use]
    pub fn is_template(&self) -> bool {
        self.outline.is_some()
    }

    #[must_use]
    pub fn midpoint(&self) -> Point {
        geom::midpoint(self.start, self.end)
    }

    #[must_use]
    pub fn angle(&self) -> f64 {
        geom::segment_angle(self.start, self.end)
    }

    #[must_use]
    pub fn distance_to(&self, p: Point) -> f64 {
        geom::distance_to_segment(p, self.start, self.end)
    }

    #[must_use]
    pub fn closest_point(&self, p: Point) -> Point {
        geom::closest_point_on_segment(p, self.start, self.end)
    }
}

/// Sparse update for a wall.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WallPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<Point>,
}

// =============================================================
// Openings
// =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningKind {
    Door,
    Window,
}

/// A door or window anchored to a wall.
///
/// `wall_id` is a back-reference: the store deletes the opening together with
/// its wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    pub id: ObjectId,
    pub kind: OpeningKind,
    pub x: f64,
    pub y: f64,
    /// Orientation in radians, taken from the wall direction.
    pub angle: f64,
    pub floor_id: FloorId,
    pub wall_id: ObjectId,
}

impl Opening {
    /// An opening at `at` aligned with `wall`.
    #[must_use]
    pub fn on_wall(kind: OpeningKind, at: Point, wall: &Wall) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            x: at.x,
            y: at.y,
            angle: wall.angle(),
            floor_id: wall.floor_id,
            wall_id: wall.id,
        }
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

// =============================================================
// Rooms
// =============================================================

/// A named axis-aligned room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: ObjectId,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub floor_id: FloorId,
}

impl Room {
    #[must_use]
    pub fn new(name: String, rect: Rect, floor_id: FloorId) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            floor_id,
        }
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect { x: self.x, y: self.y, width: self.width, height: self.height }
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Sparse update for a room.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl RoomPatch {
    #[must_use]
    pub fn position(at: Point) -> Self {
        Self { x: Some(at.x), y: Some(at.y), ..Default::default() }
    }

    #[must_use]
    pub fn rect(rect: Rect) -> Self {
        Self {
            x: Some(rect.x),
            y: Some(rect.y),
            width: Some(rect.width),
            height: Some(rect.height),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn name(name: String) -> Self {
        Self { name: Some(name), ..Default::default() }
    }
}

// =============================================================
// Store
// =============================================================

/// Everything removed by a single cascading delete.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Removed {
    pub cameras: Vec<ObjectId>,
    pub walls: Vec<ObjectId>,
    pub openings: Vec<ObjectId>,
    pub rooms: Vec<ObjectId>,
}

impl Removed {
    #[must_use]
    pub fn len(&self) -> usize {
        self.cameras.len() + self.walls.len() + self.openings.len() + self.rooms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory store of every entity on every floor.
///
/// Collections keep insertion order, which is also hit-test order.
#[derive(Debug, Clone, Default)]
pub struct DocStore {
    cameras: Vec<Camera>,
    walls: Vec<Wall>,
    openings: Vec<Opening>,
    rooms: Vec<Room>,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Cameras ---

    pub fn insert_camera(&mut self, camera: Camera) {
        self.cameras.push(camera);
    }

    #[must_use]
    pub fn camera(&self, id: &ObjectId) -> Option<&Camera> {
        self.cameras.iter().find(|c| c.id == *id)
    }

    /// Apply a partial update. Returns false if the camera doesn't exist.
    pub fn update_camera(&mut self, id: &ObjectId, patch: &CameraPatch) -> bool {
        let Some(camera) = self.cameras.iter_mut().find(|c| c.id == *id) else {
            return false;
        };
        if let Some(ref name) = patch.name {
            camera.name.clone_from(name);
        }
        if let Some(x) = patch.x {
            camera.x = x;
        }
        if let Some(y) = patch.y {
            camera.y = y;
        }
        if let Some(size) = patch.size {
            camera.size = size;
        }
        true
    }

    pub fn remove_camera(&mut self, id: &ObjectId) -> Option<Camera> {
        let idx = self.cameras.iter().position(|c| c.id == *id)?;
        Some(self.cameras.remove(idx))
    }

    /// All cameras across every floor, in insertion order.
    pub fn cameras(&self) -> impl Iterator<Item = &Camera> {
        self.cameras.iter()
    }

    pub fn cameras_on(&self, floor_id: FloorId) -> impl Iterator<Item = &Camera> {
        self.cameras.iter().filter(move |c| c.floor_id == floor_id)
    }

    // --- Walls ---

    pub fn insert_wall(&mut self, wall: Wall) {
        self.walls.push(wall);
    }

    #[must_use]
    pub fn wall(&self, id: &ObjectId) -> Option<&Wall> {
        self.walls.iter().find(|w| w.id == *id)
    }

    /// Apply a partial update. Returns false if the wall doesn't exist.
    pub fn update_wall(&mut self, id: &ObjectId, patch: &WallPatch) -> bool {
        let Some(wall) = self.walls.iter_mut().find(|w| w.id == *id) else {
            return false;
        };
        if let Some(start) = patch.start {
            wall.start = start;
        }
        if let Some(end) = patch.end {
            wall.end = end;
        }
        true
    }

    /// Remove a wall and every opening anchored to it.
    ///
    /// Returns the removed wall and the ids of the removed openings.
    pub fn remove_wall(&mut self, id: &ObjectId) -> Option<(Wall, Vec<ObjectId>)> {
        let idx = self.walls.iter().position(|w| w.id == *id)?;
        let wall = self.walls.remove(idx);
        let mut orphaned = Vec::new();
        self.openings.retain(|o| {
            if o.wall_id == wall.id {
                orphaned.push(o.id);
                false
            } else {
                true
            }
        });
        Some((wall, orphaned))
    }

    pub fn walls_on(&self, floor_id: FloorId) -> impl Iterator<Item = &Wall> {
        self.walls.iter().filter(move |w| w.floor_id == floor_id)
    }

    // --- Openings ---

    pub fn insert_opening(&mut self, opening: Opening) {
        self.openings.push(opening);
    }

    #[must_use]
    pub fn opening(&self, id: &ObjectId) -> Option<&Opening> {
        self.openings.iter().find(|o| o.id == *id)
    }

    pub fn remove_opening(&mut self, id: &ObjectId) -> Option<Opening> {
        let idx = self.openings.iter().position(|o| o.id == *id)?;
        Some(self.openings.remove(idx))
    }

    pub fn openings_on(&self, floor_id: FloorId, kind: OpeningKind) -> impl Iterator<Item = &Opening> {
        self.openings.iter().filter(move |o| o.floor_id == floor_id && o.kind == kind)
    }

    // --- Rooms ---

    pub fn insert_room(&mut self, room: Room) {
        self.rooms.push(room);
    }

    #[must_use]
    pub fn room(&self, id: &ObjectId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == *id)
    }

    /// Apply a partial update. Returns false if the room doesn't exist.
    pub fn update_room(&mut self, id: &ObjectId, patch: &RoomPatch) -> bool {
        let Some(room) = self.rooms.iter_mut().find(|r| r.id == *id) else {
            return false;
        };
        if let Some(ref name) = patch.name {
            room.name.clone_from(name);
        }
        if let Some(x) = patch.x {
            room.x = x;
        }
        if let Some(y) = patch.y {
            room.y = y;
        }
        if let Some(w) = patch.width {
            room.width = w;
        }
        if let Some(h) = patch.height {
            room.height = h;
        }
        true
    }

    pub fn remove_room(&mut self, id: &ObjectId) -> Option<Room> {
        let idx = self.rooms.iter().position(|r| r.id == *id)?;
        Some(self.rooms.remove(idx))
    }

    pub fn rooms_on(&self, floor_id: FloorId) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(move |r| r.floor_id == floor_id)
    }

    // --- Floors ---

    /// Remove every entity scoped to `floor_id`.
    pub fn remove_floor(&mut self, floor_id: FloorId) -> Removed {
        fn drain<T>(items: &mut Vec<T>, on_floor: impl Fn(&T) -> bool, id: impl Fn(&T) -> ObjectId) -> Vec<ObjectId> {
            let mut removed = Vec::new();
            items.retain(|item| {
                if on_floor(item) {
                    removed.push(id(item));
                    false
                } else {
                    true
                }
            });
            removed
        }

        Removed {
            cameras: drain(&mut self.cameras, |c| c.floor_id == floor_id, |c| c.id),
            walls: drain(&mut self.walls, |w| w.floor_id == floor_id, |w| w.id),
            openings: drain(&mut self.openings, |o| o.floor_id == floor_id, |o| o.id),
            rooms: drain(&mut self.rooms, |r| r.floor_id == floor_id, |r| r.id),
        }
    }

    /// Number of entities across all floors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cameras.len() + self.walls.len() + self.openings.len() + self.rooms.len()
    }

    /// Returns `true` if the store contains no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
