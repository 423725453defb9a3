//! The interaction engine: one gesture dispatcher over the plan and its floors.
//!
//! DESIGN
//! ======
//! `EngineCore` is the single mutation gate. Hosts feed it pointer, wheel,
//! drop and keyboard events in screen coordinates plus a handful of explicit
//! commands (floor tabs, zoom buttons, inline rename). Each handler converts
//! to floor space using the active floor's viewport, dispatches on the
//! current `InputState`, applies the resulting mutations to `DocStore` /
//! `FloorSet`, and returns the list of [`Action`]s it applied so the host can
//! mirror them.
//!
//! Only the active floor's entities are ever hit-tested or edited. Transient
//! state (selection, gesture, rename) refers to entities by id and is dropped
//! whenever the entity goes away or the active floor changes.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::f64::consts::SQRT_2;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::consts::{
    CAMERA_MAX_SIZE, CAMERA_MIN_SIZE, CAMERA_RESIZE_RATE, ROOM_DRAW_MIN, ROOM_MIN_SIZE, WHEEL_ZOOM_IN,
    WHEEL_ZOOM_OUT, ZOOM_IN_STEP, ZOOM_OUT_STEP,
};
use crate::doc::{
    Camera, CameraKind, CameraPatch, DocStore, FloorId, ObjectId, Opening, OpeningKind, Room, RoomPatch, Wall,
    WallPatch,
};
use crate::floor::{Floor, FloorError, FloorSet, ImageRef};
use crate::geom::{normalized_rect, resize_from_corner, straighten};
use crate::hit::{self, Hit, WallGrip};
use crate::input::{
    Button, InputState, Key, Modifiers, RenameState, RenameTarget, Selection, Tool, ToolbarItem, UiState,
    WheelDelta,
};
use crate::layout::{self, LayoutChange};
use crate::viewport::{Point, Viewport, ViewportPatch, clamp_zoom};

/// Name given to the first floor when the host does not choose one.
pub const DEFAULT_FLOOR_NAME: &str = "Erdgeschoss";

/// Mutations applied by a handler, for the host to mirror.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    CameraCreated(Camera),
    CameraUpdated { id: ObjectId, fields: CameraPatch },
    CameraDeleted { id: ObjectId },
    WallCreated(Wall),
    WallUpdated { id: ObjectId, fields: WallPatch },
    WallDeleted { id: ObjectId },
    OpeningCreated(Opening),
    OpeningDeleted { id: ObjectId },
    RoomCreated(Room),
    RoomUpdated { id: ObjectId, fields: RoomPatch },
    RoomDeleted { id: ObjectId },
    FloorAdded(Floor),
    /// Name, template or background of a floor changed.
    FloorUpdated(Floor),
    FloorDeleted { id: FloorId },
    ActiveFloorChanged { id: FloorId },
    ViewportChanged { floor: FloorId, viewport: Viewport },
    SelectionChanged { selection: Option<Selection> },
    RenameStarted { target: RenameTarget, buffer: String },
    RenameEnded { target: RenameTarget, committed: bool },
    /// The host should open its file picker for a background image.
    UploadRequested,
    RenderNeeded,
}

/// Core engine state: everything except the rendering surface.
pub struct EngineCore {
    pub doc: DocStore,
    pub floors: FloorSet,
    pub ui: UiState,
    pub input: InputState,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(DEFAULT_FLOOR_NAME)
    }
}

impl EngineCore {
    /// A fresh editor with one rectangle floor and its outline.
    #[must_use]
    pub fn new(initial_floor: &str) -> Self {
        let mut core = Self {
            doc: DocStore::new(),
            floors: FloorSet::new(initial_floor),
            ui: UiState::default(),
            input: InputState::default(),
        };
        layout::ensure_default_layout(core.floors.active(), &mut core.doc);
        core
    }

    // =============================================================
    // Pointer input
    // =============================================================

    pub fn on_pointer_down(&mut self, screen: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        let mut actions = self.commit_rename();

        if button == Button::Middle || (button == Button::Primary && modifiers.command()) {
            self.input = InputState::Panning { anchor: screen - self.viewport().pan() };
            return actions;
        }
        if button != Button::Primary {
            return actions;
        }

        let p = self.to_floor(screen);
        match self.ui.tool {
            Tool::Wall => {
                self.input = InputState::DrawingWall { anchor: p, current: p };
                actions.push(Action::RenderNeeded);
            }
            Tool::Room => {
                self.input = InputState::DrawingRoom { anchor: p, current: p };
                actions.push(Action::RenderNeeded);
            }
            Tool::Door => actions.extend(self.place_opening(OpeningKind::Door, p)),
            Tool::Window => actions.extend(self.place_opening(OpeningKind::Window, p)),
            Tool::Eraser => {
                if let Some(hit) = hit::erase_hit(&self.doc, self.active_floor_id(), p) {
                    actions.extend(self.delete_hit(hit));
                }
            }
            Tool::Select => actions.extend(self.select_at(screen, p)),
        }
        actions
    }

    pub fn on_pointer_move(&mut self, screen: Point, _modifiers: Modifiers) -> Vec<Action> {
        let p = self.to_floor(screen);
        match self.input {
            InputState::Idle => Vec::new(),
            InputState::DrawingWall { anchor, .. } => {
                self.input = InputState::DrawingWall { anchor, current: p };
                vec![Action::RenderNeeded]
            }
            InputState::DrawingRoom { anchor, .. } => {
                self.input = InputState::DrawingRoom { anchor, current: p };
                vec![Action::RenderNeeded]
            }
            InputState::Panning { anchor } => {
                let pan = screen - anchor;
                self.patch_active_viewport(ViewportPatch { pan_x: Some(pan.x), pan_y: Some(pan.y), zoom: None })
            }
            InputState::DraggingCamera { id, offset } => self.update_camera(id, CameraPatch::position(p - offset)),
            InputState::ResizingCamera { id, start_screen, start_size } => {
                let delta = screen - start_screen;
                let along_diagonal = (delta.x + delta.y) / SQRT_2;
                let size = (start_size + along_diagonal * CAMERA_RESIZE_RATE).clamp(CAMERA_MIN_SIZE, CAMERA_MAX_SIZE);
                self.update_camera(id, CameraPatch { size: Some(size), ..Default::default() })
            }
            InputState::DraggingRoom { id, offset } => self.update_room(id, RoomPatch::position(p - offset)),
            InputState::ResizingRoom { id, corner } => {
                let Some(room) = self.doc.room(&id) else {
                    return Vec::new();
                };
                let rect = resize_from_corner(&room.rect(), corner, p, ROOM_MIN_SIZE);
                self.update_room(id, RoomPatch::rect(rect))
            }
            InputState::DraggingWall { id, grip, offset } => {
                let Some(wall) = self.doc.wall(&id) else {
                    return Vec::new();
                };
                let patch = match grip {
                    WallGrip::Start => WallPatch { start: Some(p), end: None },
                    WallGrip::End => WallPatch { start: None, end: Some(p) },
                    WallGrip::Whole => {
                        let delta = (p - offset) - wall.midpoint();
                        WallPatch { start: Some(wall.start + delta), end: Some(wall.end + delta) }
                    }
                };
                self.update_wall(id, patch)
            }
        }
    }

    pub fn on_pointer_up(&mut self, screen: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let p = self.to_floor(screen);
        let floor_id = self.active_floor_id();
        match std::mem::take(&mut self.input) {
            InputState::Idle | InputState::Panning { .. } => Vec::new(),
            InputState::DrawingWall { anchor, .. } => {
                let wall = Wall::new(anchor, straighten(anchor, p), floor_id);
                debug!(id = %wall.id, floor = %floor_id, "wall drawn");
                self.doc.insert_wall(wall.clone());
                vec![Action::WallCreated(wall), Action::RenderNeeded]
            }
            InputState::DrawingRoom { anchor, .. } => {
                let rect = normalized_rect(anchor, p);
                if rect.width <= ROOM_DRAW_MIN || rect.height <= ROOM_DRAW_MIN {
                    return vec![Action::RenderNeeded];
                }
                let name = format!("Raum {}", self.doc.rooms_on(floor_id).count() + 1);
                let room = Room::new(name, rect, floor_id);
                debug!(id = %room.id, floor = %floor_id, width = rect.width, height = rect.height, "room drawn");
                self.doc.insert_room(room.clone());
                vec![Action::RoomCreated(room), Action::RenderNeeded]
            }
            InputState::DraggingCamera { .. }
            | InputState::ResizingCamera { .. }
            | InputState::DraggingRoom { .. }
            | InputState::ResizingRoom { .. }
            | InputState::DraggingWall { .. } => vec![Action::RenderNeeded],
        }
    }

    /// Wheel zoom, only while the command modifier is held.
    pub fn on_wheel(&mut self, _screen: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if !modifiers.command() {
            return Vec::new();
        }
        let factor = if delta.dy > 0.0 { WHEEL_ZOOM_OUT } else { WHEEL_ZOOM_IN };
        self.zoom_by(factor)
    }

    /// Palette drop: place a camera of `kind` at the drop point.
    ///
    /// On outdoor floors the point snaps onto the house outline when close.
    pub fn on_drop(&mut self, screen: Point, kind: CameraKind) -> Vec<Action> {
        let floor = self.floors.active();
        let floor_id = floor.id;
        let mut p = self.to_floor(screen);
        if floor.is_outdoor() {
            p = layout::snap_to_house_outline(p);
        }
        let name = format!("{} {}", kind.label(), self.doc.cameras_on(floor_id).count() + 1);
        let camera = Camera::new(kind, name, p, floor_id);
        debug!(id = %camera.id, floor = %floor_id, %kind, x = p.x, y = p.y, "camera placed");
        self.doc.insert_camera(camera.clone());
        vec![Action::CameraCreated(camera), Action::RenderNeeded]
    }

    pub fn on_key_down(&mut self, key: &Key, _modifiers: Modifiers) -> Vec<Action> {
        if self.ui.rename.is_some() {
            if key.is_enter() {
                return self.commit_rename();
            }
            if key.is_escape() {
                return self.cancel_rename();
            }
            return Vec::new();
        }
        if key.is_delete() {
            return self.delete_selection();
        }
        if key.is_escape() {
            self.input = InputState::Idle;
            let mut actions = Vec::new();
            self.set_selection(None, &mut actions);
            return actions;
        }
        Vec::new()
    }

    // =============================================================
    // Toolbar
    // =============================================================

    pub fn set_tool(&mut self, tool: Tool) {
        self.ui.tool = tool;
        self.input = InputState::Idle;
    }

    /// Press a toolbar button. Upload and clear fire once and leave the tool as is.
    pub fn activate(&mut self, item: ToolbarItem) -> Vec<Action> {
        match item {
            ToolbarItem::Tool(tool) => {
                self.set_tool(tool);
                vec![Action::RenderNeeded]
            }
            ToolbarItem::Upload => vec![Action::UploadRequested],
            ToolbarItem::Clear => self.clear_background(),
        }
    }

    /// Delete whatever is selected. No-op without a selection.
    pub fn delete_selection(&mut self) -> Vec<Action> {
        match self.ui.selection {
            Some(Selection::Camera(id)) => self.delete_hit(Hit::Camera(id)),
            Some(Selection::Room(id)) => self.delete_hit(Hit::Room(id)),
            Some(Selection::Wall(id)) => self.delete_hit(Hit::Wall(id, WallGrip::Whole)),
            None => Vec::new(),
        }
    }

    // =============================================================
    // View
    // =============================================================

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.zoom_by(ZOOM_IN_STEP)
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.zoom_by(ZOOM_OUT_STEP)
    }

    pub fn reset_view(&mut self) -> Vec<Action> {
        let reset = Viewport::default();
        self.patch_active_viewport(ViewportPatch {
            zoom: Some(reset.zoom),
            pan_x: Some(reset.pan_x),
            pan_y: Some(reset.pan_y),
        })
    }

    fn zoom_by(&mut self, factor: f64) -> Vec<Action> {
        let zoom = clamp_zoom(self.viewport().zoom * factor);
        self.patch_active_viewport(ViewportPatch { zoom: Some(zoom), ..Default::default() })
    }

    fn patch_active_viewport(&mut self, patch: ViewportPatch) -> Vec<Action> {
        let id = self.active_floor_id();
        self.update_viewport(&id, &patch).unwrap_or_default()
    }

    // =============================================================
    // Background
    // =============================================================

    /// Use an image as the active floor's plan. The floor becomes `Custom`.
    pub fn set_background(&mut self, image: ImageRef) -> Vec<Action> {
        let id = self.active_floor_id();
        if self.floors.set_background(&id, Some(image)).is_err() {
            return Vec::new();
        }
        info!(floor = %id, "background assigned");
        vec![Action::FloorUpdated(self.floors.active().clone()), Action::RenderNeeded]
    }

    /// Drop the active floor's background and restore its generated outline.
    pub fn clear_background(&mut self) -> Vec<Action> {
        let id = self.active_floor_id();
        if self.floors.set_background(&id, None).is_err() {
            return Vec::new();
        }
        info!(floor = %id, "background cleared");
        let mut actions = vec![Action::FloorUpdated(self.floors.active().clone())];
        let change = layout::ensure_default_layout(self.floors.active(), &mut self.doc);
        actions.extend(layout_actions(change));
        actions.push(Action::RenderNeeded);
        actions
    }

    // =============================================================
    // Floors
    // =============================================================

    /// Add a floor, make it active, and lay out its outline.
    pub fn add_floor(&mut self, name: Option<String>) -> Vec<Action> {
        let mut actions = self.leave_floor();
        let id = self.floors.add(name);
        let floor = self.floors.active().clone();
        info!(floor = %id, name = %floor.name, count = self.floors.len(), "floor added");
        actions.push(Action::FloorAdded(floor));
        actions.push(Action::ActiveFloorChanged { id });
        let change = layout::ensure_default_layout(self.floors.active(), &mut self.doc);
        actions.extend(layout_actions(change));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Rename a floor; its template follows the outdoor name heuristic.
    ///
    /// # Errors
    ///
    /// `EmptyName` for blank names, `NotFound` for unknown ids.
    pub fn rename_floor(&mut self, id: &FloorId, name: &str) -> Result<Vec<Action>, FloorError> {
        let template = self.floors.rename(id, name).inspect_err(|e| warn!(floor = %id, error = %e, "rename rejected"))?;
        let Some(floor) = self.floors.get(id) else {
            return Err(FloorError::NotFound(*id));
        };
        info!(floor = %id, name = %floor.name, ?template, "floor renamed");
        let mut actions = vec![Action::FloorUpdated(floor.clone())];
        let change = layout::ensure_default_layout(floor, &mut self.doc);
        actions.extend(layout_actions(change));
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    /// Delete a floor together with every entity on it.
    ///
    /// # Errors
    ///
    /// `LastFloor` when it is the only floor, `NotFound` for unknown ids.
    /// Neither changes any state.
    pub fn delete_floor(&mut self, id: &FloorId) -> Result<Vec<Action>, FloorError> {
        if self.floors.len() <= 1 {
            warn!(floor = %id, "delete rejected: last floor");
            return Err(FloorError::LastFloor);
        }
        if self.floors.get(id).is_none() {
            warn!(floor = %id, "delete rejected: unknown floor");
            return Err(FloorError::NotFound(*id));
        }
        let was_active = self.active_floor_id() == *id;
        let mut actions = if was_active { self.leave_floor() } else { Vec::new() };
        let floor = self.floors.delete(id)?;

        let removed = self.doc.remove_floor(floor.id);
        info!(floor = %floor.id, name = %floor.name, entities = removed.len(), "floor deleted");
        actions.push(Action::FloorDeleted { id: floor.id });
        actions.extend(removed.cameras.into_iter().map(|id| Action::CameraDeleted { id }));
        actions.extend(removed.walls.into_iter().map(|id| Action::WallDeleted { id }));
        actions.extend(removed.openings.into_iter().map(|id| Action::OpeningDeleted { id }));
        actions.extend(removed.rooms.into_iter().map(|id| Action::RoomDeleted { id }));
        if was_active {
            actions.push(Action::ActiveFloorChanged { id: self.active_floor_id() });
        }
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    /// Switch the active floor.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown ids.
    pub fn select_floor(&mut self, id: &FloorId) -> Result<Vec<Action>, FloorError> {
        if self.floors.get(id).is_none() {
            warn!(floor = %id, "select rejected: unknown floor");
            return Err(FloorError::NotFound(*id));
        }
        if self.active_floor_id() == *id {
            return Ok(Vec::new());
        }
        let mut actions = self.leave_floor();
        self.floors.select(id)?;
        debug!(floor = %id, "active floor changed");
        actions.push(Action::ActiveFloorChanged { id: *id });
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    /// Merge a zoom/pan patch into a floor's viewport.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown ids.
    pub fn update_viewport(&mut self, id: &FloorId, patch: &ViewportPatch) -> Result<Vec<Action>, FloorError> {
        let viewport = self.floors.update_viewport(id, patch)?;
        Ok(vec![Action::ViewportChanged { floor: *id, viewport }, Action::RenderNeeded])
    }

    /// End every transient interaction tied to the active floor.
    fn leave_floor(&mut self) -> Vec<Action> {
        let mut actions = self.commit_rename();
        self.input = InputState::Idle;
        self.set_selection(None, &mut actions);
        actions
    }

    // =============================================================
    // Inline rename
    // =============================================================

    /// Label click: start renaming the camera or room whose label is under `screen`.
    pub fn click_label(&mut self, screen: Point) -> Vec<Action> {
        let p = self.to_floor(screen);
        match hit::label_at(&self.doc, self.active_floor_id(), p, self.viewport().zoom) {
            Some(Hit::Camera(id)) => self.begin_rename(RenameTarget::Camera(id)),
            Some(Hit::Room(id)) => self.begin_rename(RenameTarget::Room(id)),
            _ => Vec::new(),
        }
    }

    /// Enter the edit state with the target's current name in the buffer.
    ///
    /// A rename already in progress is committed first.
    pub fn begin_rename(&mut self, target: RenameTarget) -> Vec<Action> {
        let current = match target {
            RenameTarget::Camera(id) => self.doc.camera(&id).map(|c| c.name.clone()),
            RenameTarget::Room(id) => self.doc.room(&id).map(|r| r.name.clone()),
        };
        let Some(buffer) = current else {
            return Vec::new();
        };
        let mut actions = self.commit_rename();
        self.ui.rename = Some(RenameState { target, buffer: buffer.clone() });
        actions.push(Action::RenameStarted { target, buffer });
        actions
    }

    /// Replace the rename buffer. Ignored when no rename is active.
    pub fn edit_rename(&mut self, text: &str) -> Vec<Action> {
        match self.ui.rename.as_mut() {
            Some(rename) => {
                text.clone_into(&mut rename.buffer);
                vec![Action::RenderNeeded]
            }
            None => Vec::new(),
        }
    }

    /// Write the buffer to the target's name and leave the edit state (Enter / blur).
    pub fn commit_rename(&mut self) -> Vec<Action> {
        let Some(RenameState { target, buffer }) = self.ui.rename.take() else {
            return Vec::new();
        };
        let mut actions = match target {
            RenameTarget::Camera(id) => self.update_camera(id, CameraPatch::name(buffer)),
            RenameTarget::Room(id) => self.update_room(id, RoomPatch::name(buffer)),
        };
        actions.push(Action::RenameEnded { target, committed: true });
        actions
    }

    /// Discard the buffer and leave the edit state (Escape).
    pub fn cancel_rename(&mut self) -> Vec<Action> {
        match self.ui.rename.take() {
            Some(RenameState { target, .. }) => vec![Action::RenameEnded { target, committed: false }],
            None => Vec::new(),
        }
    }

    // =============================================================
    // Queries
    // =============================================================

    #[must_use]
    pub fn active_floor(&self) -> &Floor {
        self.floors.active()
    }

    #[must_use]
    pub fn active_floor_id(&self) -> FloorId {
        self.floors.active_id()
    }

    /// The active floor's viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.floors.active().viewport
    }

    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.ui.selection
    }

    #[must_use]
    pub fn rename(&self) -> Option<&RenameState> {
        self.ui.rename.as_ref()
    }

    #[must_use]
    pub fn camera(&self, id: &ObjectId) -> Option<&Camera> {
        self.doc.camera(id)
    }

    #[must_use]
    pub fn room(&self, id: &ObjectId) -> Option<&Room> {
        self.doc.room(id)
    }

    #[must_use]
    pub fn wall(&self, id: &ObjectId) -> Option<&Wall> {
        self.doc.wall(id)
    }

    #[must_use]
    pub fn opening(&self, id: &ObjectId) -> Option<&Opening> {
        self.doc.opening(id)
    }

    fn to_floor(&self, screen: Point) -> Point {
        self.viewport().screen_to_floor(screen)
    }

    // =============================================================
    // Internals
    // =============================================================

    fn set_selection(&mut self, selection: Option<Selection>, actions: &mut Vec<Action>) {
        if self.ui.selection != selection {
            self.ui.selection = selection;
            actions.push(Action::SelectionChanged { selection });
        }
    }

    fn select_at(&mut self, screen: Point, p: Point) -> Vec<Action> {
        let selected_camera = match self.ui.selection {
            Some(Selection::Camera(id)) => Some(id),
            _ => None,
        };
        let hit = hit::select_hit(&self.doc, self.active_floor_id(), p, selected_camera);
        let (selection, gesture) = hit.and_then(|h| self.gesture_for(h, screen, p)).unzip();
        self.input = gesture.unwrap_or_default();
        let mut actions = Vec::new();
        self.set_selection(selection, &mut actions);
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Selection and drag gesture started by a select-tool hit.
    fn gesture_for(&self, hit: Hit, screen: Point, p: Point) -> Option<(Selection, InputState)> {
        match hit {
            Hit::CameraHandle(id) => {
                let camera = self.doc.camera(&id)?;
                let gesture = InputState::ResizingCamera { id, start_screen: screen, start_size: camera.size };
                Some((Selection::Camera(id), gesture))
            }
            Hit::Camera(id) => {
                let camera = self.doc.camera(&id)?;
                Some((Selection::Camera(id), InputState::DraggingCamera { id, offset: p - camera.position() }))
            }
            Hit::RoomCorner(id, corner) => Some((Selection::Room(id), InputState::ResizingRoom { id, corner })),
            Hit::Room(id) => {
                let room = self.doc.room(&id)?;
                Some((Selection::Room(id), InputState::DraggingRoom { id, offset: p - room.origin() }))
            }
            Hit::Wall(id, grip) => {
                let wall = self.doc.wall(&id)?;
                let offset = match grip {
                    WallGrip::Whole => p - wall.midpoint(),
                    WallGrip::Start | WallGrip::End => Point::default(),
                };
                Some((Selection::Wall(id), InputState::DraggingWall { id, grip, offset }))
            }
            Hit::Opening(..) => None,
        }
    }

    fn place_opening(&mut self, kind: OpeningKind, p: Point) -> Vec<Action> {
        let Some((wall, at)) = hit::nearest_wall(&self.doc, self.active_floor_id(), p) else {
            return Vec::new();
        };
        let opening = Opening::on_wall(kind, at, wall);
        debug!(id = %opening.id, wall = %opening.wall_id, ?kind, "opening placed");
        self.doc.insert_opening(opening.clone());
        vec![Action::OpeningCreated(opening), Action::RenderNeeded]
    }

    /// Delete the entity behind `hit`. Unknown ids are a silent no-op.
    fn delete_hit(&mut self, hit: Hit) -> Vec<Action> {
        let mut actions = match hit {
            Hit::Camera(id) | Hit::CameraHandle(id) => match self.doc.remove_camera(&id) {
                Some(_) => vec![Action::CameraDeleted { id }],
                None => return Vec::new(),
            },
            Hit::Room(id) | Hit::RoomCorner(id, _) => match self.doc.remove_room(&id) {
                Some(_) => vec![Action::RoomDeleted { id }],
                None => return Vec::new(),
            },
            Hit::Wall(id, _) => match self.doc.remove_wall(&id) {
                Some((_, openings)) => {
                    let mut actions = vec![Action::WallDeleted { id }];
                    actions.extend(openings.into_iter().map(|id| Action::OpeningDeleted { id }));
                    actions
                }
                None => return Vec::new(),
            },
            Hit::Opening(id, _) => match self.doc.remove_opening(&id) {
                Some(_) => vec![Action::OpeningDeleted { id }],
                None => return Vec::new(),
            },
        };
        let id = hit.id();
        debug!(%id, removed = actions.len(), "entity deleted");
        self.forget(id, &mut actions);
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Drop selection, rename and gesture state that refer to a deleted entity.
    fn forget(&mut self, id: ObjectId, actions: &mut Vec<Action>) {
        if self.ui.selection.is_some_and(|s| s.id() == id) {
            self.set_selection(None, actions);
        }
        if let Some(target) = self.ui.rename.as_ref().map(|r| r.target)
            && target.id() == id
        {
            self.ui.rename = None;
            actions.push(Action::RenameEnded { target, committed: false });
        }
        let gesture_id = match self.input {
            InputState::DraggingCamera { id, .. }
            | InputState::ResizingCamera { id, .. }
            | InputState::DraggingRoom { id, .. }
            | InputState::ResizingRoom { id, .. }
            | InputState::DraggingWall { id, .. } => Some(id),
            _ => None,
        };
        if gesture_id == Some(id) {
            self.input = InputState::Idle;
        }
    }

    fn update_camera(&mut self, id: ObjectId, fields: CameraPatch) -> Vec<Action> {
        if self.doc.update_camera(&id, &fields) { vec![Action::CameraUpdated { id, fields }] } else { Vec::new() }
    }

    fn update_room(&mut self, id: ObjectId, fields: RoomPatch) -> Vec<Action> {
        if self.doc.update_room(&id, &fields) { vec![Action::RoomUpdated { id, fields }] } else { Vec::new() }
    }

    fn update_wall(&mut self, id: ObjectId, fields: WallPatch) -> Vec<Action> {
        if self.doc.update_wall(&id, &fields) { vec![Action::WallUpdated { id, fields }] } else { Vec::new() }
    }
}

/// Actions mirroring a default-layout reconciliation.
fn layout_actions(change: LayoutChange) -> Vec<Action> {
    change.created.into_iter().map(Action::WallCreated).collect()
}
