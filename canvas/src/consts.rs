//! Shared numeric constants for the canvas crate.
//!
//! Distances are in floor units unless the name ends in `_PX`.

// ── Viewport ────────────────────────────────────────────────────

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f64 = 0.3;

/// Largest allowed zoom factor.
pub const MAX_ZOOM: f64 = 3.0;

/// Zoom multiplier for the zoom-in button.
pub const ZOOM_IN_STEP: f64 = 1.2;

/// Zoom multiplier for the zoom-out button.
pub const ZOOM_OUT_STEP: f64 = 0.8;

/// Zoom multiplier per wheel notch scrolling up (zoom in).
pub const WHEEL_ZOOM_IN: f64 = 1.1;

/// Zoom multiplier per wheel notch scrolling down (zoom out).
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

// ── Hit-testing ─────────────────────────────────────────────────

/// Maximum distance from a wall for the select tool to grab it.
pub const WALL_SELECT_DISTANCE: f64 = 15.0;

/// Maximum distance from a wall for the eraser to delete it.
pub const WALL_ERASE_DISTANCE: f64 = 10.0;

/// Maximum distance from a wall for a door or window to attach to it.
pub const WALL_SNAP_DISTANCE: f64 = 20.0;

/// Maximum distance from a wall endpoint to drag that endpoint alone.
pub const WALL_ENDPOINT_GRAB: f64 = 20.0;

/// Half-size of the square hit box around a room corner handle.
pub const ROOM_HANDLE_SIZE: f64 = 8.0;

/// Half-size of the square hit box around a door or window for the eraser.
pub const OPENING_ERASE_BOX: f64 = 20.0;

/// Half-size of the hit box around a selected camera's resize handle.
pub const CAMERA_HANDLE_SIZE: f64 = 6.0;

/// Height of the name label under a camera marker, in screen pixels.
pub const CAMERA_LABEL_HEIGHT_PX: f64 = 24.0;

// ── Editing ─────────────────────────────────────────────────────

/// Rooms can never be resized below this width or height.
pub const ROOM_MIN_SIZE: f64 = 50.0;

/// A drawn room is only committed when both sides exceed this.
pub const ROOM_DRAW_MIN: f64 = 20.0;

/// Axis deviation under which a drawn wall is snapped straight.
pub const STRAIGHTEN_TOLERANCE: f64 = 15.0;

/// Visual size of a newly dropped camera.
pub const DEFAULT_CAMERA_SIZE: f64 = 40.0;

/// Bounds for resizing a camera marker.
pub const CAMERA_MIN_SIZE: f64 = 20.0;
pub const CAMERA_MAX_SIZE: f64 = 100.0;

/// Marker growth per screen pixel of handle drag.
pub const CAMERA_RESIZE_RATE: f64 = 0.5;

// ── Default layouts ─────────────────────────────────────────────

/// Centre of every generated outline.
pub const OUTLINE_CENTER_X: f64 = 400.0;
pub const OUTLINE_CENTER_Y: f64 = 300.0;

/// Size of the rectangle outline.
pub const RECT_OUTLINE_WIDTH: f64 = 400.0;
pub const RECT_OUTLINE_HEIGHT: f64 = 300.0;

/// Size of the house body outline.
pub const HOUSE_OUTLINE_WIDTH: f64 = 300.0;
pub const HOUSE_OUTLINE_HEIGHT: f64 = 200.0;

/// Height of the gable peak above the house body.
pub const HOUSE_ROOF_HEIGHT: f64 = 50.0;

/// Cameras dropped closer than this to a house edge snap onto it.
pub const OUTLINE_SNAP_DISTANCE: f64 = 50.0;
