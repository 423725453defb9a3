//! Input model: tools, modifier keys, mouse buttons, and the gesture state machine.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of a pointer
//! event. `UiState` is the persistent part of the interaction (active tool,
//! selection, inline rename) that survives between gestures. `InputState` is
//! the active gesture tracked between pointer-down and pointer-up; it carries
//! only ids, anchors and offsets, never entity data.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::doc::ObjectId;
use crate::geom::Corner;
use crate::hit::WallGrip;
use crate::viewport::Point;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Select, drag and resize existing entities (default).
    #[default]
    Select,
    /// Draw a wall segment.
    Wall,
    /// Draw a rectangular room.
    Room,
    /// Attach a door to the nearest wall.
    Door,
    /// Attach a window to the nearest wall.
    Window,
    /// Delete the entity under the pointer.
    Eraser,
}

impl Tool {
    pub const ALL: [Tool; 6] = [Tool::Select, Tool::Wall, Tool::Room, Tool::Door, Tool::Window, Tool::Eraser];
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Select => "select",
            Self::Wall => "wall",
            Self::Room => "room",
            Self::Door => "door",
            Self::Window => "window",
            Self::Eraser => "eraser",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool: {0}")]
pub struct ParseToolError(pub String);

impl FromStr for Tool {
    type Err = ParseToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseToolError(s.to_owned()))
    }
}

/// A toolbar button: either a mode or a one-shot trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarItem {
    Tool(Tool),
    /// Ask the host for a background image.
    Upload,
    /// Remove the active floor's background and restore its outline.
    Clear,
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Meta / Command key.
    pub meta: bool,
}

impl Modifiers {
    /// The platform command modifier: ctrl, or meta on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key as reported by the host (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self(name.to_owned())
    }

    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self.0.as_str(), "Delete" | "Backspace")
    }

    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }

    #[must_use]
    pub fn is_enter(&self) -> bool {
        self.0 == "Enter"
    }
}

/// Vertical wheel / trackpad scroll, in pixels (positive = down).
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    pub dy: f64,
}

/// The single selected entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Selection {
    Camera(ObjectId),
    Room(ObjectId),
    Wall(ObjectId),
}

impl Selection {
    #[must_use]
    pub fn id(self) -> ObjectId {
        match self {
            Self::Camera(id) | Self::Room(id) | Self::Wall(id) => id,
        }
    }
}

/// Entity whose name is being edited inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum RenameTarget {
    Camera(ObjectId),
    Room(ObjectId),
}

impl RenameTarget {
    #[must_use]
    pub fn id(self) -> ObjectId {
        match self {
            Self::Camera(id) | Self::Room(id) => id,
        }
    }
}

/// An inline rename in progress: the target and the uncommitted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameState {
    pub target: RenameTarget,
    pub buffer: String,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub tool: Tool,
    pub selection: Option<Selection>,
    pub rename: Option<RenameState>,
}

/// Internal state for the input state machine.
///
/// Each active variant carries the gesture context needed on pointer-move and
/// pointer-up. All points are in floor space unless named `*_screen`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Wall tool drag; `current` is the live preview end.
    DrawingWall { anchor: Point, current: Point },
    /// Room tool drag; `current` is the live preview corner.
    DrawingRoom { anchor: Point, current: Point },
    /// Pan drag. `anchor` is the screen point minus the pan at pointer-down.
    Panning { anchor: Point },
    /// Camera drag; `offset` is pointer minus camera centre.
    DraggingCamera { id: ObjectId, offset: Point },
    /// Camera marker resize from its lower-right handle.
    ResizingCamera { id: ObjectId, start_screen: Point, start_size: f64 },
    /// Room drag; `offset` is pointer minus room origin.
    DraggingRoom { id: ObjectId, offset: Point },
    /// Room resize with the opposite corner fixed.
    ResizingRoom { id: ObjectId, corner: Corner },
    /// Wall drag. For `WallGrip::Whole`, `offset` is pointer minus midpoint.
    DraggingWall { id: ObjectId, grip: WallGrip, offset: Point },
}

impl InputState {
    /// The live draw preview, if a draw session is active.
    #[must_use]
    pub fn preview(&self) -> Option<(Tool, Point, Point)> {
        match *self {
            Self::DrawingWall { anchor, current } => Some((Tool::Wall, anchor, current)),
            Self::DrawingRoom { anchor, current } => Some((Tool::Room, anchor, current)),
            _ => None,
        }
    }
}
