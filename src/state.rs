//! Editor session: one engine plus the artifacts derived from it.
//!
//! DESIGN
//! ======
//! `Session` is the host side of the canvas engine. It turns script steps
//! into handler calls, supplies files when the engine asks for an upload,
//! and keeps the latest material list and report. The engine is only ever
//! touched through `&mut self`, so a session has a single mutation path.
//!
//! A step that the engine rejects (unknown floor tab, invalid rename,
//! unreadable background) aborts the replay with the step's line number;
//! earlier steps stay applied.

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;

use canvas::doc::OpeningKind;
use canvas::engine::{Action, EngineCore};
use canvas::floor::{FloorError, Template};
use canvas::input::{Button, Key, Modifiers, Selection, Tool, ToolbarItem, WheelDelta};
use canvas::viewport::Point;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::script::{Command, Step, ZoomStep};
use crate::services::background::{BackgroundError, read_background};
use crate::services::materials::{MaterialItem, material_list};
use crate::services::report::{ReportDesk, ReportGenerator, ReportInput, ReportStatus, TemplateReport};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("line {line}: no floor at tab {tab}")]
    NoSuchFloor { line: usize, tab: usize },
    #[error("line {line}: {source}")]
    Floor {
        line: usize,
        #[source]
        source: FloorError,
    },
    #[error("line {line}: {source}")]
    Background {
        line: usize,
        #[source]
        source: BackgroundError,
    },
}

// =============================================================================
// SUMMARY
// =============================================================================

/// Entity counts for one floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloorSummary {
    pub name: String,
    pub template: Template,
    pub has_background: bool,
    pub cameras: usize,
    pub walls: usize,
    pub doors: usize,
    pub windows: usize,
    pub rooms: usize,
}

/// A serialisable overview of the whole plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub active_floor: String,
    pub tool: Tool,
    pub selection: Option<Selection>,
    pub floors: Vec<FloorSummary>,
}

impl Summary {
    #[must_use]
    pub fn of(core: &EngineCore) -> Self {
        let floors = core
            .floors
            .iter()
            .map(|floor| FloorSummary {
                name: floor.name.clone(),
                template: floor.template,
                has_background: floor.background.is_some(),
                cameras: core.doc.cameras_on(floor.id).count(),
                walls: core.doc.walls_on(floor.id).count(),
                doors: core.doc.openings_on(floor.id, OpeningKind::Door).count(),
                windows: core.doc.openings_on(floor.id, OpeningKind::Window).count(),
                rooms: core.doc.rooms_on(floor.id).count(),
            })
            .collect();
        Self {
            active_floor: core.active_floor().name.clone(),
            tool: core.ui.tool,
            selection: core.selection(),
            floors,
        }
    }
}

// =============================================================================
// SESSION
// =============================================================================

pub struct Session {
    engine: EngineCore,
    desk: ReportDesk,
    generator: Box<dyn ReportGenerator>,
    materials: Option<Vec<MaterialItem>>,
    /// Actions emitted so far, across all steps.
    actions: usize,
}

impl Session {
    /// A fresh plan with one floor, reporting through the built-in template.
    #[must_use]
    pub fn new(initial_floor: &str) -> Self {
        Self::with_generator(initial_floor, Box::new(TemplateReport))
    }

    #[must_use]
    pub fn with_generator(initial_floor: &str, generator: Box<dyn ReportGenerator>) -> Self {
        Self {
            engine: EngineCore::new(initial_floor),
            desk: ReportDesk::new(),
            generator,
            materials: None,
            actions: 0,
        }
    }

    #[must_use]
    pub fn engine(&self) -> &EngineCore {
        &self.engine
    }

    #[must_use]
    pub fn report(&self) -> &ReportStatus {
        self.desk.status()
    }

    /// The list captured by the most recent `materials` step, if any.
    #[must_use]
    pub fn materials(&self) -> Option<&[MaterialItem]> {
        self.materials.as_deref()
    }

    #[must_use]
    pub fn action_count(&self) -> usize {
        self.actions
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary::of(&self.engine)
    }

    /// Material list for the plan as it stands now.
    #[must_use]
    pub fn current_materials(&self) -> Vec<MaterialItem> {
        material_list(self.engine.doc.cameras().map(|c| c.kind))
    }

    /// Generate the report for the plan as it stands now.
    pub async fn generate_report(&mut self) -> &ReportStatus {
        let input = ReportInput::from_engine(&self.engine);
        self.desk.run(self.generator.as_ref(), &input).await
    }

    /// Apply every step in order, stopping at the first rejected one.
    ///
    /// # Errors
    ///
    /// The first step's [`SessionError`].
    pub async fn replay(&mut self, steps: &[Step]) -> Result<(), SessionError> {
        for step in steps {
            if let Err(e) = self.apply(step).await {
                warn!(line = step.line, error = %e, "replay step rejected");
                return Err(e);
            }
        }
        info!(steps = steps.len(), actions = self.action_count(), "replay finished");
        Ok(())
    }

    /// Apply one step and return the actions the engine emitted.
    ///
    /// # Errors
    ///
    /// See [`SessionError`]; a failed step leaves the engine unchanged.
    pub async fn apply(&mut self, step: &Step) -> Result<Vec<Action>, SessionError> {
        let line = step.line;
        debug!(line, command = ?step.command, "apply");
        let engine = &mut self.engine;
        let actions = match &step.command {
            Command::Tool(tool) => engine.activate(ToolbarItem::Tool(*tool)),
            Command::Upload(path) => {
                let image = read_background(path).await.map_err(|source| SessionError::Background { line, source })?;
                let mut actions = engine.activate(ToolbarItem::Upload);
                actions.extend(engine.set_background(image));
                actions
            }
            Command::Clear => engine.activate(ToolbarItem::Clear),
            Command::Down { at, button, modifiers } => engine.on_pointer_down(*at, *button, *modifiers),
            Command::Move(at) => engine.on_pointer_move(*at, Modifiers::default()),
            Command::Up(at) => engine.on_pointer_up(*at, Button::Primary, Modifiers::default()),
            Command::Drop { kind, at } => engine.on_drop(*at, *kind),
            Command::Wheel { dy, modifiers } => {
                engine.on_wheel(Point::default(), WheelDelta { dy: *dy }, *modifiers)
            }
            Command::Zoom(ZoomStep::In) => engine.zoom_in(),
            Command::Zoom(ZoomStep::Out) => engine.zoom_out(),
            Command::Zoom(ZoomStep::Reset) => engine.reset_view(),
            Command::Label(at) => engine.click_label(*at),
            Command::Type(text) => engine.edit_rename(text),
            Command::Key(name) => engine.on_key_down(&Key::named(name), Modifiers::default()),
            Command::FloorAdd(name) => engine.add_floor(name.clone()),
            Command::FloorRename { tab, name } => {
                let id = floor_at(engine, line, *tab)?;
                engine.rename_floor(&id, name).map_err(|source| SessionError::Floor { line, source })?
            }
            Command::FloorSelect(tab) => {
                let id = floor_at(engine, line, *tab)?;
                engine.select_floor(&id).map_err(|source| SessionError::Floor { line, source })?
            }
            Command::FloorDelete(tab) => {
                let id = floor_at(engine, line, *tab)?;
                engine.delete_floor(&id).map_err(|source| SessionError::Floor { line, source })?
            }
            Command::Materials => {
                self.materials = Some(self.current_materials());
                Vec::new()
            }
            Command::Report => {
                self.generate_report().await;
                Vec::new()
            }
        };
        self.actions += actions.len();
        Ok(actions)
    }
}

/// Resolve a 1-based tab to a floor id.
fn floor_at(engine: &EngineCore, line: usize, tab: usize) -> Result<canvas::doc::FloorId, SessionError> {
    tab.checked_sub(1)
        .and_then(|idx| engine.floors.at(idx))
        .map(|floor| floor.id)
        .ok_or(SessionError::NoSuchFloor { line, tab })
}
