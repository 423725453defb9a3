//! Floors: the tab list, the active-floor pointer, and per-floor view state.
//!
//! `FloorSet` guarantees at least one floor exists at all times and that the
//! active pointer always refers to one of them. Entity cleanup on delete is the
//! engine's job; this module only manages the floor records themselves.

#[cfg(test)]
#[path = "floor_test.rs"]
mod floor_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::doc::FloorId;
use crate::viewport::{Viewport, ViewportPatch};

/// Substrings (lowercase) that mark a floor name as outdoor.
const OUTDOOR_KEYWORDS: [&str; 2] = ["außenbereich", "garten"];

/// Which outline a floor is laid out from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    /// No generated outline.
    #[default]
    None,
    /// Closed rectangle, four walls.
    Rectangle,
    /// Rectangle with a gable roof, six walls.
    House,
    /// The user supplied a background image instead.
    Custom,
}

/// Decoded background image, as a data URL.
pub type ImageRef = String;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FloorError {
    #[error("floor not found: {0}")]
    NotFound(FloorId),
    #[error("cannot delete the last remaining floor")]
    LastFloor,
    #[error("floor name must not be empty")]
    EmptyName,
}

/// One floor tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub id: FloorId,
    pub name: String,
    pub template: Template,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<ImageRef>,
    pub viewport: Viewport,
}

impl Floor {
    #[must_use]
    pub fn new(name: String, template: Template) -> Self {
        Self { id: Uuid::new_v4(), name, template, background: None, viewport: Viewport::default() }
    }

    /// Whether this floor is treated as an outdoor area. See [`is_outdoor_name`].
    #[must_use]
    pub fn is_outdoor(&self) -> bool {
        is_outdoor_name(&self.name)
    }
}

/// Name heuristic for outdoor floors.
///
/// There is no explicit floor kind: a floor counts as outdoor when its display
/// name contains "außenbereich" or "garten", case-insensitively.
#[must_use]
pub fn is_outdoor_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    OUTDOOR_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Template implied by a floor name.
#[must_use]
pub fn template_for_name(name: &str) -> Template {
    if is_outdoor_name(name) { Template::House } else { Template::Rectangle }
}

/// Ordered floor tabs plus the active pointer.
#[derive(Debug, Clone)]
pub struct FloorSet {
    floors: Vec<Floor>,
    /// Index into `floors`; always in bounds.
    active: usize,
}

impl FloorSet {
    /// A set holding a single floor, templated from its name.
    #[must_use]
    pub fn new(initial_name: &str) -> Self {
        Self { floors: vec![Floor::new(initial_name.to_owned(), template_for_name(initial_name))], active: 0 }
    }

    #[must_use]
    pub fn active(&self) -> &Floor {
        &self.floors[self.active]
    }

    #[must_use]
    pub fn active_id(&self) -> FloorId {
        self.active().id
    }

    #[must_use]
    pub fn get(&self, id: &FloorId) -> Option<&Floor> {
        self.floors.iter().find(|f| f.id == *id)
    }

    fn get_mut(&mut self, id: &FloorId) -> Result<&mut Floor, FloorError> {
        self.floors.iter_mut().find(|f| f.id == *id).ok_or(FloorError::NotFound(*id))
    }

    /// Floors in tab order.
    pub fn iter(&self) -> impl Iterator<Item = &Floor> {
        self.floors.iter()
    }

    /// Floor at a zero-based tab position.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Floor> {
        self.floors.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.floors.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    /// Append a floor and make it active. `None` picks the next `Etage N` name.
    ///
    /// The template follows [`template_for_name`], as for a rename.
    pub fn add(&mut self, name: Option<String>) -> FloorId {
        let name = name.unwrap_or_else(|| format!("Etage {}", self.floors.len() + 1));
        let template = template_for_name(&name);
        let floor = Floor::new(name, template);
        let id = floor.id;
        self.floors.push(floor);
        self.active = self.floors.len() - 1;
        id
    }

    /// Rename a floor and re-derive its template from the new name.
    ///
    /// Returns the template now in effect.
    ///
    /// # Errors
    ///
    /// `EmptyName` for blank names, `NotFound` for unknown ids.
    pub fn rename(&mut self, id: &FloorId, name: &str) -> Result<Template, FloorError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FloorError::EmptyName);
        }
        let floor = self.get_mut(id)?;
        floor.name = name.to_owned();
        floor.template = template_for_name(name);
        Ok(floor.template)
    }

    /// Remove a floor. If it was active, the first remaining floor becomes active.
    ///
    /// # Errors
    ///
    /// `LastFloor` when only one floor remains, `NotFound` for unknown ids.
    /// Neither changes any state.
    pub fn delete(&mut self, id: &FloorId) -> Result<Floor, FloorError> {
        if self.floors.len() <= 1 {
            return Err(FloorError::LastFloor);
        }
        let idx = self.floors.iter().position(|f| f.id == *id).ok_or(FloorError::NotFound(*id))?;
        let removed = self.floors.remove(idx);
        if idx == self.active {
            self.active = 0;
        } else if idx < self.active {
            self.active -= 1;
        }
        Ok(removed)
    }

    /// Make a floor active.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown ids.
    pub fn select(&mut self, id: &FloorId) -> Result<(), FloorError> {
        let idx = self.floors.iter().position(|f| f.id == *id).ok_or(FloorError::NotFound(*id))?;
        self.active = idx;
        Ok(())
    }

    /// Merge a zoom/pan patch into a floor's viewport.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown ids.
    pub fn update_viewport(&mut self, id: &FloorId, patch: &ViewportPatch) -> Result<Viewport, FloorError> {
        let floor = self.get_mut(id)?;
        floor.viewport.apply(patch);
        Ok(floor.viewport)
    }

    /// Assign or clear a floor's background image.
    ///
    /// Assigning switches the template to `Custom`; clearing falls back to `Rectangle`.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown ids.
    pub fn set_background(&mut self, id: &FloorId, image: Option<ImageRef>) -> Result<Template, FloorError> {
        let floor = self.get_mut(id)?;
        floor.template = if image.is_some() { Template::Custom } else { Template::Rectangle };
        floor.background = image;
        Ok(floor.template)
    }
}
