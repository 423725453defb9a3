//! Material list: the order sheet for the cameras on the plan.
//!
//! DESIGN
//! ======
//! One line per camera variant in first-seen order, followed by the
//! installation consumables and a recorder sized to the total camera count.
//! An empty plan produces an empty list. The list is derived on demand and
//! never stored.

#[cfg(test)]
#[path = "materials_test.rs"]
mod tests;

use std::fmt;

use canvas::doc::CameraKind;
use serde::Serialize;
use tracing::info;

/// One line of the material list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterialItem {
    pub label: String,
    pub count: usize,
    pub description: String,
}

impl MaterialItem {
    fn new(label: impl Into<String>, count: usize, description: String) -> Self {
        Self { label: label.into(), count, description }
    }
}

impl fmt::Display for MaterialItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x {} - {}", self.count, self.label, self.description)
    }
}

/// Recorder channel count for `cameras` cameras: 4, 8, or 16 above eight.
#[must_use]
pub fn recorder_channels(cameras: usize) -> u32 {
    match cameras {
        0..=4 => 4,
        5..=8 => 8,
        _ => 16,
    }
}

/// Build the material list for a set of cameras, given by variant.
pub fn material_list(cameras: impl IntoIterator<Item = CameraKind>) -> Vec<MaterialItem> {
    let mut groups: Vec<(CameraKind, usize)> = Vec::new();
    for kind in cameras {
        match groups.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, count)) => *count += 1,
            None => groups.push((kind, 1)),
        }
    }
    let total: usize = groups.iter().map(|(_, n)| n).sum();

    let mut items: Vec<MaterialItem> = groups
        .iter()
        .map(|&(kind, n)| {
            let label = kind.label();
            MaterialItem::new(format!("{label}-Kamera"), n, format!("{n}x {label}-Überwachungskamera"))
        })
        .collect();

    if total > 0 {
        items.push(MaterialItem::new("Kabel", total, format!("{total}x Netzwerkkabel (Cat6)")));
        items.push(MaterialItem::new("Netzteile", total, format!("{total}x PoE-Netzteile")));
        items.push(MaterialItem::new("Befestigung", total, format!("{total}x Halterungen und Schrauben")));
        let channels = recorder_channels(total);
        items.push(MaterialItem::new("NVR-Recorder", 1, format!("1x {channels}-Kanal Netzwerk-Videorekorder")));
    }

    info!(cameras = total, variants = groups.len(), lines = items.len(), "material list generated");
    items
}

/// The list as display lines, `"{count}x {label} - {description}"`.
#[must_use]
pub fn material_lines(items: &[MaterialItem]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}
