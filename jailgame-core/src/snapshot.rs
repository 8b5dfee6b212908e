//! Read-only view of a session for renderers.

use crate::config::RulesetKind;
use crate::geometry::Point;
use crate::layout::{Control, Label, ModalLayout, Rect};
use crate::state::TerritoryId;
use serde::Serialize;

/// One frame's worth of drawable state.
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub ruleset: RulesetKind,
    pub paused: bool,
    pub territories: Vec<TerritoryView>,
    /// Box around the stats row, when the ruleset draws one.
    pub stats_frame: Option<Rect>,
    pub stats: Vec<Label>,
    /// Large text at the top of the map (the selected territory in tax-only play).
    pub heading: Option<String>,
    pub controls: Vec<Control>,
    pub modal: Option<ModalLayout>,
    pub notification: Option<String>,
    pub tooltip: Option<Tooltip>,
    /// Last known pointer position, for hover shading.
    pub pointer: Option<Point>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TerritoryView {
    pub id: TerritoryId,
    pub name: String,
    pub polygon: Vec<Point>,
    pub centroid: Point,
    /// "Free" or "$cost" on unowned territories.
    pub price_label: Option<String>,
    pub owned: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    /// Top-centre of the tooltip box.
    pub anchor: Point,
    pub lines: Vec<String>,
}

impl RenderSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn territory(&self, name: &str) -> Option<&TerritoryView> {
        self.territories.iter().find(|t| t.name == name)
    }
}
