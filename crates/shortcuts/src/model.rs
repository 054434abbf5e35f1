//! Map-state data shapes the dispatcher touches.
//!
//! Responsibilities:
//! - Define the persisted draw element record (`DrawElementState`).
//! - Define the selection snapshot delivered by the map-state observer.
//! - Define the display mode that decides whether the map is editable.
//!
//! Does NOT handle:
//! - Rendering, projection or persistence of elements (owned by the map renderer).
//!
//! Invariants:
//! - Field names serialize in camelCase with the element kind under `type`,
//!   matching the stored map documents.
//! - Cloning an element state is a full structural copy; nothing is shared.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of drawable element, and the draw tool that creates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawElementKind {
    Text,
    Symbol,
    Polygon,
    Line,
    Freehand,
}

impl fmt::Display for DrawElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Symbol => "symbol",
            Self::Polygon => "polygon",
            Self::Line => "line",
            Self::Freehand => "freehand",
        };
        write!(f, "{}", name)
    }
}

/// Element coordinates: a single point or a path of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinates {
    Point(Vec<f64>),
    Path(Vec<Vec<f64>>),
}

/// Optional styling and report attributes of a draw element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protected: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_show: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_icon: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flip_icon: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// Fill pattern; its shape belongs to the sign catalogue and is kept opaque here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_style: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zindex: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_persons: Option<u64>,
    /// Only meaningful for text elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Persisted state of one drawable element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawElementState {
    #[serde(rename = "type")]
    pub kind: DrawElementKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    /// Creation time in milliseconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<u64>,
    #[serde(flatten)]
    pub properties: ElementProperties,
}

impl DrawElementState {
    /// An element of the given kind with no attributes set.
    pub fn new(kind: DrawElementKind) -> Self {
        Self {
            kind,
            id: None,
            layer: None,
            coordinates: None,
            created_at: None,
            properties: ElementProperties::default(),
        }
    }
}

/// Snapshot of the currently selected element.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedElement {
    /// Feature id of the element on the map.
    pub id: String,
    /// The element's persisted state at the time of selection.
    pub state: DrawElementState,
}

impl SelectedElement {
    pub fn new(id: impl Into<String>, state: DrawElementState) -> Self {
        Self {
            id: id.into(),
            state,
        }
    }
}

/// How the map is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Draw,
    History,
}

impl DisplayMode {
    /// Only the draw mode permits edits; history is a read-only replay.
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Draw)
    }
}
