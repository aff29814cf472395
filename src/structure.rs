//! Structural analysis: layout family and geometry of a preset.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::values::field_is_truthy;

const BACKGROUND_FIELDS: &[&str] = &["background", "backgroundImage", "backgroundColor", "bgColor"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Grid,
    Split,
    Centered,
    Stack,
}

impl Layout {
    /// Layout family from the type's suffix, e.g. `features.grid`.
    pub fn from_type(block_type: &str) -> Self {
        if block_type.ends_with(".grid") {
            Layout::Grid
        } else if block_type.ends_with(".split") {
            Layout::Split
        } else if block_type.ends_with(".centered") {
            Layout::Centered
        } else {
            Layout::Stack
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Grid => "grid",
            Layout::Split => "split",
            Layout::Centered => "centered",
            Layout::Stack => "stack",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaPosition {
    Left,
    Right,
}

impl MediaPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaPosition::Left => "left",
            MediaPosition::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Low,
    Medium,
    High,
}

impl Density {
    pub fn as_str(&self) -> &'static str {
        match self {
            Density::Low => "low",
            Density::Medium => "medium",
            Density::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureInfo {
    pub layout: Layout,
    pub columns: Option<u64>,
    pub media_position: Option<MediaPosition>,
    pub container: bool,
    pub density: Density,
    pub has_gradient: bool,
    pub has_background: bool,
}

pub fn analyze_structure(block_type: &str, props: &Map<String, Value>) -> StructureInfo {
    let layout = Layout::from_type(block_type);

    let media_position = match layout {
        Layout::Split if field_is_truthy(props, "leftMedia") => Some(MediaPosition::Left),
        Layout::Split => Some(MediaPosition::Right),
        _ => None,
    };

    StructureInfo {
        layout,
        columns: props.get("columns").and_then(Value::as_u64).filter(|n| *n > 0),
        media_position,
        container: field_is_truthy(props, "container"),
        density: density_for(layout, block_type),
        has_gradient: has_gradient(props),
        has_background: BACKGROUND_FIELDS
            .iter()
            .any(|field| field_is_truthy(props, field)),
    }
}

/// Total over every layout; heroes read as sparse even when stacked.
pub fn density_for(layout: Layout, block_type: &str) -> Density {
    match layout {
        Layout::Grid => Density::High,
        Layout::Split => Density::Medium,
        Layout::Centered => Density::Low,
        Layout::Stack if block_type.contains("hero") => Density::Low,
        Layout::Stack => Density::Medium,
    }
}

fn has_gradient(props: &Map<String, Value>) -> bool {
    field_is_truthy(props, "gradient")
        || props
            .iter()
            .filter(|(key, _)| key.as_str() != "content")
            .any(|(_, value)| mentions_gradient(value))
}

fn mentions_gradient(value: &Value) -> bool {
    match value {
        Value::String(s) => s.to_lowercase().contains("gradient"),
        Value::Array(items) => items.iter().any(mentions_gradient),
        Value::Object(map) => map.values().any(mentions_gradient),
        _ => false,
    }
}
