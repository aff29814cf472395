//! Content analysis: text, interactive, media and collection entities in a
//! preset's `content` payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::values::{string_field, walk_entries};

/// Single-button fields; each counts once when `buttons` is absent.
const BUTTON_FIELDS: &[&str] = &[
    "buttonText",
    "secondaryButtonText",
    "primaryButton",
    "secondaryButton",
];

const BUTTON_LIST_FIELD: &str = "buttons";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Gallery,
    Stats,
    Video,
    None,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Gallery => "gallery",
            MediaType::Stats => "stats",
            MediaType::Video => "video",
            MediaType::None => "none",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub field: String,
    pub count: usize,
    /// Keys of the first element; empty when items are not objects
    pub item_keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentInfo {
    pub has_badge: bool,
    pub has_title: bool,
    pub has_description: bool,
    pub has_subtitle: bool,
    pub title: Option<String>,
    pub description: Option<String>,
    pub cta_count: usize,
    pub media_type: MediaType,
    pub media_count: usize,
    pub collections: Vec<Collection>,
    pub icons: Vec<String>,
}

pub fn analyze_content(content: &Map<String, Value>) -> ContentInfo {
    let (media_type, media_count) = classify_media(content);

    ContentInfo {
        has_badge: content.contains_key("badge"),
        has_title: content.contains_key("title"),
        has_description: content.contains_key("description"),
        has_subtitle: content.contains_key("subtitle"),
        title: string_field(content, "title").map(str::to_string),
        description: string_field(content, "description").map(str::to_string),
        cta_count: count_ctas(content),
        media_type,
        media_count,
        collections: collect_collections(content),
        icons: collect_icons(content),
    }
}

/// A `buttons` array is authoritative; otherwise each single button field
/// present counts once.
pub fn count_ctas(content: &Map<String, Value>) -> usize {
    if let Some(Value::Array(buttons)) = content.get(BUTTON_LIST_FIELD) {
        return buttons.len();
    }

    BUTTON_FIELDS
        .iter()
        .filter(|field| content.contains_key(**field))
        .count()
}

/// First matching rule wins: image, gallery, stats, video.
pub fn classify_media(content: &Map<String, Value>) -> (MediaType, usize) {
    if content.contains_key("image") {
        return (MediaType::Image, 1);
    }
    if let Some(images) = content.get("images") {
        return (MediaType::Gallery, sequence_len(images));
    }
    if let Some(stats) = content.get("stats").or_else(|| content.get("metrics")) {
        return (MediaType::Stats, sequence_len(stats));
    }
    if content.contains_key("video") || content.contains_key("videoUrl") {
        return (MediaType::Video, 1);
    }
    (MediaType::None, 0)
}

fn sequence_len(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.len(),
        _ => 1,
    }
}

fn collect_collections(content: &Map<String, Value>) -> Vec<Collection> {
    content
        .iter()
        .filter_map(|(field, value)| match value {
            Value::Array(items) if !items.is_empty() => Some(Collection {
                field: field.clone(),
                count: items.len(),
                item_keys: items
                    .first()
                    .and_then(Value::as_object)
                    .map(|first| first.keys().cloned().collect())
                    .unwrap_or_default(),
            }),
            _ => None,
        })
        .collect()
}

/// Icon references anywhere in the tree. Unresolved identifiers evaluate to
/// their own name, so `icon: Zap` surfaces as `"Zap"`.
fn collect_icons(content: &Map<String, Value>) -> Vec<String> {
    let mut icons: Vec<String> = Vec::new();
    let tree = Value::Object(content.clone());

    walk_entries(&tree, &mut |key, value| {
        if key != "icon" && !key.ends_with("Icon") {
            return;
        }
        if let Value::String(name) = value {
            if !name.is_empty() && !icons.iter().any(|existing| existing == name) {
                icons.push(name.clone());
            }
        }
    });

    icons
}
