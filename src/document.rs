//! # Block Document Assembly
//!
//! Turns one evaluated preset entry into a [`BlockDocument`], the record the
//! vector-store ingestion job consumes. The serialized shape is a contract:
//!
//! 1. **Identity**: `id = "{type}#{variant}#{index}"`, where `index` is the
//!    entry's position in its source array. Unique within a category as long as
//!    array order is stable.
//! 2. **Embedding**: natural-language text built from the analyzers, plus a
//!    rough token estimate (`ceil(chars / 4)`).
//! 3. **Payload**: structure, content, semantic, technical, quality and usage
//!    metadata, and the canonical filter tags.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::content::{analyze_content, ContentInfo, MediaType};
use crate::quality::{score_quality, score_technical, QualityInfo, TechnicalInfo};
use crate::semantic::{classify_semantics, SemanticInfo};
use crate::structure::{analyze_structure, Layout, StructureInfo};
use crate::tags::create_tag;

pub const DEFAULT_VARIANT: &str = "default";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDocument {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    pub variant: String,
    pub category: String,
    pub source: Provenance,
    pub embedding: Embedding,
    pub payload: Payload,
}

/// Where a preset came from. Not part of identity beyond the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    pub file: String,
    pub export: String,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    pub text: String,
    pub token_estimate: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub structure: StructureInfo,
    pub content: ContentInfo,
    pub semantic: SemanticInfo,
    pub technical: TechnicalInfo,
    pub quality: QualityInfo,
    pub usage: UsageInfo,
    pub tags: Vec<String>,
}

/// What a consumer needs to instantiate the block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageInfo {
    pub props_keys: Vec<String>,
    pub content_keys: Vec<String>,
    pub default_props: Value,
}

/// A preset entry that passed validation: an object with a non-empty `type`.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetEntry {
    pub block_type: String,
    pub variant: String,
    pub props: Map<String, Value>,
}

impl PresetEntry {
    /// `None` when the value is not an object or has no non-empty string `type`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let entry = value.as_object()?;
        let block_type = entry
            .get("type")
            .and_then(Value::as_str)
            .filter(|t| !t.trim().is_empty())?;

        let variant = entry
            .get("variant")
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_VARIANT);

        let props = entry
            .get("props")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        Some(Self {
            block_type: block_type.to_string(),
            variant: variant.to_string(),
            props,
        })
    }

    pub fn content(&self) -> Map<String, Value> {
        self.props
            .get("content")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default()
    }
}

pub fn document_id(block_type: &str, variant: &str, index: usize) -> String {
    format!("{}#{}#{}", block_type, variant, index)
}

pub fn assemble(entry: &PresetEntry, category: &str, source: Provenance) -> BlockDocument {
    let content = entry.content();

    let structure = analyze_structure(&entry.block_type, &entry.props);
    let content_info = analyze_content(&content);
    let semantic = classify_semantics(&entry.block_type, &entry.variant, &content);
    let quality = score_quality(&content, &structure);
    let technical = score_technical(&content);

    let text = embedding_text(&entry.variant, &structure, &content_info, &semantic);
    let tags = build_tags(category, &entry.variant, &structure, &content_info, &semantic, &quality);

    let usage = UsageInfo {
        props_keys: entry
            .props
            .keys()
            .filter(|key| key.as_str() != "content")
            .cloned()
            .collect(),
        content_keys: content.keys().cloned().collect(),
        default_props: Value::Object(entry.props.clone()),
    };

    BlockDocument {
        id: document_id(&entry.block_type, &entry.variant, source.index),
        block_type: entry.block_type.clone(),
        variant: entry.variant.clone(),
        category: category.to_string(),
        source,
        embedding: Embedding {
            token_estimate: estimate_tokens(&text),
            text,
        },
        payload: Payload {
            structure,
            content: content_info,
            semantic,
            technical,
            quality,
            usage,
            tags,
        },
    }
}

/// Title sentence, layout/media clause, description, CTA clause, use case.
/// Clauses without a source are omitted.
pub fn embedding_text(
    variant: &str,
    structure: &StructureInfo,
    content: &ContentInfo,
    semantic: &SemanticInfo,
) -> String {
    let mut clauses: Vec<String> = Vec::new();

    if let Some(title) = content.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        clauses.push(sentence(title));
    }

    clauses.push(layout_clause(structure, content));

    if let Some(description) = content
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
    {
        clauses.push(description.to_string());
    }

    match content.cta_count {
        0 => {}
        1 => clauses.push("Includes 1 call to action.".to_string()),
        n => clauses.push(format!("Includes {} calls to action.", n)),
    }

    let use_case = semantic
        .use_cases
        .first()
        .cloned()
        .unwrap_or_else(|| format!("{} section", variant));
    clauses.push(format!("Suitable for {}.", use_case));

    clauses.join(" ").trim().to_string()
}

fn sentence(text: &str) -> String {
    if text.ends_with(['.', '!', '?']) {
        text.to_string()
    } else {
        format!("{}.", text)
    }
}

fn layout_clause(structure: &StructureInfo, content: &ContentInfo) -> String {
    let media = match content.media_type {
        MediaType::None => None,
        other => Some(other.as_str()),
    };

    match structure.layout {
        Layout::Split => match media {
            Some(media) => {
                let side = structure
                    .media_position
                    .map(|p| p.as_str())
                    .unwrap_or("right");
                format!("Split layout with {} on the {}.", media, side)
            }
            None => "Split layout.".to_string(),
        },
        Layout::Grid => {
            let mut clause = match structure.columns {
                Some(columns) => format!("Grid layout with {} columns", columns),
                None => "Grid layout".to_string(),
            };
            if let Some(media) = media {
                clause.push_str(&format!(" featuring {}", media));
            }
            clause.push('.');
            clause
        }
        Layout::Centered | Layout::Stack => {
            let name = if structure.layout == Layout::Centered {
                "Centered"
            } else {
                "Stacked"
            };
            match media {
                Some(media) => format!("{} layout featuring {}.", name, media),
                None => format!("{} layout.", name),
            }
        }
    }
}

pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

pub fn build_tags(
    category: &str,
    variant: &str,
    structure: &StructureInfo,
    content: &ContentInfo,
    semantic: &SemanticInfo,
    quality: &QualityInfo,
) -> Vec<String> {
    let mut tags = vec![
        create_tag("category", category),
        create_tag("layout", structure.layout.as_str()),
        create_tag("variant", variant),
    ];

    if let Some(columns) = structure.columns {
        tags.push(create_tag("columns", &columns.to_string()));
    }
    if let Some(position) = structure.media_position {
        tags.push(create_tag("media", position.as_str()));
    }
    tags.push(create_tag("cta", &content.cta_count.to_string()));
    tags.push(create_tag("media_type", content.media_type.as_str()));

    let axes: [(&str, &[String]); 7] = [
        ("industry", &semantic.industries),
        ("persona", &semantic.personas),
        ("intent", &semantic.intents),
        ("funnel", &semantic.funnel_stages),
        ("season", &semantic.seasonality),
        ("tone", &semantic.tones),
        ("use_case", &semantic.use_cases),
    ];
    for (axis, values) in axes {
        for value in values {
            tags.push(create_tag(axis, value));
        }
    }
    tags.push(create_tag("urgency", semantic.urgency.as_str()));

    tags.push(create_tag("complexity", quality.complexity.as_str()));
    tags.push(create_tag("density", structure.density.as_str()));

    let mut seen = std::collections::HashSet::new();
    tags.retain(|tag| seen.insert(tag.clone()));
    tags
}
