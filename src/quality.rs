//! Quality and technical scoring used for ranking and filtering.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::content::count_ctas;
use crate::static_eval::TEMPLATE_PLACEHOLDER;
use crate::structure::{Layout, StructureInfo};
use crate::values::{haystack, nesting_depth, string_field, walk_entries};

const REQUIRED_FIELDS: &[(&str, f64)] = &[("title", 0.35), ("description", 0.35)];
const OPTIONAL_FIELDS: &[(&str, f64)] = &[("badge", 0.1), ("buttonText", 0.1), ("image", 0.1)];

/// Placeholder copy that transfers between products without rewriting.
const GENERIC_TERMS: &[&str] = &[
    "your",
    "team",
    "business",
    "product",
    "customers",
    "company",
    "service",
    "solution",
    "get started",
    "learn more",
];

const LINK_KEYS: &[&str] = &["href", "url", "link"];
const FORM_KEYS: &[&str] = &["form", "fields", "inputs", "placeholder", "email"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextQuality {
    Basic,
    Good,
    Excellent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

impl Complexity {
    pub fn from_score(score: f64) -> Self {
        if score < 1.0 {
            Complexity::Simple
        } else if score < 2.0 {
            Complexity::Moderate
        } else {
            Complexity::Complex
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Moderate => "moderate",
            Complexity::Complex => "complex",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityInfo {
    pub completeness: f64,
    pub text_quality: TextQuality,
    pub complexity: Complexity,
    pub complexity_score: f64,
    pub reusability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalInfo {
    pub content_fields: Vec<String>,
    pub nesting_depth: usize,
    pub has_links: bool,
    pub has_form: bool,
    pub has_dynamic_text: bool,
}

pub fn score_quality(content: &Map<String, Value>, structure: &StructureInfo) -> QualityInfo {
    let complexity_score = complexity_score(content, structure);

    QualityInfo {
        completeness: completeness(content),
        text_quality: text_quality(content),
        complexity: Complexity::from_score(complexity_score),
        complexity_score,
        reusability: reusability(content),
    }
}

pub fn score_technical(content: &Map<String, Value>) -> TechnicalInfo {
    let tree = Value::Object(content.clone());

    let mut has_links = false;
    let mut has_form = false;
    walk_entries(&tree, &mut |key, _| {
        has_links |= LINK_KEYS.contains(&key);
        has_form |= FORM_KEYS.contains(&key);
    });

    TechnicalInfo {
        content_fields: content.keys().cloned().collect(),
        nesting_depth: nesting_depth(&tree),
        has_links,
        has_form,
        has_dynamic_text: haystack(content).contains(TEMPLATE_PLACEHOLDER),
    }
}

/// Weighted presence: required fields carry 0.7, optional fields 0.3.
pub fn completeness(content: &Map<String, Value>) -> f64 {
    let score: f64 = REQUIRED_FIELDS
        .iter()
        .chain(OPTIONAL_FIELDS)
        .filter(|(field, _)| content.contains_key(*field))
        .map(|(_, weight)| weight)
        .sum();

    round2(score.clamp(0.0, 1.0))
}

pub fn text_quality(content: &Map<String, Value>) -> TextQuality {
    let title_len = string_field(content, "title").map_or(0, |s| s.chars().count());
    let description_len = string_field(content, "description").map_or(0, |s| s.chars().count());

    if title_len >= 20 && description_len >= 80 {
        TextQuality::Excellent
    } else if title_len >= 10 && description_len >= 40 {
        TextQuality::Good
    } else {
        TextQuality::Basic
    }
}

pub fn complexity_score(content: &Map<String, Value>, structure: &StructureInfo) -> f64 {
    let mut score = 0.0;

    match structure.layout {
        Layout::Grid => score += 1.0,
        Layout::Split => score += 0.5,
        Layout::Centered | Layout::Stack => {}
    }
    if count_ctas(content) > 1 {
        score += 1.0;
    }
    if collection_count(content) > 2 {
        score += 1.0;
    }
    if structure.has_gradient {
        score += 0.5;
    }

    score
}

fn collection_count(content: &Map<String, Value>) -> usize {
    content
        .values()
        .filter(|value| matches!(value, Value::Array(items) if !items.is_empty()))
        .count()
}

/// Fraction of [`GENERIC_TERMS`] present in the content.
pub fn reusability(content: &Map<String, Value>) -> f64 {
    let text = haystack(content);
    let hits = GENERIC_TERMS
        .iter()
        .filter(|term| text.contains(**term))
        .count();

    round2(hits as f64 / GENERIC_TERMS.len() as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
