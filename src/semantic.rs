//! Semantic Classifier
//!
//! Infers business context by keyword matching over the lower-cased, serialized
//! content payload plus the variant name. Each axis is independent and may carry
//! several values. Urgency is the exception: a single value picked by priority.
//!
//! The tables are heuristics, not understanding. A keyword hit is a substring
//! hit, so `"saas"` also matches `"saas-ready"`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::values::haystack;

/// `(value, keywords)`; a value is tagged when any keyword occurs.
type KeywordTable = [(&'static str, &'static [&'static str])];

static INDUSTRIES: &KeywordTable = &[
    ("saas", &["saas", "software", "platform", "dashboard", "api", "integration", "subscription"]),
    ("ecommerce", &["shop", "store", "cart", "checkout", "product", "order", "shipping"]),
    ("finance", &["finance", "bank", "payment", "invest", "budget", "accounting", "invoice"]),
    ("healthcare", &["health", "medical", "patient", "clinic", "doctor", "wellness", "care plan"]),
    ("education", &["course", "learn", "student", "teacher", "class", "lesson", "curriculum"]),
    ("consulting", &["consult", "agency", "strategy", "advisory", "expert", "client"]),
    ("real_estate", &["property", "real estate", "apartment", "rent", "listing", "mortgage"]),
    ("hospitality", &["hotel", "restaurant", "booking", "reservation", "menu", "travel"]),
    ("nonprofit", &["donate", "volunteer", "charity", "nonprofit", "mission", "cause"]),
];

static PERSONAS: &KeywordTable = &[
    ("developer", &["developer", "api", "code", "sdk", "deploy", "open source"]),
    ("marketer", &["marketing", "campaign", "conversion", "audience", "brand", "seo"]),
    ("founder", &["founder", "startup", "launch", "scale", "grow your business"]),
    ("enterprise", &["enterprise", "compliance", "security", "sso", "governance"]),
    ("small_business", &["small business", "local", "owner", "freelance"]),
    ("consumer", &["family", "personal", "everyday", "lifestyle", "home"]),
    ("designer", &["design", "creative", "portfolio", "figma", "visual"]),
];

static INTENTS: &KeywordTable = &[
    ("signup", &["sign up", "signup", "register", "create account", "join"]),
    ("purchase", &["buy", "purchase", "order now", "add to cart", "checkout"]),
    ("trial", &["free trial", "try free", "try it", "start trial", "demo"]),
    ("contact", &["contact", "get in touch", "talk to", "call us", "email us"]),
    ("learn", &["learn more", "discover", "explore", "read more", "guide"]),
    ("download", &["download", "install", "get the app"]),
    ("subscribe", &["subscribe", "newsletter", "stay updated", "inbox"]),
];

static FUNNEL_STAGES: &KeywordTable = &[
    ("awareness", &["discover", "introducing", "meet", "welcome", "why", "learn more"]),
    ("consideration", &["compare", "features", "how it works", "benefits", "testimonial", "case study"]),
    ("conversion", &["buy", "get started", "sign up", "pricing", "checkout", "free trial", "order"]),
    ("retention", &["support", "help center", "account", "upgrade", "community", "faq"]),
];

static SEASONALITY: &KeywordTable = &[
    ("holiday", &["holiday", "christmas", "new year", "festive", "gift"]),
    ("black_friday", &["black friday", "cyber monday"]),
    ("summer", &["summer", "vacation", "beach"]),
    ("back_to_school", &["back to school", "semester"]),
    ("spring", &["spring"]),
];

static TONES: &KeywordTable = &[
    ("professional", &["professional", "enterprise", "trusted", "reliable", "industry-leading", "solution"]),
    ("playful", &["fun", "awesome", "love", "wow", "magic", "delight"]),
    ("urgent", &["now", "today", "hurry", "limited", "don't miss", "last chance"]),
    ("friendly", &["welcome", "hello", "hi there", "together", "friendly", "easy"]),
    ("technical", &["api", "performance", "latency", "scalable", "architecture", "integration"]),
    ("luxury", &["premium", "exclusive", "luxury", "elegant", "bespoke"]),
];

static USE_CASES: &KeywordTable = &[
    ("product launch", &["launch", "introducing", "new release", "announcing"]),
    ("pricing page", &["pricing", "per month", "/mo", "plan", "billing"]),
    ("feature showcase", &["feature", "capabilities", "what you get", "everything you need"]),
    ("social proof", &["testimonial", "review", "trusted by", "customers say", "rating"]),
    ("lead generation", &["newsletter", "subscribe", "contact", "get in touch", "book a demo"]),
    ("team introduction", &["our team", "meet the", "founder", "leadership"]),
    ("faq section", &["faq", "frequently asked", "questions"]),
    ("statistics highlight", &["stats", "metrics", "customers worldwide", "uptime"]),
];

static URGENCY_HIGH: &[&str] = &[
    "limited time", "ends soon", "last chance", "hurry", "today only", "don't miss", "act now",
];

static URGENCY_MEDIUM: &[&str] = &[
    "new", "now available", "get started", "join", "sign up", "early access", "this week",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticInfo {
    pub industries: Vec<String>,
    pub personas: Vec<String>,
    pub intents: Vec<String>,
    pub funnel_stages: Vec<String>,
    pub seasonality: Vec<String>,
    pub urgency: Urgency,
    pub tones: Vec<String>,
    pub use_cases: Vec<String>,
}

/// Only the content and the variant name are matched; the block type does not
/// participate.
pub fn classify_semantics(
    _block_type: &str,
    variant: &str,
    content: &Map<String, Value>,
) -> SemanticInfo {
    let text = format!("{} {}", haystack(content), variant.to_lowercase());

    SemanticInfo {
        industries: match_axis(INDUSTRIES, &text),
        personas: match_axis(PERSONAS, &text),
        intents: match_axis(INTENTS, &text),
        funnel_stages: match_axis(FUNNEL_STAGES, &text),
        seasonality: match_axis(SEASONALITY, &text),
        urgency: classify_urgency(&text),
        tones: match_axis(TONES, &text),
        use_cases: match_axis(USE_CASES, &text),
    }
}

fn match_axis(table: &KeywordTable, text: &str) -> Vec<String> {
    table
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(value, _)| value.to_string())
        .collect()
}

/// High keywords are checked first, then medium; anything else is low.
pub fn classify_urgency(text: &str) -> Urgency {
    if URGENCY_HIGH.iter().any(|keyword| text.contains(keyword)) {
        Urgency::High
    } else if URGENCY_MEDIUM.iter().any(|keyword| text.contains(keyword)) {
        Urgency::Medium
    } else {
        Urgency::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn content(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_axes_allow_multiple_values() {
        let info = classify_semantics(
            "hero.split",
            "default",
            &content(json!({
                "title": "The SaaS platform for consulting agencies",
                "description": "Strategy dashboards for every client"
            })),
        );
        assert!(info.industries.contains(&"saas".to_string()));
        assert!(info.industries.contains(&"consulting".to_string()));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let info = classify_semantics(
            "cta.centered",
            "default",
            &content(json!({ "title": "Start your FREE TRIAL" })),
        );
        assert!(info.intents.contains(&"trial".to_string()));
    }

    #[test]
    fn test_variant_name_participates() {
        let info = classify_semantics("pricing.grid", "newsletter", &content(json!({})));
        assert!(info.intents.contains(&"subscribe".to_string()));
        assert!(info.use_cases.contains(&"lead generation".to_string()));
    }

    #[test]
    fn test_urgency_cascade() {
        assert_eq!(classify_urgency("limited time offer, sign up"), Urgency::High);
        assert_eq!(classify_urgency("sign up for updates"), Urgency::Medium);
        assert_eq!(classify_urgency("about our company"), Urgency::Low);
    }

    #[test]
    fn test_plain_content_has_empty_axes() {
        let info = classify_semantics("x", "a", &content(json!({ "title": "Zz" })));
        assert!(info.industries.is_empty());
        assert!(info.seasonality.is_empty());
        assert_eq!(info.urgency, Urgency::Low);
    }
}
