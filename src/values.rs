//! Small helpers for probing evaluated preset data.

use serde_json::{Map, Value};

/// JS truthiness over an evaluated value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub fn field_is_truthy(map: &Map<String, Value>, key: &str) -> bool {
    map.get(key).map(is_truthy).unwrap_or(false)
}

pub fn string_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key).and_then(Value::as_str)
}

/// Compact, lower-cased JSON text used for keyword matching.
pub fn haystack(content: &Map<String, Value>) -> String {
    serde_json::to_string(content)
        .unwrap_or_default()
        .to_lowercase()
}

/// Depth of nested containers; a scalar is 0, `{}` is 1.
pub fn nesting_depth(value: &Value) -> usize {
    match value {
        Value::Array(items) => 1 + items.iter().map(nesting_depth).max().unwrap_or(0),
        Value::Object(map) => 1 + map.values().map(nesting_depth).max().unwrap_or(0),
        _ => 0,
    }
}

/// Visit every `(key, value)` pair in an object tree, depth first.
pub fn walk_entries<'a>(value: &'a Value, visit: &mut dyn FnMut(&'a str, &'a Value)) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                visit(key.as_str(), child);
                walk_entries(child, visit);
            }
        }
        Value::Array(items) => {
            for item in items {
                walk_entries(item, visit);
            }
        }
        _ => {}
    }
}
