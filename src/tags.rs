//! Canonical `category:value` filter tags.
//!
//! `parse_tag(&create_tag(c, v))` always returns the normalized category and
//! value: categories never contain a colon, so splitting on the first colon
//! is unambiguous even when the value has one.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub category: String,
    pub value: String,
}

/// Lower-case and replace whitespace runs with `_`. Leading and trailing
/// whitespace is kept as `_` too.
pub fn normalize_tag_part(part: &str) -> String {
    WHITESPACE_RE.replace_all(&part.to_lowercase(), "_").into_owned()
}

pub fn create_tag(category: &str, value: &str) -> String {
    let category = normalize_tag_part(category).replace(':', "_");
    format!("{}:{}", category, normalize_tag_part(value))
}

pub fn parse_tag(tag: &str) -> Option<Tag> {
    let (category, value) = tag.split_once(':')?;
    Some(Tag {
        category: category.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tag_normalizes() {
        assert_eq!(create_tag("Use Case", "Pricing Page"), "use_case:pricing_page");
        assert_eq!(create_tag("layout", "split"), "layout:split");
        assert_eq!(create_tag("a:b", "c"), "a_b:c");
    }

    #[test]
    fn test_round_trip() {
        // value.to_lowercase() with every whitespace run replaced by `_`
        let cases = [
            ("category", "hero", "hero"),
            ("use_case", "product launch", "product_launch"),
            ("variant", "Media  Left", "media_left"),
            ("variant", " hero", "_hero"),
            ("variant", "Tab\tSeparated ", "tab_separated_"),
            ("time", "10:30 am", "10:30_am"),
            ("cta", "2", "2"),
        ];

        for (category, value, expected) in cases {
            let tag = parse_tag(&create_tag(category, value)).unwrap();
            assert_eq!(tag.value, expected, "value {:?}", value);
            assert_eq!(tag.category, category);
        }
    }

    #[test]
    fn test_parse_rejects_untagged() {
        assert_eq!(parse_tag("no-colon"), None);
        assert_eq!(
            parse_tag("a:b:c"),
            Some(Tag {
                category: "a".to_string(),
                value: "b:c".to_string()
            })
        );
    }
}
