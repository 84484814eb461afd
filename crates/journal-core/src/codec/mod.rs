//! Fenced-JSON content codec.
//!
//! A single text field can hold free prose or a structured record. Structured
//! records are written as a fenced ```` ```json ```` block; readers accept any
//! ```` ``` ```` fence (with or without a language tag) anywhere in the text,
//! which covers both the strict and the lenient writers.
//!
//! Nothing here fails: text that does not carry a well-formed JSON object
//! simply parses to `None` and previews as itself.

mod structured;

pub use structured::{render_value, StructuredContent};

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

const FENCE: &str = "```";

// Optional language tag and line break after an opening fence.
static FENCE_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t]*[A-Za-z0-9_+.-]*[ \t]*\r?\n?").expect("fence tag pattern is valid")
});

/// Serialize a structured record as a fenced JSON block.
///
/// # Examples
///
/// ```
/// use journal_core::codec::{parse, serialize, StructuredContent};
///
/// let text = serialize(&StructuredContent::new().with_title("T").with_content("C"));
/// assert!(text.starts_with("```json\n"));
/// assert_eq!(parse(&text).unwrap().title(), Some("T"));
/// ```
pub fn serialize(content: &StructuredContent) -> String {
    let value = Value::Object(content.fields().clone());
    format!("```json\n{:#}\n```", value)
}

/// Extract the first structured record fenced anywhere in `text`.
///
/// Each fence is tried as an opener, and each later fence as its closer, until
/// a body parses as a JSON object. Fences inside JSON strings and non-JSON code
/// blocks ahead of the record are skipped over that way.
///
/// Returns `None` when no fenced span holds a JSON object.
pub fn parse(text: &str) -> Option<StructuredContent> {
    let fences: Vec<usize> = text.match_indices(FENCE).map(|(at, _)| at).collect();
    for (i, &open) in fences.iter().enumerate() {
        let after = open + FENCE.len();
        let tag_len = FENCE_TAG.find(&text[after..]).map_or(0, |tag| tag.end());
        let body_start = after + tag_len;
        for &close in &fences[i + 1..] {
            if close < body_start {
                continue;
            }
            if let Some(content) = parse_body(&text[body_start..close]) {
                return Some(content);
            }
        }
    }
    None
}

fn parse_body(body: &str) -> Option<StructuredContent> {
    let body = body.trim();
    if !body.starts_with('{') {
        return None;
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => Some(StructuredContent::from_map(map)),
        _ => None,
    }
}

/// Human-readable preview of stored plaintext.
///
/// Structured records preview as their `content` (or `summary`); records
/// without either render their remaining fields as `key: value` lines, leaving
/// out `title` and `type`. Anything unparseable previews as the raw text.
pub fn preview(text: &str) -> String {
    let Some(content) = parse(text) else {
        return text.to_string();
    };

    if let Some(body) = content.body() {
        return body;
    }

    content
        .fields()
        .iter()
        .filter(|(key, _)| key.as_str() != "title" && key.as_str() != "type")
        .map(|(key, value)| format!("{}: {}", key, render_value(value)))
        .collect::<Vec<_>>()
        .join("\n")
}
