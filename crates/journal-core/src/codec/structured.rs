//! Structured journal payload carried inside a fenced JSON block.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::storage::types::EntryKind;

/// A structured record (`title`, `content`/`summary`, `type`, plus any
/// extra fields) stored as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructuredContent(Map<String, Value>);

impl StructuredContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.with_field("title", title.into())
    }

    pub fn with_content(self, content: impl Into<String>) -> Self {
        self.with_field("content", content.into())
    }

    pub fn with_summary(self, summary: impl Into<String>) -> Self {
        self.with_field("summary", summary.into())
    }

    pub fn with_kind(self, kind: EntryKind) -> Self {
        self.with_field("type", kind.as_str())
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// The `title` field, when it is a non-empty string.
    pub fn title(&self) -> Option<&str> {
        non_empty_str(self.0.get("title"))
    }

    /// The raw `type` field, when it is a non-empty string.
    pub fn kind_str(&self) -> Option<&str> {
        non_empty_str(self.0.get("type"))
    }

    /// The `type` field parsed as an [`EntryKind`]. Unknown names yield `None`.
    pub fn kind(&self) -> Option<EntryKind> {
        self.kind_str().and_then(|value| value.parse().ok())
    }

    /// Display body: `content` when present and non-empty, else `summary`.
    pub fn body(&self) -> Option<String> {
        display_value(self.0.get("content")).or_else(|| display_value(self.0.get("summary")))
    }

    /// Set `type` only if the payload does not already name one.
    pub fn ensure_kind(&mut self, kind: EntryKind) {
        if self.kind_str().is_none() {
            self.0
                .insert("type".to_string(), Value::from(kind.as_str()));
        }
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

fn display_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Render a JSON value for human display (strings unquoted).
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let content = StructuredContent::new()
            .with_title("Growth")
            .with_summary("I felt calmer today.")
            .with_kind(EntryKind::SideQuest)
            .with_field("xp", 20);

        assert_eq!(content.title(), Some("Growth"));
        assert_eq!(content.kind(), Some(EntryKind::SideQuest));
        assert_eq!(content.kind_str(), Some("sideQuest"));
        assert_eq!(content.get("xp"), Some(&Value::from(20)));
    }

    #[test]
    fn test_body_prefers_content_over_summary() {
        let content = StructuredContent::new()
            .with_content("A")
            .with_summary("B");
        assert_eq!(content.body().as_deref(), Some("A"));
    }

    #[test]
    fn test_body_skips_empty_content() {
        let content = StructuredContent::new()
            .with_content("")
            .with_summary("B");
        assert_eq!(content.body().as_deref(), Some("B"));
    }

    #[test]
    fn test_body_renders_non_string_values() {
        let content = StructuredContent::new().with_field("content", 42);
        assert_eq!(content.body().as_deref(), Some("42"));
    }

    #[test]
    fn test_unknown_kind_is_none() {
        let content = StructuredContent::new().with_field("type", "poem");
        assert_eq!(content.kind(), None);
        assert_eq!(content.kind_str(), Some("poem"));
    }

    #[test]
    fn test_ensure_kind_does_not_override() {
        let mut content = StructuredContent::new().with_kind(EntryKind::Story);
        content.ensure_kind(EntryKind::Action);
        assert_eq!(content.kind(), Some(EntryKind::Story));

        let mut empty = StructuredContent::new();
        empty.ensure_kind(EntryKind::Action);
        assert_eq!(empty.kind(), Some(EntryKind::Action));
    }
}
