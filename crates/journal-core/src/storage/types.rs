//! Core data types for the journal store and the read models built on it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::codec::{self, StructuredContent};
use crate::error::JournalError;

/// Title shown when neither the payload nor the prompt provides one.
pub const UNTITLED_ENTRY: &str = "Untitled Entry";

/// Prompts longer than this are truncated when used as a title.
pub const TITLE_PROMPT_MAX_CHARS: usize = 50;

/// Kind of journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    #[default]
    Journal,
    Story,
    SideQuest,
    Action,
}

impl EntryKind {
    pub const ALL: [EntryKind; 4] = [
        EntryKind::Journal,
        EntryKind::Story,
        EntryKind::SideQuest,
        EntryKind::Action,
    ];

    /// Name as stored in the `type` column and in JSON payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Journal => "journal",
            EntryKind::Story => "story",
            EntryKind::SideQuest => "sideQuest",
            EntryKind::Action => "action",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = JournalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "journal" => Ok(EntryKind::Journal),
            "story" => Ok(EntryKind::Story),
            "sidequest" => Ok(EntryKind::SideQuest),
            "action" => Ok(EntryKind::Action),
            _ => Err(JournalError::Validation(format!(
                "Unknown entry type: {}",
                value
            ))),
        }
    }
}

/// A journal entry as stored. `content` is ciphertext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier, assigned by the store
    pub id: Uuid,

    /// Owner; every read and write is scoped by this
    pub user_id: String,

    /// Originating question or title text (may be empty)
    pub prompt: String,

    /// Encrypted plaintext serialization
    pub content: String,

    /// Stored `type` column; `None` when missing or unrecognized
    pub kind: Option<EntryKind>,

    /// When this entry was created
    pub created_at: DateTime<Utc>,
}

/// Builder for inserting a new entry.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub user_id: String,
    pub prompt: String,
    /// Already-encrypted content
    pub content: String,
    pub kind: EntryKind,
    /// Optional: custom created_at timestamp (defaults to now)
    pub created_at: Option<DateTime<Utc>>,
}

impl NewEntry {
    pub fn new(
        user_id: impl Into<String>,
        prompt: impl Into<String>,
        content: impl Into<String>,
        kind: EntryKind,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            prompt: prompt.into(),
            content: content.into(),
            kind,
            created_at: None,
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// Content replacement for an existing entry, with optional prompt/type patch.
#[derive(Debug, Clone)]
pub struct EntryPatch {
    /// Already-encrypted content
    pub content: String,
    pub prompt: Option<String>,
    pub kind: Option<EntryKind>,
}

/// Filter for listing entries.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Start date (inclusive)
    pub since: Option<DateTime<Utc>>,

    /// End date (inclusive)
    pub until: Option<DateTime<Utc>>,

    /// Maximum number of results
    pub limit: Option<usize>,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn since(mut self, date: DateTime<Utc>) -> Self {
        self.since = Some(date);
        self
    }

    pub fn until(mut self, date: DateTime<Utc>) -> Self {
        self.until = Some(date);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Body of an entry before it is serialized and encrypted.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryBody {
    /// Free-form prose, stored verbatim
    Text(String),
    /// Structured record, stored as a fenced JSON block
    Structured(StructuredContent),
}

impl EntryBody {
    /// The plaintext serialization that gets encrypted.
    pub fn to_plaintext(&self) -> String {
        match self {
            EntryBody::Text(text) => text.clone(),
            EntryBody::Structured(content) => codec::serialize(content),
        }
    }
}

/// A new entry as authored by a user or derived from a conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub prompt: String,
    pub body: EntryBody,
    pub kind: EntryKind,
    /// Optional: backdated creation time (defaults to now)
    pub created_at: Option<DateTime<Utc>>,
}

impl EntryDraft {
    pub fn text(prompt: impl Into<String>, text: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            prompt: prompt.into(),
            body: EntryBody::Text(text.into()),
            kind,
            created_at: None,
        }
    }

    pub fn structured(
        prompt: impl Into<String>,
        content: StructuredContent,
        kind: EntryKind,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            body: EntryBody::Structured(content),
            kind,
            created_at: None,
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// Full content replacement with optional prompt/type patch.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryUpdate {
    pub body: EntryBody,
    pub prompt: Option<String>,
    pub kind: Option<EntryKind>,
}

impl EntryUpdate {
    pub fn new(body: EntryBody) -> Self {
        Self {
            body,
            prompt: None,
            kind: None,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_kind(mut self, kind: EntryKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Decrypted read model of a journal entry.
#[derive(Debug, Clone, Serialize)]
pub struct EntryView {
    pub id: Uuid,
    pub prompt: String,
    /// Resolved type (payload > column > journal)
    pub kind: EntryKind,
    /// Resolved title (payload > truncated prompt > "Untitled Entry")
    pub title: String,
    /// Decrypted plaintext serialization
    pub text: String,
    /// Display string from the content codec
    pub preview: String,
    pub structured: Option<StructuredContent>,
    pub created_at: DateTime<Utc>,
}

impl EntryView {
    /// Build a view from a stored entry and its decrypted text.
    pub fn from_plaintext(entry: &JournalEntry, text: String) -> Self {
        let structured = codec::parse(&text);
        let title = resolve_title(structured.as_ref(), &entry.prompt);
        let kind = resolve_kind(structured.as_ref(), entry.kind);
        let preview = codec::preview(&text);
        Self {
            id: entry.id,
            prompt: entry.prompt.clone(),
            kind,
            title,
            text,
            preview,
            structured,
            created_at: entry.created_at,
        }
    }
}

/// Resolve an entry title: payload `title` > prompt (truncated) > "Untitled Entry".
pub fn resolve_title(structured: Option<&StructuredContent>, prompt: &str) -> String {
    if let Some(title) = structured.and_then(StructuredContent::title) {
        return title.to_string();
    }

    if prompt.trim().is_empty() {
        return UNTITLED_ENTRY.to_string();
    }

    if prompt.chars().count() > TITLE_PROMPT_MAX_CHARS {
        let truncated: String = prompt.chars().take(TITLE_PROMPT_MAX_CHARS).collect();
        format!("{}...", truncated)
    } else {
        prompt.to_string()
    }
}

/// Resolve an entry type: payload `type` > stored column > journal.
pub fn resolve_kind(structured: Option<&StructuredContent>, column: Option<EntryKind>) -> EntryKind {
    structured
        .and_then(StructuredContent::kind)
        .or(column)
        .unwrap_or_default()
}

/// A recorded mood.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: Uuid,
    pub user_id: String,
    /// Mood label (e.g. "calm", "anxious")
    pub mood: String,
    /// Strength of the mood, 1..=10
    pub intensity: u8,
    /// Optional note (encrypted when stored)
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Builder for recording a mood.
#[derive(Debug, Clone)]
pub struct NewMoodEntry {
    pub user_id: String,
    pub mood: String,
    pub intensity: u8,
    pub note: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl NewMoodEntry {
    pub fn new(user_id: impl Into<String>, mood: impl Into<String>, intensity: u8) -> Self {
        Self {
            user_id: user_id.into(),
            mood: mood.into(),
            intensity,
            note: None,
            created_at: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// Subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Premium,
}

impl SubscriptionTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "free",
            SubscriptionTier::Premium => "premium",
        }
    }
}

impl FromStr for SubscriptionTier {
    type Err = JournalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(SubscriptionTier::Free),
            "premium" => Ok(SubscriptionTier::Premium),
            _ => Err(JournalError::Validation(format!(
                "Unknown subscription tier: {}",
                value
            ))),
        }
    }
}

/// Billing state mirrored from the payment provider.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Subscription {
    pub tier: SubscriptionTier,
    /// End of the paid period; `None` means no expiry
    pub active_until: Option<DateTime<Utc>>,
}

impl Subscription {
    pub fn free() -> Self {
        Self::default()
    }

    pub fn premium(active_until: Option<DateTime<Utc>>) -> Self {
        Self {
            tier: SubscriptionTier::Premium,
            active_until,
        }
    }

    /// Premium with no expiry, or an expiry after `now`.
    pub fn is_premium(&self, now: DateTime<Utc>) -> bool {
        match self.tier {
            SubscriptionTier::Free => false,
            SubscriptionTier::Premium => self.active_until.map_or(true, |until| until > now),
        }
    }
}

/// Per-user profile and onboarding state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    pub display_name: Option<String>,
    pub onboarding_completed: bool,
    pub subscription: Subscription,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Defaults for a user seen for the first time.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: None,
            onboarding_completed: false,
            subscription: Subscription::free(),
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn stored(prompt: &str, kind: Option<EntryKind>) -> JournalEntry {
        JournalEntry {
            id: Uuid::new_v4(),
            user_id: "u1".to_string(),
            prompt: prompt.to_string(),
            content: String::new(),
            kind,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_entry_kind_names() {
        for kind in EntryKind::ALL {
            assert_eq!(kind.as_str().parse::<EntryKind>().unwrap(), kind);
        }
        assert_eq!("side-quest".parse::<EntryKind>().unwrap(), EntryKind::SideQuest);
        assert_eq!("side_quest".parse::<EntryKind>().unwrap(), EntryKind::SideQuest);
        assert!("poem".parse::<EntryKind>().is_err());
    }

    #[test]
    fn test_entry_kind_serde_uses_camel_case() {
        let json = serde_json::to_string(&EntryKind::SideQuest).unwrap();
        assert_eq!(json, "\"sideQuest\"");
    }

    #[test]
    fn test_title_prefers_payload() {
        let content = StructuredContent::new().with_title("Growth");
        assert_eq!(resolve_title(Some(&content), "Reflecting"), "Growth");
    }

    #[test]
    fn test_title_falls_back_to_prompt() {
        let content = StructuredContent::new().with_summary("no title here");
        assert_eq!(resolve_title(Some(&content), "Reflecting"), "Reflecting");
        assert_eq!(resolve_title(None, "Reflecting"), "Reflecting");
    }

    #[test]
    fn test_title_truncates_long_prompt() {
        let prompt = "x".repeat(60);
        let title = resolve_title(None, &prompt);
        assert_eq!(title, format!("{}...", "x".repeat(50)));

        let exact = "y".repeat(50);
        assert_eq!(resolve_title(None, &exact), exact);
    }

    #[test]
    fn test_title_truncation_respects_char_boundaries() {
        let prompt = "é".repeat(55);
        let title = resolve_title(None, &prompt);
        assert_eq!(title.chars().count(), 53);
        assert!(title.ends_with("..."));
    }

    #[test]
    fn test_title_untitled_when_empty() {
        assert_eq!(resolve_title(None, ""), UNTITLED_ENTRY);
        assert_eq!(resolve_title(None, "   "), UNTITLED_ENTRY);
    }

    #[test]
    fn test_kind_precedence() {
        let payload = StructuredContent::new().with_kind(EntryKind::Story);
        assert_eq!(
            resolve_kind(Some(&payload), Some(EntryKind::Action)),
            EntryKind::Story
        );
        assert_eq!(resolve_kind(None, Some(EntryKind::Action)), EntryKind::Action);
        assert_eq!(resolve_kind(None, None), EntryKind::Journal);

        let unknown = StructuredContent::new().with_field("type", "poem");
        assert_eq!(
            resolve_kind(Some(&unknown), Some(EntryKind::SideQuest)),
            EntryKind::SideQuest
        );
    }

    #[test]
    fn test_entry_view_from_structured_plaintext() {
        let entry = stored("Reflecting", Some(EntryKind::Story));
        let text = codec::serialize(
            &StructuredContent::new()
                .with_title("Growth")
                .with_summary("I felt calmer today.")
                .with_kind(EntryKind::Journal),
        );

        let view = EntryView::from_plaintext(&entry, text);

        assert_eq!(view.title, "Growth");
        assert_eq!(view.kind, EntryKind::Journal);
        assert_eq!(view.preview, "I felt calmer today.");
        assert!(view.structured.is_some());
    }

    #[test]
    fn test_entry_view_from_plain_text() {
        let entry = stored("", None);
        let view = EntryView::from_plaintext(&entry, "Just some words".to_string());

        assert_eq!(view.title, UNTITLED_ENTRY);
        assert_eq!(view.kind, EntryKind::Journal);
        assert_eq!(view.preview, "Just some words");
        assert!(view.structured.is_none());
    }

    #[test]
    fn test_subscription_is_premium() {
        let now = Utc::now();
        assert!(!Subscription::free().is_premium(now));
        assert!(Subscription::premium(None).is_premium(now));
        assert!(Subscription::premium(Some(now + Duration::days(1))).is_premium(now));
        assert!(!Subscription::premium(Some(now - Duration::days(1))).is_premium(now));
    }

    #[test]
    fn test_new_profile_defaults() {
        let profile = Profile::new("u1");
        assert!(!profile.onboarding_completed);
        assert_eq!(profile.subscription.tier, SubscriptionTier::Free);
        assert!(profile.display_name.is_none());
    }

    #[test]
    fn test_entry_filter_builder() {
        let now = Utc::now();
        let filter = EntryFilter::new().since(now).limit(10);

        assert_eq!(filter.since, Some(now));
        assert_eq!(filter.limit, Some(10));
        assert!(filter.until.is_none());
    }
}
