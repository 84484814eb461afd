//! Journal service: entry and mood CRUD over a [`JournalStore`].
//!
//! Writes serialize the entry body (prose or fenced JSON) and encrypt it for
//! the owning user before it reaches the store. Reads decrypt, falling back to
//! the stored text when it cannot be decrypted, and resolve title, type and
//! preview through the content codec.

use tracing::debug;
use uuid::Uuid;

use crate::crypto::ContentCipher;
use crate::error::{JournalError, Result};
use crate::storage::{
    EntryDraft, EntryFilter, EntryKind, EntryPatch, EntryUpdate, EntryView, JournalEntry,
    JournalStore, MoodEntry, NewEntry, NewMoodEntry,
};

/// Encrypted journal over a store.
pub struct Journal<S: JournalStore> {
    store: S,
    cipher: ContentCipher,
}

impl<S: JournalStore> Journal<S> {
    /// Journal using the default content namespace.
    pub fn new(store: S) -> Self {
        Self::with_cipher(store, ContentCipher::new())
    }

    pub fn with_cipher(store: S, cipher: ContentCipher) -> Self {
        Self { store, cipher }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cipher(&self) -> &ContentCipher {
        &self.cipher
    }

    /// Save a new entry for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::MissingUserId` for a blank user id, or a store
    /// error if the insert fails.
    pub fn save_entry(&self, user_id: &str, draft: &EntryDraft) -> Result<EntryView> {
        require_user(user_id)?;
        let plaintext = draft.body.to_plaintext();
        let content = self.cipher.encrypt(&plaintext, user_id)?;
        let mut entry = NewEntry::new(user_id, &draft.prompt, content, draft.kind);
        entry.created_at = draft.created_at;
        let stored = self.store.insert_entry(&entry)?;
        debug!(entry_id = %stored.id, kind = %draft.kind, "saved journal entry");
        Ok(EntryView::from_plaintext(&stored, plaintext))
    }

    /// Fetch a user's entries, newest first.
    ///
    /// When `kind` is given, entries are matched on their resolved type
    /// (payload `type` wins over the stored column), so the store is asked for
    /// the unlimited list and the limit is applied after matching.
    pub fn fetch_entries(
        &self,
        user_id: &str,
        filter: &EntryFilter,
        kind: Option<EntryKind>,
    ) -> Result<Vec<EntryView>> {
        require_user(user_id)?;
        let mut store_filter = filter.clone();
        if kind.is_some() {
            store_filter.limit = None;
        }

        let entries = self.store.list_entries(user_id, &store_filter)?;
        let mut views = Vec::with_capacity(entries.len());
        for entry in &entries {
            if filter.limit.is_some_and(|limit| views.len() >= limit) {
                break;
            }
            let view = self.view(user_id, entry)?;
            if kind.map_or(true, |wanted| view.kind == wanted) {
                views.push(view);
            }
        }
        Ok(views)
    }

    /// Get one entry, or `None` if this user has no such entry.
    pub fn get_entry(&self, user_id: &str, id: &Uuid) -> Result<Option<EntryView>> {
        require_user(user_id)?;
        self.store
            .get_entry(user_id, id)?
            .map(|entry| self.view(user_id, &entry))
            .transpose()
    }

    /// Get one entry, failing with `JournalError::EntryNotFound` if missing.
    pub fn require_entry(&self, user_id: &str, id: &Uuid) -> Result<EntryView> {
        self.get_entry(user_id, id)?
            .ok_or(JournalError::EntryNotFound(*id))
    }

    /// Replace an entry's content, optionally patching prompt and type.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::EntryNotFound` if this user has no such entry.
    pub fn update_entry(&self, user_id: &str, id: &Uuid, update: &EntryUpdate) -> Result<EntryView> {
        require_user(user_id)?;
        let plaintext = update.body.to_plaintext();
        let patch = EntryPatch {
            content: self.cipher.encrypt(&plaintext, user_id)?,
            prompt: update.prompt.clone(),
            kind: update.kind,
        };

        let updated = self
            .store
            .update_entry(user_id, id, &patch)?
            .ok_or(JournalError::EntryNotFound(*id))?;
        debug!(entry_id = %id, "updated journal entry");
        Ok(EntryView::from_plaintext(&updated, plaintext))
    }

    /// Delete an entry.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::EntryNotFound` if this user has no such entry.
    pub fn delete_entry(&self, user_id: &str, id: &Uuid) -> Result<()> {
        require_user(user_id)?;
        if !self.store.delete_entry(user_id, id)? {
            return Err(JournalError::EntryNotFound(*id));
        }
        debug!(entry_id = %id, "deleted journal entry");
        Ok(())
    }

    /// Record a mood. The note is encrypted like entry content.
    pub fn record_mood(&self, mood: &NewMoodEntry) -> Result<MoodEntry> {
        require_user(&mood.user_id)?;
        let mut encrypted = mood.clone();
        encrypted.note = mood
            .note
            .as_deref()
            .map(|note| self.cipher.encrypt(note, &mood.user_id))
            .transpose()?;

        let mut stored = self.store.insert_mood(&encrypted)?;
        stored.note = mood.note.clone();
        Ok(stored)
    }

    /// List a user's moods, newest first, with notes decrypted.
    pub fn list_moods(&self, user_id: &str, limit: Option<usize>) -> Result<Vec<MoodEntry>> {
        require_user(user_id)?;
        let mut moods = self.store.list_moods(user_id, limit)?;
        for mood in &mut moods {
            if let Some(note) = mood.note.take() {
                mood.note = Some(self.cipher.decrypt(&note, user_id)?);
            }
        }
        Ok(moods)
    }

    fn view(&self, user_id: &str, entry: &JournalEntry) -> Result<EntryView> {
        let text = self.cipher.decrypt(&entry.content, user_id)?;
        Ok(EntryView::from_plaintext(entry, text))
    }
}

fn require_user(user_id: &str) -> Result<()> {
    if user_id.trim().is_empty() {
        return Err(JournalError::MissingUserId);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::StructuredContent;
    use crate::storage::{EntryBody, SqliteStore};

    fn journal() -> Journal<SqliteStore> {
        Journal::new(SqliteStore::open_in_memory().unwrap())
    }

    #[test]
    fn test_save_encrypts_content() {
        let journal = journal();
        let view = journal
            .save_entry(
                "u1",
                &EntryDraft::text("Morning", "I slept well.", EntryKind::Journal),
            )
            .unwrap();

        let stored = journal.store().get_entry("u1", &view.id).unwrap().unwrap();
        assert!(!stored.content.contains("slept well"));
        assert!(ContentCipher::is_envelope(&stored.content));
        assert_eq!(view.preview, "I slept well.");
        assert_eq!(view.title, "Morning");
    }

    #[test]
    fn test_fetch_decrypts_entries() {
        let journal = journal();
        journal
            .save_entry("u1", &EntryDraft::text("", "first", EntryKind::Journal))
            .unwrap();
        journal
            .save_entry("u1", &EntryDraft::text("", "second", EntryKind::Story))
            .unwrap();

        let views = journal
            .fetch_entries("u1", &EntryFilter::new(), None)
            .unwrap();
        let texts: Vec<_> = views.iter().map(|v| v.text.as_str()).collect();
        assert_eq!(texts.len(), 2);
        assert!(texts.contains(&"first"));
        assert!(texts.contains(&"second"));
    }

    #[test]
    fn test_fetch_filters_on_resolved_kind() {
        let journal = journal();
        // Column says journal, payload says action: payload wins.
        let payload = StructuredContent::new()
            .with_title("Push-ups")
            .with_kind(EntryKind::Action);
        journal
            .save_entry("u1", &EntryDraft::structured("", payload, EntryKind::Journal))
            .unwrap();
        journal
            .save_entry("u1", &EntryDraft::text("", "plain", EntryKind::Journal))
            .unwrap();

        let actions = journal
            .fetch_entries("u1", &EntryFilter::new().limit(5), Some(EntryKind::Action))
            .unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].title, "Push-ups");

        let journals = journal
            .fetch_entries("u1", &EntryFilter::new(), Some(EntryKind::Journal))
            .unwrap();
        assert_eq!(journals.len(), 1);
        assert_eq!(journals[0].text, "plain");
    }

    #[test]
    fn test_legacy_plaintext_rows_are_readable() {
        let journal = journal();
        let legacy = journal
            .store()
            .insert_entry(&NewEntry::new(
                "u1",
                "Old prompt",
                "written before encryption",
                EntryKind::Journal,
            ))
            .unwrap();

        let view = journal.require_entry("u1", &legacy.id).unwrap();
        assert_eq!(view.text, "written before encryption");
        assert_eq!(view.preview, "written before encryption");
    }

    #[test]
    fn test_update_replaces_content() {
        let journal = journal();
        let saved = journal
            .save_entry("u1", &EntryDraft::text("Prompt", "before", EntryKind::Journal))
            .unwrap();

        let updated = journal
            .update_entry(
                "u1",
                &saved.id,
                &EntryUpdate::new(EntryBody::Text("after".to_string())).with_kind(EntryKind::Story),
            )
            .unwrap();

        assert_eq!(updated.text, "after");
        assert_eq!(updated.kind, EntryKind::Story);
        assert_eq!(updated.prompt, "Prompt");
        assert_eq!(updated.created_at, saved.created_at);

        let fetched = journal.require_entry("u1", &saved.id).unwrap();
        assert_eq!(fetched.text, "after");
    }

    #[test]
    fn test_update_and_delete_missing_entry() {
        let journal = journal();
        let id = Uuid::new_v4();

        let update = EntryUpdate::new(EntryBody::Text("x".to_string()));
        assert!(matches!(
            journal.update_entry("u1", &id, &update),
            Err(JournalError::EntryNotFound(missing)) if missing == id
        ));
        assert!(matches!(
            journal.delete_entry("u1", &id),
            Err(JournalError::EntryNotFound(_))
        ));
    }

    #[test]
    fn test_other_user_cannot_see_entry() {
        let journal = journal();
        let saved = journal
            .save_entry("u1", &EntryDraft::text("", "mine", EntryKind::Journal))
            .unwrap();

        assert!(journal.get_entry("u2", &saved.id).unwrap().is_none());
        assert!(journal.delete_entry("u2", &saved.id).is_err());
    }

    #[test]
    fn test_blank_user_is_rejected() {
        let journal = journal();
        let result = journal.save_entry("", &EntryDraft::text("", "x", EntryKind::Journal));
        assert!(matches!(result, Err(JournalError::MissingUserId)));
        assert!(matches!(
            journal.fetch_entries(" ", &EntryFilter::new(), None),
            Err(JournalError::MissingUserId)
        ));
    }

    #[test]
    fn test_mood_notes_are_encrypted() {
        let journal = journal();
        let recorded = journal
            .record_mood(&NewMoodEntry::new("u1", "calm", 7).with_note("after a long walk"))
            .unwrap();
        assert_eq!(recorded.note.as_deref(), Some("after a long walk"));

        let raw = journal.store().list_moods("u1", None).unwrap();
        assert!(!raw[0]
            .note
            .as_deref()
            .unwrap_or_default()
            .contains("long walk"));

        let moods = journal.list_moods("u1", None).unwrap();
        assert_eq!(moods[0].note.as_deref(), Some("after a long walk"));
    }
}
