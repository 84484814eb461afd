//! Storage trait definition.
//!
//! The `JournalStore` trait is the seam between the journal service and the
//! relational table rows it persists. Stores see only ciphertext for entry
//! content and mood notes; encryption happens in the service above them.

use std::sync::Arc;

use uuid::Uuid;

use super::types::{
    EntryFilter, EntryPatch, JournalEntry, MoodEntry, NewEntry, NewMoodEntry, Profile,
};
use crate::error::Result;

/// Storage interface for journal entries, moods and profiles.
///
/// All implementations must ensure:
/// - Every read and write is scoped by `user_id`
/// - Entry `id` and `created_at` are assigned on insert and never change
/// - Updates replace content and only patch prompt/type when given
pub trait JournalStore: Send + Sync {
    // --- Entry operations ---

    /// Insert a new entry.
    ///
    /// # Returns
    ///
    /// Returns the stored entry with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::Validation` if the user id is blank or the
    /// content exceeds the store's size limit.
    fn insert_entry(&self, entry: &NewEntry) -> Result<JournalEntry>;

    /// Get an entry by ID.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(entry))` if found for this user, `Ok(None)` otherwise.
    fn get_entry(&self, user_id: &str, id: &Uuid) -> Result<Option<JournalEntry>>;

    /// List a user's entries matching the filter.
    ///
    /// Entries are returned in reverse chronological order (newest first).
    fn list_entries(&self, user_id: &str, filter: &EntryFilter) -> Result<Vec<JournalEntry>>;

    /// Replace an entry's content, optionally patching prompt and type.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(entry))` with the updated row, `Ok(None)` if no such
    /// entry exists for this user.
    fn update_entry(
        &self,
        user_id: &str,
        id: &Uuid,
        patch: &EntryPatch,
    ) -> Result<Option<JournalEntry>>;

    /// Delete an entry.
    ///
    /// # Returns
    ///
    /// Returns `true` if a row was removed.
    fn delete_entry(&self, user_id: &str, id: &Uuid) -> Result<bool>;

    // --- Mood operations ---

    /// Record a mood.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::Validation` if the label is empty or the
    /// intensity is outside 1..=10.
    fn insert_mood(&self, mood: &NewMoodEntry) -> Result<MoodEntry>;

    /// List a user's moods, newest first.
    fn list_moods(&self, user_id: &str, limit: Option<usize>) -> Result<Vec<MoodEntry>>;

    // --- Profile operations ---

    /// Get a user's profile.
    fn get_profile(&self, user_id: &str) -> Result<Option<Profile>>;

    /// Insert or replace a user's profile.
    fn upsert_profile(&self, profile: &Profile) -> Result<()>;
}

/// Shared stores: the journal and profile services can hold the same backend.
impl<T: JournalStore + ?Sized> JournalStore for Arc<T> {
    fn insert_entry(&self, entry: &NewEntry) -> Result<JournalEntry> {
        (**self).insert_entry(entry)
    }

    fn get_entry(&self, user_id: &str, id: &Uuid) -> Result<Option<JournalEntry>> {
        (**self).get_entry(user_id, id)
    }

    fn list_entries(&self, user_id: &str, filter: &EntryFilter) -> Result<Vec<JournalEntry>> {
        (**self).list_entries(user_id, filter)
    }

    fn update_entry(
        &self,
        user_id: &str,
        id: &Uuid,
        patch: &EntryPatch,
    ) -> Result<Option<JournalEntry>> {
        (**self).update_entry(user_id, id, patch)
    }

    fn delete_entry(&self, user_id: &str, id: &Uuid) -> Result<bool> {
        (**self).delete_entry(user_id, id)
    }

    fn insert_mood(&self, mood: &NewMoodEntry) -> Result<MoodEntry> {
        (**self).insert_mood(mood)
    }

    fn list_moods(&self, user_id: &str, limit: Option<usize>) -> Result<Vec<MoodEntry>> {
        (**self).list_moods(user_id, limit)
    }

    fn get_profile(&self, user_id: &str) -> Result<Option<Profile>> {
        (**self).get_profile(user_id)
    }

    fn upsert_profile(&self, profile: &Profile) -> Result<()> {
        (**self).upsert_profile(profile)
    }
}
