//! Storage abstractions and the SQLite backend.

pub mod sqlite;
pub mod traits;
pub mod types;

pub use sqlite::SqliteStore;
pub use traits::JournalStore;
pub use types::{
    resolve_kind, resolve_title, EntryBody, EntryDraft, EntryFilter, EntryKind, EntryPatch,
    EntryUpdate, EntryView, JournalEntry, MoodEntry, NewEntry, NewMoodEntry, Profile,
    Subscription, SubscriptionTier, UNTITLED_ENTRY,
};
