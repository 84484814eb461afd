use journal_core::codec::{self, StructuredContent};
use journal_core::storage::{EntryDraft, EntryFilter, EntryKind, JournalStore};
use journal_core::{Journal, SqliteStore};

fn growth_entry() -> EntryDraft {
    let content = StructuredContent::new()
        .with_title("Growth")
        .with_summary("I felt calmer today.")
        .with_kind(EntryKind::Journal);
    EntryDraft::structured("Reflecting", content, EntryKind::Journal)
}

#[test]
fn test_structured_entry_is_encrypted_and_previewed() {
    let journal = Journal::new(SqliteStore::open_in_memory().expect("open should succeed"));

    let saved = journal
        .save_entry("u1", &growth_entry())
        .expect("save should succeed");

    let stored = journal
        .store()
        .get_entry("u1", &saved.id)
        .expect("get should succeed")
        .expect("entry should exist");
    assert!(!stored.content.contains("I felt calmer"));

    let views = journal
        .fetch_entries("u1", &EntryFilter::new(), None)
        .expect("fetch should succeed");
    assert_eq!(views.len(), 1);

    let view = &views[0];
    assert!(view.text.contains("```json"));
    assert_eq!(view.preview, "I felt calmer today.");
    assert_eq!(view.title, "Growth");
    assert_eq!(view.kind, EntryKind::Journal);
    assert_eq!(codec::parse(&view.text).as_ref(), view.structured.as_ref());
}

#[test]
fn test_other_user_sees_ciphertext_not_plaintext() {
    let journal = Journal::new(SqliteStore::open_in_memory().expect("open should succeed"));
    let saved = journal
        .save_entry("u1", &growth_entry())
        .expect("save should succeed");
    let stored = journal
        .store()
        .get_entry("u1", &saved.id)
        .expect("get should succeed")
        .expect("entry should exist");

    // Decrypting with the wrong user fails open to the stored text.
    let attempted = journal
        .cipher()
        .decrypt(&stored.content, "u2")
        .expect("decrypt should not error");
    assert_eq!(attempted, stored.content);
    assert_eq!(codec::preview(&attempted), attempted);
}
