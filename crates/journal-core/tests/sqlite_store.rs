use chrono::{Duration, Utc};
use journal_core::storage::{
    EntryBody, EntryDraft, EntryFilter, EntryKind, EntryUpdate, NewMoodEntry,
};
use journal_core::{Journal, SqliteStore};
use tempfile::TempDir;

#[test]
fn test_entries_survive_reopen() {
    let dir = TempDir::new().expect("temp dir should be created");
    let path = dir.path().join("nested").join("journal.db");

    let id = {
        let journal = Journal::new(SqliteStore::open(&path).expect("open should succeed"));
        journal
            .save_entry("u1", &EntryDraft::text("Evening", "A quiet walk.", EntryKind::Journal))
            .expect("save should succeed")
            .id
    };
    assert!(path.exists());

    let journal = Journal::new(SqliteStore::open(&path).expect("reopen should succeed"));
    let view = journal
        .require_entry("u1", &id)
        .expect("entry should survive reopen");
    assert_eq!(view.text, "A quiet walk.");
    assert_eq!(view.title, "Evening");
    assert_eq!(journal.store().format_version().expect("meta"), "1");
    journal.store().check_integrity().expect("integrity check");
}

#[test]
fn test_edit_then_delete() {
    let dir = TempDir::new().expect("temp dir should be created");
    let journal = Journal::new(
        SqliteStore::open(&dir.path().join("journal.db")).expect("open should succeed"),
    );

    let saved = journal
        .save_entry("u1", &EntryDraft::text("", "draft", EntryKind::Story))
        .expect("save should succeed");
    let edited = journal
        .update_entry(
            "u1",
            &saved.id,
            &EntryUpdate::new(EntryBody::Text("final".to_string())).with_prompt("Once upon"),
        )
        .expect("update should succeed");
    assert_eq!(edited.text, "final");
    assert_eq!(edited.title, "Once upon");
    assert_eq!(edited.kind, EntryKind::Story);

    journal
        .delete_entry("u1", &saved.id)
        .expect("delete should succeed");
    assert!(journal
        .get_entry("u1", &saved.id)
        .expect("get should succeed")
        .is_none());
}

#[test]
fn test_since_filter_and_moods() {
    let dir = TempDir::new().expect("temp dir should be created");
    let store = SqliteStore::open(&dir.path().join("journal.db")).expect("open should succeed");
    let journal = Journal::new(store);

    let week_ago = Utc::now() - Duration::days(7);
    journal
        .save_entry("u1", &EntryDraft::text("", "today", EntryKind::Journal))
        .expect("save should succeed");

    let recent = journal
        .fetch_entries("u1", &EntryFilter::new().since(week_ago), None)
        .expect("fetch should succeed");
    assert_eq!(recent.len(), 1);

    let future = journal
        .fetch_entries(
            "u1",
            &EntryFilter::new().since(Utc::now() + Duration::days(1)),
            None,
        )
        .expect("fetch should succeed");
    assert!(future.is_empty());

    journal
        .record_mood(&NewMoodEntry::new("u1", "Hopeful", 8).with_note("new job"))
        .expect("mood should be recorded");
    let moods = journal.list_moods("u1", Some(10)).expect("list moods");
    assert_eq!(moods.len(), 1);
    assert_eq!(moods[0].mood, "hopeful");
    assert_eq!(moods[0].note.as_deref(), Some("new job"));
}
