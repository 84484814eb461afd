//! JSON output formatting.

use chrono::Utc;
use journal_core::storage::{EntryView, MoodEntry, Profile};

/// Convert an entry to JSON for output.
pub fn entry_json(entry: &EntryView) -> serde_json::Value {
    serde_json::json!({
        "id": entry.id,
        "type": entry.kind,
        "title": entry.title,
        "prompt": entry.prompt,
        "preview": entry.preview,
        "text": entry.text,
        "structured": entry.structured,
        "created_at": entry.created_at,
    })
}

/// Convert multiple entries to JSON array for output.
pub fn entries_json(entries: &[EntryView]) -> Vec<serde_json::Value> {
    entries.iter().map(entry_json).collect()
}

pub fn moods_json(moods: &[MoodEntry]) -> Vec<serde_json::Value> {
    moods
        .iter()
        .map(|mood| {
            serde_json::json!({
                "id": mood.id,
                "mood": mood.mood,
                "intensity": mood.intensity,
                "note": mood.note,
                "created_at": mood.created_at,
            })
        })
        .collect()
}

pub fn profile_json(profile: &Profile) -> serde_json::Value {
    serde_json::json!({
        "user_id": profile.user_id,
        "display_name": profile.display_name,
        "onboarding_completed": profile.onboarding_completed,
        "subscription": {
            "tier": profile.subscription.tier,
            "active_until": profile.subscription.active_until,
            "premium": profile.subscription.is_premium(Utc::now()),
        },
        "updated_at": profile.updated_at,
    })
}
