//! Row types for database queries.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{JournalError, Result};
use crate::storage::types::{
    JournalEntry, MoodEntry, Profile, Subscription, SubscriptionTier,
};

/// Raw row data from the journal_entries table, before parsing into domain types.
#[derive(Debug)]
pub struct EntryRow {
    pub id: String,
    pub user_id: String,
    pub prompt: String,
    pub content: String,
    pub kind: Option<String>,
    pub created_at: String,
}

impl EntryRow {
    pub const COLUMNS: &'static str = "id, user_id, prompt, content, type, created_at";

    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            prompt: row.get(2)?,
            content: row.get(3)?,
            kind: row.get(4)?,
            created_at: row.get(5)?,
        })
    }
}

impl TryFrom<EntryRow> for JournalEntry {
    type Error = JournalError;

    fn try_from(row: EntryRow) -> Result<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| JournalError::Storage(format!("Invalid entry UUID: {}", e)))?;
        let created_at = parse_timestamp(&row.created_at)?;
        // Unknown type names degrade to "no column value" so resolution falls through.
        let kind = row.kind.as_deref().and_then(|value| value.parse().ok());

        Ok(JournalEntry {
            id,
            user_id: row.user_id,
            prompt: row.prompt,
            content: row.content,
            kind,
            created_at,
        })
    }
}

/// Raw row data from the mood_entries table.
#[derive(Debug)]
pub struct MoodRow {
    pub id: String,
    pub user_id: String,
    pub mood: String,
    pub intensity: i64,
    pub note: Option<String>,
    pub created_at: String,
}

impl MoodRow {
    pub const COLUMNS: &'static str = "id, user_id, mood, intensity, note, created_at";

    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            mood: row.get(2)?,
            intensity: row.get(3)?,
            note: row.get(4)?,
            created_at: row.get(5)?,
        })
    }
}

impl TryFrom<MoodRow> for MoodEntry {
    type Error = JournalError;

    fn try_from(row: MoodRow) -> Result<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| JournalError::Storage(format!("Invalid mood UUID: {}", e)))?;
        let intensity = u8::try_from(row.intensity)
            .map_err(|e| JournalError::Storage(format!("Invalid mood intensity: {}", e)))?;

        Ok(MoodEntry {
            id,
            user_id: row.user_id,
            mood: row.mood,
            intensity,
            note: row.note,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

/// Raw row data from the profiles table.
#[derive(Debug)]
pub struct ProfileRow {
    pub user_id: String,
    pub display_name: Option<String>,
    pub onboarding_completed: bool,
    pub subscription_tier: String,
    pub subscription_active_until: Option<String>,
    pub updated_at: String,
}

impl ProfileRow {
    pub const COLUMNS: &'static str = "user_id, display_name, onboarding_completed, \
        subscription_tier, subscription_active_until, updated_at";

    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            user_id: row.get(0)?,
            display_name: row.get(1)?,
            onboarding_completed: row.get(2)?,
            subscription_tier: row.get(3)?,
            subscription_active_until: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }
}

impl TryFrom<ProfileRow> for Profile {
    type Error = JournalError;

    fn try_from(row: ProfileRow) -> Result<Self> {
        let tier: SubscriptionTier = row
            .subscription_tier
            .parse()
            .map_err(|e| JournalError::Storage(format!("Invalid subscription tier: {}", e)))?;
        let active_until = row
            .subscription_active_until
            .as_deref()
            .map(parse_timestamp)
            .transpose()?;

        Ok(Profile {
            user_id: row.user_id,
            display_name: row.display_name,
            onboarding_completed: row.onboarding_completed,
            subscription: Subscription { tier, active_until },
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)
        .map_err(|e| JournalError::Storage(format!("Invalid timestamp: {}", e)))?
        .with_timezone(&Utc))
}
