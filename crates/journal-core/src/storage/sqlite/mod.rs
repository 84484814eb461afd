//! SQLite storage backend.
//!
//! Tables mirror the hosted store's rows (`id, user_id, prompt, content,
//! type, created_at` for entries). Timestamps are stored as fixed-width
//! RFC 3339 strings (microseconds, `Z`) so they sort lexicographically.

mod row;
mod validation;

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension};
use tracing::debug;
use uuid::Uuid;

use crate::error::{JournalError, Result};
use crate::storage::traits::JournalStore;
use crate::storage::types::{
    EntryFilter, EntryPatch, JournalEntry, MoodEntry, NewEntry, NewMoodEntry, Profile,
};

use row::{EntryRow, MoodRow, ProfileRow};
pub use validation::{MAX_CONTENT_BYTES, MOOD_INTENSITY_RANGE};
use validation::{normalize_mood, validate_content, validate_user_id};

const FORMAT_VERSION: &str = "1";

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS meta (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS journal_entries (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        prompt TEXT NOT NULL DEFAULT '',
        content TEXT NOT NULL,
        type TEXT,
        created_at TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS journal_entries_user_created
    ON journal_entries (user_id, created_at);

    CREATE TABLE IF NOT EXISTS mood_entries (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        mood TEXT NOT NULL,
        intensity INTEGER NOT NULL,
        note TEXT,
        created_at TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS mood_entries_user_created
    ON mood_entries (user_id, created_at);

    CREATE TABLE IF NOT EXISTS profiles (
        user_id TEXT PRIMARY KEY,
        display_name TEXT,
        onboarding_completed INTEGER NOT NULL DEFAULT 0,
        subscription_tier TEXT NOT NULL DEFAULT 'free',
        subscription_active_until TEXT,
        updated_at TEXT NOT NULL
    );
"#;

/// SQLite-backed journal store.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a store at `path`, creating parent directories.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        debug!(path = %path.display(), "opening journal store");
        Self::init(Connection::open(path)?)
    }

    /// Open a private in-memory store.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        conn.execute(
            "INSERT OR IGNORE INTO meta (key, value) VALUES ('format_version', ?)",
            [FORMAT_VERSION],
        )?;
        conn.execute(
            "INSERT OR IGNORE INTO meta (key, value) VALUES ('created_at', ?)",
            [timestamp(Utc::now())],
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| JournalError::Storage("SQLite connection poisoned".to_string()))
    }

    /// Format version recorded when the store was created.
    pub fn format_version(&self) -> Result<String> {
        let conn = self.lock_conn()?;
        let version = conn.query_row(
            "SELECT value FROM meta WHERE key = 'format_version'",
            [],
            |row| row.get(0),
        )?;
        Ok(version)
    }

    /// Run SQLite's integrity check.
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` if the database is valid, or an error describing the problem.
    pub fn check_integrity(&self) -> Result<()> {
        let conn = self.lock_conn()?;
        let result: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        if result != "ok" {
            return Err(JournalError::Storage(format!(
                "Integrity check failed: {}",
                result
            )));
        }
        Ok(())
    }

    fn select_entry(conn: &Connection, user_id: &str, id: &Uuid) -> Result<Option<JournalEntry>> {
        let query = format!(
            "SELECT {} FROM journal_entries WHERE id = ? AND user_id = ?",
            EntryRow::COLUMNS
        );
        let row = conn
            .query_row(&query, (id.to_string(), user_id), EntryRow::from_row)
            .optional()?;
        row.map(JournalEntry::try_from).transpose()
    }
}

/// Fixed-width RFC 3339 timestamp.
fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

impl JournalStore for SqliteStore {
    fn insert_entry(&self, entry: &NewEntry) -> Result<JournalEntry> {
        validate_user_id(&entry.user_id)?;
        validate_content(&entry.content)?;

        let conn = self.lock_conn()?;
        let id = Uuid::new_v4();
        let created_at_str = timestamp(entry.created_at.unwrap_or_else(Utc::now));

        conn.execute(
            r#"
            INSERT INTO journal_entries (id, user_id, prompt, content, type, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            (
                id.to_string(),
                &entry.user_id,
                &entry.prompt,
                &entry.content,
                entry.kind.as_str(),
                &created_at_str,
            ),
        )?;

        Self::select_entry(&conn, &entry.user_id, &id)?
            .ok_or_else(|| JournalError::Storage("Inserted entry not readable".to_string()))
    }

    fn get_entry(&self, user_id: &str, id: &Uuid) -> Result<Option<JournalEntry>> {
        let conn = self.lock_conn()?;
        Self::select_entry(&conn, user_id, id)
    }

    fn list_entries(&self, user_id: &str, filter: &EntryFilter) -> Result<Vec<JournalEntry>> {
        let conn = self.lock_conn()?;

        let mut conditions: Vec<&str> = vec!["user_id = ?"];
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(user_id.to_string())];

        if let Some(since) = filter.since {
            conditions.push("created_at >= ?");
            params.push(Box::new(timestamp(since)));
        }

        if let Some(until) = filter.until {
            conditions.push("created_at <= ?");
            params.push(Box::new(timestamp(until)));
        }

        let mut query = format!(
            "SELECT {} FROM journal_entries WHERE {} ORDER BY created_at DESC, rowid DESC",
            EntryRow::COLUMNS,
            conditions.join(" AND ")
        );

        if let Some(limit) = filter.limit {
            query.push_str(" LIMIT ?");
            params.push(Box::new(limit as i64));
        }

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map(
            rusqlite::params_from_iter(params.iter()),
            EntryRow::from_row,
        )?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?.try_into()?);
        }
        Ok(entries)
    }

    fn update_entry(
        &self,
        user_id: &str,
        id: &Uuid,
        patch: &EntryPatch,
    ) -> Result<Option<JournalEntry>> {
        validate_content(&patch.content)?;

        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let changed = tx.execute(
            r#"
            UPDATE journal_entries
            SET content = ?,
                prompt = COALESCE(?, prompt),
                type = COALESCE(?, type)
            WHERE id = ? AND user_id = ?
            "#,
            (
                &patch.content,
                patch.prompt.as_deref(),
                patch.kind.map(|kind| kind.as_str()),
                id.to_string(),
                user_id,
            ),
        )?;
        if changed == 0 {
            return Ok(None);
        }

        let updated = Self::select_entry(&tx, user_id, id)?;
        tx.commit()?;
        Ok(updated)
    }

    fn delete_entry(&self, user_id: &str, id: &Uuid) -> Result<bool> {
        let conn = self.lock_conn()?;
        let removed = conn.execute(
            "DELETE FROM journal_entries WHERE id = ? AND user_id = ?",
            (id.to_string(), user_id),
        )?;
        Ok(removed > 0)
    }

    fn insert_mood(&self, mood: &NewMoodEntry) -> Result<MoodEntry> {
        validate_user_id(&mood.user_id)?;
        let label = normalize_mood(&mood.mood, mood.intensity)?;

        let conn = self.lock_conn()?;
        let id = Uuid::new_v4();
        let created_at = mood.created_at.unwrap_or_else(Utc::now);

        conn.execute(
            r#"
            INSERT INTO mood_entries (id, user_id, mood, intensity, note, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            (
                id.to_string(),
                &mood.user_id,
                &label,
                i64::from(mood.intensity),
                mood.note.as_deref(),
                timestamp(created_at),
            ),
        )?;

        let query = format!(
            "SELECT {} FROM mood_entries WHERE id = ?",
            MoodRow::COLUMNS
        );
        let row = conn.query_row(&query, [id.to_string()], MoodRow::from_row)?;
        row.try_into()
    }

    fn list_moods(&self, user_id: &str, limit: Option<usize>) -> Result<Vec<MoodEntry>> {
        let conn = self.lock_conn()?;

        let query = format!(
            "SELECT {} FROM mood_entries WHERE user_id = ? ORDER BY created_at DESC, rowid DESC LIMIT ?",
            MoodRow::COLUMNS
        );
        // SQLite treats a negative LIMIT as "no limit".
        let limit = limit.map(|value| value as i64).unwrap_or(-1);

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map((user_id, limit), MoodRow::from_row)?;

        let mut moods = Vec::new();
        for row in rows {
            moods.push(row?.try_into()?);
        }
        Ok(moods)
    }

    fn get_profile(&self, user_id: &str) -> Result<Option<Profile>> {
        let conn = self.lock_conn()?;
        let query = format!(
            "SELECT {} FROM profiles WHERE user_id = ?",
            ProfileRow::COLUMNS
        );
        let row = conn
            .query_row(&query, [user_id], ProfileRow::from_row)
            .optional()?;
        row.map(Profile::try_from).transpose()
    }

    fn upsert_profile(&self, profile: &Profile) -> Result<()> {
        validate_user_id(&profile.user_id)?;

        let conn = self.lock_conn()?;
        conn.execute(
            r#"
            INSERT INTO profiles (
                user_id,
                display_name,
                onboarding_completed,
                subscription_tier,
                subscription_active_until,
                updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                display_name = excluded.display_name,
                onboarding_completed = excluded.onboarding_completed,
                subscription_tier = excluded.subscription_tier,
                subscription_active_until = excluded.subscription_active_until,
                updated_at = excluded.updated_at
            "#,
            (
                &profile.user_id,
                profile.display_name.as_deref(),
                profile.onboarding_completed,
                profile.subscription.tier.as_str(),
                profile.subscription.active_until.map(timestamp),
                timestamp(profile.updated_at),
            ),
        )?;
        Ok(())
    }
}
