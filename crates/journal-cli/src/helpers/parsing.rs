//! Parsing helpers for datetime, duration, entry types and output format.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use journal_core::storage::EntryKind;
use serde_json::Value;
use uuid::Uuid;

/// Parse a datetime string (ISO-8601 or YYYY-MM-DD).
pub fn parse_datetime(value: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let naive = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| anyhow::anyhow!("Invalid date value: {}", value))?;
        return Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc));
    }

    Err(anyhow::anyhow!(
        "Invalid date/time (expected ISO-8601 or YYYY-MM-DD): {}",
        value
    ))
}

/// Parse a duration string (e.g., "7d", "24h").
pub fn parse_duration(value: &str) -> anyhow::Result<Duration> {
    let (num_str, unit) = match value.char_indices().last() {
        Some((at, _)) if at > 0 => value.split_at(at),
        _ => {
            return Err(anyhow::anyhow!(
                "Invalid duration: {} (expected <number><unit>)",
                value
            ))
        }
    };
    let amount: i64 = num_str
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid duration number: {}", value))?;
    if amount <= 0 {
        return Err(anyhow::anyhow!("Duration must be positive: {}", value));
    }

    match unit {
        "d" => Ok(Duration::days(amount)),
        "h" => Ok(Duration::hours(amount)),
        "m" => Ok(Duration::minutes(amount)),
        "s" => Ok(Duration::seconds(amount)),
        _ => Err(anyhow::anyhow!(
            "Invalid duration unit: {} (use d/h/m/s)",
            unit
        )),
    }
}

/// Parse an entry type name, listing the valid ones on failure.
pub fn parse_entry_kind(value: &str) -> anyhow::Result<EntryKind> {
    value.parse().map_err(|_| {
        let names: Vec<&str> = EntryKind::ALL.iter().map(|kind| kind.as_str()).collect();
        anyhow::anyhow!(
            "Unknown entry type \"{}\" (use {})",
            value,
            names.join(", ")
        )
    })
}

pub fn parse_entry_id(value: &str) -> anyhow::Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| anyhow::anyhow!("Invalid entry ID: {}", e))
}

/// Parse a `KEY=VALUE` record field. Values that are valid JSON (numbers,
/// booleans, arrays) keep their type; anything else is a string.
pub fn parse_field(value: &str) -> anyhow::Result<(String, Value)> {
    let (key, raw) = value
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("Invalid field: {} (expected KEY=VALUE)", value))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(anyhow::anyhow!("Field name cannot be empty: {}", value));
    }
    let parsed = serde_json::from_str::<Value>(raw)
        .unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), parsed))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Plain,
}

pub fn parse_output_format(value: Option<&str>) -> anyhow::Result<Option<OutputFormat>> {
    match value {
        None => Ok(None),
        Some("table") => Ok(Some(OutputFormat::Table)),
        Some("plain") => Ok(Some(OutputFormat::Plain)),
        Some(other) => Err(anyhow::anyhow!(
            "Unsupported format: {} (use table or plain)",
            other
        )),
    }
}
