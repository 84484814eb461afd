//! Text and table output formatting.

use chrono::{DateTime, Utc};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use journal_core::codec::render_value;
use journal_core::storage::{EntryView, MoodEntry, Profile};

use crate::helpers::OutputFormat;

const TABLE_PREVIEW_MAX: usize = 60;

/// Fields already shown by the entry header or body.
const SHOWN_FIELDS: [&str; 4] = ["title", "type", "content", "summary"];

/// Print a single entry in human-readable format.
pub fn print_entry(entry: &EntryView, quiet: bool) {
    if !quiet {
        println!("ID: {}", entry.id);
        println!("Title: {}", entry.title);
        println!("Type: {}", entry.kind);
        if !entry.prompt.is_empty() {
            println!("Prompt: {}", entry.prompt);
        }
        println!("Created: {}", format_timestamp(&entry.created_at));
        println!();
    }
    println!("{}", entry.preview);

    if let Some(structured) = &entry.structured {
        let extra: Vec<_> = structured
            .fields()
            .iter()
            .filter(|(key, _)| !SHOWN_FIELDS.contains(&key.as_str()))
            .collect();
        // Records without content/summary already preview as these lines.
        if structured.body().is_some() && !extra.is_empty() {
            println!();
            for (key, value) in extra {
                println!("{}: {}", key, render_value(value));
            }
        }
    }
}

/// Print a list of entries as a table or plain lines.
pub fn print_entry_list(entries: &[EntryView], format: Option<OutputFormat>, quiet: bool) {
    match format.unwrap_or(OutputFormat::Table) {
        OutputFormat::Table => {
            if entries.is_empty() {
                if !quiet {
                    println!("No entries found.");
                }
                return;
            }
            let mut table = new_table();
            table.set_header(vec!["ID", "CREATED", "TYPE", "TITLE", "PREVIEW"]);
            for entry in entries {
                table.add_row(vec![
                    entry.id.to_string(),
                    format_timestamp(&entry.created_at),
                    entry.kind.to_string(),
                    entry.title.clone(),
                    truncate(&single_line(&entry.preview), TABLE_PREVIEW_MAX),
                ]);
            }
            println!("{}", table);
        }
        OutputFormat::Plain => {
            for entry in entries {
                println!(
                    "{} {} {} {}",
                    entry.id,
                    entry.created_at.to_rfc3339(),
                    entry.kind,
                    entry.title
                );
            }
        }
    }
}

pub fn print_mood_list(moods: &[MoodEntry], quiet: bool) {
    if moods.is_empty() {
        if !quiet {
            println!("No moods recorded.");
        }
        return;
    }
    let mut table = new_table();
    table.set_header(vec!["CREATED", "MOOD", "INTENSITY", "NOTE"]);
    for mood in moods {
        table.add_row(vec![
            format_timestamp(&mood.created_at),
            mood.mood.clone(),
            format!("{}/10", mood.intensity),
            mood.note.clone().unwrap_or_default(),
        ]);
    }
    println!("{}", table);
}

pub fn print_profile(profile: &Profile) {
    println!("User: {}", profile.user_id);
    println!(
        "Name: {}",
        profile.display_name.as_deref().unwrap_or("(not set)")
    );
    println!(
        "Onboarding: {}",
        if profile.onboarding_completed {
            "completed"
        } else {
            "pending"
        }
    );
    let premium = profile.subscription.is_premium(Utc::now());
    match profile.subscription.active_until {
        Some(until) => println!(
            "Subscription: {} (until {}){}",
            profile.subscription.tier.as_str(),
            format_timestamp(&until),
            if premium { "" } else { " expired" }
        ),
        None => println!("Subscription: {}", profile.subscription.tier.as_str()),
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate a string to max length, adding ellipsis if needed.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 6), "abc...");
    }

    #[test]
    fn test_single_line_collapses_whitespace() {
        assert_eq!(single_line("goal: Run\nxp: 50"), "goal: Run xp: 50");
    }
}
