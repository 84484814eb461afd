//! Output formatting helpers for the CLI.
//!
//! This module provides formatting utilities for displaying entries, moods
//! and profiles in various formats (JSON, table, plain text).

mod json;
mod text;

// Re-export public API
pub use json::{entries_json, entry_json, moods_json, profile_json};
pub use text::{print_entry, print_entry_list, print_mood_list, print_profile};
