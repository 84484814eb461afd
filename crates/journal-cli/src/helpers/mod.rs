//! Input and parsing helper functions for the CLI.
//!
//! This module provides utilities for:
//! - Entry body reading from flags, stdin or `$EDITOR` (`input`)
//! - Datetime, duration, entry type and format parsing (`parsing`)

mod input;
mod parsing;

// Re-export public API
pub use input::{read_entry_body, read_stdin};
pub use parsing::{
    parse_datetime, parse_duration, parse_entry_id, parse_entry_kind, parse_field,
    parse_output_format, OutputFormat,
};
