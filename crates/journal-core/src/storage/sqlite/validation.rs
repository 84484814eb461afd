//! Row validation applied before writes.

use crate::error::{JournalError, Result};

/// Maximum bytes for stored (encrypted) entry content.
pub const MAX_CONTENT_BYTES: usize = 1024 * 1024;

/// Maximum bytes for a mood label.
pub const MAX_MOOD_LABEL_BYTES: usize = 64;

/// Valid mood intensity range.
pub const MOOD_INTENSITY_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

/// Reject blank owner ids; every row must be scoped to a user.
pub fn validate_user_id(user_id: &str) -> Result<()> {
    if user_id.trim().is_empty() {
        return Err(JournalError::Validation(
            "User id cannot be empty".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_content(content: &str) -> Result<()> {
    if content.len() > MAX_CONTENT_BYTES {
        return Err(JournalError::Validation(format!(
            "Entry content too large (max {} bytes)",
            MAX_CONTENT_BYTES
        )));
    }
    Ok(())
}

/// Normalize and validate a mood label and intensity.
///
/// - Trims whitespace and converts to lowercase
/// - Enforces length and intensity limits
pub fn normalize_mood(label: &str, intensity: u8) -> Result<String> {
    let normalized = label.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(JournalError::Validation(
            "Mood label cannot be empty".to_string(),
        ));
    }
    if normalized.len() > MAX_MOOD_LABEL_BYTES {
        return Err(JournalError::Validation(format!(
            "Mood label too long (max {} bytes)",
            MAX_MOOD_LABEL_BYTES
        )));
    }
    if !MOOD_INTENSITY_RANGE.contains(&intensity) {
        return Err(JournalError::Validation(format!(
            "Mood intensity must be between {} and {}",
            MOOD_INTENSITY_RANGE.start(),
            MOOD_INTENSITY_RANGE.end()
        )));
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_user_id_rejected() {
        assert!(validate_user_id("").is_err());
        assert!(validate_user_id("  ").is_err());
        assert!(validate_user_id("u1").is_ok());
    }

    #[test]
    fn test_content_size_limit() {
        assert!(validate_content(&"a".repeat(MAX_CONTENT_BYTES)).is_ok());
        assert!(validate_content(&"a".repeat(MAX_CONTENT_BYTES + 1)).is_err());
    }

    #[test]
    fn test_normalize_mood() {
        assert_eq!(normalize_mood("  Calm ", 5).unwrap(), "calm");
        assert!(normalize_mood("", 5).is_err());
        assert!(normalize_mood("calm", 0).is_err());
        assert!(normalize_mood("calm", 11).is_err());
        assert!(normalize_mood(&"x".repeat(65), 3).is_err());
    }
}
