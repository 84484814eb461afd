//! Error types for journal core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these to
//! user-facing messages. The encryption layer and the content codec never
//! produce errors for bad input: they degrade to a usable value instead.
//! The one exception is a missing user id, which is a caller bug.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for journal operations.
pub type Result<T> = std::result::Result<T, JournalError>;

/// Core error type for journal operations.
#[derive(Debug, Error)]
pub enum JournalError {
    /// Encryption or decryption was requested without a user id
    #[error("A user id is required to derive the content key")]
    MissingUserId,

    /// Encryption or decryption error (never surfaced by the fail-open content layer)
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// Journal entry not found by ID
    #[error("Entry not found: {0}")]
    EntryNotFound(Uuid),

    /// Generic resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage backend error (generic)
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite-specific storage error
    #[error("SQLite error: {source}")]
    Sqlite {
        #[from]
        source: rusqlite::Error,
    },

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// Chat completion provider failed
    #[error("Chat error: {0}")]
    Chat(String),

    /// Generic error (fallback)
    #[error("{0}")]
    Other(String),
}
