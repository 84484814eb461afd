//! # Journal Core
//!
//! Core library for a personal-growth journal: entries (free text or
//! structured records), moods, and profile state, encrypted at rest per user.
//!
//! This crate provides the domain logic, storage abstractions, and data models
//! independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **crypto**: Per-user content encryption that never fails closed
//! - **codec**: Fenced-JSON serialization, parsing and previews of entry content
//! - **storage**: Store trait, entry/mood/profile types and the SQLite store
//! - **journal**: Entry and mood service (encrypt on write, decrypt on read)
//! - **cache**: Injectable TTL cache
//! - **profile**: Cached profile and subscription service
//! - **conversation**: Guided chat flows that produce entry drafts

pub mod cache;
pub mod codec;
pub mod conversation;
pub mod crypto;
pub mod error;
pub mod journal;
pub mod profile;
pub mod storage;

pub use cache::{Cache, NoopCache, TtlCache};
pub use crypto::ContentCipher;
pub use error::{JournalError, Result};
pub use journal::Journal;
pub use profile::{ProfileService, DEFAULT_PROFILE_TTL};
pub use storage::{JournalStore, SqliteStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
