//! Encryption-at-rest for journal content.
//!
//! Journal text is encrypted per user before it reaches the store and
//! decrypted on read:
//! - **AES-256-GCM** with a random salt and nonce per envelope
//! - **HKDF-SHA256** to derive the envelope key from `"<namespace>_" + user_id`
//! - Key bytes zeroized from memory on drop
//!
//! ## Threat Model
//!
//! We defend against:
//! - Casual inspection of the data store (exports, dashboards, backups)
//!
//! We do NOT defend against:
//! - Anyone who knows a user id (the key is derived, not secret-stored)
//! - Access control decisions; callers must scope reads by user themselves
//!
//! ## Failure Policy
//!
//! Encryption and decryption never lose data. When a cipher operation fails
//! the input string is returned as-is, which also lets rows written before
//! encryption was introduced be read unchanged.

pub mod content;
pub mod key;

pub use content::{decrypt, encrypt, ContentCipher};
pub use key::{derive_key, key_material, DerivedKey, DEFAULT_NAMESPACE};
