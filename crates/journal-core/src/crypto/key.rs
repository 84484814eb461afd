//! Content key derivation using HKDF-SHA256.
//!
//! Keys are derived from a per-user key material string
//! (`"<namespace>_" + user_id`) and a random salt carried inside each
//! ciphertext envelope. The material is not secret; see the module docs in
//! [`crate::crypto`] for what this does and does not protect against.

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::{ZeroizeOnDrop, Zeroizing};

use crate::error::{JournalError, Result};

/// Namespace prefixed to every user id before key derivation.
pub const DEFAULT_NAMESPACE: &str = "growth_journal";

/// Length of derived key in bytes (32 bytes = AES-256).
pub const KEY_LENGTH: usize = 32;

/// Length of the per-envelope salt in bytes.
pub const SALT_LENGTH: usize = 16;

/// Domain separation label for the HKDF expand step.
const HKDF_INFO: &[u8] = b"journal-content-v1";

/// A symmetric key derived for a single content envelope.
///
/// Key bytes are zeroized from memory when dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// Avoid storing or logging this value. Use only for immediate cipher operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Build the key material for a user: `"<namespace>_" + user_id`.
///
/// # Errors
///
/// Returns `JournalError::MissingUserId` if `user_id` is empty or blank.
///
/// # Examples
///
/// ```
/// use journal_core::crypto::key_material;
///
/// let material = key_material("growth_journal", "u1").unwrap();
/// assert_eq!(material.as_str(), "growth_journal_u1");
/// assert!(key_material("growth_journal", "  ").is_err());
/// ```
pub fn key_material(namespace: &str, user_id: &str) -> Result<Zeroizing<String>> {
    if user_id.trim().is_empty() {
        return Err(JournalError::MissingUserId);
    }
    Ok(Zeroizing::new(format!("{}_{}", namespace, user_id)))
}

/// Derive a content key from key material and an envelope salt.
///
/// Same material + salt always produces the same key. A fresh salt is drawn
/// for every envelope, so encrypting the same text twice yields different
/// ciphertexts.
///
/// # Errors
///
/// Returns `JournalError::Validation` if the material is empty or the salt is
/// shorter than [`SALT_LENGTH`], and `JournalError::Crypto` if HKDF rejects
/// the output length.
pub fn derive_key(material: &str, salt: &[u8]) -> Result<DerivedKey> {
    if material.is_empty() {
        return Err(JournalError::Validation(
            "Key material cannot be empty".to_string(),
        ));
    }

    if salt.len() < SALT_LENGTH {
        return Err(JournalError::Validation(format!(
            "Salt must be at least {} bytes",
            SALT_LENGTH
        )));
    }

    let hkdf = Hkdf::<Sha256>::new(Some(salt), material.as_bytes());
    let mut key_bytes = [0u8; KEY_LENGTH];
    hkdf.expand(HKDF_INFO, &mut key_bytes)
        .map_err(|e| JournalError::Crypto(format!("Key derivation failed: {}", e)))?;

    Ok(DerivedKey::from_bytes(key_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SALT: &[u8; 16] = b"0123456789abcdef";

    #[test]
    fn test_key_derivation_deterministic() {
        let key1 = derive_key("growth_journal_u1", SALT).unwrap();
        let key2 = derive_key("growth_journal_u1", SALT).unwrap();

        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let key1 = derive_key("growth_journal_u1", b"salt-one-1234567").unwrap();
        let key2 = derive_key("growth_journal_u1", b"salt-two-1234567").unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_user_different_key() {
        let key1 = derive_key("growth_journal_u1", SALT).unwrap();
        let key2 = derive_key("growth_journal_u2", SALT).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_short_salt_rejected() {
        let result = derive_key("growth_journal_u1", b"short");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Salt must be at least 16 bytes"));
    }

    #[test]
    fn test_empty_material_rejected() {
        assert!(matches!(
            derive_key("", SALT),
            Err(JournalError::Validation(_))
        ));
    }

    #[test]
    fn test_key_material_requires_user_id() {
        assert!(matches!(
            key_material(DEFAULT_NAMESPACE, ""),
            Err(JournalError::MissingUserId)
        ));
        assert!(matches!(
            key_material(DEFAULT_NAMESPACE, "\t "),
            Err(JournalError::MissingUserId)
        ));
    }

    #[test]
    fn test_key_material_prefixes_namespace() {
        let material = key_material("ns", "abc").unwrap();
        assert_eq!(material.as_str(), "ns_abc");
    }

    #[test]
    fn test_derived_key_debug_redacts() {
        let key = derive_key("growth_journal_u1", SALT).unwrap();

        let debug_output = format!("{:?}", key);
        assert!(debug_output.contains("REDACTED"));

        let key_hex = hex::encode(&key.as_bytes()[..4]);
        assert!(!debug_output.contains(&key_hex));
    }
}
