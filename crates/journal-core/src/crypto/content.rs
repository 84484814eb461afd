//! Fail-open content encryption for journal text.
//!
//! Ciphertexts are self-describing base64 strings:
//!
//! ```text
//! base64( MAGIC(8) | salt(16) | nonce(12) | AES-256-GCM ciphertext + tag )
//! ```
//!
//! The caller never manages salts or nonces. Both operations are total: any
//! internal failure returns the input unchanged, so a legacy plaintext row or
//! a transient cipher error never turns into lost data.

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::{debug, warn};

use super::key::{derive_key, key_material, DEFAULT_NAMESPACE, SALT_LENGTH};
use crate::error::{JournalError, Result};

const ENVELOPE_MAGIC: &[u8; 8] = b"GJRNLv01";
const NONCE_LENGTH: usize = 12;
const HEADER_LENGTH: usize = ENVELOPE_MAGIC.len() + SALT_LENGTH + NONCE_LENGTH;

/// Per-user symmetric encryption for stored journal content.
#[derive(Debug, Clone)]
pub struct ContentCipher {
    namespace: String,
}

impl Default for ContentCipher {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentCipher {
    /// Cipher using [`DEFAULT_NAMESPACE`].
    pub fn new() -> Self {
        Self::with_namespace(DEFAULT_NAMESPACE)
    }

    /// Cipher using a custom key namespace.
    ///
    /// Content written under one namespace is unreadable under another.
    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Encrypt `plaintext` for `user_id`.
    ///
    /// If encryption fails internally the plaintext is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::MissingUserId` if `user_id` is blank. No other
    /// error is ever returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use journal_core::crypto::ContentCipher;
    ///
    /// let cipher = ContentCipher::new();
    /// let stored = cipher.encrypt("I felt calmer today.", "u1").unwrap();
    /// assert!(!stored.contains("calmer"));
    /// assert_eq!(cipher.decrypt(&stored, "u1").unwrap(), "I felt calmer today.");
    /// ```
    pub fn encrypt(&self, plaintext: &str, user_id: &str) -> Result<String> {
        let material = key_material(&self.namespace, user_id)?;
        match seal(plaintext.as_bytes(), &material) {
            Ok(envelope) => Ok(STANDARD.encode(envelope)),
            Err(err) => {
                warn!(error = %err, "content encryption failed, keeping plaintext");
                Ok(plaintext.to_string())
            }
        }
    }

    /// Decrypt stored content for `user_id`.
    ///
    /// Anything that cannot be decrypted into valid UTF-8 with this user's key
    /// (legacy plaintext, another user's ciphertext, corrupted data) is
    /// returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::MissingUserId` if `user_id` is blank. No other
    /// error is ever returned.
    pub fn decrypt(&self, stored: &str, user_id: &str) -> Result<String> {
        let material = key_material(&self.namespace, user_id)?;
        match open(stored, &material) {
            Ok(plaintext) => Ok(plaintext),
            Err(err) => {
                debug!(error = %err, "stored content not decryptable, treating as plaintext");
                Ok(stored.to_string())
            }
        }
    }

    /// Whether `stored` looks like an envelope produced by [`ContentCipher::encrypt`].
    ///
    /// This only checks framing, not that the current key can open it.
    pub fn is_envelope(stored: &str) -> bool {
        STANDARD
            .decode(stored.as_bytes())
            .map(|bytes| bytes.len() > HEADER_LENGTH && bytes.starts_with(ENVELOPE_MAGIC))
            .unwrap_or(false)
    }
}

/// Encrypt with the default namespace. See [`ContentCipher::encrypt`].
pub fn encrypt(plaintext: &str, user_id: &str) -> Result<String> {
    ContentCipher::new().encrypt(plaintext, user_id)
}

/// Decrypt with the default namespace. See [`ContentCipher::decrypt`].
pub fn decrypt(stored: &str, user_id: &str) -> Result<String> {
    ContentCipher::new().decrypt(stored, user_id)
}

fn seal(plaintext: &[u8], material: &str) -> Result<Vec<u8>> {
    let mut salt = [0u8; SALT_LENGTH];
    let mut nonce = [0u8; NONCE_LENGTH];
    getrandom::getrandom(&mut salt)
        .map_err(|e| JournalError::Crypto(format!("Salt generation failed: {}", e)))?;
    getrandom::getrandom(&mut nonce)
        .map_err(|e| JournalError::Crypto(format!("Nonce generation failed: {}", e)))?;

    let key = derive_key(material, &salt)?;
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| JournalError::Crypto(format!("AES key init failed: {}", e)))?;
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|e| JournalError::Crypto(format!("AES-GCM encrypt failed: {}", e)))?;

    let mut out = Vec::with_capacity(HEADER_LENGTH + ciphertext.len());
    out.extend_from_slice(ENVELOPE_MAGIC);
    out.extend_from_slice(&salt);
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

fn open(stored: &str, material: &str) -> Result<String> {
    let bytes = STANDARD
        .decode(stored.as_bytes())
        .map_err(|e| JournalError::Crypto(format!("Not base64: {}", e)))?;
    if bytes.len() < HEADER_LENGTH || !bytes.starts_with(ENVELOPE_MAGIC) {
        return Err(JournalError::Crypto(
            "Missing envelope header".to_string(),
        ));
    }

    let salt_end = ENVELOPE_MAGIC.len() + SALT_LENGTH;
    let salt = &bytes[ENVELOPE_MAGIC.len()..salt_end];
    let nonce = &bytes[salt_end..HEADER_LENGTH];
    let ciphertext = &bytes[HEADER_LENGTH..];

    let key = derive_key(material, salt)?;
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| JournalError::Crypto(format!("AES key init failed: {}", e)))?;
    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|e| JournalError::Crypto(format!("AES-GCM decrypt failed: {}", e)))?;

    String::from_utf8(plaintext)
        .map_err(|_| JournalError::Crypto("Decrypted content is not UTF-8".to_string()))
}
