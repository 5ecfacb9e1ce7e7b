// ## 📂 File: `src/crypto/key.rs`

//! crypto/key.rs
//! Raw 32-byte run key.
//!
//! The key is supplied by the caller (no derivation, no storage). It is
//! validated once, before dispatch, and then lent read-only to every worker.

use std::fmt;

use crate::crypto::types::KEY_LEN_32;
use crate::types::ConfigError;

/// Exactly 32 bytes of key material. `Debug` never prints the bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey([u8; KEY_LEN_32]);

impl SecretKey {
    /// Accept a raw key, rejecting anything that is not exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        if bytes.len() != KEY_LEN_32 {
            return Err(ConfigError::InvalidKeyLen {
                expected: KEY_LEN_32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; KEY_LEN_32];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }

    /// Decode a 64-character hex string.
    pub fn from_hex(encoded: &str) -> Result<Self, ConfigError> {
        let bytes = hex::decode(encoded.trim())
            .map_err(|e| ConfigError::InvalidKeyEncoding(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN_32] {
        &self.0
    }
}

impl AsRef<[u8]> for SecretKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; KEY_LEN_32]> for SecretKey {
    fn from(bytes: [u8; KEY_LEN_32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        // Best-effort wipe of the key bytes.
        for b in self.0.iter_mut() {
            *b = 0;
        }
    }
}
