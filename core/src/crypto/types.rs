// ## 📂 File: `src/crypto/types.rs`

use thiserror::Error;

/// Stable key size (AES-256-GCM and ChaCha20-Poly1305).
pub const KEY_LEN_32: usize = 32;

/// Standard 12-byte nonce length for AES-GCM and ChaCha20-Poly1305.
pub const NONCE_LEN_12: usize = 12;

/// Fixed AEAD tag length (bytes), trailing the seal output.
pub const TAG_LEN: usize = 16;

/// Smallest blob that can possibly authenticate: nonce + empty ciphertext + tag.
pub const MIN_SEALED_BLOB_LEN: usize = NONCE_LEN_12 + TAG_LEN;

/// Errors raised by the AEAD transform.
///
/// Each variant maps onto one per-task error kind; see `TaskError`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Key rejected by the cipher primitive.
    #[error("cipher init failed: invalid key length: expected={expected}, actual={actual}")]
    InvalidKeyLen { expected: usize, actual: usize },

    /// The OS random source could not produce a nonce.
    #[error("random source unavailable: {0}")]
    RandomSource(String),

    /// Blob too short to even hold a nonce.
    #[error("malformed input: blob is {actual} bytes, nonce alone needs {min}")]
    Malformed { actual: usize, min: usize },

    /// AEAD tag mismatch (wrong key, corruption or tampering).
    #[error("AEAD tag mismatch")]
    TagMismatch,

    /// Seal failed for a reason other than the key (plaintext too long for the suite).
    #[error("crypto failure: {0}")]
    Failure(String),
}
