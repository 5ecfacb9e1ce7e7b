// ## 📂 File: `src/crypto/nonce.rs`

//! crypto/nonce.rs
//! Random per-file nonce generation.
//!
//! Design:
//! - Every blob carries its own nonce, drawn fresh from the OS CSPRNG.
//! - No counter or salt schedule: files are sealed independently by any worker,
//!   so there is no shared state to derive from.
//!
//! Security notes:
//! - 96-bit random nonces stay collision-safe well past any realistic batch size
//!   under a single key; rotate keys long before 2^32 encryptions.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::crypto::types::{CryptoError, NONCE_LEN_12};

/// Draw a fresh 12-byte nonce from the OS random source.
///
/// Uses the fallible `try_fill_bytes` so an unavailable entropy source surfaces
/// as `CryptoError::RandomSource` instead of a panic inside a worker.
#[inline]
pub fn random_nonce_12() -> Result<[u8; NONCE_LEN_12], CryptoError> {
    let mut nonce = [0u8; NONCE_LEN_12];
    OsRng
        .try_fill_bytes(&mut nonce)
        .map_err(|e| CryptoError::RandomSource(e.to_string()))?;
    Ok(nonce)
}

/// Split a blob into `(nonce, sealed_payload)`.
///
/// Returns `CryptoError::Malformed` when the blob cannot hold a nonce.
#[inline]
pub fn split_nonce(blob: &[u8]) -> Result<(&[u8], &[u8]), CryptoError> {
    if blob.len() < NONCE_LEN_12 {
        return Err(CryptoError::Malformed {
            actual: blob.len(),
            min: NONCE_LEN_12,
        });
    }
    Ok(blob.split_at(NONCE_LEN_12))
}
