// ## 📂 File: `src/crypto/aead.rs`

//! src/crypto/aead.rs
//! AEAD interface for AES-256-GCM and ChaCha20-Poly1305, plus the whole-file
//! blob transform built on it.
//!
//! Design notes:
//! - Both ciphers use 32-byte keys and 12-byte nonces.
//! - Tag verification is constant-time and must fail closed (no partial plaintext).
//! - No associated data: the blob is `nonce || ciphertext || tag`, nothing else.
//! - Cipher state is cheap to build, so callers may re-derive it per file.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// Import AEAD traits from aes_gcm's re-export to avoid duplicate `aead` paths.
use aes_gcm::aead::{Aead, KeyInit};

// Concrete AEAD types
use aes_gcm::{Aes256Gcm, Nonce as AesNonce}; // 32-byte key, 12-byte nonce
use chacha20poly1305::{ChaCha20Poly1305, Nonce as ChaNonce}; // 32-byte key, 12-byte nonce

use crate::constants::cipher_ids;
use crate::crypto::nonce::{random_nonce_12, split_nonce};
use crate::crypto::types::{CryptoError, KEY_LEN_32, NONCE_LEN_12, TAG_LEN};

/// Cipher suite used for every file in a run.
///
/// The blob carries no suite identifier, so encrypt and decrypt runs must agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u16)]
pub enum CipherSuite {
    #[default]
    #[serde(rename = "aes-256-gcm")]
    Aes256Gcm = cipher_ids::AES256_GCM,
    #[serde(rename = "chacha20-poly1305")]
    Chacha20Poly1305 = cipher_ids::CHACHA20_POLY1305,
}

impl CipherSuite {
    pub fn as_str(&self) -> &'static str {
        match self {
            CipherSuite::Aes256Gcm => "aes-256-gcm",
            CipherSuite::Chacha20Poly1305 => "chacha20-poly1305",
        }
    }
}

impl fmt::Display for CipherSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CipherSuite {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "aes-256-gcm" | "aes256gcm" | "aes" => Ok(CipherSuite::Aes256Gcm),
            "chacha20-poly1305" | "chacha20poly1305" | "chacha" => Ok(CipherSuite::Chacha20Poly1305),
            other => Err(format!("unsupported cipher suite: {other}")),
        }
    }
}

/// Unified AEAD cipher implementation selected by `CipherSuite`.
#[derive(Clone)]
pub enum AeadImpl {
    AesGcm(Aes256Gcm),
    ChaCha(ChaCha20Poly1305),
}

impl AeadImpl {
    /// Construct the AEAD implementation for `suite` from a raw key.
    pub fn new(suite: CipherSuite, key: &[u8]) -> Result<Self, CryptoError> {
        if key.len() != KEY_LEN_32 {
            return Err(CryptoError::InvalidKeyLen {
                expected: KEY_LEN_32,
                actual: key.len(),
            });
        }

        let invalid = |_| CryptoError::InvalidKeyLen {
            expected: KEY_LEN_32,
            actual: key.len(),
        };

        match suite {
            CipherSuite::Aes256Gcm => Ok(Self::AesGcm(Aes256Gcm::new_from_slice(key).map_err(invalid)?)),
            CipherSuite::Chacha20Poly1305 => {
                Ok(Self::ChaCha(ChaCha20Poly1305::new_from_slice(key).map_err(invalid)?))
            }
        }
    }

    /// AEAD seal (encrypt) plaintext under a 12-byte nonce. Output is ciphertext || tag.
    pub fn seal(&self, nonce_12: &[u8; NONCE_LEN_12], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        match self {
            AeadImpl::AesGcm(cipher) => cipher
                .encrypt(AesNonce::from_slice(nonce_12), plaintext)
                .map_err(|_| CryptoError::Failure("AES-GCM seal failed".into())),
            AeadImpl::ChaCha(cipher) => cipher
                .encrypt(ChaNonce::from_slice(nonce_12), plaintext)
                .map_err(|_| CryptoError::Failure("ChaCha20-Poly1305 seal failed".into())),
        }
    }

    /// AEAD open (decrypt) ciphertext || tag under a 12-byte nonce.
    pub fn open(&self, nonce_12: &[u8], ciphertext_and_tag: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if nonce_12.len() != NONCE_LEN_12 {
            return Err(CryptoError::Malformed {
                actual: nonce_12.len(),
                min: NONCE_LEN_12,
            });
        }

        // Anything shorter than a tag cannot verify; report it as a tag failure.
        if ciphertext_and_tag.len() < TAG_LEN {
            return Err(CryptoError::TagMismatch);
        }

        match self {
            AeadImpl::AesGcm(cipher) => cipher
                .decrypt(AesNonce::from_slice(nonce_12), ciphertext_and_tag)
                .map_err(|_| CryptoError::TagMismatch),
            AeadImpl::ChaCha(cipher) => cipher
                .decrypt(ChaNonce::from_slice(nonce_12), ciphertext_and_tag)
                .map_err(|_| CryptoError::TagMismatch),
        }
    }

    /// Seal a whole buffer into a self-contained blob: `nonce || ciphertext || tag`.
    pub fn seal_blob(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let nonce = random_nonce_12()?;
        let sealed = self.seal(&nonce, plaintext)?;

        let mut blob = Vec::with_capacity(NONCE_LEN_12 + sealed.len());
        blob.extend_from_slice(&nonce);
        blob.extend_from_slice(&sealed);
        Ok(blob)
    }

    /// Open a blob produced by `seal_blob`.
    pub fn open_blob(&self, blob: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let (nonce, sealed) = split_nonce(blob)?;
        self.open(nonce, sealed)
    }
}

/// Encrypt `plaintext` under `key` with AES-256-GCM.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    encrypt_with(CipherSuite::Aes256Gcm, key, plaintext)
}

/// Decrypt an AES-256-GCM blob under `key`.
pub fn decrypt(key: &[u8], blob: &[u8]) -> Result<Vec<u8>, CryptoError> {
    decrypt_with(CipherSuite::Aes256Gcm, key, blob)
}

pub fn encrypt_with(suite: CipherSuite, key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    AeadImpl::new(suite, key)?.seal_blob(plaintext)
}

pub fn decrypt_with(suite: CipherSuite, key: &[u8], blob: &[u8]) -> Result<Vec<u8>, CryptoError> {
    // Length check first: a short blob is malformed regardless of the key.
    split_nonce(blob)?;
    AeadImpl::new(suite, key)?.open_blob(blob)
}
