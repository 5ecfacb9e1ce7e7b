//! filecrypt-core
//!
//! Pure Rust batch file encryption engine: a fixed worker pool applying an
//! AEAD transform (AES-256-GCM or ChaCha20-Poly1305) to every file in a flat
//! input list, with per-file results and no fail-fast.
//! No CLI, no process exit handling.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;

pub mod crypto;
pub mod telemetry;

// Pipeline layers
pub mod batch;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::batch::{
        list_input_files, run_batch, run_batch_dir, BatchConfig, BatchReport, Mode, TaskResult, WorkerProfile,
    };
    pub use crate::crypto::{decrypt, encrypt, CipherSuite, CryptoError, SecretKey};
    pub use crate::types::{ConfigError, ErrorKind, TaskError};
}
