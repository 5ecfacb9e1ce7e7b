use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crypto::CryptoError;

/// Stable classification of every failure the engine can report.
///
/// Reports and tests match on this instead of on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorKind {
    Config,
    Io,
    CipherInit,
    RandomSource,
    MalformedInput,
    Authentication,
    InvalidMode,
    OutputCollision,
    WorkerLost,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Config          => "ConfigError",
            ErrorKind::Io              => "IOError",
            ErrorKind::CipherInit      => "CipherInitError",
            ErrorKind::RandomSource    => "RandomSourceError",
            ErrorKind::MalformedInput  => "MalformedInputError",
            ErrorKind::Authentication  => "AuthenticationError",
            ErrorKind::InvalidMode     => "InvalidModeError",
            ErrorKind::OutputCollision => "OutputCollisionError",
            ErrorKind::WorkerLost      => "WorkerLostError",
        };
        f.write_str(name)
    }
}

/// Fatal configuration errors. Raised before any file is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("invalid key encoding: {0}")]
    InvalidKeyEncoding(String),

    #[error("invalid key length: expected={expected} bytes, actual={actual} bytes")]
    InvalidKeyLen { expected: usize, actual: usize },

    #[error("worker count must be at least 1")]
    ZeroWorkers,

    #[error("cannot list input directory {}: {source}", .path.display())]
    InputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Config
    }
}

/// Per-file errors. Captured into that file's result, never propagated across tasks.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("error reading file {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error writing file {}: {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error creating cipher: {0}")]
    CipherInit(String),

    #[error("error generating nonce: {0}")]
    RandomSource(String),

    #[error("ciphertext too short: {actual} bytes, need at least {min}")]
    MalformedInput { actual: usize, min: usize },

    #[error("authentication failed: wrong key or corrupted data")]
    Authentication,

    #[error("invalid mode: {0}")]
    InvalidMode(String),

    #[error("output {} already claimed by {}", .output.display(), .claimed_by.display())]
    OutputCollision { output: PathBuf, claimed_by: PathBuf },

    #[error("worker terminated before reporting this file")]
    WorkerLost,
}

impl TaskError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TaskError::ReadInput { .. } | TaskError::WriteOutput { .. } => ErrorKind::Io,
            TaskError::CipherInit(_)          => ErrorKind::CipherInit,
            TaskError::RandomSource(_)        => ErrorKind::RandomSource,
            TaskError::MalformedInput { .. }  => ErrorKind::MalformedInput,
            TaskError::Authentication         => ErrorKind::Authentication,
            TaskError::InvalidMode(_)         => ErrorKind::InvalidMode,
            TaskError::OutputCollision { .. } => ErrorKind::OutputCollision,
            TaskError::WorkerLost             => ErrorKind::WorkerLost,
        }
    }
}

impl From<CryptoError> for TaskError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::InvalidKeyLen { expected, actual } => TaskError::CipherInit(format!(
                "invalid key length: expected={expected}, actual={actual}"
            )),
            CryptoError::RandomSource(msg) => TaskError::RandomSource(msg),
            CryptoError::Malformed { actual, min } => TaskError::MalformedInput { actual, min },
            CryptoError::TagMismatch => TaskError::Authentication,
            // Seal only fails this way on inputs the cipher refuses to process.
            CryptoError::Failure(msg) => TaskError::CipherInit(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crypto_errors_map_to_task_kinds() {
        let cases = [
            (CryptoError::InvalidKeyLen { expected: 32, actual: 31 }, ErrorKind::CipherInit),
            (CryptoError::RandomSource("no entropy".into()), ErrorKind::RandomSource),
            (CryptoError::Malformed { actual: 3, min: 12 }, ErrorKind::MalformedInput),
            (CryptoError::TagMismatch, ErrorKind::Authentication),
        ];
        for (err, kind) in cases {
            assert_eq!(TaskError::from(err).kind(), kind);
        }
    }

    #[test]
    fn every_config_error_is_fatal_config_kind() {
        let cases = [
            ConfigError::MissingArgument("--key"),
            ConfigError::InvalidKeyEncoding("odd length".into()),
            ConfigError::InvalidKeyLen { expected: 32, actual: 33 },
            ConfigError::ZeroWorkers,
            ConfigError::InputDir {
                path: PathBuf::from("/nope"),
                source: io::Error::from(io::ErrorKind::NotFound),
            },
        ];
        for err in cases {
            assert_eq!(err.kind(), ErrorKind::Config, "{err}");
        }
    }

    #[test]
    fn kind_names_match_operator_vocabulary() {
        assert_eq!(ErrorKind::Io.to_string(), "IOError");
        assert_eq!(ErrorKind::Authentication.to_string(), "AuthenticationError");
    }
}
