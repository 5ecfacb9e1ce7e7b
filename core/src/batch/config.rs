// ## 📂 File: `src/batch/config.rs`

use std::path::PathBuf;

use crate::batch::parallelism::WorkerProfile;
use crate::crypto::{CipherSuite, SecretKey};
use crate::types::ConfigError;

/// Everything one run needs besides the input list.
///
/// `mode` is kept raw on purpose: an unsupported value is reported per file,
/// not rejected here.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub key: SecretKey,
    pub output_dir: PathBuf,
    pub mode: String,
    pub profile: WorkerProfile,
    pub suite: CipherSuite,
}

impl BatchConfig {
    pub fn new(key: SecretKey, output_dir: impl Into<PathBuf>, mode: impl Into<String>) -> Self {
        Self {
            key,
            output_dir: output_dir.into(),
            mode: mode.into(),
            profile: WorkerProfile::default(),
            suite: CipherSuite::default(),
        }
    }

    /// Build from raw key bytes; wrong key lengths are rejected here, before any I/O.
    pub fn from_raw_key(
        key: &[u8],
        output_dir: impl Into<PathBuf>,
        mode: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(SecretKey::from_slice(key)?, output_dir, mode))
    }

    pub fn with_profile(mut self, profile: WorkerProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_workers(self, workers: usize) -> Self {
        self.with_profile(WorkerProfile::fixed(workers))
    }

    pub fn with_suite(mut self, suite: CipherSuite) -> Self {
        self.suite = suite;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.profile.validate()?;
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingArgument("output directory"));
        }
        Ok(())
    }
}
