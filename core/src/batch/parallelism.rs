// ## 📂 File: `src/batch/parallelism.rs`

use serde::{Deserialize, Serialize};

use crate::types::ConfigError;

/// Worker pool sizing.
///
/// A pure policy knob: any count ≥ 1 yields the same outputs, only latency differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerProfile {
    pub workers: usize,
}

impl WorkerProfile {
    pub fn single_threaded() -> Self {
        Self { workers: 1 }
    }

    pub fn fixed(workers: usize) -> Self {
        Self { workers }
    }

    /// One worker per logical CPU.
    pub fn dynamic() -> Self {
        Self {
            workers: num_cpus::get().max(1),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(())
    }

    /// Number of threads to actually spawn for `task_count` tasks.
    pub fn workers_for(&self, task_count: usize) -> usize {
        self.workers.min(task_count)
    }
}

impl Default for WorkerProfile {
    fn default() -> Self {
        Self::dynamic()
    }
}
