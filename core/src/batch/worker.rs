// # 📂 `src/batch/worker.rs`

//! File workers.
//!
//! Each worker drains the shared task queue until it is closed and empty,
//! processes one file at a time, and publishes exactly one `TaskResult` per
//! task it took. A failed file is reported and the loop moves on.

use std::path::Path;

use crossbeam::channel::{Receiver, Sender};
use tracing::{debug, warn};

use crate::batch::io::{read_input, write_output};
use crate::batch::report::{TaskResult, TaskSuccess};
use crate::batch::task::{FileTask, Mode};
use crate::crypto::{AeadImpl, CipherSuite, SecretKey};
use crate::telemetry::{Stage, StageTimes, TelemetryCounters};
use crate::types::TaskError;

/// Read-only state shared by every worker in a run.
#[derive(Debug, Clone, Copy)]
pub struct WorkerContext<'a> {
    pub key: &'a SecretKey,
    pub suite: CipherSuite,
    pub output_dir: &'a Path,
}

/// Telemetry a worker hands back when joined.
#[derive(Debug, Default, Clone)]
pub struct WorkerTelemetry {
    pub counters: TelemetryCounters,
    pub stage_times: StageTimes,
}

pub struct FileWorker<'a> {
    id: usize,
    ctx: WorkerContext<'a>,
}

impl<'a> FileWorker<'a> {
    pub fn new(id: usize, ctx: WorkerContext<'a>) -> Self {
        Self { id, ctx }
    }

    /// Run loop: consumes tasks, emits one result per task.
    pub fn run(self, rx: Receiver<FileTask>, tx: Sender<TaskResult>) -> WorkerTelemetry {
        let mut telemetry = WorkerTelemetry::default();
        debug!("[WORKER-{}] starting", self.id);

        while let Ok(task) = rx.recv() {
            debug!("[WORKER-{}] processing {}", self.id, task.source.display());
            let outcome = self.process(&task, &mut telemetry.stage_times);

            match &outcome {
                Ok(done) => telemetry.counters.add_success(done.bytes_in, done.bytes_out),
                Err(e) => {
                    warn!(
                        "[WORKER-{}] {} failed: {}: {}",
                        self.id,
                        task.source.display(),
                        e.kind(),
                        e
                    );
                    telemetry.counters.add_failure();
                }
            }

            let result = TaskResult {
                index: task.index,
                source: task.source,
                outcome,
            };
            if tx.send(result).is_err() {
                // Receiver gone: nobody is left to report to.
                warn!("[WORKER-{}] result channel closed, exiting", self.id);
                break;
            }
        }

        debug!("[WORKER-{}] finished", self.id);
        telemetry
    }

    /// Process a single file: resolve mode and output, read, transform, write.
    pub fn process(&self, task: &FileTask, times: &mut StageTimes) -> Result<TaskSuccess, TaskError> {
        let mode = task.mode.resolve()?;
        let output = task.output_path(self.ctx.output_dir)?;

        let input = times.measure(Stage::Read, || read_input(&task.source))?;

        // Cipher state is re-derived per file.
        let aead = AeadImpl::new(self.ctx.suite, self.ctx.key.as_ref())?;
        let transformed = times.measure(mode.crypto_stage(), || match mode {
            Mode::Encrypt => aead.seal_blob(&input),
            Mode::Decrypt => aead.open_blob(&input),
        })?;

        times.measure(Stage::Write, || write_output(&output, &transformed))?;

        Ok(TaskSuccess {
            mode,
            output,
            bytes_in: input.len(),
            bytes_out: transformed.len(),
        })
    }
}
