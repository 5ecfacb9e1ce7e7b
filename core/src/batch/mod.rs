//! batch — concurrent per-file encryption/decryption.
//!
//! Layers, leaves first:
//! - `task`: unit of work and output naming
//! - `worker`: pool member draining the task queue
//! - `pipeline`: dispatcher (fill queue, close intake, join, drain results)
//! - `report`: per-file results and the run report

pub mod config;
pub mod io;
pub mod parallelism;
pub mod pipeline;
pub mod report;
pub mod task;
pub mod worker;

pub use config::BatchConfig;
pub use io::list_input_files;
pub use parallelism::WorkerProfile;
pub use pipeline::{run_batch, run_batch_dir};
pub use report::{BatchReport, TaskResult, TaskSuccess};
pub use task::{FileTask, Mode, RequestedMode};
pub use worker::{FileWorker, WorkerContext, WorkerTelemetry};
