// # 📂 src/batch/pipeline.rs
// ## Dispatcher wiring (no crypto logic)

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::thread;

use chrono::Utc;
use crossbeam::channel::bounded;
use tracing::{error, info, warn};

use crate::batch::config::BatchConfig;
use crate::batch::io::list_input_files;
use crate::batch::report::{BatchReport, TaskResult};
use crate::batch::task::{FileTask, RequestedMode};
use crate::batch::worker::{FileWorker, WorkerContext};
use crate::telemetry::{TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::{ConfigError, TaskError};

/// List `input_dir` (flat) and run the batch over every file in it.
pub fn run_batch_dir(input_dir: &Path, config: &BatchConfig) -> Result<BatchReport, ConfigError> {
    config.validate()?;
    let inputs = list_input_files(input_dir)?;
    run_batch(&inputs, config)
}

/// Run one batch over an already-resolved list of input files.
///
/// Every input yields exactly one result; per-file failures never abort the run.
/// Only configuration errors are returned as `Err`, before any file is touched.
pub fn run_batch(inputs: &[PathBuf], config: &BatchConfig) -> Result<BatchReport, ConfigError> {
    config.validate()?;

    let started_at = Utc::now();
    let mut timer = TelemetryTimer::new();
    let mut counters = TelemetryCounters::default();

    let mode = RequestedMode::parse(&config.mode);
    if let RequestedMode::Unsupported(raw) = &mode {
        warn!("[DISPATCH] unsupported mode {:?}; every file will report it", raw);
    }

    let total = inputs.len();
    let tasks = inputs
        .iter()
        .enumerate()
        .map(|(index, source)| FileTask::new(index, source.clone(), mode.clone()));
    let (dispatch, collisions) = claim_outputs(tasks, &config.output_dir);

    let worker_count = config.profile.workers_for(dispatch.len());
    info!(
        "[DISPATCH] mode={} suite={} files={} workers={}",
        mode,
        config.suite,
        total,
        worker_count
    );

    // ---- Channels ----
    // Both sized to the task count so no send ever blocks.
    let (task_tx, task_rx) = bounded::<FileTask>(dispatch.len().max(1));
    let (result_tx, result_rx) = bounded::<TaskResult>(total.max(1));

    for result in collisions {
        counters.add_failure();
        let _ = result_tx.send(result);
    }
    for task in dispatch {
        let _ = task_tx.send(task);
    }
    drop(task_tx); // close intake

    // ---- Workers + join barrier ----
    let ctx = WorkerContext {
        key: &config.key,
        suite: config.suite,
        output_dir: &config.output_dir,
    };

    thread::scope(|scope| {
        let handles: Vec<_> = (0..worker_count)
            .map(|id| {
                let worker = FileWorker::new(id, ctx);
                let rx = task_rx.clone();
                let tx = result_tx.clone();
                scope.spawn(move || worker.run(rx, tx))
            })
            .collect();

        for (id, handle) in handles.into_iter().enumerate() {
            match handle.join() {
                Ok(worker_telemetry) => {
                    counters.merge(&worker_telemetry.counters);
                    timer.stage_times.merge(&worker_telemetry.stage_times);
                }
                Err(_) => error!("[DISPATCH] worker {} panicked", id),
            }
        }
    });
    drop(task_rx);
    drop(result_tx);

    // ---- Drain results ----
    let mut slots: Vec<Option<TaskResult>> = (0..total).map(|_| None).collect();
    for result in result_rx.iter() {
        let index = result.index;
        slots[index] = Some(result);
    }

    let results = slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.unwrap_or_else(|| {
                counters.add_failure();
                TaskResult {
                    index,
                    source: inputs[index].clone(),
                    outcome: Err(TaskError::WorkerLost),
                }
            })
        })
        .collect::<Vec<_>>();

    timer.finish();
    let telemetry = TelemetrySnapshot::from(&counters, &timer);
    info!(
        "[DISPATCH] done: ok={} failed={} elapsed={:?}",
        telemetry.files_ok,
        telemetry.files_failed,
        telemetry.elapsed
    );

    Ok(BatchReport {
        mode: mode.to_string(),
        suite: config.suite,
        workers: worker_count,
        started_at,
        results,
        telemetry,
    })
}

/// Assign output paths, first claimant in input order wins.
///
/// Returns the tasks to dispatch and ready-made collision results for the rest.
/// Tasks whose output cannot be resolved (bad mode, no file name) are dispatched
/// as-is so the worker reports their error.
fn claim_outputs(
    tasks: impl Iterator<Item = FileTask>,
    output_dir: &Path,
) -> (Vec<FileTask>, Vec<TaskResult>) {
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
    let mut dispatch = Vec::new();
    let mut collisions = Vec::new();

    for task in tasks {
        let Ok(output) = task.output_path(output_dir) else {
            dispatch.push(task);
            continue;
        };

        if let Some(first) = claimed.get(&output) {
            warn!(
                "[DISPATCH] {} maps to {} already claimed by {}",
                task.source.display(),
                output.display(),
                first.display()
            );
            collisions.push(TaskResult {
                index: task.index,
                outcome: Err(TaskError::OutputCollision {
                    output,
                    claimed_by: first.clone(),
                }),
                source: task.source,
            });
            continue;
        }

        claimed.insert(output, task.source.clone());
        dispatch.push(task);
    }

    (dispatch, collisions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::task::Mode;

    fn tasks(names: &[&str], mode: Mode) -> Vec<FileTask> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| FileTask::new(i, format!("in/{n}"), mode.into()))
            .collect()
    }

    #[test]
    fn first_claimant_wins() {
        let (dispatch, collisions) =
            claim_outputs(tasks(&["a", "a.enc", "b.enc"], Mode::Decrypt).into_iter(), Path::new("out"));
        assert_eq!(dispatch.len(), 2);
        assert_eq!(dispatch[0].source, PathBuf::from("in/a"));
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].index, 1);
        assert!(matches!(
            &collisions[0].outcome,
            Err(TaskError::OutputCollision { claimed_by, .. }) if claimed_by == &PathBuf::from("in/a")
        ));
    }

    #[test]
    fn distinct_names_never_collide() {
        let (dispatch, collisions) =
            claim_outputs(tasks(&["a", "b", "c"], Mode::Encrypt).into_iter(), Path::new("out"));
        assert_eq!(dispatch.len(), 3);
        assert!(collisions.is_empty());
    }
}
