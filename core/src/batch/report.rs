// ## 📂 File: `src/batch/report.rs`

//! Per-file results and the run report handed back to the caller.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::batch::task::Mode;
use crate::crypto::CipherSuite;
use crate::telemetry::TelemetrySnapshot;
use crate::types::{ErrorKind, TaskError};

/// What a successful task produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSuccess {
    pub mode: Mode,
    pub output: PathBuf,
    pub bytes_in: usize,
    pub bytes_out: usize,
}

/// Exactly one per task.
#[derive(Debug)]
pub struct TaskResult {
    pub index: usize,
    pub source: PathBuf,
    pub outcome: Result<TaskSuccess, TaskError>,
}

impl TaskResult {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.outcome.as_ref().err().map(TaskError::kind)
    }
}

impl fmt::Display for TaskResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Ok(done) => write!(
                f,
                "{} {} -> {}",
                done.mode.past_tense(),
                self.source.display(),
                done.output.display()
            ),
            Err(e) => write!(f, "Error: {}: {}: {}", self.source.display(), e.kind(), e),
        }
    }
}

/// Outcome of one run. Results are ordered by input position.
#[derive(Debug)]
pub struct BatchReport {
    pub mode: String,
    pub suite: CipherSuite,
    pub workers: usize,
    pub started_at: DateTime<Utc>,
    pub results: Vec<TaskResult>,
    pub telemetry: TelemetrySnapshot,
}

impl BatchReport {
    pub fn successes(&self) -> impl Iterator<Item = &TaskResult> {
        self.results.iter().filter(|r| r.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &TaskResult> {
        self.results.iter().filter(|r| !r.is_ok())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn is_clean(&self) -> bool {
        self.failure_count() == 0
    }

    /// Order-independent view of the run: source → error kind (None on success).
    pub fn classification(&self) -> BTreeMap<PathBuf, Option<ErrorKind>> {
        self.results
            .iter()
            .map(|r| (r.source.clone(), r.error_kind()))
            .collect()
    }

    /// Final confirmation line, e.g. `encrypt complete!`.
    pub fn completion_line(&self) -> String {
        format!("{} complete!", self.mode)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&ReportView::from(self))
    }
}

// Serializable projection; `TaskError` carries `io::Error` and is not serde-friendly.
#[derive(Serialize)]
struct ReportView<'a> {
    mode: &'a str,
    suite: CipherSuite,
    workers: usize,
    started_at: DateTime<Utc>,
    succeeded: usize,
    failed: usize,
    files: Vec<EntryView>,
    telemetry: &'a TelemetrySnapshot,
}

#[derive(Serialize)]
struct EntryView {
    source: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bytes_in: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bytes_out: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> From<&'a BatchReport> for ReportView<'a> {
    fn from(report: &'a BatchReport) -> Self {
        let files = report
            .results
            .iter()
            .map(|r| {
                let source = r.source.display().to_string();
                match &r.outcome {
                    Ok(done) => EntryView {
                        source,
                        status: "ok",
                        output: Some(done.output.display().to_string()),
                        bytes_in: Some(done.bytes_in),
                        bytes_out: Some(done.bytes_out),
                        error_kind: None,
                        error: None,
                    },
                    Err(e) => EntryView {
                        source,
                        status: "error",
                        output: None,
                        bytes_in: None,
                        bytes_out: None,
                        error_kind: Some(e.kind()),
                        error: Some(e.to_string()),
                    },
                }
            })
            .collect::<Vec<_>>();

        let failed = files.iter().filter(|f| f.status == "error").count();

        Self {
            mode: &report.mode,
            suite: report.suite,
            workers: report.workers,
            started_at: report.started_at,
            succeeded: files.len() - failed,
            failed,
            files,
            telemetry: &report.telemetry,
        }
    }
}
