// ### `src/telemetry/counters.rs`

//! telemetry/counters.rs
//! Mutable counters used during a batch run.
//!
//! Summary: Collects file outcomes and byte counts during encrypt/decrypt.
//! Converted into immutable TelemetrySnapshot at run end.
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Deterministic counters collected while processing files.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    pub files_ok: u64,
    pub files_failed: u64,
    /// Bytes read from input files (successful tasks only).
    pub bytes_read: u64,
    /// Bytes written to output files.
    pub bytes_written: u64,
}

impl TelemetryCounters {
    /// Record one successful file.
    ///
    /// - `in_len`: input file length
    /// - `out_len`: output file length (in + 28 on encrypt, in - 28 on decrypt)
    pub fn add_success(&mut self, in_len: usize, out_len: usize) {
        self.files_ok += 1;
        self.bytes_read += in_len as u64;
        self.bytes_written += out_len as u64;
    }

    /// Record one failed file.
    pub fn add_failure(&mut self) {
        self.files_failed += 1;
    }

    pub fn files_total(&self) -> u64 {
        self.files_ok + self.files_failed
    }

    // Per-worker counters are merged after join: no locks or atomics inside workers.
    pub fn merge(&mut self, other: &TelemetryCounters) {
        self.files_ok += other.files_ok;
        self.files_failed += other.files_failed;
        self.bytes_read += other.bytes_read;
        self.bytes_written += other.bytes_written;
    }
}

impl AddAssign for TelemetryCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_adds_fieldwise() {
        let mut a = TelemetryCounters::default();
        a.add_success(10, 38);
        let mut b = TelemetryCounters::default();
        b.add_success(5, 33);
        b.add_failure();

        a += b;
        assert_eq!(a.files_ok, 2);
        assert_eq!(a.files_failed, 1);
        assert_eq!(a.files_total(), 3);
        assert_eq!(a.bytes_read, 15);
        assert_eq!(a.bytes_written, 71);
    }
}
