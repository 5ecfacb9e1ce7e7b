//! telemetry/mod.rs
//! Unified telemetry module: counters, timers, and immutable snapshots.
//!
//! Workers own their counters and stage timers; the dispatcher merges them after
//! the join barrier and freezes the result into a `TelemetrySnapshot`.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
