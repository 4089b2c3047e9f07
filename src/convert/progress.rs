//! Progress reporting seam
//!
//! Progress is an observability side effect, not part of the data contract.
//! The engine reports through this trait so the CLI can attach a terminal
//! progress bar while library callers and tests stay silent.

/// Receiver for record-count updates during a conversion run
pub trait Progress {
    /// Called periodically with the number of records processed so far
    fn records(&self, count: u64);

    /// Called once when the run completes
    fn finish(&self, total: u64);
}

/// No-op progress sink
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl Progress for NullProgress {
    fn records(&self, _count: u64) {}

    fn finish(&self, _total: u64) {}
}

/// How many records pass between progress reports
pub const REPORT_INTERVAL: u64 = 1000;
