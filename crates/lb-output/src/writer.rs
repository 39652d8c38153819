//! The `OutputWriter` trait implemented by all backend writers.

use crate::{ElevatorSnapshotRow, OutputResult, TickSummaryRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// The observer never propagates these errors into the dispatch loop; they
/// are stored and retrieved with
/// [`DispatchOutputObserver::take_error`][crate::DispatchOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Write a batch of elevator snapshots.
    fn write_elevator_snapshots(&mut self, rows: &[ElevatorSnapshotRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
