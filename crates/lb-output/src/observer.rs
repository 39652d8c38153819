//! `DispatchOutputObserver<W>`: bridges `DispatchObserver` to an `OutputWriter`.

use lb_core::FloorId;
use lb_dispatch::{DispatchError, DispatchObserver, Elevator, RequestTracker, TickReport};

use crate::row::{ElevatorSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`DispatchObserver`] that writes tick summaries and elevator snapshots
/// to any [`OutputWriter`] backend.
///
/// Observer methods have no return value, so write errors are stored and
/// the dispatch loop keeps running.  After `run` returns, check with
/// [`take_error`][Self::take_error].  The writer is finished when the run
/// ends, cleanly or not.
pub struct DispatchOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> DispatchOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error, if any.  Only the first one is kept.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

fn snapshot_row(poll: u64, car: &Elevator) -> ElevatorSnapshotRow {
    let t = car.telemetry();
    ElevatorSnapshotRow {
        poll,
        elevator_id: car.id().0,
        automatic:   car.is_automatic(),
        floor:       t.floor.0,
        position:    t.position,
        speed:       t.speed,
        weight:      t.weight,
        door:        t.door.code(),
        target:      t.target.0,
        next_target: car.next_target().unwrap_or(FloorId::INVALID).0,
        route_len:   car.route().len() as u32,
    }
}

impl<W: OutputWriter> DispatchObserver for DispatchOutputObserver<W> {
    fn on_tick_end(&mut self, poll: u64, report: &TickReport) {
        let row = TickSummaryRow {
            poll,
            clock:          report.clock.0,
            clock_advanced: report.clock_advanced,
            assignments:    report.assignments.len() as u32,
            arrivals:       report.arrivals.len() as u32,
            commands:       report.commands as u32,
            hall_calls:     report.hall_calls as u32,
            assigned:       report.assigned as u32,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(
        &mut self,
        poll:      u64,
        _report:   &TickReport,
        elevators: &[Elevator],
        _tracker:  &RequestTracker,
    ) {
        let rows: Vec<ElevatorSnapshotRow> =
            elevators.iter().map(|car| snapshot_row(poll, car)).collect();
        if !rows.is_empty() {
            let result = self.writer.write_elevator_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_failure(&mut self, _error: &DispatchError) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    fn on_run_end(&mut self, _polls: u64) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
