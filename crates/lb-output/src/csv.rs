//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `tick_summaries.csv`
//! - `elevator_snapshots.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{ElevatorSnapshotRow, OutputResult, TickSummaryRow};

pub const TICK_SUMMARY_HEADER: [&str; 8] = [
    "poll", "clock", "clock_advanced", "assignments", "arrivals", "commands", "hall_calls",
    "assigned",
];

pub const ELEVATOR_SNAPSHOT_HEADER: [&str; 11] = [
    "poll", "elevator_id", "automatic", "floor", "position", "speed", "weight", "door", "target",
    "next_target", "route_len",
];

/// Writes a dispatch trace to two CSV files.
pub struct CsvWriter {
    summaries: Writer<File>,
    snapshots: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(TICK_SUMMARY_HEADER)?;

        let mut snapshots = Writer::from_path(dir.join("elevator_snapshots.csv"))?;
        snapshots.write_record(ELEVATOR_SNAPSHOT_HEADER)?;

        Ok(Self {
            summaries,
            snapshots,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.poll.to_string(),
            row.clock.to_string(),
            (row.clock_advanced as u8).to_string(),
            row.assignments.to_string(),
            row.arrivals.to_string(),
            row.commands.to_string(),
            row.hall_calls.to_string(),
            row.assigned.to_string(),
        ])?;
        Ok(())
    }

    fn write_elevator_snapshots(&mut self, rows: &[ElevatorSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.poll.to_string(),
                row.elevator_id.to_string(),
                (row.automatic as u8).to_string(),
                row.floor.to_string(),
                row.position.to_string(),
                row.speed.to_string(),
                row.weight.to_string(),
                row.door.to_string(),
                row.target.to_string(),
                row.next_target.to_string(),
                row.route_len.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.snapshots.flush()?;
        Ok(())
    }
}
