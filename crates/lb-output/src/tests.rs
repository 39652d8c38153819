//! Integration tests for lb-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::{CsvWriter, ELEVATOR_SNAPSHOT_HEADER, TICK_SUMMARY_HEADER};
    use crate::row::{ElevatorSnapshotRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn summary_row(poll: u64) -> TickSummaryRow {
        TickSummaryRow {
            poll,
            clock:          poll + 100,
            clock_advanced: true,
            assignments:    1,
            arrivals:       0,
            commands:       2,
            hall_calls:     3,
            assigned:       1,
        }
    }

    fn snap_row(elevator_id: u32, poll: u64) -> ElevatorSnapshotRow {
        ElevatorSnapshotRow {
            poll,
            elevator_id,
            automatic:   true,
            floor:       elevator_id + 2,
            position:    (elevator_id + 2) * 10,
            speed:       -5,
            weight:      80,
            door:        2,
            target:      7,
            next_target: u32::MAX,
            route_len:   0,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("tick_summaries.csv").exists());
        assert!(dir.path().join("elevator_snapshots.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, TICK_SUMMARY_HEADER);

        let mut rdr = csv::Reader::from_path(dir.path().join("elevator_snapshots.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ELEVATOR_SNAPSHOT_HEADER);
    }

    #[test]
    fn csv_tick_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(4)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "4");   // poll
        assert_eq!(&rows[0][1], "104"); // clock
        assert_eq!(&rows[0][2], "1");   // clock_advanced
        assert_eq!(&rows[0][5], "2");   // commands
    }

    #[test]
    fn csv_snapshots_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_elevator_snapshots(&[snap_row(0, 6), snap_row(1, 6)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("elevator_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][1], "1");          // elevator_id
        assert_eq!(&rows[1][3], "3");          // floor
        assert_eq!(&rows[1][5], "-5");         // speed
        assert_eq!(&rows[1][9], "4294967295"); // idle: no next target
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_missing_dir_fails() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("nope")).is_err());
    }
}

// ── Observer tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use std::io;

    use lb_core::{Direction, FloorId, PollConfig};
    use lb_dispatch::{DispatchObserver, DispatcherBuilder, StopHandle, TickReport};
    use lb_service::{BankConfig, SimulatedBank};
    use tempfile::TempDir;

    use crate::row::{ElevatorSnapshotRow, TickSummaryRow};
    use crate::writer::OutputWriter;
    use crate::{CsvWriter, DispatchOutputObserver, OutputError, OutputResult};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn poll_config(max: u64, snapshot_interval: u64) -> PollConfig {
        PollConfig {
            poll_interval_ms: 0,
            max_polls: Some(max),
            snapshot_interval,
            automatic_by_default: true,
        }
    }

    /// Counts calls and fails every summary write.
    #[derive(Default)]
    struct BrokenWriter {
        summaries: usize,
        finishes:  usize,
    }

    impl OutputWriter for BrokenWriter {
        fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
            self.summaries += 1;
            Err(io::Error::other(format!("disk full at poll {}", row.poll)).into())
        }
        fn write_elevator_snapshots(&mut self, _rows: &[ElevatorSnapshotRow]) -> OutputResult<()> {
            Ok(())
        }
        fn finish(&mut self) -> OutputResult<()> {
            self.finishes += 1;
            Ok(())
        }
    }

    #[test]
    fn run_writes_summaries_and_snapshots() {
        let bank = SimulatedBank::new(BankConfig { elevator_count: 2, ..BankConfig::default() })
            .unwrap();
        bank.press_hall(FloorId(5), Direction::Up).unwrap();
        let mut dispatcher = DispatcherBuilder::new(bank.clone()).build().unwrap();

        let dir = tmp();
        let mut obs = DispatchOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        dispatcher.run(&poll_config(6, 2), &mut obs, &StopHandle::new()).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let summaries: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(summaries.len(), 6);
        assert_eq!(&summaries[0][3], "1"); // hall call 5 assigned on poll 0

        // snapshot_interval = 2 → polls 0, 2, 4 × 2 elevators
        let mut rdr = csv::Reader::from_path(dir.path().join("elevator_snapshots.csv")).unwrap();
        let snapshots: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(snapshots.len(), 6);
        assert_eq!(&snapshots[0][9], "5"); // elevator 0 heading for 5
    }

    #[test]
    fn first_error_kept_and_run_continues() {
        let mut obs = DispatchOutputObserver::new(BrokenWriter::default());
        obs.on_tick_end(0, &TickReport::default());
        obs.on_tick_end(1, &TickReport::default());
        obs.on_run_end(2);

        match obs.take_error() {
            Some(OutputError::Io(e)) => assert!(e.to_string().contains("poll 0")),
            other => panic!("expected the first I/O error, got {other:?}"),
        }
        assert!(obs.take_error().is_none());
        let writer = obs.into_writer();
        assert_eq!(writer.summaries, 2);
        assert_eq!(writer.finishes, 1);
    }

    #[test]
    fn failed_run_still_finishes_writer() {
        let bank = SimulatedBank::new(BankConfig::default()).unwrap();
        let mut dispatcher = DispatcherBuilder::new(bank.clone()).build().unwrap();
        bank.disconnect().unwrap();

        let mut obs = DispatchOutputObserver::new(BrokenWriter::default());
        assert!(dispatcher.run(&poll_config(3, 1), &mut obs, &StopHandle::new()).is_err());
        let writer = obs.into_writer();
        assert_eq!(writer.summaries, 0);
        assert_eq!(writer.finishes, 1);
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use crate::row::{ElevatorSnapshotRow, TickSummaryRow};
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn snap_row(elevator_id: u32, poll: u64, next_target: u32) -> ElevatorSnapshotRow {
        ElevatorSnapshotRow {
            poll,
            elevator_id,
            automatic: elevator_id != 1,
            floor: 3,
            position: 30,
            speed: 0,
            weight: 0,
            door: 1,
            target: 3,
            next_target,
            route_len: if next_target == u32::MAX { 0 } else { 1 },
        }
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("dispatch.db").exists());
    }

    #[test]
    fn sqlite_snapshot_count() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_elevator_snapshots(&[snap_row(0, 1, 4), snap_row(1, 1, u32::MAX), snap_row(2, 1, 8)])
            .unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("dispatch.db")).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM elevator_snapshots", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn sqlite_flags_and_idle_marker() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_elevator_snapshots(&[snap_row(1, 0, u32::MAX)]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("dispatch.db")).unwrap();
        let (automatic, next): (i64, i64) = conn
            .query_row(
                "SELECT automatic, next_target FROM elevator_snapshots WHERE elevator_id = 1",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap();
        assert_eq!(automatic, 0);
        assert_eq!(next, u32::MAX as i64);
    }

    #[test]
    fn sqlite_tick_summary() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow {
            poll: 7, clock: 42, clock_advanced: false, assignments: 0, arrivals: 1,
            commands: 1, hall_calls: 2, assigned: 1,
        })
        .unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("dispatch.db")).unwrap();
        let (clock, advanced, hall_calls): (i64, i64, i64) = conn
            .query_row(
                "SELECT clock, clock_advanced, hall_calls FROM tick_summaries WHERE poll = 7",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!(clock, 42);
        assert_eq!(advanced, 0);
        assert_eq!(hall_calls, 2);
    }
}
