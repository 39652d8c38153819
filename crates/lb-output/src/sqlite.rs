//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `dispatch.db` file in the configured output directory
//! with two tables: `tick_summaries` and `elevator_snapshots`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{ElevatorSnapshotRow, OutputResult, TickSummaryRow};

/// Writes a dispatch trace to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `dispatch.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("dispatch.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 poll           INTEGER PRIMARY KEY,
                 clock          INTEGER NOT NULL,
                 clock_advanced INTEGER NOT NULL,
                 assignments    INTEGER NOT NULL,
                 arrivals       INTEGER NOT NULL,
                 commands       INTEGER NOT NULL,
                 hall_calls     INTEGER NOT NULL,
                 assigned       INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS elevator_snapshots (
                 poll        INTEGER NOT NULL,
                 elevator_id INTEGER NOT NULL,
                 automatic   INTEGER NOT NULL,
                 floor       INTEGER NOT NULL,
                 position    INTEGER NOT NULL,
                 speed       INTEGER NOT NULL,
                 weight      INTEGER NOT NULL,
                 door        INTEGER NOT NULL,
                 target      INTEGER NOT NULL,
                 next_target INTEGER NOT NULL,
                 route_len   INTEGER NOT NULL,
                 PRIMARY KEY (poll, elevator_id)
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (poll, clock, clock_advanced, assignments, arrivals, commands, hall_calls, assigned) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                row.poll as i64,
                row.clock as i64,
                row.clock_advanced as i64,
                row.assignments,
                row.arrivals,
                row.commands,
                row.hall_calls,
                row.assigned,
            ],
        )?;
        Ok(())
    }

    fn write_elevator_snapshots(&mut self, rows: &[ElevatorSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO elevator_snapshots \
                 (poll, elevator_id, automatic, floor, position, speed, weight, door, target, \
                  next_target, route_len) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.poll as i64,
                    row.elevator_id,
                    row.automatic as i64,
                    row.floor,
                    row.position,
                    row.speed,
                    row.weight,
                    row.door,
                    row.target,
                    row.next_target,
                    row.route_len,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
