//! `lb-output`: dispatch trace writers for the liftbank dispatcher.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Files created                                       |
//! |-----------|---------|-----------------------------------------------------|
//! | *(none)*  | CSV     | `tick_summaries.csv`, `elevator_snapshots.csv`      |
//! | `sqlite`  | SQLite  | `dispatch.db`                                       |
//!
//! Both implement [`OutputWriter`] and are driven by
//! [`DispatchOutputObserver`], which implements
//! `lb_dispatch::DispatchObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lb_output::{CsvWriter, DispatchOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./trace"))?;
//! let mut obs = DispatchOutputObserver::new(writer);
//! dispatcher.run(&poll, &mut obs, &stop)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("trace error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::DispatchOutputObserver;
pub use row::{ElevatorSnapshotRow, TickSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
