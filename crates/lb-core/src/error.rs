//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `LbError` as one variant
//! via `#[from]`.

use thiserror::Error;

use crate::{ElevatorId, FloorId};

/// Errors raised by `lb-core` validation helpers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LbError {
    #[error("{0} out of range (bank has {1} elevators)")]
    ElevatorOutOfRange(ElevatorId, usize),

    #[error("{0} out of range (bank has {1} floors)")]
    FloorOutOfRange(FloorId, usize),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `lb-core`.
pub type LbResult<T> = Result<T, LbError>;
