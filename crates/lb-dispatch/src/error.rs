use lb_core::{ElevatorId, FloorId, LbError};
use lb_service::ServiceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("remote elevator service failed: {0}")]
    Remote(#[from] ServiceError),

    #[error("{elevator} reported {floor} outside [0, {floor_count})")]
    InvalidTelemetry {
        elevator:    ElevatorId,
        floor:       FloorId,
        floor_count: usize,
    },

    #[error("{what} count {got} does not match expected {expected}")]
    CountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("dispatcher configuration error: {0}")]
    Config(#[from] LbError),
}

impl DispatchError {
    /// `true` when the run ended because the remote service went away.
    pub fn is_disconnect(&self) -> bool {
        matches!(self, DispatchError::Remote(_))
    }
}

pub type DispatchResult<T> = Result<T, DispatchError>;
