use lb_core::LbError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("remote elevator service unreachable: {0}")]
    Disconnected(String),

    #[error("remote call `{call}` failed: {reason}")]
    Call {
        call:   &'static str,
        reason: String,
    },

    #[error("invalid request: {0}")]
    Invalid(#[from] LbError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
