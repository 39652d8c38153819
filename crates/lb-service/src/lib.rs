//! `lb-service`: the remote elevator service boundary.
//!
//! The dispatcher treats the elevator bank as a remote, pollable endpoint that
//! can disappear at any moment.  This crate defines that boundary as the
//! [`ElevatorService`] trait and ships one implementation, [`SimulatedBank`],
//! an in-process simulator used by tests and the demo binary.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`service`]   | `ElevatorService` trait                                  |
//! | [`telemetry`] | `ElevatorTelemetry`: one car's full read-out            |
//! | [`sim`]       | `SimulatedBank`, `BankConfig`                            |
//! | [`error`]     | `ServiceError`, `ServiceResult<T>`                       |
//!
//! # Failure model
//!
//! Every call returns a [`ServiceResult`].  Callers must treat any `Err` as
//! loss of connectivity: there is no retry tier at this layer.

pub mod error;
pub mod service;
pub mod sim;
pub mod telemetry;

#[cfg(test)]
mod tests;

pub use error::{ServiceError, ServiceResult};
pub use service::ElevatorService;
pub use sim::{BankConfig, SimulatedBank};
pub use telemetry::ElevatorTelemetry;
