//! `lb-core`: foundational types for the `liftbank` elevator dispatcher.
//!
//! This crate is a dependency of every other `lb-*` crate.  It has no `lb-*`
//! dependencies and only `thiserror` (plus optional `serde`) externally.
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`ids`]       | `ElevatorId`, `FloorId`                                 |
//! | [`motion`]    | `DoorStatus` (remote status codes), `Direction`         |
//! | [`time`]      | `Tick` (remote clock value), `PollConfig`               |
//! | [`error`]     | `LbError`, `LbResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod motion;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{LbError, LbResult};
pub use ids::{ElevatorId, FloorId};
pub use motion::{Direction, DoorStatus};
pub use time::{PollConfig, Tick};
