//! `lb-dispatch`: the elevator dispatch loop.
//!
//! # Tick loop
//!
//! ```text
//! every poll_interval:
//!   ① Clock    : read the remote clock; if it moved, refresh every car's
//!                cached telemetry.
//!   ② Snapshot : read floor, door and remote target of every car once.
//!   ③ Scan     : for each floor: lit hall button → hall-call queue;
//!                lit cab button → insertion policy on that car's route.
//!   ④ Assign   : for each automatic car, in id order:
//!                  idle     → take the first unassigned hall call
//!                  en route → realign the remote target with the route head
//!                  arrived  → pop the head, release its queue entries
//! ```
//!
//! Any remote failure ends the run: there is no retry and no partial-tick
//! rollback, since queue mutations only follow successful remote calls.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lb_core::PollConfig;
//! use lb_dispatch::{DispatcherBuilder, NoopObserver, StopHandle};
//! use lb_service::{BankConfig, SimulatedBank};
//!
//! let bank = SimulatedBank::new(BankConfig::default())?;
//! let mut dispatcher = DispatcherBuilder::new(bank).build()?;
//! dispatcher.run(&PollConfig::default(), &mut NoopObserver, &StopHandle::new())?;
//! ```

pub mod builder;
pub mod dispatcher;
pub mod elevator;
pub mod error;
pub mod floor_queue;
pub mod observer;
pub mod policy;
pub mod stop;
pub mod tracker;


pub use builder::DispatcherBuilder;
pub use dispatcher::{Dispatcher, TickReport};
pub use elevator::{Elevator, ElevatorState};
pub use error::{DispatchError, DispatchResult};
pub use floor_queue::FloorQueue;
pub use observer::{DispatchObserver, NoopObserver};
pub use policy::{Placement, placement};
pub use stop::StopHandle;
pub use tracker::RequestTracker;
