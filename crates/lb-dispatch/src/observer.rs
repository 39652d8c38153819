//! Dispatcher observer trait for progress reporting and trace collection.

use lb_core::{ElevatorId, FloorId};

use crate::{DispatchError, Elevator, RequestTracker, TickReport};

/// Callbacks invoked by [`Dispatcher::run`][crate::Dispatcher::run] at key
/// points in the polling loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  Observers get read-only views; the routes
/// and queues can only be changed by the dispatcher itself.
///
/// # Example: arrival printer
///
/// ```rust,ignore
/// struct ArrivalPrinter;
///
/// impl DispatchObserver for ArrivalPrinter {
///     fn on_arrival(&mut self, elevator: ElevatorId, floor: FloorId) {
///         println!("{elevator} served {floor}");
///     }
/// }
/// ```
pub trait DispatchObserver {
    /// Called before each tick.  `poll` counts ticks since the dispatcher was
    /// built, starting at 0.
    fn on_tick_start(&mut self, _poll: u64) {}

    /// An idle car was handed a hall call this tick.
    fn on_assignment(&mut self, _elevator: ElevatorId, _floor: FloorId) {}

    /// A car completed the visit at the head of its route this tick.
    fn on_arrival(&mut self, _elevator: ElevatorId, _floor: FloorId) {}

    /// Called after a successful tick.
    fn on_tick_end(&mut self, _poll: u64, _report: &TickReport) {}

    /// Called at snapshot intervals (every `config.snapshot_interval` ticks)
    /// with the full dispatch state, for presentation or trace writers.
    fn on_snapshot(
        &mut self,
        _poll:      u64,
        _report:    &TickReport,
        _elevators: &[Elevator],
        _tracker:   &RequestTracker,
    ) {}

    /// The run is ending because of `error`.  Called once, right before
    /// `run` returns it.
    fn on_failure(&mut self, _error: &DispatchError) {}

    /// Called once when the loop ends without error.
    fn on_run_end(&mut self, _polls: u64) {}
}

/// A [`DispatchObserver`] that does nothing.
pub struct NoopObserver;

impl DispatchObserver for NoopObserver {}
