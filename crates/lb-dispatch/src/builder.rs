//! Fluent builder for constructing a [`Dispatcher`].

use lb_core::{ElevatorId, LbError};
use lb_service::ElevatorService;

use crate::{DispatchError, DispatchResult, Dispatcher, Elevator, RequestTracker};

/// Fluent builder for [`Dispatcher<S>`].
///
/// The elevator and floor counts come from the remote service itself; one
/// [`Elevator`] is created per reported car and lives for the whole run.
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                              |
/// |--------------------------|--------------------------------------|
/// | `.automatic(b)`          | `true`: every car starts automatic  |
/// | `.expect_elevators(n)`   | Accept whatever the service reports  |
/// | `.expect_floors(n)`      | Accept whatever the service reports  |
///
/// # Example
///
/// ```rust,ignore
/// let mut dispatcher = DispatcherBuilder::new(bank)
///     .automatic(true)
///     .expect_floors(10)
///     .build()?;
/// ```
pub struct DispatcherBuilder<S: ElevatorService> {
    service:   S,
    automatic: bool,
    elevators: Option<usize>,
    floors:    Option<usize>,
}

impl<S: ElevatorService> DispatcherBuilder<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            automatic: true,
            elevators: None,
            floors:    None,
        }
    }

    /// Initial automatic-mode flag of every car.
    pub fn automatic(mut self, automatic: bool) -> Self {
        self.automatic = automatic;
        self
    }

    /// Fail the build unless the service reports exactly `n` cars.
    pub fn expect_elevators(mut self, n: usize) -> Self {
        self.elevators = Some(n);
        self
    }

    /// Fail the build unless the service reports exactly `n` floors.
    pub fn expect_floors(mut self, n: usize) -> Self {
        self.floors = Some(n);
        self
    }

    /// Query the bank's shape, create the cars, and load their telemetry.
    pub fn build(self) -> DispatchResult<Dispatcher<S>> {
        let elevator_count = self.service.elevator_count()?;
        let floor_count    = self.service.floor_count()?;

        if elevator_count == 0 {
            return Err(LbError::Config("remote service reports no elevators".into()).into());
        }
        if floor_count == 0 {
            return Err(LbError::Config("remote service reports no floors".into()).into());
        }
        if let Some(expected) = self.elevators.filter(|&n| n != elevator_count) {
            return Err(DispatchError::CountMismatch {
                expected,
                got:  elevator_count,
                what: "elevator",
            });
        }
        if let Some(expected) = self.floors.filter(|&n| n != floor_count) {
            return Err(DispatchError::CountMismatch {
                expected,
                got:  floor_count,
                what: "floor",
            });
        }

        let elevators = (0..elevator_count)
            .map(|i| Elevator::new(ElevatorId(i as u32), self.automatic))
            .collect();

        let mut dispatcher = Dispatcher {
            service:    self.service,
            floor_count,
            elevators,
            tracker:    RequestTracker::new(),
            last_clock: None,
            polls:      0,
        };
        dispatcher.refresh_telemetry()?;
        Ok(dispatcher)
    }
}
