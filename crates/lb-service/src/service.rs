//! The `ElevatorService` trait: everything the dispatcher may ask of the bank.

use lb_core::{DoorStatus, ElevatorId, FloorId, Tick};

use crate::{ElevatorTelemetry, ServiceResult};

/// A remote elevator bank.
///
/// Reads are `&self`; the single command, [`set_target`][Self::set_target],
/// takes `&mut self`.  Every call may fail with a
/// [`ServiceError`][crate::ServiceError], which the dispatcher treats as
/// fatal for the run.
///
/// # Required methods
///
/// One method per remote accessor.  The provided methods compose them into
/// the shapes the dispatcher actually consumes (decoded door status, "any
/// hall button pressed", a full telemetry read-out).
///
/// # Example
///
/// ```rust,ignore
/// let bank = SimulatedBank::new(BankConfig::default())?;
/// let floors = bank.floor_count()?;
/// for floor in FloorId::all(floors) {
///     if bank.hall_call_pressed(floor)? {
///         println!("{floor} is waiting");
///     }
/// }
/// ```
pub trait ElevatorService {
    /// Current value of the remote clock.  Monotonically non-decreasing.
    fn clock_tick(&self) -> ServiceResult<Tick>;

    /// Number of elevator cars in the bank.
    fn elevator_count(&self) -> ServiceResult<usize>;

    /// Number of floors served by the bank.
    fn floor_count(&self) -> ServiceResult<usize>;

    /// Floor the car is at, or nearest to while travelling.
    fn elevator_floor(&self, elevator: ElevatorId) -> ServiceResult<FloorId>;

    /// Height of the car above ground level, in the bank's length unit.
    fn elevator_position(&self, elevator: ElevatorId) -> ServiceResult<u32>;

    /// Signed speed; positive is upward.
    fn elevator_speed(&self, elevator: ElevatorId) -> ServiceResult<i32>;

    /// Current payload of the car.
    fn elevator_weight(&self, elevator: ElevatorId) -> ServiceResult<u32>;

    /// Raw door status code (see [`DoorStatus::from_code`]).
    fn door_status_code(&self, elevator: ElevatorId) -> ServiceResult<i32>;

    /// Floor the car is currently commanded to.
    fn target(&self, elevator: ElevatorId) -> ServiceResult<FloorId>;

    /// `true` while the in-cab button for `floor` is lit.
    fn elevator_button(&self, elevator: ElevatorId, floor: FloorId) -> ServiceResult<bool>;

    /// `true` while the landing's up button is lit.
    fn floor_button_up(&self, floor: FloorId) -> ServiceResult<bool>;

    /// `true` while the landing's down button is lit.
    fn floor_button_down(&self, floor: FloorId) -> ServiceResult<bool>;

    /// Command the car to travel to `floor`.
    fn set_target(&mut self, elevator: ElevatorId, floor: FloorId) -> ServiceResult<()>;

    // ── Provided ──────────────────────────────────────────────────────────

    /// Decoded door status.
    fn door_status(&self, elevator: ElevatorId) -> ServiceResult<DoorStatus> {
        self.door_status_code(elevator).map(DoorStatus::from_code)
    }

    /// `true` if either landing button of `floor` is lit.
    fn hall_call_pressed(&self, floor: FloorId) -> ServiceResult<bool> {
        Ok(self.floor_button_down(floor)? || self.floor_button_up(floor)?)
    }

    /// Read every telemetry field of one car.
    fn telemetry(&self, elevator: ElevatorId) -> ServiceResult<ElevatorTelemetry> {
        Ok(ElevatorTelemetry {
            floor:    self.elevator_floor(elevator)?,
            position: self.elevator_position(elevator)?,
            speed:    self.elevator_speed(elevator)?,
            weight:   self.elevator_weight(elevator)?,
            door:     self.door_status(elevator)?,
            target:   self.target(elevator)?,
        })
    }
}
