//! Per-car telemetry read-out.

use lb_core::{DoorStatus, FloorId};

/// Everything the remote service reports about one car at a given clock tick.
///
/// Display fields (`position`, `speed`, `weight`) are never dispatch inputs;
/// the dispatcher decides on `floor`, `door`, and `target` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElevatorTelemetry {
    pub floor:    FloorId,
    pub position: u32,
    pub speed:    i32,
    pub weight:   u32,
    pub door:     DoorStatus,
    /// Floor the remote service currently has as the car's target.
    pub target:   FloorId,
}

impl ElevatorTelemetry {
    /// `true` when the car stands at its remote target with the door open.
    #[inline]
    pub fn at_target_with_door_open(&self) -> bool {
        self.floor == self.target && self.door.is_open()
    }
}
