//! Plain data row types written by output backends.

/// One row per dispatch tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub poll:           u64,
    /// Remote clock value read by the tick.
    pub clock:          u64,
    pub clock_advanced: bool,
    pub assignments:    u32,
    pub arrivals:       u32,
    pub commands:       u32,
    /// Queue lengths at the end of the tick.
    pub hall_calls:     u32,
    pub assigned:       u32,
}

/// One elevator's state at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElevatorSnapshotRow {
    pub poll:        u64,
    pub elevator_id: u32,
    pub automatic:   bool,
    pub floor:       u32,
    pub position:    u32,
    pub speed:       i32,
    pub weight:      u32,
    /// Raw door code as reported by the service.
    pub door:        i32,
    /// Remote target.
    pub target:      u32,
    /// Head of the dispatcher's route; `u32::MAX` when idle.
    pub next_target: u32,
    pub route_len:   u32,
}
