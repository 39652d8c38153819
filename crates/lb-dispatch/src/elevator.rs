//! Per-car dispatch state.

use std::collections::VecDeque;

use lb_core::{ElevatorId, FloorId};
use lb_service::ElevatorTelemetry;

use crate::{Placement, placement};

/// Coarse dispatch state of a car.  Arrival is handled inline within a tick
/// and never lingers as a state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevatorState {
    /// Empty route; eligible to take a hall call.
    Idle,
    /// Heading for the route head.
    EnRoute(FloorId),
}

/// One car as the dispatcher sees it.
///
/// The route is a deque: the head is the floor the remote service should
/// currently have as the car's target.  Routes never hold duplicates.
#[derive(Debug, Clone)]
pub struct Elevator {
    id:        ElevatorId,
    automatic: bool,
    route:     VecDeque<FloorId>,
    /// Refreshed whenever the remote clock advances.  Display only.
    telemetry: ElevatorTelemetry,
}

impl Elevator {
    pub fn new(id: ElevatorId, automatic: bool) -> Self {
        Self {
            id,
            automatic,
            route:     VecDeque::new(),
            telemetry: ElevatorTelemetry::default(),
        }
    }

    #[inline]
    pub fn id(&self) -> ElevatorId {
        self.id
    }

    #[inline]
    pub fn is_automatic(&self) -> bool {
        self.automatic
    }

    /// Head of the route, or `None` when the car has nothing to do.
    #[inline]
    pub fn next_target(&self) -> Option<FloorId> {
        self.route.front().copied()
    }

    pub fn state(&self) -> ElevatorState {
        match self.next_target() {
            None        => ElevatorState::Idle,
            Some(floor) => ElevatorState::EnRoute(floor),
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.route.is_empty()
    }

    pub fn route(&self) -> &VecDeque<FloorId> {
        &self.route
    }

    pub fn has_in_route(&self, floor: FloorId) -> bool {
        self.route.contains(&floor)
    }

    pub fn telemetry(&self) -> &ElevatorTelemetry {
        &self.telemetry
    }

    // ── Dispatcher-only mutation ──────────────────────────────────────────

    pub(crate) fn set_automatic(&mut self, automatic: bool) {
        self.automatic = automatic;
    }

    pub(crate) fn set_telemetry(&mut self, telemetry: ElevatorTelemetry) {
        self.telemetry = telemetry;
    }

    /// Place `floor` in the route according to the insertion policy, given
    /// the car's `current` floor.  Returns `None` if the floor is already in
    /// the route.
    pub(crate) fn insert_target(&mut self, floor: FloorId, current: FloorId) -> Option<Placement> {
        if self.has_in_route(floor) {
            return None;
        }
        let at = placement(current, self.next_target(), floor);
        match at {
            Placement::Front => self.route.push_front(floor),
            Placement::Back  => self.route.push_back(floor),
        }
        Some(at)
    }

    /// Resolve the route head after the car served it.
    pub(crate) fn pop_target(&mut self) -> Option<FloorId> {
        self.route.pop_front()
    }
}
