//! `RequestTracker`: the hall-call queue and the assigned-target queue.

use lb_core::FloorId;

use crate::FloorQueue;

/// The two request queues owned by the dispatcher.
///
/// - **hall calls**: landing-button presses not yet handed to a car, in the
///   order they were first observed.
/// - **assigned**: floors currently sitting in some car's route.  A floor is
///   never handed to a second car while it is here.
///
/// The queues are deliberately not kept disjoint: a landing button that stays
/// lit after its floor was claimed is recorded again as a hall call, and both
/// entries are released together when a car completes the visit.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    hall_calls: FloorQueue,
    assigned:   FloorQueue,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a lit landing button.  No-op if the floor is already queued.
    pub fn record_hall_call(&mut self, floor: FloorId) -> bool {
        self.hall_calls.push(floor)
    }

    /// Move `floor` out of the hall-call queue and into the assigned queue.
    /// Returns `false` if it was already assigned.
    pub fn claim(&mut self, floor: FloorId) -> bool {
        self.hall_calls.remove(floor);
        self.assigned.push(floor)
    }

    /// Drop `floor` from both queues.  Returns `true` if anything was removed.
    pub fn release(&mut self, floor: FloorId) -> bool {
        let hall     = self.hall_calls.remove(floor);
        let assigned = self.assigned.remove(floor);
        hall || assigned
    }

    pub fn release_hall_call(&mut self, floor: FloorId) -> bool {
        self.hall_calls.remove(floor)
    }

    pub fn release_assigned(&mut self, floor: FloorId) -> bool {
        self.assigned.remove(floor)
    }

    /// Earliest hall call no car has been given yet.
    pub fn first_unassigned_hall_call(&self) -> Option<FloorId> {
        self.hall_calls.first_where(|f| !self.assigned.contains(f))
    }

    #[inline]
    pub fn is_hall_call(&self, floor: FloorId) -> bool {
        self.hall_calls.contains(floor)
    }

    #[inline]
    pub fn is_assigned(&self, floor: FloorId) -> bool {
        self.assigned.contains(floor)
    }

    pub fn hall_calls(&self) -> &FloorQueue {
        &self.hall_calls
    }

    pub fn assigned(&self) -> &FloorQueue {
        &self.assigned
    }
}
