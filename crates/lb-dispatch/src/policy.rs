//! En-route insertion policy.
//!
//! A newly requested floor goes to the front of a car's route only when it
//! lies strictly between the car's current floor and its committed next
//! target, in the direction of travel.  Everything else is appended.  The
//! policy never reorders the rest of the route, so a car takes at most one
//! detour ahead of the target it is already heading for.

use lb_core::{Direction, FloorId};

/// Where a floor goes in a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Serve before the current next target.
    Front,
    /// Serve after everything already queued.
    Back,
}

/// Decide where `floor` belongs in the route of a car standing at (or
/// passing) `current` and heading for `next_target`.
///
/// ```text
/// moving up:    current < floor < next_target  → Front
/// moving down:  next_target < floor < current  → Front
/// otherwise (no target, boundaries, beyond)    → Back
/// ```
pub fn placement(current: FloorId, next_target: Option<FloorId>, floor: FloorId) -> Placement {
    let Some(target) = next_target else {
        return Placement::Back;
    };
    match Direction::towards(current, target) {
        Direction::Up if current < floor && floor < target   => Placement::Front,
        Direction::Down if target < floor && floor < current => Placement::Front,
        _                                                    => Placement::Back,
    }
}
