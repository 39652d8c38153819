//! `FloorQueue`: an insertion-ordered set of floors.
//!
//! Both request queues need first-observed-first-served iteration and cheap
//! membership checks.  A `Vec` keeps the order; an `FxHashSet` answers
//! `contains` in O(1).  Removal is O(n) in the queue length, which is bounded
//! by the floor count.

use lb_core::FloorId;
use rustc_hash::FxHashSet;

/// An ordered set of [`FloorId`]s.  Never holds the same floor twice.
#[derive(Debug, Clone, Default)]
pub struct FloorQueue {
    order:   Vec<FloorId>,
    members: FxHashSet<FloorId>,
}

impl FloorQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `floor` unless already present.  Returns `true` if it was added.
    pub fn push(&mut self, floor: FloorId) -> bool {
        if !self.members.insert(floor) {
            return false;
        }
        self.order.push(floor);
        true
    }

    /// Remove `floor`, preserving the order of the rest.  Returns `true` if it
    /// was present.
    pub fn remove(&mut self, floor: FloorId) -> bool {
        if !self.members.remove(&floor) {
            return false;
        }
        if let Some(pos) = self.order.iter().position(|&f| f == floor) {
            self.order.remove(pos);
        }
        true
    }

    #[inline]
    pub fn contains(&self, floor: FloorId) -> bool {
        self.members.contains(&floor)
    }

    /// Earliest-inserted floor matching `pred`.
    pub fn first_where(&self, mut pred: impl FnMut(FloorId) -> bool) -> Option<FloorId> {
        self.order.iter().copied().find(|&f| pred(f))
    }

    /// Floors in insertion order.
    pub fn as_slice(&self) -> &[FloorId] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = FloorId> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
