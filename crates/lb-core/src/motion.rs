//! Door status codes and travel direction.

use std::fmt;

use crate::FloorId;

// ── DoorStatus ───────────────────────────────────────────────────────────────

/// Door state as reported by the remote service.
///
/// The service encodes door state as an integer: `1` open, `2` closed,
/// `3` opening, `4` closing.  Codes outside that set are kept verbatim in
/// [`DoorStatus::Unknown`] rather than rejected.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DoorStatus {
    Open,
    #[default]
    Closed,
    Opening,
    Closing,
    Unknown(i32),
}

impl DoorStatus {
    pub const OPEN_CODE:    i32 = 1;
    pub const CLOSED_CODE:  i32 = 2;
    pub const OPENING_CODE: i32 = 3;
    pub const CLOSING_CODE: i32 = 4;

    /// Decode a raw remote status code.
    pub fn from_code(code: i32) -> Self {
        match code {
            Self::OPEN_CODE    => DoorStatus::Open,
            Self::CLOSED_CODE  => DoorStatus::Closed,
            Self::OPENING_CODE => DoorStatus::Opening,
            Self::CLOSING_CODE => DoorStatus::Closing,
            other              => DoorStatus::Unknown(other),
        }
    }

    /// Encode back to the remote integer representation.
    pub fn code(self) -> i32 {
        match self {
            DoorStatus::Open       => Self::OPEN_CODE,
            DoorStatus::Closed     => Self::CLOSED_CODE,
            DoorStatus::Opening    => Self::OPENING_CODE,
            DoorStatus::Closing    => Self::CLOSING_CODE,
            DoorStatus::Unknown(c) => c,
        }
    }

    /// `true` only for a fully open door.  Arrival detection keys on this.
    #[inline]
    pub fn is_open(self) -> bool {
        self == DoorStatus::Open
    }
}

impl fmt::Display for DoorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoorStatus::Open       => f.write_str("open"),
            DoorStatus::Closed     => f.write_str("closed"),
            DoorStatus::Opening    => f.write_str("opening"),
            DoorStatus::Closing    => f.write_str("closing"),
            DoorStatus::Unknown(c) => write!(f, "unknown({c})"),
        }
    }
}

// ── Direction ────────────────────────────────────────────────────────────────

/// Committed direction of travel, derived from the car's floor and its next
/// target.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Uncommitted,
}

impl Direction {
    /// Direction a car at `current` must travel to reach `target`.
    pub fn towards(current: FloorId, target: FloorId) -> Self {
        match current.cmp(&target) {
            std::cmp::Ordering::Less    => Direction::Up,
            std::cmp::Ordering::Greater => Direction::Down,
            std::cmp::Ordering::Equal   => Direction::Uncommitted,
        }
    }
}
