//! Strongly typed identifier wrappers for elevators and floors.
//!
//! Both IDs are `Copy + Ord + Hash` so they can be used as set members and
//! route entries without ceremony.  The inner integer is `pub` so the remote
//! service boundary can convert to and from its raw indices.

use std::fmt;

use crate::{LbError, LbResult};

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID": equivalent to `u32::MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of an elevator car, `0..elevator_count`.  Stable for the run.
    pub struct ElevatorId(u32);
}

typed_id! {
    /// Index of a floor, `0..floor_count`.  Floor 0 is the lowest landing.
    pub struct FloorId(u32);
}

impl FloorId {
    /// Returns `self` if it lies in `[0, floor_count)`.
    pub fn checked(self, floor_count: usize) -> LbResult<FloorId> {
        if self.index() < floor_count {
            Ok(self)
        } else {
            Err(LbError::FloorOutOfRange(self, floor_count))
        }
    }

    /// Iterate every floor of a bank with `floor_count` floors, lowest first.
    pub fn all(floor_count: usize) -> impl Iterator<Item = FloorId> {
        (0..floor_count as u32).map(FloorId)
    }
}

impl ElevatorId {
    /// Returns `self` if it lies in `[0, elevator_count)`.
    pub fn checked(self, elevator_count: usize) -> LbResult<ElevatorId> {
        if self.index() < elevator_count {
            Ok(self)
        } else {
            Err(LbError::ElevatorOutOfRange(self, elevator_count))
        }
    }
}
