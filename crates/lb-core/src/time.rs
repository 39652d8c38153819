//! Remote clock ticks and polling configuration.
//!
//! # Design
//!
//! The remote service exposes a monotonically increasing clock counter.  The
//! dispatcher never advances time itself: it compares the value it reads each
//! poll against the previous one to decide whether cached telemetry is stale.
//! Polling cadence is wall-clock driven and configured by [`PollConfig`].

use std::fmt;
use std::time::Duration;

use crate::{LbError, LbResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// A value of the remote service's clock.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── PollConfig ────────────────────────────────────────────────────────────────

/// Configuration for the dispatcher's polling loop.
///
/// Typically loaded from a JSON file by the application crate (with the
/// `serde` feature) and passed to `Dispatcher::run`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PollConfig {
    /// Wall-clock milliseconds slept between two ticks.  `0` polls as fast as
    /// the remote service answers.
    pub poll_interval_ms: u64,

    /// Stop after this many ticks.  `None` runs until stopped or disconnected.
    pub max_polls: Option<u64>,

    /// Call `on_snapshot` every N ticks.  `0` disables snapshots.
    pub snapshot_interval: u64,

    /// Automatic-mode flag given to every elevator at construction.
    pub automatic_by_default: bool,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms:     100,
            max_polls:            None,
            snapshot_interval:    1,
            automatic_by_default: true,
        }
    }
}

impl PollConfig {
    /// The sleep between two ticks.
    #[inline]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Reject configurations the run loop cannot honour.
    pub fn validate(&self) -> LbResult<()> {
        if self.max_polls == Some(0) {
            return Err(LbError::Config("max_polls must be at least 1 when set".into()));
        }
        Ok(())
    }

    /// `true` when the snapshot hook should fire for the `n`-th poll.
    #[inline]
    pub fn is_snapshot_poll(&self, n: u64) -> bool {
        self.snapshot_interval > 0 && n.is_multiple_of(self.snapshot_interval)
    }
}
