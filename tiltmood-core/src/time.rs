//! Monotonic timestamps
//!
//! The engine only compares timestamps against each other, so a millisecond
//! counter from any monotonic source (embassy `Instant`, a test clock) works.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Monotonic timestamp in milliseconds since an arbitrary epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Instant(u64);

impl Instant {
    /// The epoch
    pub const ZERO: Self = Self(0);

    /// Create a timestamp from milliseconds
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Create a timestamp from whole seconds
    pub const fn from_secs(s: u64) -> Self {
        Self(s * 1000)
    }

    /// Milliseconds since the epoch
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`, zero if `earlier` is in the future
    pub const fn millis_since(self, earlier: Instant) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// This timestamp moved back by `ms`, clamped at the epoch
    pub const fn saturating_sub_millis(self, ms: u64) -> Instant {
        Instant(self.0.saturating_sub(ms))
    }

    /// This timestamp moved forward by `ms`
    pub const fn add_millis(self, ms: u64) -> Instant {
        Instant(self.0.saturating_add(ms))
    }
}
