//! Idle sleep manager
//!
//! Tracks the last user interaction and reports sleep/wake edges. Both
//! edges are one-shot: the caller changes the display power once per
//! transition, never on every tick.

use crate::time::Instant;

/// A change of display power state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerTransition {
    /// Idle timeout crossed, dim the display
    Sleep,
    /// Activity while asleep, restore brightness
    Wake,
}

/// Idle timer with a sleeping flag
#[derive(Debug, Clone)]
pub struct IdleSleepManager {
    /// Time without input before sleeping (ms)
    timeout_ms: u64,
    /// Last user interaction
    last_input: Instant,
    /// Currently asleep
    sleeping: bool,
}

impl IdleSleepManager {
    /// Create an awake manager whose idle timer starts at `now`
    pub fn new(timeout_ms: u32, now: Instant) -> Self {
        Self {
            timeout_ms: u64::from(timeout_ms),
            last_input: now,
            sleeping: false,
        }
    }

    /// Check if asleep
    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    #[cfg(test)]
    fn last_input(&self) -> Instant {
        self.last_input
    }

    /// Check if the idle timeout has been exceeded while awake
    pub fn should_sleep(&self, now: Instant) -> bool {
        !self.sleeping && now.millis_since(self.last_input) > self.timeout_ms
    }

    /// Enter sleep if the timeout has been exceeded
    ///
    /// Returns `Some(Sleep)` only on the tick that crosses the timeout.
    pub fn poll(&mut self, now: Instant) -> Option<PowerTransition> {
        if self.should_sleep(now) {
            self.sleeping = true;
            Some(PowerTransition::Sleep)
        } else {
            None
        }
    }

    /// Record user activity
    ///
    /// Returns `Some(Wake)` if this woke the display. Touching while awake
    /// only refreshes the timer.
    pub fn touch(&mut self, now: Instant) -> Option<PowerTransition> {
        self.last_input = now;
        if self.sleeping {
            self.sleeping = false;
            Some(PowerTransition::Wake)
        } else {
            None
        }
    }
}
