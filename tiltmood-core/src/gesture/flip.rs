//! Rapid-flip detection
//!
//! Keeps a short ring of `(timestamp, angle)` pairs and fires when the
//! angle spread inside a sliding time window exceeds a threshold.
//!
//! The ring must be able to hold every sample that can land inside one
//! window at the fastest polling rate, otherwise samples still inside the
//! window get evicted and large swings go unnoticed. Config validation
//! checks this against [`FLIP_HISTORY_CAPACITY`].

use heapless::Deque;

use crate::time::Instant;
use crate::traits::OrientationSample;
use crate::zone::normalize_degrees;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of samples kept in the flip history
pub const FLIP_HISTORY_CAPACITY: usize = 64;

/// Axis watched for the swing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FlipAxis {
    #[default]
    Pitch,
    Roll,
}

/// Flip detector configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlipSettings {
    /// Sliding window length (ms)
    pub window_ms: u32,
    /// Minimum max-min spread inside the window (degrees)
    pub angle_deg: f32,
    /// Axis to watch
    pub axis: FlipAxis,
    /// Minimum time between two triggers (ms), 0 disables
    pub cooldown_ms: u32,
}

impl Default for FlipSettings {
    fn default() -> Self {
        Self {
            window_ms: 500,
            angle_deg: 60.0,
            axis: FlipAxis::Pitch,
            cooldown_ms: 0,
        }
    }
}

/// Upper bound on how many samples spaced `period_ms` apart fit in a window
pub fn samples_per_window(window_ms: u32, period_ms: u32) -> usize {
    (window_ms / period_ms.max(1)) as usize + 1
}

/// Sliding-window swing detector
#[derive(Debug, Clone)]
pub struct FlipGestureDetector {
    settings: FlipSettings,
    history: Deque<(Instant, f32), FLIP_HISTORY_CAPACITY>,
    last_fired: Option<Instant>,
}

impl FlipGestureDetector {
    /// Create a detector with an empty history
    pub fn new(settings: FlipSettings) -> Self {
        Self {
            settings,
            history: Deque::new(),
            last_fired: None,
        }
    }

    #[cfg(test)]
    fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Record a sample and report whether the gesture fired
    ///
    /// Non-finite readings are dropped without touching the history.
    pub fn observe(&mut self, sample: &OrientationSample) -> bool {
        let raw = match self.settings.axis {
            FlipAxis::Pitch => sample.pitch,
            FlipAxis::Roll => sample.roll,
        };
        let angle = normalize_degrees(raw);
        if !angle.is_finite() {
            return false;
        }

        if self.history.is_full() {
            self.history.pop_front();
        }
        // Cannot fail: one slot was freed above if needed
        let _ = self.history.push_back((sample.t, angle));

        if !self.swing_in_window(sample.t) {
            return false;
        }

        if let Some(last) = self.last_fired {
            if sample.t.millis_since(last) < u64::from(self.settings.cooldown_ms) {
                return false;
            }
        }

        self.last_fired = Some(sample.t);
        true
    }

    /// Check the spread of all samples at or after `now - window`
    fn swing_in_window(&self, now: Instant) -> bool {
        let cutoff = now.saturating_sub_millis(u64::from(self.settings.window_ms));

        let mut count = 0usize;
        let mut min = f32::MAX;
        let mut max = f32::MIN;

        for &(t, angle) in self.history.iter() {
            if t >= cutoff {
                count += 1;
                min = libm::fminf(min, angle);
                max = libm::fmaxf(max, angle);
            }
        }

        count >= 2 && max - min > self.settings.angle_deg
    }
}
