//! Pitch/roll zone classifier
//!
//! Pure function of its inputs: no history, no side effects, and every
//! pair of floats (including NaN and infinities) maps to some zone.

use super::Zone;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which way positive roll points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RollConvention {
    /// Positive roll selects [`Zone::Right`]
    #[default]
    PositiveRight,
    /// Positive roll selects [`Zone::Left`]
    PositiveLeft,
}

/// Classifier thresholds (degrees)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ZoneThresholds {
    /// Both axes below this magnitude count as flat
    pub flat_deg: f32,
    /// The dominant axis must exceed this to select a directional zone
    pub tilt_deg: f32,
    /// Sign convention for the roll axis
    pub roll: RollConvention,
}

impl Default for ZoneThresholds {
    fn default() -> Self {
        Self {
            flat_deg: 15.0,
            tilt_deg: 20.0,
            roll: RollConvention::PositiveRight,
        }
    }
}

/// Normalize an angle into the half-open range (-180, 180]
///
/// Non-finite input is returned unchanged.
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle % 360.0;
    if wrapped > 180.0 {
        wrapped - 360.0
    } else if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Orientation to zone classifier
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ZoneClassifier {
    thresholds: ZoneThresholds,
}

impl ZoneClassifier {
    /// Create a classifier with the given thresholds
    pub const fn new(thresholds: ZoneThresholds) -> Self {
        Self { thresholds }
    }

    /// Classify a pitch/roll pair
    ///
    /// Ties between the axes go to pitch.
    pub fn classify(&self, pitch: f32, roll: f32) -> Zone {
        let pitch = normalize_degrees(pitch);
        let roll = normalize_degrees(roll);

        if !pitch.is_finite() || !roll.is_finite() {
            return Zone::Other;
        }

        let pitch_mag = libm::fabsf(pitch);
        let roll_mag = libm::fabsf(roll);

        // Deadband
        if pitch_mag < self.thresholds.flat_deg && roll_mag < self.thresholds.flat_deg {
            return Zone::Flat;
        }

        if pitch_mag >= roll_mag {
            if pitch_mag <= self.thresholds.tilt_deg {
                return Zone::Other;
            }
            if pitch > 0.0 {
                Zone::Forward
            } else {
                Zone::Back
            }
        } else {
            if roll_mag <= self.thresholds.tilt_deg {
                return Zone::Other;
            }
            match (roll > 0.0, self.thresholds.roll) {
                (true, RollConvention::PositiveRight) | (false, RollConvention::PositiveLeft) => {
                    Zone::Right
                }
                _ => Zone::Left,
            }
        }
    }
}
