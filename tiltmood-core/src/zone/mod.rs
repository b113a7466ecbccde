//! Orientation zones
//!
//! Maps a continuous pitch/roll reading onto a small fixed set of zones.

pub mod classifier;

pub use classifier::{normalize_degrees, RollConvention, ZoneClassifier, ZoneThresholds};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Discrete orientation bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Zone {
    /// Both axes inside the deadband
    Flat,
    /// Positive pitch dominates
    Forward,
    /// Negative pitch dominates
    Back,
    /// Roll dominates towards the left
    Left,
    /// Roll dominates towards the right
    Right,
    /// Tilted, but not far enough along either axis
    Other,
}

impl Zone {
    /// Number of zones
    pub const COUNT: usize = 6;

    /// All zones in table order
    pub const ALL: [Zone; Zone::COUNT] = [
        Zone::Flat,
        Zone::Forward,
        Zone::Back,
        Zone::Left,
        Zone::Right,
        Zone::Other,
    ];

    /// Position in [`Zone::ALL`], used to index per-zone tables
    pub const fn index(self) -> usize {
        match self {
            Zone::Flat => 0,
            Zone::Forward => 1,
            Zone::Back => 2,
            Zone::Left => 3,
            Zone::Right => 4,
            Zone::Other => 5,
        }
    }

    /// Config key for this zone
    pub fn name(self) -> &'static str {
        match self {
            Zone::Flat => "flat",
            Zone::Forward => "forward",
            Zone::Back => "back",
            Zone::Left => "left",
            Zone::Right => "right",
            Zone::Other => "other",
        }
    }

    /// Look up a zone by its config key
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|z| z.name() == name)
    }
}
