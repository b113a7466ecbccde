//! Configuration type definitions

use crate::animation::{AnimationPlayer, Catalog, MAX_MOODS};
use crate::animation::faces::{ANGRY_INDEX, COOL_INDEX, HAPPY_INDEX, SAD_INDEX, SURPRISED_INDEX};
use crate::gesture::{samples_per_window, FlipSettings, FLIP_HISTORY_CAPACITY};
use crate::state::InputBindings;
use crate::zone::{Zone, ZoneThresholds};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration rejected at engine construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Catalog has no moods
    EmptyCatalog,
    /// Catalog has more moods than a `u8` can index
    TooManyMoods,
    /// A mood has no frames
    EmptyMood,
    /// A mood has a playback rate of zero
    ZeroFps,
    /// Idle timeout is zero
    ZeroIdleTimeout,
    /// Flip window is zero
    ZeroFlipWindow,
    /// Threshold is negative or not finite
    InvalidThreshold,
    /// A zone maps to a mood outside the catalog
    ZoneMoodOutOfRange,
    /// Home mood is outside the catalog
    HomeOutOfRange,
    /// Reaction has no frames or zero cycles
    EmptyReaction,
    /// Flip history cannot hold a full window at the fastest tick rate
    FlipHistoryTooShort,
    /// A tick interval is zero
    ZeroTickInterval,
}

/// Everything the engine needs besides the catalog
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// Zone classifier thresholds
    pub zone: ZoneThresholds,
    /// Flip gesture settings
    pub flip: FlipSettings,
    /// Time without input before dimming (ms)
    pub idle_timeout_ms: u32,
    /// Tick spacing while asleep (ms)
    pub sleep_poll_ms: u32,
    /// Tick spacing while the flip reaction plays (ms)
    pub reaction_frame_ms: u32,
    /// How many times the reaction sequence repeats
    pub reaction_cycles: u8,
    /// Joystick direction to action mapping
    pub bindings: InputBindings,
    /// Mood selected by each zone, indexed by [`Zone::index`]
    pub zone_moods: [Option<u8>; Zone::COUNT],
    /// Mood shown at startup and on `Home`
    pub home_mood: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let mut zone_moods = [None; Zone::COUNT];
        zone_moods[Zone::Flat.index()] = Some(SURPRISED_INDEX);
        zone_moods[Zone::Forward.index()] = Some(HAPPY_INDEX);
        zone_moods[Zone::Back.index()] = Some(SAD_INDEX);
        zone_moods[Zone::Left.index()] = Some(ANGRY_INDEX);
        zone_moods[Zone::Right.index()] = Some(COOL_INDEX);

        Self {
            zone: ZoneThresholds::default(),
            flip: FlipSettings::default(),
            idle_timeout_ms: 20_000,
            sleep_poll_ms: 50,
            reaction_frame_ms: 50,
            reaction_cycles: 3,
            bindings: InputBindings::default(),
            zone_moods,
            home_mood: HAPPY_INDEX,
        }
    }
}

impl EngineConfig {
    /// Mood mapped to a zone, if any
    pub fn mood_for_zone(&self, zone: Zone) -> Option<u8> {
        self.zone_moods[zone.index()]
    }

    /// Map a zone to a mood, or unmap it with `None`
    pub fn set_zone_mood(&mut self, zone: Zone, mood: Option<u8>) {
        self.zone_moods[zone.index()] = mood;
    }

    /// Check this configuration against the catalog it will drive
    pub fn validate(&self, catalog: &Catalog<'_>) -> Result<(), ConfigError> {
        if catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if catalog.moods().len() > MAX_MOODS {
            return Err(ConfigError::TooManyMoods);
        }
        for mood in catalog.moods() {
            if mood.frames.is_empty() {
                return Err(ConfigError::EmptyMood);
            }
            if mood.fps == 0 {
                return Err(ConfigError::ZeroFps);
            }
        }

        if self.idle_timeout_ms == 0 {
            return Err(ConfigError::ZeroIdleTimeout);
        }
        if self.flip.window_ms == 0 {
            return Err(ConfigError::ZeroFlipWindow);
        }
        let thresholds = [self.zone.flat_deg, self.zone.tilt_deg, self.flip.angle_deg];
        if thresholds.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(ConfigError::InvalidThreshold);
        }

        let count = catalog.len();
        if self.zone_moods.iter().flatten().any(|&m| m >= count) {
            return Err(ConfigError::ZoneMoodOutOfRange);
        }
        if self.home_mood >= count {
            return Err(ConfigError::HomeOutOfRange);
        }
        if catalog.reaction().is_empty() || self.reaction_cycles == 0 {
            return Err(ConfigError::EmptyReaction);
        }
        if self.sleep_poll_ms == 0 || self.reaction_frame_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        if samples_per_window(self.flip.window_ms, self.min_tick_interval_ms(catalog))
            >= FLIP_HISTORY_CAPACITY
        {
            return Err(ConfigError::FlipHistoryTooShort);
        }

        Ok(())
    }

    /// Shortest spacing the engine can request between two ticks
    pub fn min_tick_interval_ms(&self, catalog: &Catalog<'_>) -> u32 {
        catalog
            .moods()
            .iter()
            .map(AnimationPlayer::frame_interval_ms)
            .fold(self.sleep_poll_ms.min(self.reaction_frame_ms), u32::min)
    }
}
