//! Engine state and transition rules
//!
//! Presentation is a function of the current state. Sleeping is tracked by
//! the idle manager and layered on top: it overrides what is shown but never
//! touches the paused flag, so waking restores the previous behavior.

use super::events::Action;
use crate::zone::Zone;

/// Observable engine mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Animating the selected mood
    Active { mood: u8 },
    /// Holding the current frame of the selected mood
    Paused { mood: u8 },
    /// Display dimmed; remembers what to resume
    Sleeping { mood: u8, paused: bool },
}

/// Mood selection and playback position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EngineState {
    mood_index: u8,
    frame_index: u32,
    paused: bool,
    last_zone: Option<Zone>,
}

impl EngineState {
    /// Initial state: `home` mood, first frame, running, no zone seen yet
    pub const fn new(home: u8) -> Self {
        Self {
            mood_index: home,
            frame_index: 0,
            paused: false,
            last_zone: None,
        }
    }

    /// Selected mood (index into the catalog)
    pub fn mood_index(&self) -> u8 {
        self.mood_index
    }

    /// Playback position; taken modulo the frame count when presenting
    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    /// Check if playback is frozen
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Zone that last drove a mood decision
    pub fn last_zone(&self) -> Option<Zone> {
        self.last_zone
    }

    /// Observable mode given the idle manager's sleep flag
    pub fn mode(&self, sleeping: bool) -> Mode {
        match (sleeping, self.paused) {
            (true, paused) => Mode::Sleeping {
                mood: self.mood_index,
                paused,
            },
            (false, true) => Mode::Paused {
                mood: self.mood_index,
            },
            (false, false) => Mode::Active {
                mood: self.mood_index,
            },
        }
    }

    /// Apply a user action
    ///
    /// `mood_count` must be non-zero (guaranteed by config validation).
    pub fn apply(self, action: Action, mood_count: u8, home: u8) -> Self {
        let count = u16::from(mood_count.max(1));
        let current = u16::from(self.mood_index);
        match action {
            Action::NextMood => Self {
                mood_index: ((current + 1) % count) as u8,
                frame_index: 0,
                paused: false,
                ..self
            },
            Action::PreviousMood => Self {
                mood_index: ((current + count - 1) % count) as u8,
                frame_index: 0,
                paused: false,
                ..self
            },
            Action::TogglePause => Self {
                paused: !self.paused,
                ..self
            },
            Action::Home => Self {
                mood_index: home,
                frame_index: 0,
                ..self
            },
            Action::Ignore => self,
        }
    }

    /// Check if `zone` would trigger a mood change
    pub fn zone_changed(&self, zone: Zone) -> bool {
        !self.paused && self.last_zone != Some(zone)
    }

    /// React to a classified orientation
    ///
    /// A new zone selects its mapped mood and restarts playback. Unmapped
    /// zones are remembered but keep the current mood. An unchanged zone,
    /// or any zone while paused, leaves the state alone.
    pub fn observe_zone(self, zone: Zone, mapped_mood: Option<u8>) -> Self {
        if !self.zone_changed(zone) {
            return self;
        }

        match mapped_mood {
            Some(mood_index) => Self {
                mood_index,
                frame_index: 0,
                last_zone: Some(zone),
                ..self
            },
            None => Self {
                last_zone: Some(zone),
                ..self
            },
        }
    }

    /// Record a zone without acting on it
    ///
    /// Used while the flip reaction plays so the prior mood resumes as-is.
    pub fn adopt_zone(self, zone: Zone) -> Self {
        Self {
            last_zone: Some(zone),
            ..self
        }
    }

    /// Store the playback position chosen by the player
    pub fn with_frame_index(self, frame_index: u32) -> Self {
        Self {
            frame_index,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOODS: u8 = 6;

    #[test]
    fn test_initial_state() {
        let state = EngineState::new(0);
        assert_eq!(state.mood_index(), 0);
        assert_eq!(state.frame_index(), 0);
        assert!(!state.is_paused());
        assert_eq!(state.last_zone(), None);
        assert_eq!(state.mode(false), Mode::Active { mood: 0 });
    }

    #[test]
    fn test_navigation_wraps() {
        let state = EngineState::new(0);

        let prev = state.apply(Action::PreviousMood, MOODS, 0);
        assert_eq!(prev.mood_index(), MOODS - 1);

        let next = prev.apply(Action::NextMood, MOODS, 0);
        assert_eq!(next.mood_index(), 0);
    }

    #[test]
    fn test_navigation_resets_frame_and_unpauses() {
        let state = EngineState::new(2)
            .with_frame_index(7)
            .apply(Action::TogglePause, MOODS, 0);
        assert!(state.is_paused());

        let next = state.apply(Action::NextMood, MOODS, 0);
        assert_eq!(next.mood_index(), 3);
        assert_eq!(next.frame_index(), 0);
        assert!(!next.is_paused());
    }

    #[test]
    fn test_toggle_pause_keeps_mood() {
        let state = EngineState::new(4).with_frame_index(2);
        let paused = state.apply(Action::TogglePause, MOODS, 0);
        assert!(paused.is_paused());
        assert_eq!(paused.mood_index(), 4);
        assert_eq!(paused.frame_index(), 2);
        assert_eq!(paused.mode(false), Mode::Paused { mood: 4 });

        let resumed = paused.apply(Action::TogglePause, MOODS, 0);
        assert!(!resumed.is_paused());
    }

    #[test]
    fn test_home() {
        let state = EngineState::new(3).with_frame_index(5);
        let home = state.apply(Action::Home, MOODS, 1);
        assert_eq!(home.mood_index(), 1);
        assert_eq!(home.frame_index(), 0);
    }

    #[test]
    fn test_ignore_is_noop() {
        let state = EngineState::new(3).with_frame_index(5);
        assert_eq!(state.apply(Action::Ignore, MOODS, 0), state);
    }

    #[test]
    fn test_zone_change_selects_mood() {
        let state = EngineState::new(0).with_frame_index(4);
        let next = state.observe_zone(Zone::Back, Some(1));
        assert_eq!(next.mood_index(), 1);
        assert_eq!(next.frame_index(), 0);
        assert_eq!(next.last_zone(), Some(Zone::Back));
    }

    #[test]
    fn test_same_zone_holds() {
        let state = EngineState::new(0)
            .observe_zone(Zone::Forward, Some(0))
            .with_frame_index(3);
        let next = state.observe_zone(Zone::Forward, Some(0));
        assert_eq!(next, state);
    }

    #[test]
    fn test_zone_ignored_while_paused() {
        let state = EngineState::new(0)
            .observe_zone(Zone::Flat, Some(3))
            .apply(Action::TogglePause, MOODS, 0);
        let next = state.observe_zone(Zone::Left, Some(2));
        assert_eq!(next, state);
        assert_eq!(next.last_zone(), Some(Zone::Flat));
    }

    #[test]
    fn test_unmapped_zone_keeps_mood() {
        let state = EngineState::new(2).with_frame_index(4);
        let next = state.observe_zone(Zone::Other, None);
        assert_eq!(next.mood_index(), 2);
        assert_eq!(next.frame_index(), 4);
        assert_eq!(next.last_zone(), Some(Zone::Other));
    }

    #[test]
    fn test_sleeping_mode_remembers_pause() {
        let state = EngineState::new(1).apply(Action::TogglePause, MOODS, 0);
        assert_eq!(
            state.mode(true),
            Mode::Sleeping {
                mood: 1,
                paused: true
            }
        );
    }
}
