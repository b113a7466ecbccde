//! Mood catalog
//!
//! The catalog is fixed at startup. Moods are addressed by their position,
//! which is what the engine stores and what zone/home mappings refer to.

use super::faces;
use super::frame::Frame;

/// Largest catalog an engine can address (mood indices are `u8`)
pub const MAX_MOODS: usize = u8::MAX as usize;

/// A named animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mood<'a> {
    /// Lookup name (matched case-insensitively)
    pub name: &'a str,
    /// Frames in playback order
    pub frames: &'a [Frame],
    /// Playback rate; clamped by the player
    pub fps: u8,
}

impl<'a> Mood<'a> {
    pub const fn new(name: &'a str, frames: &'a [Frame], fps: u8) -> Self {
        Self { name, frames, fps }
    }
}

/// Moods plus the special sequences the engine needs
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    moods: &'a [Mood<'a>],
    sleep_frame: Frame,
    reaction: &'a [Frame],
}

impl<'a> Catalog<'a> {
    pub const fn new(moods: &'a [Mood<'a>], sleep_frame: Frame, reaction: &'a [Frame]) -> Self {
        Self {
            moods,
            sleep_frame,
            reaction,
        }
    }

    /// Number of moods, saturating at [`MAX_MOODS`]
    pub fn len(&self) -> u8 {
        u8::try_from(self.moods.len()).unwrap_or(u8::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.moods.is_empty()
    }

    pub fn moods(&self) -> &'a [Mood<'a>] {
        self.moods
    }

    /// Get a mood by index
    pub fn mood(&self, index: u8) -> Option<&'a Mood<'a>> {
        self.moods.get(usize::from(index))
    }

    /// Find a mood index by name
    pub fn find(&self, name: &str) -> Option<u8> {
        self.moods
            .iter()
            .position(|m| m.name.eq_ignore_ascii_case(name))
            .and_then(|i| u8::try_from(i).ok())
    }

    /// Frame held while the display is dimmed
    pub fn sleep_frame(&self) -> &Frame {
        &self.sleep_frame
    }

    /// One cycle of the flip reaction
    pub fn reaction(&self) -> &'a [Frame] {
        self.reaction
    }
}

impl Catalog<'static> {
    /// The faces that ship with the firmware
    pub fn builtin() -> Self {
        Self::new(&faces::BUILTIN_MOODS, faces::SLEEP_FACE, &faces::FLASH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 7);
        assert!(!catalog.is_empty());
        assert!(catalog.moods().iter().all(|m| !m.frames.is_empty() && m.fps > 0));
        assert_eq!(catalog.reaction().len(), 2);
        assert!(!catalog.sleep_frame().is_blank());
    }

    #[test]
    fn test_find_ignores_case() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.find("happy"), Some(faces::HAPPY_INDEX));
        assert_eq!(catalog.find("Cool"), Some(faces::COOL_INDEX));
        assert_eq!(catalog.find("grumpy"), None);
    }

    #[test]
    fn test_mood_out_of_range() {
        let catalog = Catalog::builtin();
        assert!(catalog.mood(6).is_some());
        assert!(catalog.mood(7).is_none());
    }
}
