//! Frame playback
//!
//! The player never decides *which* mood plays; it only maps a playback
//! position onto a frame and steps it. Index resets on mood changes are
//! the engine's call.

use super::catalog::Mood;
use super::frame::Frame;

/// Slowest playback rate
pub const MIN_FPS: u8 = 1;

/// Fastest playback rate
pub const MAX_FPS: u8 = 12;

static BLANK: Frame = Frame::BLANK;

/// Steps mood animations and the flip reaction
#[derive(Debug, Clone, Default)]
pub struct AnimationPlayer {
    /// Position within the reaction, `None` when not reacting
    reaction_pos: Option<u32>,
}

impl AnimationPlayer {
    pub const fn new() -> Self {
        Self { reaction_pos: None }
    }

    /// Frame to show for `frame_index` and the index for the next tick
    ///
    /// The index wraps modulo the frame count; paused playback holds it.
    pub fn advance<'m>(&self, mood: &Mood<'m>, frame_index: u32, paused: bool) -> (&'m Frame, u32) {
        let frame = match mood.frames.len() {
            0 => &BLANK,
            len => &mood.frames[frame_index as usize % len],
        };
        let next = if paused {
            frame_index
        } else {
            frame_index.wrapping_add(1)
        };
        (frame, next)
    }

    /// Tick spacing for a mood, in milliseconds
    pub fn frame_interval_ms(mood: &Mood<'_>) -> u32 {
        1000 / u32::from(mood.fps.clamp(MIN_FPS, MAX_FPS))
    }

    /// Begin the flip reaction from its first frame
    ///
    /// Has no effect while a reaction is already playing.
    pub fn start_reaction(&mut self) -> bool {
        if self.reaction_pos.is_some() {
            return false;
        }
        self.reaction_pos = Some(0);
        true
    }

    /// Check if the reaction is playing
    pub fn is_reacting(&self) -> bool {
        self.reaction_pos.is_some()
    }

    /// Next reaction frame
    ///
    /// Plays `frames` `cycles` times, then returns `None` and clears the
    /// reaction so the caller falls back to the mood.
    pub fn advance_reaction<'m>(&mut self, frames: &'m [Frame], cycles: u8) -> Option<&'m Frame> {
        let pos = self.reaction_pos?;
        let total = frames.len() as u32 * u32::from(cycles);
        if pos >= total {
            self.reaction_pos = None;
            return None;
        }
        self.reaction_pos = Some(pos + 1);
        frames.get(pos as usize % frames.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::frame::Rgb;

    const A: Frame = Frame::solid(Rgb::new(1, 0, 0));
    const B: Frame = Frame::solid(Rgb::new(0, 1, 0));
    const C: Frame = Frame::solid(Rgb::new(0, 0, 1));
    static FRAMES: [Frame; 3] = [A, B, C];

    fn mood(fps: u8) -> Mood<'static> {
        Mood::new("test", &FRAMES, fps)
    }

    #[test]
    fn test_advance_running() {
        let player = AnimationPlayer::new();
        let m = mood(4);
        assert_eq!(player.advance(&m, 0, false), (&A, 1));
        assert_eq!(player.advance(&m, 1, false), (&B, 2));
        assert_eq!(player.advance(&m, 2, false), (&C, 3));
        assert_eq!(player.advance(&m, 3, false), (&A, 4));
    }

    #[test]
    fn test_advance_paused_holds() {
        let player = AnimationPlayer::new();
        let m = mood(4);
        assert_eq!(player.advance(&m, 5, true), (&C, 5));
        assert_eq!(player.advance(&m, 5, true), (&C, 5));
    }

    #[test]
    fn test_advance_wraps_at_u32_max() {
        let player = AnimationPlayer::new();
        let (_, next) = player.advance(&mood(4), u32::MAX, false);
        assert_eq!(next, 0);
    }

    #[test]
    fn test_empty_mood_is_blank() {
        let player = AnimationPlayer::new();
        let empty = Mood::new("empty", &[], 1);
        let (frame, _) = player.advance(&empty, 3, false);
        assert!(frame.is_blank());
    }

    #[test]
    fn test_frame_interval_clamps_fps() {
        assert_eq!(AnimationPlayer::frame_interval_ms(&mood(0)), 1000);
        assert_eq!(AnimationPlayer::frame_interval_ms(&mood(4)), 250);
        assert_eq!(AnimationPlayer::frame_interval_ms(&mood(12)), 83);
        assert_eq!(AnimationPlayer::frame_interval_ms(&mood(60)), 83);
    }

    #[test]
    fn test_reaction_plays_cycles_then_ends() {
        let mut player = AnimationPlayer::new();
        let flash = [A, B];
        assert_eq!(player.advance_reaction(&flash, 3), None);

        assert!(player.start_reaction());
        let mut shown = std::vec::Vec::new();
        while let Some(frame) = player.advance_reaction(&flash, 3) {
            shown.push(*frame);
        }
        assert_eq!(shown, [A, B, A, B, A, B]);
        assert!(!player.is_reacting());
    }

    #[test]
    fn test_reaction_does_not_restart() {
        let mut player = AnimationPlayer::new();
        let flash = [A, B];
        player.start_reaction();
        player.advance_reaction(&flash, 1);
        assert!(!player.start_reaction());
        assert_eq!(player.advance_reaction(&flash, 1), Some(&B));
    }
}
