//! Mood animations
//!
//! Frames, moods, the catalog they live in and the player that walks
//! through them one tick at a time.

pub mod catalog;
pub mod faces;
pub mod frame;
pub mod player;

pub use catalog::{Catalog, Mood, MAX_MOODS};
pub use frame::{Frame, Rgb, FRAME_HEIGHT, FRAME_WIDTH};
pub use player::{AnimationPlayer, MAX_FPS, MIN_FPS};
