//! Motion gestures
//!
//! Currently a single gesture: a fast, large swing of the device.

pub mod flip;

pub use flip::{samples_per_window, FlipAxis, FlipGestureDetector, FlipSettings, FLIP_HISTORY_CAPACITY};
