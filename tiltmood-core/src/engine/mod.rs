//! Mood engine
//!
//! Owns the engine state and every component, and runs them in a fixed
//! order once per tick.

mod mood;
#[cfg(test)]
mod scripted;

pub use mood::{MoodEngine, PresentationCommand, MAX_EVENTS_PER_TICK};
