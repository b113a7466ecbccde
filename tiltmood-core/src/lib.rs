//! Board-agnostic core logic for the tiltmood LED face
//!
//! This crate contains everything that decides *what* the 8x8 matrix shows,
//! independent of the hardware that shows it:
//!
//! - Orientation zone classification
//! - Rapid-flip gesture detection
//! - Idle sleep / wake tracking
//! - Frame playback for mood animations
//! - The mood engine that ties them together once per tick
//! - Hardware abstraction traits and configuration types

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod animation;
pub mod config;
pub mod engine;
pub mod gesture;
pub mod idle;
pub mod state;
pub mod time;
pub mod traits;
pub mod zone;

pub use engine::{MoodEngine, PresentationCommand};
pub use time::Instant;
