//! Idle sleep tracking
//!
//! Dims the display after a period without user activity.

pub mod sleep;

pub use sleep::{IdleSleepManager, PowerTransition};
