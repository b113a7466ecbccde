//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod engine;
pub mod input;

pub use engine::engine_task;
pub use input::input_task;
