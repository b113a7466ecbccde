//! Engine state and input events
//!
//! The state is a small `Copy` value. Every change goes through a pure
//! transition function so the rules can be tested without a board.

pub mod events;
pub mod machine;

pub use events::{Action, DirectionEvent, InputBindings};
pub use machine::{EngineState, Mode};
