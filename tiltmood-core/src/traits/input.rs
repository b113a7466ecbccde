//! Directional input trait

use crate::state::DirectionEvent;

/// Errors that can occur while polling for input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// Bus transaction failed
    Bus,
    /// Events were lost because the queue overflowed
    Overflow,
}

/// Trait for joystick-style input
pub trait InputSource {
    /// Poll for the next pending press
    ///
    /// Returns `Ok(Some(event))` if an event is available,
    /// `Ok(None)` if no event is pending. Never blocks.
    fn next_input_event(&mut self) -> Result<Option<DirectionEvent>, InputError>;
}
