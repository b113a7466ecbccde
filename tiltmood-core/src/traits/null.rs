//! No-op board
//!
//! Used when no hardware is attached: the sensor is never ready, the
//! joystick never fires and paints go nowhere. The engine keeps running
//! on its idle timer alone.

use crate::animation::Frame;
use crate::state::DirectionEvent;
use crate::time::Instant;
use crate::traits::{
    DisplayError, InputError, InputSource, OrientationSample, OrientationSource, PixelDisplay,
    SensorError,
};

/// Board with no hardware behind it
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBoard;

impl OrientationSource for NullBoard {
    fn poll_orientation(&mut self, _now: Instant) -> Result<OrientationSample, SensorError> {
        Err(SensorError::NotConnected)
    }
}

impl InputSource for NullBoard {
    fn next_input_event(&mut self) -> Result<Option<DirectionEvent>, InputError> {
        Ok(None)
    }
}

impl PixelDisplay for NullBoard {
    fn present(&mut self, _frame: &Frame) -> Result<(), DisplayError> {
        Ok(())
    }

    fn set_power_mode(&mut self, _dim: bool) -> Result<(), DisplayError> {
        Ok(())
    }
}
