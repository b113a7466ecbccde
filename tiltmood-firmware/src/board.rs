//! Firmware board
//!
//! Orientation and painting go straight to the Sense HAT. Joystick input
//! arrives through [`INPUT_CHANNEL`], filled by the input task, so reading
//! it never touches the bus.

use tiltmood_core::animation::Frame;
use tiltmood_core::state::DirectionEvent;
use tiltmood_core::traits::{
    DisplayError, InputError, InputSource, NullBoard, OrientationSample, OrientationSource,
    PixelDisplay, SensorError,
};
use tiltmood_core::Instant;
use tiltmood_drivers::SenseHat;

use crate::bus::SharedI2c;
use crate::channels::INPUT_CHANNEL;

/// Board selected at startup
pub enum FirmwareBoard {
    /// Sense HAT found
    SenseHat(SenseHat<SharedI2c>),
    /// No HAT: run on the idle timer alone
    Null(NullBoard),
}

impl OrientationSource for FirmwareBoard {
    fn poll_orientation(&mut self, now: Instant) -> Result<OrientationSample, SensorError> {
        match self {
            FirmwareBoard::SenseHat(hat) => hat.poll_orientation(now),
            FirmwareBoard::Null(null) => null.poll_orientation(now),
        }
    }
}

impl InputSource for FirmwareBoard {
    fn next_input_event(&mut self) -> Result<Option<DirectionEvent>, InputError> {
        Ok(INPUT_CHANNEL.try_receive().ok())
    }
}

impl PixelDisplay for FirmwareBoard {
    fn present(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        match self {
            FirmwareBoard::SenseHat(hat) => hat.present(frame),
            FirmwareBoard::Null(null) => null.present(frame),
        }
    }

    fn set_power_mode(&mut self, dim: bool) -> Result<(), DisplayError> {
        match self {
            FirmwareBoard::SenseHat(hat) => hat.set_power_mode(dim),
            FirmwareBoard::Null(null) => null.set_power_mode(dim),
        }
    }
}
