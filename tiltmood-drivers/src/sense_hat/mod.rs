//! Raspberry Pi Sense HAT
//!
//! Bundles the LED matrix, joystick and accelerometer behind one I2C bus
//! and implements the engine's board traits on top of them.

pub mod joystick;
pub mod led_matrix;

use embedded_hal::i2c::I2c;

use tiltmood_core::animation::Frame;
use tiltmood_core::state::DirectionEvent;
use tiltmood_core::traits::{
    DisplayError, InputError, InputSource, OrientationSample, OrientationSource, PixelDisplay,
    SensorError,
};
use tiltmood_core::Instant;

use crate::imu::lsm9ds1::{self, Lsm9ds1};
pub use joystick::Joystick;
pub use led_matrix::LedMatrix;

/// Sense HAT bring-up failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    /// Bus transaction failed
    Bus,
    /// Accelerometer answered with an unexpected WHO_AM_I
    WrongImu(u8),
}

impl<E> From<lsm9ds1::Error<E>> for InitError {
    fn from(e: lsm9ds1::Error<E>) -> Self {
        match e {
            lsm9ds1::Error::Bus(_) => InitError::Bus,
            lsm9ds1::Error::WrongDevice(id) => InitError::WrongImu(id),
        }
    }
}

/// Sense HAT board
pub struct SenseHat<I> {
    i2c: I,
    matrix: LedMatrix,
    joystick: Joystick,
    imu: Lsm9ds1,
}

impl<I: I2c> SenseHat<I> {
    /// Probe the accelerometer, start it and blank the matrix
    pub fn new(mut i2c: I) -> Result<Self, InitError> {
        let mut imu = Lsm9ds1::default();
        imu.init(&mut i2c)?;

        let mut matrix = LedMatrix::new();
        matrix
            .present(&mut i2c, &Frame::BLANK)
            .map_err(|_| InitError::Bus)?;

        Ok(Self {
            i2c,
            matrix,
            joystick: Joystick::new(),
            imu,
        })
    }

    /// Give back the bus
    pub fn release(self) -> I {
        self.i2c
    }

    pub fn joystick(&self) -> &Joystick {
        &self.joystick
    }

    pub fn matrix(&self) -> &LedMatrix {
        &self.matrix
    }
}

impl<I: I2c> OrientationSource for SenseHat<I> {
    fn poll_orientation(&mut self, now: Instant) -> Result<OrientationSample, SensorError> {
        Ok(self.imu.read_orientation(&mut self.i2c, now)?)
    }
}

impl<I: I2c> InputSource for SenseHat<I> {
    fn next_input_event(&mut self) -> Result<Option<DirectionEvent>, InputError> {
        if self.joystick.pending() == 0 {
            self.joystick
                .poll(&mut self.i2c)
                .map_err(|_| InputError::Bus)?;
        }
        self.joystick.pop()
    }
}

impl<I: I2c> PixelDisplay for SenseHat<I> {
    fn present(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        self.matrix
            .present(&mut self.i2c, frame)
            .map_err(|_| DisplayError::Bus)
    }

    fn set_power_mode(&mut self, dim: bool) -> Result<(), DisplayError> {
        self.matrix.set_dim(dim);
        Ok(())
    }
}
