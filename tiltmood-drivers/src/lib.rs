//! Hardware driver implementations
//!
//! Concrete implementations of the tiltmood-core board traits for the
//! Raspberry Pi Sense HAT, over any blocking `embedded-hal` I2C bus:
//!
//! - LED matrix (ATTiny88 framebuffer)
//! - Five-way joystick (ATTiny88 key register)
//! - LSM9DS1 accelerometer (pitch/roll from gravity)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod imu;
pub mod sense_hat;

#[cfg(test)]
mod mock;

pub use sense_hat::{InitError, SenseHat};
