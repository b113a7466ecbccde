//! Orientation sensor trait

use crate::time::Instant;

/// Errors that can occur while reading the orientation sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Bus transaction failed
    Bus,
    /// Sensor did not identify itself correctly
    WrongDevice,
    /// No new sample available yet
    NotReady,
    /// Sensor not present on this board
    NotConnected,
}

/// One orientation reading
///
/// Angles are in degrees. Any range is accepted; the classifier
/// normalizes them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OrientationSample {
    /// Forward/backward tilt
    pub pitch: f32,
    /// Side-to-side tilt
    pub roll: f32,
    /// Heading (unused by the engine, carried for completeness)
    pub yaw: f32,
    /// When the sample was taken
    pub t: Instant,
}

impl OrientationSample {
    /// Create a sample with zero yaw
    pub const fn new(pitch: f32, roll: f32, t: Instant) -> Self {
        Self {
            pitch,
            roll,
            yaw: 0.0,
            t,
        }
    }
}

/// Trait for orientation sources (IMU drivers, simulators)
pub trait OrientationSource {
    /// Read the latest orientation, stamped with `now`
    ///
    /// Takes `&mut self` because bus reads require mutable access.
    fn poll_orientation(&mut self, now: Instant) -> Result<OrientationSample, SensorError>;
}
