//! LSM9DS1 accelerometer
//!
//! Only the accelerometer half of the accelerometer/gyroscope die is used:
//! orientation for the face comes from the direction of gravity, which is
//! all the zone classifier and flip detector need.
//!
//! # Register access
//!
//! Register address byte first, then data. Multi-byte reads rely on
//! `IF_ADD_INC` (CTRL_REG8), which is set during init. Output registers are
//! little-endian.

use embedded_hal::i2c::I2c;

use tiltmood_core::traits::{OrientationSample, SensorError};
use tiltmood_core::Instant;

/// Accelerometer/gyroscope address on the Sense HAT
pub const LSM9DS1_AG_ADDRESS: u8 = 0x6A;

/// Expected WHO_AM_I response
pub const WHO_AM_I_VALUE: u8 = 0x68;

/// LSM9DS1 accelerometer/gyroscope registers
pub mod reg {
    /// Device identification
    pub const WHO_AM_I: u8 = 0x0F;
    /// Accelerometer ODR, full scale and bandwidth
    pub const CTRL_REG6_XL: u8 = 0x20;
    /// Interface control: reboot, BDU, address auto-increment
    pub const CTRL_REG8: u8 = 0x22;
    /// Data-ready flags
    pub const STATUS_REG: u8 = 0x27;
    /// First accelerometer output register (X low byte)
    pub const OUT_X_L_XL: u8 = 0x28;
}

/// CTRL_REG8 bits
const IF_ADD_INC: u8 = 1 << 2;
const BDU: u8 = 1 << 6;

/// STATUS_REG accelerometer data-ready bit
const XLDA: u8 = 1 << 0;

/// Driver error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Bus transaction failed
    Bus(E),
    /// WHO_AM_I returned something else
    WrongDevice(u8),
}

impl<E> From<Error<E>> for SensorError {
    fn from(e: Error<E>) -> Self {
        match e {
            Error::Bus(_) => SensorError::Bus,
            Error::WrongDevice(_) => SensorError::WrongDevice,
        }
    }
}

/// Accelerometer full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelScale {
    #[default]
    G2,
    G4,
    G8,
    G16,
}

impl AccelScale {
    /// FS_XL field value
    const fn bits(self) -> u8 {
        match self {
            Self::G2 => 0b00,
            Self::G16 => 0b01,
            Self::G4 => 0b10,
            Self::G8 => 0b11,
        }
    }

    /// Sensitivity in g per LSB
    pub const fn g_per_lsb(self) -> f32 {
        match self {
            Self::G2 => 0.000_061,
            Self::G4 => 0.000_122,
            Self::G8 => 0.000_244,
            Self::G16 => 0.000_732,
        }
    }
}

/// Accelerometer output data rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputRate {
    Hz10,
    Hz50,
    #[default]
    Hz119,
    Hz238,
    Hz476,
    Hz952,
}

impl OutputRate {
    /// ODR_XL field value
    const fn bits(self) -> u8 {
        match self {
            Self::Hz10 => 0b001,
            Self::Hz50 => 0b010,
            Self::Hz119 => 0b011,
            Self::Hz238 => 0b100,
            Self::Hz476 => 0b101,
            Self::Hz952 => 0b110,
        }
    }
}

/// Raw accelerometer reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Accel {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl Accel {
    /// Decode OUT_X_L_XL..OUT_Z_H_XL
    pub fn from_bytes(data: [u8; 6]) -> Self {
        Self {
            x: i16::from_le_bytes([data[0], data[1]]),
            y: i16::from_le_bytes([data[2], data[3]]),
            z: i16::from_le_bytes([data[4], data[5]]),
        }
    }

    pub fn scaled(&self, scale: AccelScale) -> AccelG {
        let k = scale.g_per_lsb();
        AccelG {
            x: f32::from(self.x) * k,
            y: f32::from(self.y) * k,
            z: f32::from(self.z) * k,
        }
    }
}

/// Acceleration in g
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelG {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Pitch and roll in degrees from a gravity vector
///
/// - roll  = atan2(ay, az)
/// - pitch = atan2(-ax, sqrt(ay² + az²))
pub fn tilt_angles(g: AccelG) -> (f32, f32) {
    const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;
    let roll = libm::atan2f(g.y, g.z);
    let pitch = libm::atan2f(-g.x, libm::sqrtf(g.y * g.y + g.z * g.z));
    (pitch * RAD_TO_DEG, roll * RAD_TO_DEG)
}

/// LSM9DS1 accelerometer driver
///
/// Holds no bus; every call borrows one so the Sense HAT's devices can
/// share a single I2C peripheral.
#[derive(Debug, Clone)]
pub struct Lsm9ds1 {
    address: u8,
    scale: AccelScale,
    rate: OutputRate,
}

impl Default for Lsm9ds1 {
    fn default() -> Self {
        Self::new(LSM9DS1_AG_ADDRESS)
    }
}

impl Lsm9ds1 {
    pub fn new(address: u8) -> Self {
        Self {
            address,
            scale: AccelScale::default(),
            rate: OutputRate::default(),
        }
    }

    pub fn with_scale(mut self, scale: AccelScale) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rate(mut self, rate: OutputRate) -> Self {
        self.rate = rate;
        self
    }

    /// Check identity and start the accelerometer
    pub fn init<I: I2c>(&mut self, i2c: &mut I) -> Result<(), Error<I::Error>> {
        let id = self.read_register(i2c, reg::WHO_AM_I)?;
        if id != WHO_AM_I_VALUE {
            return Err(Error::WrongDevice(id));
        }

        self.write_register(i2c, reg::CTRL_REG8, IF_ADD_INC | BDU)?;
        self.write_register(
            i2c,
            reg::CTRL_REG6_XL,
            (self.rate.bits() << 5) | (self.scale.bits() << 3),
        )?;
        Ok(())
    }

    /// Check if a new sample is waiting
    pub fn data_ready<I: I2c>(&mut self, i2c: &mut I) -> Result<bool, Error<I::Error>> {
        Ok(self.read_register(i2c, reg::STATUS_REG)? & XLDA != 0)
    }

    /// Read the raw acceleration registers
    pub fn read_accel<I: I2c>(&mut self, i2c: &mut I) -> Result<Accel, Error<I::Error>> {
        let mut buf = [0u8; 6];
        i2c.write_read(self.address, &[reg::OUT_X_L_XL], &mut buf)
            .map_err(Error::Bus)?;
        Ok(Accel::from_bytes(buf))
    }

    /// Read an orientation sample stamped with `now`
    pub fn read_orientation<I: I2c>(
        &mut self,
        i2c: &mut I,
        now: Instant,
    ) -> Result<OrientationSample, Error<I::Error>> {
        let g = self.read_accel(i2c)?.scaled(self.scale);
        let (pitch, roll) = tilt_angles(g);
        Ok(OrientationSample::new(pitch, roll, now))
    }

    fn read_register<I: I2c>(&mut self, i2c: &mut I, register: u8) -> Result<u8, Error<I::Error>> {
        let mut buf = [0u8; 1];
        i2c.write_read(self.address, &[register], &mut buf)
            .map_err(Error::Bus)?;
        Ok(buf[0])
    }

    fn write_register<I: I2c>(
        &mut self,
        i2c: &mut I,
        register: u8,
        value: u8,
    ) -> Result<(), Error<I::Error>> {
        i2c.write(self.address, &[register, value]).map_err(Error::Bus)
    }
}
