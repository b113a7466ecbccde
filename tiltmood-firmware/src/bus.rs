//! Shared I2C bus
//!
//! The Sense HAT puts the LED controller, the joystick and the IMU on one
//! bus, which both the input task and the engine task need. The bus lives
//! in a critical-section mutex and [`SharedI2c`] handles lock it for the
//! length of one transaction.

use core::cell::RefCell;

use embassy_rp::i2c::{self, Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal::i2c::{Error, ErrorKind, ErrorType, I2c as _, Operation};

pub type Bus = I2c<'static, I2C0, Blocking>;

static I2C_BUS: Mutex<CriticalSectionRawMutex, RefCell<Option<Bus>>> =
    Mutex::new(RefCell::new(None));

/// Hand the bus over; must happen before any handle is used
pub fn install(bus: Bus) {
    I2C_BUS.lock(|cell| {
        cell.replace(Some(bus));
    });
}

/// Shared bus errors
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// [`install`] has not been called
    NotInstalled,
    /// Transfer failed
    I2c(i2c::Error),
}

impl Error for BusError {
    fn kind(&self) -> ErrorKind {
        match self {
            BusError::NotInstalled => ErrorKind::Other,
            BusError::I2c(e) => e.kind(),
        }
    }
}

/// Handle to the shared bus
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedI2c;

impl ErrorType for SharedI2c {
    type Error = BusError;
}

impl embedded_hal::i2c::I2c for SharedI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        I2C_BUS.lock(|cell| {
            let mut bus = cell.borrow_mut();
            let bus = bus.as_mut().ok_or(BusError::NotInstalled)?;
            bus.transaction(address, operations).map_err(BusError::I2c)
        })
    }
}
