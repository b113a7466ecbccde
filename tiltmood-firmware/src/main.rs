//! tiltmood - LED mood face firmware
//!
//! Drives a Sense HAT's 8x8 matrix from an RP2040: tilt picks the face,
//! a quick flip plays a flash, the joystick navigates and pauses, and the
//! matrix dims when left alone.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::i2c::{self, I2c};
use {defmt_rtt as _, panic_probe as _};

use tiltmood_core::animation::Catalog;
use tiltmood_core::traits::NullBoard;
use tiltmood_core::{Instant, MoodEngine};
use tiltmood_drivers::SenseHat;

use crate::board::FirmwareBoard;
use crate::bus::SharedI2c;

mod board;
mod bus;
mod channels;
mod config;
mod tasks;

/// Sense HAT bus speed
const I2C_FREQUENCY_HZ: u32 = 400_000;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("tiltmood firmware starting...");

    let p = embassy_rp::init(Default::default());

    // Sense HAT on I2C0: SDA GP4, SCL GP5
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    bus::install(I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config));
    info!("I2C initialized");

    let catalog = Catalog::builtin();
    let config = config::load_config(&catalog);

    let board = match SenseHat::new(SharedI2c) {
        Ok(hat) => {
            info!("Sense HAT found");
            FirmwareBoard::SenseHat(hat)
        }
        Err(e) => {
            warn!("Sense HAT not available ({}), running without hardware", e);
            FirmwareBoard::Null(NullBoard)
        }
    };
    let has_hat = matches!(board, FirmwareBoard::SenseHat(_));

    let now = Instant::from_millis(embassy_time::Instant::now().as_millis());
    let engine = match MoodEngine::new(config, catalog, board, now) {
        Ok(engine) => engine,
        Err(e) => {
            error!("Engine rejected configuration: {}", e);
            return;
        }
    };

    spawner.spawn(tasks::engine_task(engine)).unwrap();
    if has_hat {
        spawner.spawn(tasks::input_task(SharedI2c)).unwrap();
    }

    info!("All tasks spawned, firmware running");
}
