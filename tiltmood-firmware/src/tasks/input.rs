//! Joystick input task
//!
//! Polls the Sense HAT key register and forwards new presses to the engine.
//! Holding the middle button stops the face.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use tiltmood_core::state::DirectionEvent;
use tiltmood_drivers::sense_hat::Joystick;

use crate::bus::SharedI2c;
use crate::channels::{INPUT_CHANNEL, STOP};

/// Key register poll interval
pub const JOYSTICK_POLL_MS: u64 = 20;

/// How long the middle button must be held to stop
pub const STOP_HOLD_MS: u64 = 3000;

#[embassy_executor::task]
pub async fn input_task(mut i2c: SharedI2c) {
    info!("Input task started");

    let mut joystick = Joystick::new();
    let mut ticker = Ticker::every(Duration::from_millis(JOYSTICK_POLL_MS));
    let mut middle_since: Option<Instant> = None;

    loop {
        ticker.next().await;

        if let Err(e) = joystick.poll(&mut i2c) {
            warn!("Joystick read failed: {}", e);
            continue;
        }

        loop {
            match joystick.pop() {
                Ok(Some(event)) => {
                    debug!("Joystick: {}", event);
                    if INPUT_CHANNEL.try_send(event).is_err() {
                        warn!("Input channel full, dropping {}", event);
                    }
                }
                Ok(None) => break,
                Err(e) => warn!("Joystick: {}", e),
            }
        }

        if joystick.is_held(DirectionEvent::Middle) {
            let since = *middle_since.get_or_insert_with(Instant::now);
            if since.elapsed() >= Duration::from_millis(STOP_HOLD_MS) {
                info!("Middle held, stopping");
                STOP.signal(());
                return;
            }
        } else {
            middle_since = None;
        }
    }
}
