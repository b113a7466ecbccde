//! Mood engine task
//!
//! Ticks the engine at the spacing it asks for. The wait between ticks is
//! the only await, raced against the stop signal.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::Timer;

use tiltmood_core::{Instant, MoodEngine};

use crate::board::FirmwareBoard;
use crate::channels::STOP;

/// Engine timestamps from the embassy clock
fn now() -> Instant {
    Instant::from_millis(embassy_time::Instant::now().as_millis())
}

#[embassy_executor::task]
pub async fn engine_task(mut engine: MoodEngine<'static, FirmwareBoard>) {
    info!("Engine task started");

    loop {
        let t = now();
        let cmd = engine.tick(t);
        trace!("Tick {}ms: dim {}", t.as_millis(), cmd.power_dim);

        let wait = Timer::after_millis(u64::from(engine.frame_interval_ms()));
        if let Either::Second(()) = select(wait, STOP.wait()).await {
            break;
        }
    }

    info!("Stopping, clearing display");
    if let Err(e) = engine.shutdown() {
        warn!("Clear failed: {}", e);
    }
}
