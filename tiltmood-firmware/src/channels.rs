//! Inter-task communication channels
//!
//! The input task is the only producer of joystick events; the engine task
//! drains them once per tick.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use tiltmood_core::state::DirectionEvent;

/// Channel capacity for joystick events
const INPUT_CHANNEL_SIZE: usize = 16;

/// Joystick presses, oldest first
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, DirectionEvent, INPUT_CHANNEL_SIZE> =
    Channel::new();

/// Request to blank the matrix and stop the engine
pub static STOP: Signal<CriticalSectionRawMutex, ()> = Signal::new();
