//! Sense HAT joystick
//!
//! The ATTiny88 reports the five switches as a bitmask in one register.
//! Presses are detected on the released-to-pressed edge and queued, so a
//! held direction produces exactly one event.

use embedded_hal::i2c::I2c;
use heapless::Deque;

use tiltmood_core::state::DirectionEvent;
use tiltmood_core::traits::InputError;

use super::led_matrix::LED_ADDRESS;

/// Key state register
pub const KEYS_REGISTER: u8 = 0xF2;

/// Pending presses kept between reads
pub const JOYSTICK_QUEUE_LEN: usize = 16;

/// Key register bits
pub mod key {
    pub const DOWN: u8 = 1 << 0;
    pub const RIGHT: u8 = 1 << 1;
    pub const UP: u8 = 1 << 2;
    pub const ENTER: u8 = 1 << 3;
    pub const LEFT: u8 = 1 << 4;
    pub const MASK: u8 = DOWN | RIGHT | UP | ENTER | LEFT;
}

const KEY_EVENTS: [(u8, DirectionEvent); 5] = [
    (key::DOWN, DirectionEvent::Down),
    (key::RIGHT, DirectionEvent::Right),
    (key::UP, DirectionEvent::Up),
    (key::ENTER, DirectionEvent::Middle),
    (key::LEFT, DirectionEvent::Left),
];

const fn key_bit(event: DirectionEvent) -> u8 {
    match event {
        DirectionEvent::Down => key::DOWN,
        DirectionEvent::Right => key::RIGHT,
        DirectionEvent::Up => key::UP,
        DirectionEvent::Middle => key::ENTER,
        DirectionEvent::Left => key::LEFT,
    }
}

/// Joystick driver with an edge-detecting event queue
#[derive(Debug, Default)]
pub struct Joystick {
    /// Key bits from the previous read
    held: u8,
    queue: Deque<DirectionEvent, JOYSTICK_QUEUE_LEN>,
    /// Presses were dropped since the last pop
    overflowed: bool,
}

impl Joystick {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the key register and queue new presses
    ///
    /// Returns the number of presses queued.
    pub fn poll<I: I2c>(&mut self, i2c: &mut I) -> Result<usize, I::Error> {
        let mut buf = [0u8; 1];
        i2c.write_read(LED_ADDRESS, &[KEYS_REGISTER], &mut buf)?;
        Ok(self.update(buf[0]))
    }

    /// Feed a raw key bitmask and queue new presses
    pub fn update(&mut self, keys: u8) -> usize {
        let keys = keys & key::MASK;
        let pressed = keys & !self.held;
        self.held = keys;

        let mut queued = 0;
        for (bit, event) in KEY_EVENTS {
            if pressed & bit == 0 {
                continue;
            }
            if self.queue.push_back(event).is_err() {
                self.overflowed = true;
            } else {
                queued += 1;
            }
        }
        queued
    }

    /// Take the oldest queued press
    ///
    /// Reports `Overflow` once after presses were dropped; queued presses
    /// are still delivered afterwards.
    pub fn pop(&mut self) -> Result<Option<DirectionEvent>, InputError> {
        if self.overflowed {
            self.overflowed = false;
            return Err(InputError::Overflow);
        }
        Ok(self.queue.pop_front())
    }

    /// Check if a direction is currently held down
    pub fn is_held(&self, event: DirectionEvent) -> bool {
        self.held & key_bit(event) != 0
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockI2c;

    #[test]
    fn test_press_fires_once_while_held() {
        let mut stick = Joystick::new();
        assert_eq!(stick.update(key::LEFT), 1);
        assert_eq!(stick.update(key::LEFT), 0);
        assert!(stick.is_held(DirectionEvent::Left));

        assert_eq!(stick.pop(), Ok(Some(DirectionEvent::Left)));
        assert_eq!(stick.pop(), Ok(None));
    }

    #[test]
    fn test_release_and_press_again() {
        let mut stick = Joystick::new();
        stick.update(key::ENTER);
        stick.update(0);
        assert!(!stick.is_held(DirectionEvent::Middle));
        stick.update(key::ENTER);
        assert_eq!(stick.pending(), 2);
        assert_eq!(stick.pop(), Ok(Some(DirectionEvent::Middle)));
        assert_eq!(stick.pop(), Ok(Some(DirectionEvent::Middle)));
    }

    #[test]
    fn test_bit_mapping() {
        let mut stick = Joystick::new();
        stick.update(key::MASK);
        let mut events = Vec::new();
        while let Ok(Some(e)) = stick.pop() {
            events.push(e);
        }
        assert_eq!(
            events,
            [
                DirectionEvent::Down,
                DirectionEvent::Right,
                DirectionEvent::Up,
                DirectionEvent::Middle,
                DirectionEvent::Left,
            ]
        );
    }

    #[test]
    fn test_unused_bits_ignored() {
        let mut stick = Joystick::new();
        assert_eq!(stick.update(0xE0), 0);
        assert_eq!(stick.pop(), Ok(None));
    }

    #[test]
    fn test_overflow_reported_once() {
        let mut stick = Joystick::new();
        for _ in 0..(JOYSTICK_QUEUE_LEN + 1) {
            stick.update(key::UP);
            stick.update(0);
        }
        assert_eq!(stick.pending(), JOYSTICK_QUEUE_LEN);
        assert_eq!(stick.pop(), Err(InputError::Overflow));
        assert_eq!(stick.pop(), Ok(Some(DirectionEvent::Up)));
    }

    #[test]
    fn test_poll_reads_key_register() {
        let mut bus = MockI2c::new();
        bus.set_register(LED_ADDRESS, KEYS_REGISTER, &[key::RIGHT]);
        let mut stick = Joystick::new();
        assert_eq!(stick.poll(&mut bus), Ok(1));
        assert_eq!(stick.pop(), Ok(Some(DirectionEvent::Right)));
        assert_eq!(bus.writes_to(LED_ADDRESS), [&[KEYS_REGISTER][..]]);
    }
}
