//! Scripted board for engine tests
//!
//! Input events are scheduled by tick number, orientation readings by
//! timestamp. Every paint and power change is recorded.

use std::collections::VecDeque;
use std::vec::Vec;

use crate::animation::Frame;
use crate::state::DirectionEvent;
use crate::time::Instant;
use crate::traits::{
    DisplayError, InputError, InputSource, OrientationSample, OrientationSource, PixelDisplay,
    SensorError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Present(Frame),
    Power(bool),
}

#[derive(Debug, Default)]
pub struct ScriptedBoard {
    /// Ticks seen so far (counted on each orientation poll)
    tick: u32,
    events: VecDeque<(u32, DirectionEvent)>,
    readings: Vec<(Instant, Result<OrientationSample, SensorError>)>,
    calls: Vec<Call>,
    fail_present: bool,
}

impl ScriptedBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` on tick `tick` (zero-based)
    pub fn push_event(&mut self, event: DirectionEvent, tick: u32) {
        self.events.push_back((tick, event));
    }

    pub fn push_sample(&mut self, pitch: f32, roll: f32, t: Instant) {
        self.readings
            .push((t, Ok(OrientationSample::new(pitch, roll, t))));
    }

    pub fn push_sensor_error(&mut self, error: SensorError, t: Instant) {
        self.readings.push((t, Err(error)));
    }

    pub fn fail_next_present(&mut self) {
        self.fail_present = true;
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Frames the display accepted, in order
    pub fn presented(&self) -> Vec<Frame> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Present(f) => Some(*f),
                Call::Power(_) => None,
            })
            .collect()
    }

    /// Power modes the display accepted, in order
    pub fn power_log(&self) -> Vec<bool> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Power(dim) => Some(*dim),
                Call::Present(_) => None,
            })
            .collect()
    }

    pub fn power_calls(&self) -> usize {
        self.power_log().len()
    }
}

impl OrientationSource for ScriptedBoard {
    fn poll_orientation(&mut self, now: Instant) -> Result<OrientationSample, SensorError> {
        self.tick += 1;
        self.readings
            .iter()
            .find(|(t, _)| *t == now)
            .map(|(_, r)| *r)
            .unwrap_or(Err(SensorError::NotReady))
    }
}

impl InputSource for ScriptedBoard {
    fn next_input_event(&mut self) -> Result<Option<DirectionEvent>, InputError> {
        match self.events.front() {
            Some(&(tick, event)) if tick <= self.tick => {
                self.events.pop_front();
                Ok(Some(event))
            }
            _ => Ok(None),
        }
    }
}

impl PixelDisplay for ScriptedBoard {
    fn present(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        if self.fail_present {
            self.fail_present = false;
            return Err(DisplayError::Bus);
        }
        self.calls.push(Call::Present(*frame));
        Ok(())
    }

    fn set_power_mode(&mut self, dim: bool) -> Result<(), DisplayError> {
        self.calls.push(Call::Power(dim));
        Ok(())
    }
}
