//! In-memory I2C bus for driver tests
//!
//! Reads are served from per-device register maps; every write is logged.

use std::collections::HashMap;
use std::vec::Vec;

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};

#[derive(Debug, Default)]
pub struct MockI2c {
    /// (address, register) -> bytes returned for a read starting there
    registers: HashMap<(u8, u8), Vec<u8>>,
    /// Every write as (address, bytes)
    pub writes: Vec<(u8, Vec<u8>)>,
    /// Fail every transaction
    pub fail: bool,
}

impl MockI2c {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_register(&mut self, address: u8, register: u8, bytes: &[u8]) {
        self.registers.insert((address, register), bytes.to_vec());
    }

    /// Writes sent to one device
    pub fn writes_to(&self, address: u8) -> Vec<&[u8]> {
        self.writes
            .iter()
            .filter(|(a, _)| *a == address)
            .map(|(_, b)| b.as_slice())
            .collect()
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.fail {
            return Err(ErrorKind::Other);
        }

        let mut register = 0;
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    if let Some(&first) = bytes.first() {
                        register = first;
                    }
                    self.writes.push((address, bytes.to_vec()));
                }
                Operation::Read(buf) => {
                    let data = self
                        .registers
                        .get(&(address, register))
                        .ok_or(ErrorKind::NoAcknowledge(
                            embedded_hal::i2c::NoAcknowledgeSource::Address,
                        ))?;
                    for (dst, src) in buf.iter_mut().zip(data.iter().chain(core::iter::repeat(&0))) {
                        *dst = *src;
                    }
                }
            }
        }
        Ok(())
    }
}
