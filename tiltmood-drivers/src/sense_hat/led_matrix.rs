//! Sense HAT LED matrix
//!
//! The ATTiny88 on the HAT exposes a 192-byte framebuffer at register 0.
//! Each row is stored as 8 red, then 8 green, then 8 blue values, 5 bits
//! each. A whole frame goes out in one write so the matrix never shows a
//! half-updated image.
//!
//! The HAT has no brightness control, so dimming scales the pixel values
//! before they are written. Changing it takes effect on the next `present`.

use embedded_hal::i2c::I2c;

use tiltmood_core::animation::{Frame, Rgb, FRAME_HEIGHT, FRAME_WIDTH};

/// ATTiny88 address
pub const LED_ADDRESS: u8 = 0x46;

/// Framebuffer start register
pub const FRAMEBUFFER_REGISTER: u8 = 0x00;

/// Framebuffer size in bytes
pub const FRAMEBUFFER_LEN: usize = FRAME_WIDTH * FRAME_HEIGHT * 3;

/// Brightness applied while dimmed, out of 256
pub const DIM_LEVEL: u16 = 64;

/// Convert an 8-bit channel to the HAT's 5-bit range
///
/// Lit channels never round down to off, so dimmed artwork keeps its shape.
fn to_5bit(value: u8) -> u8 {
    match value >> 3 {
        0 if value > 0 => 1,
        v => v,
    }
}

/// Build the framebuffer write for `frame`, register byte first
pub fn encode(frame: &Frame, dim: bool) -> [u8; FRAMEBUFFER_LEN + 1] {
    let mut buf = [0u8; FRAMEBUFFER_LEN + 1];
    buf[0] = FRAMEBUFFER_REGISTER;

    for (y, row) in frame.rows().iter().enumerate() {
        let base = 1 + y * FRAME_WIDTH * 3;
        for (x, &pixel) in row.iter().enumerate() {
            let Rgb { r, g, b } = if dim { pixel.scaled(DIM_LEVEL) } else { pixel };
            buf[base + x] = to_5bit(r);
            buf[base + FRAME_WIDTH + x] = to_5bit(g);
            buf[base + 2 * FRAME_WIDTH + x] = to_5bit(b);
        }
    }
    buf
}

/// LED matrix driver
#[derive(Debug, Clone, Default)]
pub struct LedMatrix {
    dim: bool,
}

impl LedMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dim(&self) -> bool {
        self.dim
    }

    /// Write a whole frame
    pub fn present<I: I2c>(&mut self, i2c: &mut I, frame: &Frame) -> Result<(), I::Error> {
        i2c.write(LED_ADDRESS, &encode(frame, self.dim))
    }

    /// Select the brightness for later frames
    pub fn set_dim(&mut self, dim: bool) {
        self.dim = dim;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockI2c;

    const RED: Rgb = Rgb::new(255, 0, 0);

    #[test]
    fn test_layout_is_rows_of_rgb_planes() {
        let frame = Frame::BLANK
            .with_pixel(0, 0, RED)
            .with_pixel(7, 1, Rgb::new(0, 0, 255))
            .with_pixel(2, 7, Rgb::new(0, 128, 0));
        let buf = encode(&frame, false);

        assert_eq!(buf.len(), 193);
        assert_eq!(buf[0], FRAMEBUFFER_REGISTER);
        // Row 0, red plane, x = 0
        assert_eq!(buf[1], 31);
        // Row 1, blue plane, x = 7
        assert_eq!(buf[1 + 24 + 16 + 7], 31);
        // Row 7, green plane, x = 2
        assert_eq!(buf[1 + 7 * 24 + 8 + 2], 16);
        assert_eq!(buf.iter().skip(1).filter(|&&b| b != 0).count(), 3);
    }

    #[test]
    fn test_dim_keeps_lit_pixels_visible() {
        let frame = Frame::solid(Rgb::new(255, 8, 0));
        let buf = encode(&frame, true);
        assert_eq!(buf[1], 7);
        assert_eq!(buf[1 + 8], 1);
        assert_eq!(buf[1 + 16], 0);
    }

    #[test]
    fn test_present_is_a_single_write() {
        let mut bus = MockI2c::new();
        let mut matrix = LedMatrix::new();
        matrix.present(&mut bus, &Frame::solid(RED)).unwrap();

        let writes = bus.writes_to(LED_ADDRESS);
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].len(), FRAMEBUFFER_LEN + 1);
    }

    #[test]
    fn test_dim_applies_to_next_frame_only() {
        let mut bus = MockI2c::new();
        let mut matrix = LedMatrix::new();
        matrix.present(&mut bus, &Frame::solid(RED)).unwrap();

        matrix.set_dim(true);
        assert!(matrix.is_dim());
        assert_eq!(bus.writes_to(LED_ADDRESS).len(), 1);

        matrix.present(&mut bus, &Frame::solid(RED)).unwrap();
        let writes = bus.writes_to(LED_ADDRESS);
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[1][1], 7);
    }

    #[test]
    fn test_failed_write_is_reported() {
        let mut bus = MockI2c::new();
        let mut matrix = LedMatrix::new();
        bus.fail = true;
        assert!(matrix.present(&mut bus, &Frame::BLANK).is_err());
    }
}
