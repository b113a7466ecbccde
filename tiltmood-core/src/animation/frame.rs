//! 8x8 RGB frames

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Matrix width in pixels
pub const FRAME_WIDTH: usize = 8;

/// Matrix height in pixels
pub const FRAME_HEIGHT: usize = 8;

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale each channel by `num / 256`
    pub const fn scaled(self, num: u16) -> Self {
        Self {
            r: ((self.r as u16 * num) >> 8) as u8,
            g: ((self.g as u16 * num) >> 8) as u8,
            b: ((self.b as u16 * num) >> 8) as u8,
        }
    }
}

/// One full matrix image, row-major, row 0 at the top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pixels: [[Rgb; FRAME_WIDTH]; FRAME_HEIGHT],
}

impl Frame {
    /// All pixels off
    pub const BLANK: Self = Self::solid(Rgb::BLACK);

    /// Every pixel the same color
    pub const fn solid(color: Rgb) -> Self {
        Self {
            pixels: [[color; FRAME_WIDTH]; FRAME_HEIGHT],
        }
    }

    /// Two-color image from a bitmask, one byte per row, MSB on the left
    pub const fn from_mask(rows: [u8; FRAME_HEIGHT], on: Rgb, off: Rgb) -> Self {
        let mut pixels = [[off; FRAME_WIDTH]; FRAME_HEIGHT];
        let mut y = 0;
        while y < FRAME_HEIGHT {
            let mut x = 0;
            while x < FRAME_WIDTH {
                if rows[y] & (0x80 >> x) != 0 {
                    pixels[y][x] = on;
                }
                x += 1;
            }
            y += 1;
        }
        Self { pixels }
    }

    /// Copy of this frame with one pixel replaced
    ///
    /// Out-of-range coordinates leave the frame unchanged.
    pub const fn with_pixel(mut self, x: usize, y: usize, color: Rgb) -> Self {
        if x < FRAME_WIDTH && y < FRAME_HEIGHT {
            self.pixels[y][x] = color;
        }
        self
    }

    /// Pixel at `(x, y)`, `None` when out of range
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        self.pixels.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> &[[Rgb; FRAME_WIDTH]; FRAME_HEIGHT] {
        &self.pixels
    }

    /// Check if every pixel is off
    pub fn is_blank(&self) -> bool {
        *self == Self::BLANK
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::BLANK
    }
}
