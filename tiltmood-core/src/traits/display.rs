//! Pixel display trait

use crate::animation::Frame;
use crate::traits::{InputSource, OrientationSource};

/// Errors that can occur while painting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transaction failed
    Bus,
}

/// Trait for an RGB matrix that can show one whole [`Frame`] at a time
///
/// `present` must replace the visible image in a single transfer. Partial
/// redraws are what makes the matrix flicker.
pub trait PixelDisplay {
    /// Show a complete frame
    fn present(&mut self, frame: &Frame) -> Result<(), DisplayError>;

    /// Switch between normal and dimmed brightness
    fn set_power_mode(&mut self, dim: bool) -> Result<(), DisplayError>;

    /// Turn every pixel off
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.present(&Frame::BLANK)
    }
}

/// Everything the mood engine needs from a board
pub trait Board: OrientationSource + InputSource + PixelDisplay {}

// Blanket implementation for all types providing the three capabilities
impl<T: OrientationSource + InputSource + PixelDisplay> Board for T {}
