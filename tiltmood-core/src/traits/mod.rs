//! Hardware abstraction traits
//!
//! These traits define the boundary between the mood engine and the
//! board it runs on. The engine consumes orientation samples and joystick
//! events and emits at most one frame per tick.

pub mod display;
pub mod input;
pub mod null;
pub mod sensor;

pub use display::{Board, DisplayError, PixelDisplay};
pub use input::{InputError, InputSource};
pub use null::NullBoard;
pub use sensor::{OrientationSample, OrientationSource, SensorError};
