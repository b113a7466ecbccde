//! Inertial sensors

pub mod lsm9ds1;

pub use lsm9ds1::{tilt_angles, Accel, AccelG, AccelScale, Lsm9ds1, OutputRate};
