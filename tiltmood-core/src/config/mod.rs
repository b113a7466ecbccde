//! Engine configuration
//!
//! Tunables for every engine component, their validation against a
//! catalog, and a small TOML loader for the firmware's embedded config.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
