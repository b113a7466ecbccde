//! Configuration loading
//!
//! mood.toml is compiled into the image and already checked by build.rs,
//! so a parse failure here means the two validators disagree. Fall back to
//! defaults rather than refusing to boot.

use defmt::*;

use tiltmood_core::animation::Catalog;
use tiltmood_core::config::{parse_config, EngineConfig};

/// Embedded configuration; edit mood.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../mood.toml");

/// Parse and validate the embedded configuration
pub fn load_config(catalog: &Catalog<'_>) -> EngineConfig {
    let config = match parse_config(EMBEDDED_CONFIG, catalog) {
        Ok(config) => config,
        Err(e) => {
            warn!("mood.toml rejected ({}), using defaults", e);
            return EngineConfig::default();
        }
    };

    match config.validate(catalog) {
        Ok(()) => {
            info!(
                "Config: idle {}ms, flip {}deg/{}ms, home mood {}",
                config.idle_timeout_ms,
                config.flip.angle_deg,
                config.flip.window_ms,
                config.home_mood
            );
            config
        }
        Err(e) => {
            warn!("mood.toml invalid ({}), using defaults", e);
            EngineConfig::default()
        }
    }
}
