//! Machine configuration loading
//!
//! The configuration is `machine.toml` compiled into the image. `build.rs`
//! has already rejected malformed files, so a runtime parse failure here
//! means the two validators disagree; fall back to board defaults.

use defmt::*;

use tambour_core::config::{parse_config, MachineConfig};

/// Embedded configuration (edit machine.toml and rebuild to customize)
const EMBEDDED_CONFIG: &str = include_str!("../../machine.toml");

/// Parse the embedded configuration, or return the defaults
pub fn load_config() -> MachineConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Config loaded: sensor={}, enable_on_start={}, test_pattern={}",
                config.embroidery.needle_sensor_pin,
                config.embroidery.enable_on_start,
                config.embroidery.test_pattern
            );
            config
        }
        Err(e) => {
            error!("machine.toml parse failed: {}", e);
            warn!("Using default configuration, needle sync disabled");
            MachineConfig::default()
        }
    }
}
