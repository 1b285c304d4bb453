//! Prop configuration
//!
//! prop.toml is embedded at compile time (and validated by build.rs).
//! A parse failure at runtime falls back to the built-in defaults.

use defmt::*;

use defuse_core::config::{parse_config, PropConfig};

/// Embedded configuration; edit prop.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../prop.toml");

/// Load the embedded configuration
pub fn load() -> PropConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Config loaded: hold={}ms debounce={}ms tie_break={}",
                config.timing.hold_ms, config.timing.debounce_ms, config.policy.tie_break
            );
            config
        }
        Err(e) => {
            warn!("Embedded config rejected ({}), using defaults", e);
            PropConfig::default()
        }
    }
}
