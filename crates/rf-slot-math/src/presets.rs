//! Built-in game definitions

use crate::config::SlotConfig;
use crate::error::ConfigError;

/// Canonical Frosty Fortunes definition (6×4, 10 paylines)
pub const FROSTY_FORTUNES_YAML: &str = include_str!("../games/frosty_fortunes.yaml");

/// Load the built-in Frosty Fortunes game
pub fn frosty_fortunes() -> Result<SlotConfig, ConfigError> {
    SlotConfig::from_yaml_str(FROSTY_FORTUNES_YAML)
}
