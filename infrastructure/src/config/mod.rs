//! Configuration file loading for region-gate
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `REGION_GATE_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./region-gate.toml` or `./.region-gate.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/region-gate/config.toml`
//! 5. Fallback: `~/.config/region-gate/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileGeocodingConfig, FileLocaleConfig, FileNetworkConfig, FileOutputConfig,
    FilePolicyConfig, FilePositionConfig,
};
pub use loader::{ConfigLoadError, ConfigLoader};
