//! Configuration loading utilities for CLI commands

use anyhow::{Context, Result};
use geollm_core::config::{CliConfigOverrides, GeollmConfig};
use std::path::Path;

/// Load layered configuration: defaults, optional file, environment, then CLI overrides
pub fn load_config(config_path: Option<&Path>, overrides: CliConfigOverrides) -> Result<GeollmConfig> {
    let mut config = GeollmConfig::with_defaults();

    if let Some(path) = config_path {
        config = config
            .load_from_file(path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?;
    }

    let mut config = config.load_from_env();
    config.update_from_cli(overrides);
    Ok(config)
}
