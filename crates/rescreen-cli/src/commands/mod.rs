//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod models;
pub mod screen;

use std::path::{Path, PathBuf};

use rescreen_core::ScreenConfig;
use tracing::debug;

/// Location of the per-user configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rescreen")
        .join("config.json")
}

/// Load the configuration named by `-c`, else the per-user file, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ScreenConfig> {
    if let Some(path) = config_path {
        return Ok(ScreenConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config from {}", default_path.display());
        Ok(ScreenConfig::from_file(&default_path)?)
    } else {
        Ok(ScreenConfig::default())
    }
}
