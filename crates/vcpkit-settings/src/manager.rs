//! Settings Manager
//!
//! Owns the active [`Config`] and the file it was read from.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{ConfigError, SettingsError, SettingsResult};

const APP_DIR: &str = "vcpkit";
const CONFIG_FILE: &str = "config.toml";

/// Loads, holds and saves the application configuration
#[derive(Debug, Clone)]
pub struct SettingsManager {
    path: PathBuf,
    config: Config,
}

impl SettingsManager {
    /// Platform config location, e.g. `~/.config/vcpkit/config.toml`
    pub fn default_config_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or_else(|| {
                ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()).into()
            })
    }

    /// Load from the platform config location
    pub fn load_default() -> SettingsResult<Self> {
        Self::load(Self::default_config_path()?)
    }

    /// Load from `path`, falling back to defaults when the file does not exist
    pub fn load(path: impl Into<PathBuf>) -> SettingsResult<Self> {
        let path = path.into();
        let config = if path.exists() {
            let config = Config::load_from_file(&path)?;
            tracing::info!("Loaded settings from {}", path.display());
            config
        } else {
            tracing::info!(
                "No settings at {}, using defaults",
                path.display()
            );
            Config::default()
        };
        Ok(Self { path, config })
    }

    /// Write the configuration back, creating the directory if needed
    pub fn save(&self) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|source| SettingsError::ConfigDirectory {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        self.config.save_to_file(&self.path)?;
        tracing::debug!("Saved settings to {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }
}
