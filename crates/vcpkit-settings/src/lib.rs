//! VCPKit Settings Crate
//!
//! Handles application configuration and its persistence.

pub mod config;
pub mod error;
pub mod manager;

pub use config::{
    BindingSettings, Config, FileSettings, MachineSettings, WindowPosition, WindowSettings,
    WindowSize,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
pub use manager::SettingsManager;
