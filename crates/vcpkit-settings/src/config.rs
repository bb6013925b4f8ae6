//! Configuration for VCPKit
//!
//! Configuration is organized into sections:
//! - Window options (title, chrome visibility, exit prompt, layout file)
//! - File handling (recent-files menu size, splash program)
//! - Machine description (axis letters)
//! - Control binding convention (discovery prefix and delimiter)
//!
//! Files may be JSON or TOML; the extension decides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vcpkit_core::AxisLetter;

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Upper bound for the recent-files menu size.
pub const MAX_RECENT_FILES_LIMIT: usize = 99;

/// Window size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

/// Window position in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowPosition {
    pub x: i32,
    pub y: i32,
}

/// Main window options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Window title
    pub title: String,
    /// Ask for confirmation before closing
    pub prompt_at_exit: bool,
    pub hide_menu_bar: bool,
    pub hide_status_bar: bool,
    pub maximize: bool,
    pub fullscreen: bool,
    /// Menu layout description (TOML or JSON); built-in layout when absent
    pub layout_file: Option<PathBuf>,
    /// Initial size, if not left to the host
    pub size: Option<WindowSize>,
    /// Initial position, if not left to the host
    pub position: Option<WindowPosition>,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "VCPKit".to_string(),
            prompt_at_exit: true,
            hide_menu_bar: false,
            hide_status_bar: false,
            maximize: false,
            fullscreen: false,
            layout_file: None,
            size: None,
            position: None,
        }
    }
}

/// Program file settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    /// Number of entries in the recent-files menu
    pub max_recent_files: usize,
    /// Hide recent-file entries past the end of a shorter list
    pub hide_stale_recent: bool,
    /// Program loaded at startup when nothing else is loaded
    pub splash_program: Option<PathBuf>,
    /// Recent files, most recent first
    pub recent_files: Vec<String>,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            max_recent_files: 10,
            hide_stale_recent: false,
            splash_program: None,
            recent_files: Vec::new(),
        }
    }
}

/// Machine description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineSettings {
    /// Axis letters, e.g. "xyz" or "xyza"
    pub axis_letters: String,
}

impl Default for MachineSettings {
    fn default() -> Self {
        Self {
            axis_letters: "xyz".to_string(),
        }
    }
}

impl MachineSettings {
    /// Parsed axes in configured order
    pub fn axes(&self) -> SettingsResult<Vec<AxisLetter>> {
        let axes = AxisLetter::parse_list(&self.axis_letters)
            .map_err(|e| SettingsError::invalid("machine.axis_letters", e.to_string()))?;
        if axes.is_empty() {
            return Err(SettingsError::invalid(
                "machine.axis_letters",
                "at least one axis is required",
            ));
        }
        for (i, axis) in axes.iter().enumerate() {
            if axes[..i].contains(axis) {
                return Err(SettingsError::invalid(
                    "machine.axis_letters",
                    format!("axis {} listed twice", axis.upper()),
                ));
            }
        }
        Ok(axes)
    }
}

/// Naming convention for controls that bind themselves to handlers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingSettings {
    /// First name segment that marks a control as bindable
    pub discovery_prefix: String,
    /// Segment delimiter
    pub delimiter: char,
}

impl Default for BindingSettings {
    fn default() -> Self {
        Self {
            discovery_prefix: "action".to_string(),
            delimiter: '_',
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub window: WindowSettings,
    pub files: FileSettings,
    pub machine: MachineSettings,
    pub binding: BindingSettings,
}

#[derive(Clone, Copy)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|source| SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)
            .map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.files.max_recent_files == 0 {
            return Err(SettingsError::invalid(
                "files.max_recent_files",
                "must be at least 1",
            ));
        }
        if self.files.max_recent_files > MAX_RECENT_FILES_LIMIT {
            return Err(SettingsError::invalid(
                "files.max_recent_files",
                format!("must be at most {}", MAX_RECENT_FILES_LIMIT),
            ));
        }

        if let Some(size) = self.window.size {
            if size.width == 0 || size.height == 0 {
                return Err(SettingsError::invalid("window.size", "dimensions must be > 0"));
            }
        }

        self.machine.axes()?;

        let prefix = &self.binding.discovery_prefix;
        if prefix.is_empty() {
            return Err(SettingsError::invalid(
                "binding.discovery_prefix",
                "must not be empty",
            ));
        }
        if prefix.contains(self.binding.delimiter) {
            return Err(SettingsError::invalid(
                "binding.discovery_prefix",
                format!("must not contain the delimiter {:?}", self.binding.delimiter),
            ));
        }

        Ok(())
    }

    /// Add file to recent files list
    pub fn add_recent_file(&mut self, path: impl Into<String>) {
        let path = path.into();
        self.files.recent_files.retain(|f| f != &path);
        self.files.recent_files.insert(0, path);
        self.files
            .recent_files
            .truncate(self.files.max_recent_files);
    }
}
