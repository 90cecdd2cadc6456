//! Settings configuration
//!
//! Manages user-configurable settings for the session layer. Default
//! values are defined in `config/default.toml`; a user `config.toml` is
//! merged on top of them.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::converter::{ConversionPreferences, OperationPreferences};
use crate::logging::LogOptions;

/// Default configuration TOML embedded from config/default.toml
const DEFAULT_CONFIG_TOML: &str = include_str!("../../config/default.toml");

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine the configuration directory")]
    NoConfigDir,
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Configuration settings for the session layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// History usage during conversion
    pub conversion: ConversionSettings,
    /// Candidate window behavior
    pub operation: OperationSettings,
    /// Logging subsystem settings
    pub log: LogSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionSettings {
    /// Use committed history segments as context for further conversions
    pub use_history: bool,
    /// Maximum number of history segments kept as context
    pub max_history_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationSettings {
    /// Host the transliteration variants in a cascading sub-window
    pub use_cascading_window: bool,
    /// Characters selecting candidates by page position
    pub candidate_shortcuts: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    /// ANSI-colored log messages on tty devices
    pub colored_log: bool,
    /// Log to stderr instead of a log file
    pub logtostderr: bool,
    /// Log file directory; empty means the default data directory
    pub log_dir: String,
    /// Verbose level from configuration, combined with the level passed
    /// at initialization via max()
    pub verbose_level: i32,
}

impl Default for Settings {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("embedded default.toml must be valid")
    }
}

/// Recursively merge `overlay` TOML values on top of `base`.
fn merge_toml(base: &mut toml::Value, overlay: &toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                if let Some(base_value) = base_table.get_mut(key) {
                    merge_toml(base_value, value);
                } else {
                    base_table.insert(key.clone(), value.clone());
                }
            }
        }
        (base, _) => {
            *base = overlay.clone();
        }
    }
}

/// Parse user TOML content merged on top of default.toml.
fn parse_with_defaults(user_content: &str) -> Result<Settings, SettingsError> {
    let mut base: toml::Value = toml::from_str(DEFAULT_CONFIG_TOML)?;
    let user: toml::Value = toml::from_str(user_content)?;
    merge_toml(&mut base, &user);
    let settings: Settings = base.try_into()?;
    Ok(settings)
}

/// Get the project directories for kasane.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "kasane", "kasane")
}

impl Settings {
    /// Get the data directory path
    pub fn data_dir() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the configuration file path
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Load settings from the default configuration file.
    /// Falls back to embedded default.toml if the config file does not exist.
    pub fn load() -> Result<Self, SettingsError> {
        let Some(config_file) = Self::config_file() else {
            warn!("Could not determine config directory, using defaults");
            return Ok(Self::default());
        };

        if !config_file.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        debug!("Loading config from {:?}", config_file);
        let content = fs::read_to_string(&config_file)?;
        parse_with_defaults(&content)
    }

    /// Load settings from a specific file, merged on top of defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        parse_with_defaults(&content)
    }

    /// Save settings to the default configuration file
    pub fn save(&self) -> Result<(), SettingsError> {
        let Some(config_file) = Self::config_file() else {
            return Err(SettingsError::NoConfigDir);
        };
        self.save_to(&config_file)
    }

    /// Save settings to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        debug!("Saving config to {:?}", path);
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// The conversion preferences expressed by these settings.
    pub fn conversion_preferences(&self) -> ConversionPreferences {
        ConversionPreferences {
            use_history: self.conversion.use_history,
            max_history_size: self.conversion.max_history_size,
        }
    }

    /// The candidate window preferences expressed by these settings.
    pub fn operation_preferences(&self) -> OperationPreferences {
        OperationPreferences {
            use_cascading_window: self.operation.use_cascading_window,
            candidate_shortcuts: self.operation.candidate_shortcuts.clone(),
        }
    }

    /// The logging options expressed by these settings.
    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            colored_log: self.log.colored_log,
            logtostderr: self.log.logtostderr,
            log_dir: if self.log.log_dir.is_empty() {
                None
            } else {
                Some(PathBuf::from(&self.log.log_dir))
            },
            verbose_level: 0,
        }
    }
}
