//! Configuration for the mdiwm terminal host.
//!
//! The configuration file is located at `~/.mdiwm/config.toml`:
//!
//! ```toml
//! # Log level written to ~/.mdiwm/mdiwm.log: error, warn, info, debug, trace
//! log_level = "info"
//!
//! # Fixed seed for initial window placement (optional)
//! seed = 7
//!
//! [layout]
//! cascade_offset = 2
//! minimized_width = 20
//! resize_threshold = 2
//! min_width = 24
//! min_height = 8
//! label_height = 1
//! # Close/minimize/maximize buttons in the title row; 0 hides them
//! button_width = 3
//! button_inset = 1
//! ```
//!
//! All units are terminal cells.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, Result};
use crate::wm::{LayoutOptions, Size};

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level for the log file
    pub log_level: String,
    /// Placement seed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Layout settings
    pub layout: LayoutConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            seed: None,
            layout: LayoutConfig::default(),
        }
    }
}

/// Layout configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub cascade_offset: i32,
    pub minimized_width: i32,
    pub resize_threshold: i32,
    pub min_width: i32,
    pub min_height: i32,
    /// Rows taken by a frame's label strip
    pub label_height: i32,
    pub button_width: i32,
    /// Offset of the first button from the frame's left edge
    pub button_inset: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cascade_offset: 2,
            minimized_width: 20,
            resize_threshold: 2,
            min_width: 24,
            min_height: 8,
            label_height: 1,
            button_width: 3,
            button_inset: 1,
        }
    }
}

impl LayoutConfig {
    /// Convert to manager options
    pub fn to_options(&self) -> LayoutOptions {
        LayoutOptions {
            cascade_offset: self.cascade_offset.max(0),
            minimized_width: self.minimized_width.max(1),
            resize_threshold: self.resize_threshold.max(1),
            min_window_size: Size::new(self.min_width, self.min_height).clamped(),
            button_width: self.button_width.max(0),
            // The first column of the title row is the frame corner
            button_inset: self.button_inset.max(1),
        }
    }
}

impl Config {
    /// Load configuration from the default location, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::get_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration text
    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let path = Self::get_config_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Directory holding the config file and log
    pub fn config_dir() -> Option<PathBuf> {
        home_dir().map(|home| home.join(".mdiwm"))
    }

    /// Get config file path
    fn get_config_path() -> Option<PathBuf> {
        let dir = Self::config_dir()?;
        if !dir.exists() {
            let _ = fs::create_dir_all(&dir);
        }
        Some(dir.join("config.toml"))
    }

    /// Log level as a tracing level
    pub fn tracing_level(&self) -> tracing::Level {
        match self.log_level.to_ascii_lowercase().as_str() {
            "error" => tracing::Level::ERROR,
            "warn" => tracing::Level::WARN,
            "debug" => tracing::Level::DEBUG,
            "trace" => tracing::Level::TRACE,
            _ => tracing::Level::INFO,
        }
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE")
        .or_else(|| std::env::var_os("HOME"))
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse("seed = 9\n[layout]\ncascade_offset = 4\n").unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.layout.cascade_offset, 4);
        assert_eq!(config.layout.minimized_width, 20);
    }

    #[test]
    fn test_invalid_file_is_error() {
        assert!(Config::parse("layout = 3").is_err());
    }

    #[test]
    fn test_to_options_clamps() {
        let layout = LayoutConfig {
            cascade_offset: -3,
            minimized_width: 0,
            resize_threshold: 0,
            min_width: 0,
            min_height: 5,
            label_height: 1,
            button_width: -2,
            button_inset: 0,
        };
        let opts = layout.to_options();
        assert_eq!(opts.cascade_offset, 0);
        assert_eq!(opts.minimized_width, 1);
        assert_eq!(opts.resize_threshold, 1);
        assert_eq!(opts.min_window_size, Size::new(1, 5));
        assert_eq!(opts.button_strip(), crate::wm::ButtonStrip::new(0, 1));
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("mdiwm-config-{}.toml", std::process::id()));
        let mut config = Config::default();
        config.log_level = "debug".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, config);
        assert_eq!(loaded.tracing_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Config::load_from(Path::new("/nonexistent/mdiwm/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
