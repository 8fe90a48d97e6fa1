//! Configuration file loading for the demo binary.
//!
//! The demo reads an optional TOML file whose `[grid]` section overrides
//! engine defaults. Precedence (highest first): explicit `--config` path,
//! the `ASHLAR_CONFIG` environment variable, then the platform config
//! directory. A missing file is not an error; defaults apply.

use crate::config::GridConfig;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while loading a configuration file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigFileError {
    /// Failed to read the config file.
    #[error("Failed to read config file at {path}: {reason}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// The file exists but is not valid TOML (or has unknown fields).
    #[error("Invalid TOML in {path}: {reason}")]
    Parse {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional; unset fields fall back to built-in defaults.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Engine tuning overrides.
    #[serde(default)]
    pub grid: Option<GridSection>,

    /// Path for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Number of items per simulated fetch in the demo feed.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Simulated fetch latency in milliseconds.
    #[serde(default)]
    pub fetch_delay_ms: Option<u64>,
}

/// `[grid]` section mapping onto [`GridConfig`].
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GridSection {
    /// Upper bound on column count.
    #[serde(default)]
    pub max_column_count: Option<usize>,
    /// Lower bound on column count.
    #[serde(default)]
    pub min_column_count: Option<usize>,
    /// Minimum column width in pixels.
    #[serde(default)]
    pub min_column_width: Option<f64>,
    /// Gap between columns and stacked items, in pixels.
    #[serde(default)]
    pub gutter_size: Option<f64>,
    /// Overscan padding in pixels.
    #[serde(default)]
    pub overscan: Option<f64>,
    /// Bounds hysteresis in pixels.
    #[serde(default)]
    pub hysteresis: Option<f64>,
    /// Fetch-trigger threshold in pixels.
    #[serde(default)]
    pub scroll_threshold: Option<f64>,
    /// Resize debounce interval in milliseconds.
    #[serde(default)]
    pub resize_debounce_ms: Option<u64>,
}

impl GridSection {
    /// Applies the overrides present in this section on top of `base`.
    pub fn apply(&self, mut base: GridConfig) -> GridConfig {
        if let Some(v) = self.max_column_count {
            base.max_column_count = v;
        }
        if let Some(v) = self.min_column_count {
            base.min_column_count = v;
        }
        if let Some(v) = self.min_column_width {
            base.min_column_width = v;
        }
        if let Some(v) = self.gutter_size {
            base.gutter_size = v;
        }
        if let Some(v) = self.overscan {
            base.overscan = v;
        }
        if let Some(v) = self.hysteresis {
            base.hysteresis = v;
        }
        if let Some(v) = self.scroll_threshold {
            base.scroll_threshold = v;
        }
        if let Some(v) = self.resize_debounce_ms {
            base.resize_debounce = Duration::from_millis(v);
        }
        base
    }
}

/// Loads a configuration file from a specific path.
///
/// Returns `Ok(None)` if the file does not exist; missing configuration is
/// not an error. Returns `Err` only when the file exists but cannot be read
/// or parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigFileError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigFileError::Read {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigFileError::Parse {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolves the default config file path
/// (`~/.config/ashlar/config.toml` on Unix-like platforms).
///
/// Returns `None` if the platform config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ashlar").join("config.toml"))
}

/// Resolves the default log file path, falling back to the current
/// directory when the platform state directory is unavailable.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("ashlar").join("ashlar.log")
    } else {
        PathBuf::from("ashlar.log")
    }
}

/// Loads configuration with precedence handling.
///
/// Precedence (highest to lowest): explicit path argument, the
/// `ASHLAR_CONFIG` environment variable, then [`default_config_path`].
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigFileError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("ASHLAR_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}
