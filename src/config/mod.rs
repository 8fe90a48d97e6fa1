//! Engine configuration.
//!
//! [`GridConfig`] is the whole tuning surface of the engine. Every field has
//! a default matching the layout constants the engine was designed around,
//! so `GridConfig::default()` is a working configuration. Validation happens
//! once, at engine construction, so the layout pipeline itself never has to
//! defend against nonsensical geometry.

pub mod loader;

pub use loader::{
    default_config_path, load_config_with_precedence, ConfigFile, ConfigFileError, GridSection,
};

use std::time::Duration;
use thiserror::Error;

/// Default gap between columns and stacked items, in pixels.
pub const DEFAULT_GUTTER_SIZE: f64 = 1.5;

/// Default minimum column width, in pixels.
pub const DEFAULT_MIN_COLUMN_WIDTH: f64 = 240.0;

/// Default upper bound on column count.
pub const DEFAULT_MAX_COLUMN_COUNT: usize = 5;

/// Default lower bound on column count.
pub const DEFAULT_MIN_COLUMN_COUNT: usize = 2;

/// Default overscan padding beyond each viewport edge, in pixels.
pub const DEFAULT_OVERSCAN: f64 = 1000.0;

/// Default minimum bounds delta required before a scroll update propagates.
pub const DEFAULT_HYSTERESIS: f64 = 100.0;

/// Default distance from the end of content that arms the fetch trigger.
pub const DEFAULT_SCROLL_THRESHOLD: f64 = 1500.0;

/// Default interval used to coalesce resize bursts.
pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(100);

/// Errors rejected at engine construction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// A column-count bound was zero.
    #[error("column counts must be at least 1 (min {min}, max {max})")]
    ZeroColumnCount {
        /// Configured minimum.
        min: usize,
        /// Configured maximum.
        max: usize,
    },

    /// The minimum column count exceeds the maximum.
    #[error("min_column_count {min} exceeds max_column_count {max}")]
    ColumnBoundsInverted {
        /// Configured minimum.
        min: usize,
        /// Configured maximum.
        max: usize,
    },

    /// A pixel quantity was negative or not finite.
    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidLength {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// The minimum column width must be strictly positive, otherwise the
    /// column-count formula divides by the gutter alone.
    #[error("min_column_width must be positive (got {0})")]
    NonPositiveColumnWidth(f64),
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Upper bound on column count.
    pub max_column_count: usize,
    /// Lower bound on column count.
    pub min_column_count: usize,
    /// Minimum column width driving the column-count formula, in pixels.
    pub min_column_width: f64,
    /// Gap between columns and stacked items, in pixels.
    pub gutter_size: f64,
    /// Extra padding beyond each viewport edge when computing bounds.
    pub overscan: f64,
    /// Minimum bounds delta required before a scroll update propagates.
    pub hysteresis: f64,
    /// Distance from the end of content that arms the fetch trigger.
    pub scroll_threshold: f64,
    /// Whether scroll signals come from the global viewport rather than a
    /// designated scrollable element. Informational for hosts; the engine
    /// treats both sources identically.
    pub use_window: bool,
    /// Interval used to coalesce resize bursts after the first measurement.
    pub resize_debounce: Duration,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            max_column_count: DEFAULT_MAX_COLUMN_COUNT,
            min_column_count: DEFAULT_MIN_COLUMN_COUNT,
            min_column_width: DEFAULT_MIN_COLUMN_WIDTH,
            gutter_size: DEFAULT_GUTTER_SIZE,
            overscan: DEFAULT_OVERSCAN,
            hysteresis: DEFAULT_HYSTERESIS,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            use_window: true,
            resize_debounce: DEFAULT_RESIZE_DEBOUNCE,
        }
    }
}

impl GridConfig {
    /// Checks the configuration for values the layout math cannot absorb.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_column_count == 0 || self.max_column_count == 0 {
            return Err(ConfigError::ZeroColumnCount {
                min: self.min_column_count,
                max: self.max_column_count,
            });
        }
        if self.min_column_count > self.max_column_count {
            return Err(ConfigError::ColumnBoundsInverted {
                min: self.min_column_count,
                max: self.max_column_count,
            });
        }
        if !(self.min_column_width.is_finite() && self.min_column_width > 0.0) {
            return Err(ConfigError::NonPositiveColumnWidth(self.min_column_width));
        }
        for (field, value) in [
            ("gutter_size", self.gutter_size),
            ("overscan", self.overscan),
            ("hysteresis", self.hysteresis),
            ("scroll_threshold", self.scroll_threshold),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidLength { field, value });
            }
        }
        Ok(())
    }
}
