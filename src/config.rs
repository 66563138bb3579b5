//! Configuration types for file-based streams
//!
//! Stream configuration is loaded from JSON or YAML. Every field has a
//! default, so an empty document is a valid configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of files tracked in a stream's history
pub const DEFAULT_MAX_HISTORY_SIZE: i64 = 10_000;

/// Default lookback window, in days, once the history is full
pub const DEFAULT_DAYS_TO_SYNC_IF_HISTORY_IS_FULL: i64 = 3;

// ============================================================================
// Cursor Config
// ============================================================================

/// Bounds for a file cursor
///
/// The two values are independent: `max_history_size` caps how many files are
/// remembered, `days_to_sync_if_history_is_full` controls how far back a
/// lister looks once that cap has been reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorConfig {
    /// Maximum number of files kept in history
    #[serde(default = "default_max_history_size")]
    pub max_history_size: i64,

    /// Lookback window used when the history is full
    #[serde(default = "default_days_to_sync")]
    pub days_to_sync_if_history_is_full: i64,
}

fn default_max_history_size() -> i64 {
    DEFAULT_MAX_HISTORY_SIZE
}

fn default_days_to_sync() -> i64 {
    DEFAULT_DAYS_TO_SYNC_IF_HISTORY_IS_FULL
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            max_history_size: DEFAULT_MAX_HISTORY_SIZE,
            days_to_sync_if_history_is_full: DEFAULT_DAYS_TO_SYNC_IF_HISTORY_IS_FULL,
        }
    }
}

impl CursorConfig {
    /// Create a config with explicit bounds
    pub fn new(max_history_size: i64, days_to_sync_if_history_is_full: i64) -> Self {
        Self {
            max_history_size,
            days_to_sync_if_history_is_full,
        }
    }

    /// Set the history size
    #[must_use]
    pub fn with_max_history_size(mut self, size: i64) -> Self {
        self.max_history_size = size;
        self
    }

    /// Set the lookback window
    #[must_use]
    pub fn with_days_to_sync(mut self, days: i64) -> Self {
        self.days_to_sync_if_history_is_full = days;
        self
    }

    /// Check that both bounds are positive
    pub fn validate(&self) -> Result<()> {
        if self.max_history_size <= 0 {
            return Err(Error::invalid_argument(
                "max_history_size",
                format!("must be positive, got {}", self.max_history_size),
            ));
        }
        if self.days_to_sync_if_history_is_full <= 0 {
            return Err(Error::invalid_argument(
                "days_to_sync_if_history_is_full",
                format!(
                    "must be positive, got {}",
                    self.days_to_sync_if_history_is_full
                ),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Stream Config
// ============================================================================

/// Configuration for one file-based stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Stream name, used as the state key
    #[serde(default = "default_stream_name")]
    pub name: String,

    /// Glob patterns selecting files (empty = all files)
    #[serde(default)]
    pub globs: Vec<String>,

    /// Cursor bounds
    #[serde(flatten)]
    pub cursor: CursorConfig,
}

fn default_stream_name() -> String {
    "files".to_string()
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            name: default_stream_name(),
            globs: Vec::new(),
            cursor: CursorConfig::default(),
        }
    }
}

impl StreamConfig {
    /// Parse a stream config from a JSON or YAML string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a stream config from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::parse(&content)
    }

    /// Validate the stream config
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::invalid_argument("name", "must not be empty"));
        }
        self.cursor.validate()
    }
}
