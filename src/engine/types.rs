//! Engine types
//!
//! Message types and configuration for the sync engine.

use crate::file::RemoteFileRecord;
use crate::state::FileCursorState;
use crate::types::LogLevel;
use serde_json::{json, Value};

/// A message emitted during sync
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// A file selected for sync
    Record {
        /// Stream name
        stream: String,
        /// The synced file
        file: RemoteFileRecord,
    },
    /// State checkpoint
    State {
        /// Stream name
        stream: String,
        /// Cursor state at this point of the sync
        data: FileCursorState,
    },
    /// Log message
    Log {
        /// Log level
        level: LogLevel,
        /// Log message
        message: String,
    },
}

impl Message {
    /// Create a record message
    pub fn record(stream: impl Into<String>, file: RemoteFileRecord) -> Self {
        Self::Record {
            stream: stream.into(),
            file,
        }
    }

    /// Create a state message
    pub fn state(stream: impl Into<String>, data: FileCursorState) -> Self {
        Self::State {
            stream: stream.into(),
            data,
        }
    }

    /// Create a log message
    pub fn log(level: LogLevel, message: impl Into<String>) -> Self {
        Self::Log {
            level,
            message: message.into(),
        }
    }

    /// Create an info log
    pub fn info(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Info, message)
    }

    /// Create a debug log
    pub fn debug(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Debug, message)
    }

    /// Create a warning log
    pub fn warn(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Warn, message)
    }

    /// Check if this is a record message
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record { .. })
    }

    /// Check if this is a state message
    pub fn is_state(&self) -> bool {
        matches!(self, Self::State { .. })
    }

    /// Check if this is a log message
    pub fn is_log(&self) -> bool {
        matches!(self, Self::Log { .. })
    }

    /// Render as a JSON line
    pub fn to_json(&self) -> Value {
        match self {
            Self::Record { stream, file } => json!({
                "type": "RECORD",
                "record": {
                    "stream": stream,
                    "data": file,
                }
            }),
            Self::State { stream, data } => json!({
                "type": "STATE",
                "state": {
                    "stream": stream,
                    "data": data,
                }
            }),
            Self::Log { level, message } => json!({
                "type": "LOG",
                "log": {
                    "level": level,
                    "message": message,
                }
            }),
        }
    }
}

/// Configuration for sync operation
#[derive(Debug, Clone, Default)]
pub struct SyncConfig {
    /// Checkpoint state every N synced files (0 = only at the end)
    pub checkpoint_interval: usize,
    /// Maximum files to sync per run (0 = unlimited)
    pub max_files: usize,
    /// Select files without recording them
    pub dry_run: bool,
}

impl SyncConfig {
    /// Create a new sync config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set checkpoint interval
    #[must_use]
    pub fn with_checkpoint_interval(mut self, interval: usize) -> Self {
        self.checkpoint_interval = interval;
        self
    }

    /// Set max files
    #[must_use]
    pub fn with_max_files(mut self, max: usize) -> Self {
        self.max_files = max;
        self
    }

    /// Enable dry-run mode
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Statistics from a sync operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Files returned by the lister
    pub files_listed: usize,
    /// Files selected and recorded
    pub files_synced: usize,
    /// History entries evicted
    pub files_evicted: usize,
    /// State checkpoints written
    pub checkpoints: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl SyncStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Files listed but not synced
    pub fn files_skipped(&self) -> usize {
        self.files_listed.saturating_sub(self.files_synced)
    }
}
