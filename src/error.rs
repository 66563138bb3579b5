//! Error types for Solidafy FileSync
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for Solidafy FileSync
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid argument '{field}': {message}")]
    InvalidArgument { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Cursor Errors
    // ============================================================================
    #[error("Invalid timestamp '{value}' for file '{uri}': {message}")]
    TimestampParse {
        uri: String,
        value: String,
        message: String,
    },

    #[error("State error: {message}")]
    State { message: String },

    // ============================================================================
    // Storage Errors
    // ============================================================================
    #[error("Object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    #[error("Invalid glob pattern '{pattern}': {message}")]
    Glob { pattern: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a timestamp parse error
    pub fn timestamp_parse(
        uri: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::TimestampParse {
            uri: uri.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create a state error
    pub fn state(message: impl Into<String>) -> Self {
        Self::State {
            message: message.into(),
        }
    }

    /// Create a glob error
    pub fn glob(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Glob {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Check if this error came from configuration rather than runtime data
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::Config { .. }
                | Error::InvalidArgument { .. }
                | Error::YamlParse(_)
                | Error::Glob { .. }
        )
    }
}

/// Result type alias for Solidafy FileSync
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::invalid_argument("max_history_size", "must be positive, got -1");
        assert_eq!(
            err.to_string(),
            "Invalid argument 'max_history_size': must be positive, got -1"
        );

        let err = Error::timestamp_parse("a.csv", "yesterday", "input contains invalid characters");
        assert_eq!(
            err.to_string(),
            "Invalid timestamp 'yesterday' for file 'a.csv': input contains invalid characters"
        );
    }

    #[test]
    fn test_is_config_error() {
        assert!(Error::config("bad").is_config_error());
        assert!(Error::invalid_argument("x", "bad").is_config_error());
        assert!(Error::glob("[", "unclosed").is_config_error());

        assert!(!Error::state("bad").is_config_error());
        assert!(!Error::timestamp_parse("a", "b", "c").is_config_error());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }

    #[test]
    fn test_result_with_context_is_lazy() {
        let ok: Result<u8> = Ok(1);
        let value = ok
            .with_context(|| panic!("closure must not run on Ok"))
            .unwrap();
        assert_eq!(value, 1);
    }
}
