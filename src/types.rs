//! Common types used throughout Solidafy FileSync
//!
//! This module contains shared type definitions, type aliases,
//! and the timestamp format used in persisted cursor state.

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// Point in time a file was last modified, always UTC
pub type Timestamp = DateTime<Utc>;

// ============================================================================
// Timestamp Format
// ============================================================================

/// Format of every timestamp written to persisted state
///
/// Example: `2021-01-01T00:00:00.000000Z`
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Format a timestamp the way it is persisted
pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.format(DATE_TIME_FORMAT).to_string()
}

/// Parse a persisted timestamp string
///
/// Only the exact [`DATE_TIME_FORMAT`] is accepted.
pub fn parse_timestamp(value: &str) -> std::result::Result<Timestamp, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT).map(|naive| naive.and_utc())
}

/// Truncate a timestamp to the precision kept in persisted state
pub fn normalize_timestamp(ts: Timestamp) -> Timestamp {
    ts.trunc_subsecs(6)
}

/// The earliest representable timestamp, used when history is empty
pub fn min_timestamp() -> Timestamp {
    DateTime::<Utc>::MIN_UTC
}

// ============================================================================
// Log Level
// ============================================================================

/// Log level for emitted LOG messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "2021-01-01T00:00:00.000000Z");
    }

    #[test]
    fn test_parse_timestamp() {
        let ts = parse_timestamp("2023-07-31T23:59:59.999999Z").unwrap();
        assert_eq!(ts.hour(), 23);
        assert_eq!(ts.nanosecond(), 999_999_000);
        assert_eq!(format_timestamp(&ts), "2023-07-31T23:59:59.999999Z");
    }

    #[test]
    fn test_parse_timestamp_rejects_other_formats() {
        assert!(parse_timestamp("2023-08-01").is_err());
        assert!(parse_timestamp("2023-08-01 00:00:00.000000").is_err());
        assert!(parse_timestamp("not a date").is_err());
    }

    #[test]
    fn test_normalize_timestamp_drops_nanoseconds() {
        let ts = Utc
            .with_ymd_and_hms(2021, 1, 1, 0, 0, 0)
            .unwrap()
            .with_nanosecond(1_234_567)
            .unwrap();
        let normalized = normalize_timestamp(ts);
        assert_eq!(normalized.nanosecond(), 1_234_000);
        assert_eq!(
            parse_timestamp(&format_timestamp(&normalized)).unwrap(),
            normalized
        );
    }

    #[test]
    fn test_min_timestamp_is_earliest() {
        let ts = Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap();
        assert!(min_timestamp() < ts);
    }

    #[test]
    fn test_log_level_serde() {
        let json = serde_json::to_string(&LogLevel::Warn).unwrap();
        assert_eq!(json, "\"WARN\"");
    }
}
