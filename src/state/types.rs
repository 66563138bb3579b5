//! State types for tracking sync progress
//!
//! These types are serialized to JSON and persisted between runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persisted cursor state for one file-based stream
///
/// Serializes as `{"history": {"<uri>": "<timestamp>", ...}}`. Keys other
/// than `history` are ignored on load, so states written by older cursors
/// that also carried a cursor field still deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCursorState {
    /// URI to last-modified timestamp of every tracked file
    #[serde(default)]
    pub history: BTreeMap<String, String>,
}

impl FileCursorState {
    /// Create a new empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state from a history map
    pub fn from_history(history: BTreeMap<String, String>) -> Self {
        Self { history }
    }

    /// Whether there is no prior sync
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

/// Complete state for a source, keyed by stream name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// Per-stream state
    #[serde(default)]
    pub streams: BTreeMap<String, FileCursorState>,
}

impl State {
    /// Create a new empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get state for a stream
    pub fn get_stream(&self, stream: &str) -> Option<&FileCursorState> {
        self.streams.get(stream)
    }

    /// Replace the state of a stream
    pub fn set_stream(&mut self, stream: &str, state: FileCursorState) {
        self.streams.insert(stream.to_string(), state);
    }
}
