//! State management module
//!
//! Persists per-stream file cursor state between sync runs so that
//! incremental syncs only pick up new or changed files.
//!
//! # Overview
//!
//! The state module provides:
//! - `FileCursorState` - The persisted `{"history": {...}}` shape of one stream
//! - `State` - All streams of a source, keyed by name
//! - `StateManager` - File-based state persistence with checkpoints

mod manager;
mod types;

pub use manager::StateManager;
pub use types::{FileCursorState, State};
