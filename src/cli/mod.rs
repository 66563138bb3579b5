//! CLI module
//!
//! Command-line interface for file-based incremental syncs.
//!
//! # Commands
//!
//! - `plan` - Show which files the next sync would pick up
//! - `sync` - Sync new and changed files, then persist the cursor state
//! - `state` - Print the persisted cursor state of a stream

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
