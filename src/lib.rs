//! # Solidafy FileSync
//!
//! Incremental sync cursor for file-based sources (S3, GCS, Azure, local disk).
//!
//! Tracks which remote files have already been synced, bounded by a
//! configurable history size, and decides which files of a fresh listing
//! need syncing.
//!
//! ## Features
//!
//! - **Bounded History**: Per-file modification times, evicting the oldest entry when full
//! - **Cursor Policy**: Selects new or modified files, with a lookback window once history is full
//! - **Resumable State**: JSON state compatible across runs, checkpointed during sync
//! - **Object Store Listing**: S3, R2, GCS, Azure and local directories via `object_store`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use solidafy_filesync::{CursorConfig, CursorPolicy, TracingLogger};
//!
//! let mut policy = CursorPolicy::new(&CursorConfig::default())?;
//! policy.set_initial_state(&saved_state)?;
//!
//! let logger = TracingLogger::new("files");
//! let mut files = policy.get_files_to_sync(listing, &logger);
//! while let Some(file) = files.next() {
//!     process(&file)?;
//!     files.add_file(&file);
//! }
//! let state = policy.get_state();
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        SyncEngine                        │
//! │  list(globs, start) → select → RECORD → add → checkpoint │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────┬─────────────┴──────────┬──────────────────┐
//! │    Source    │         Cursor         │      State       │
//! ├──────────────┼────────────────────────┼──────────────────┤
//! │ S3 / R2      │ CursorPolicy           │ StateManager     │
//! │ GCS / Azure  │ SyncHistory            │ FileCursorState  │
//! │ Local        │ FilesToSync            │ JSON file        │
//! └──────────────┴────────────────────────┴──────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
// Allow common clippy pedantic lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Remote file records
pub mod file;

/// Sync history and cursor policy
pub mod cursor;

/// Stream and cursor configuration
pub mod config;

/// State management and checkpointing
pub mod state;

/// File listing from object stores
pub mod source;

/// Sync execution engine
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{CursorConfig, StreamConfig};
pub use cursor::{CursorPolicy, FilesToSync, HistoryEntry, SyncHistory, SyncLogger, TracingLogger};
pub use file::RemoteFileRecord;
pub use state::{FileCursorState, StateManager};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
