//! Incremental file cursor
//!
//! Decides which files of a listing need to be synced, based on a bounded
//! history of files synced by earlier runs.
//!
//! # Usage
//!
//! ```rust,ignore
//! use solidafy_filesync::cursor::{CursorPolicy, TracingLogger};
//!
//! let mut policy = CursorPolicy::new(&config)?;
//! policy.set_initial_state(&persisted)?;
//!
//! let logger = TracingLogger::new("invoices");
//! let mut files = policy.get_files_to_sync(listing, &logger);
//! while let Some(file) = files.next() {
//!     process(&file)?;
//!     // Only record the file once it has been processed
//!     files.add_file(&file);
//! }
//!
//! let state = policy.get_state();
//! ```
//!
//! The iterator never records files on its own. A file that fails to sync
//! stays out of history and is picked up again by the next run.

mod history;
mod logger;
mod policy;

pub use history::{HistoryEntry, SyncHistory};
pub use logger::{SyncLogger, TracingLogger};
pub use policy::{CursorPolicy, FilesToSync};
