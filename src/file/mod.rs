//! Remote file descriptors
//!
//! A `RemoteFileRecord` is produced by a file lister for every object it
//! finds and consumed by the cursor. Records are immutable once built.

mod record;

pub use record::{sort_for_sync, RemoteFileRecord};
