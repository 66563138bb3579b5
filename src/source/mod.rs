//! File listing sources
//!
//! Lists remote files as `RemoteFileRecord`s from local disk or object
//! storage (S3, R2, GCS, Azure).

mod pattern;
mod store;

pub use pattern::GlobMatcher;
pub use store::FileSource;

use crate::error::Result;
use crate::file::RemoteFileRecord;
use crate::types::Timestamp;
use async_trait::async_trait;

/// Anything that can list the files of a stream
#[async_trait]
pub trait FileLister: Send + Sync {
    /// List files matching `globs` modified at or after `start_time`,
    /// ordered by `(last_modified, uri)`
    async fn list_files(
        &self,
        globs: &GlobMatcher,
        start_time: Timestamp,
    ) -> Result<Vec<RemoteFileRecord>>;
}
