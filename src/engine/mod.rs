//! Execution engine module
//!
//! Runs the incremental sync loop for a file-based stream.
//!
//! # Overview
//!
//! The engine module provides:
//! - `SyncEngine` - Lists files, selects the ones to sync, records and checkpoints them
//! - `SyncConfig` - Configuration for sync operations
//! - Message types for output (Record, State, Log)

mod types;

pub use types::{Message, SyncConfig, SyncStats};

use crate::config::StreamConfig;
use crate::cursor::{CursorPolicy, TracingLogger};
use crate::error::Result;
use crate::source::{FileLister, GlobMatcher};
use crate::state::StateManager;
use crate::types::{format_timestamp, min_timestamp, Timestamp};
use std::time::Instant;
use tracing::info;

/// Sync engine for file-based streams
pub struct SyncEngine<L> {
    /// Source of file listings
    lister: L,
    /// State manager
    state: StateManager,
    /// Sync configuration
    config: SyncConfig,
    /// Statistics
    stats: SyncStats,
}

impl<L: FileLister> SyncEngine<L> {
    /// Create a new sync engine
    pub fn new(lister: L, state: StateManager) -> Self {
        Self {
            lister,
            state,
            config: SyncConfig::default(),
            stats: SyncStats::default(),
        }
    }

    /// Set sync configuration
    #[must_use]
    pub fn with_config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the state manager
    pub fn state(&self) -> &StateManager {
        &self.state
    }

    /// Get statistics
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Sync a single stream
    ///
    /// Every selected file produces a RECORD message and is then recorded in
    /// history. `now` anchors the lookback window used once history is full.
    pub async fn sync_stream(
        &mut self,
        stream: &StreamConfig,
        now: Timestamp,
    ) -> Result<Vec<Message>> {
        let start = Instant::now();
        let name = stream.name.as_str();
        let mut messages = vec![Message::info(format!(
            "Starting sync for stream: {name}"
        ))];

        let globs = GlobMatcher::new(&stream.globs)?;
        let mut policy = CursorPolicy::new(&stream.cursor)?;
        policy.set_initial_state(&self.state.stream_state(name).await)?;

        let listing_start = policy.listing_start_time(now);
        let files = self.lister.list_files(&globs, listing_start).await?;
        self.stats.files_listed += files.len();
        messages.push(Message::debug(listing_summary(files.len(), listing_start)));

        let logger = TracingLogger::new(name);
        let mut synced = 0usize;
        let mut selected = policy.get_files_to_sync(files, &logger);
        loop {
            if self.config.max_files > 0 && synced >= self.config.max_files {
                messages.push(Message::info(format!(
                    "Reached max files ({}), remaining files are left for the next sync",
                    self.config.max_files
                )));
                break;
            }
            let Some(file) = selected.next() else {
                break;
            };

            messages.push(Message::record(name, file.clone()));
            synced += 1;
            if self.config.dry_run {
                continue;
            }

            if selected.add_file(&file).is_some() {
                self.stats.files_evicted += 1;
            }
            self.stats.files_synced += 1;

            if self.config.checkpoint_interval > 0 && synced % self.config.checkpoint_interval == 0
            {
                let checkpoint = selected.policy().get_state();
                self.state.checkpoint(name, checkpoint.clone()).await?;
                self.stats.checkpoints += 1;
                messages.push(Message::state(name, checkpoint));
            }
        }
        drop(selected);

        if !self.config.dry_run {
            let final_state = policy.get_state();
            self.state.checkpoint(name, final_state.clone()).await?;
            self.stats.checkpoints += 1;
            messages.push(Message::state(name, final_state));
        }

        #[allow(clippy::cast_possible_truncation)]
        let elapsed = start.elapsed().as_millis() as u64;
        self.stats.duration_ms += elapsed;

        info!(
            stream = name,
            selected = synced,
            tracked = policy.history().len(),
            dry_run = self.config.dry_run,
            "Completed sync"
        );
        messages.push(Message::info(format!(
            "Completed sync for {name}: {synced} files in {elapsed}ms"
        )));

        Ok(messages)
    }
}

/// Describe a listing, leaving out the bound when nothing was filtered
fn listing_summary(count: usize, listing_start: Timestamp) -> String {
    if listing_start == min_timestamp() {
        format!("Listed {count} files")
    } else {
        format!(
            "Listed {count} files modified since {}",
            format_timestamp(&listing_start)
        )
    }
}
