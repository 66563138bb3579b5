//! File selection policy

use super::history::{HistoryEntry, SyncHistory};
use super::logger::SyncLogger;
use crate::config::CursorConfig;
use crate::error::{Error, Result};
use crate::file::RemoteFileRecord;
use crate::state::FileCursorState;
use crate::types::{format_timestamp, min_timestamp, Timestamp};
use chrono::TimeDelta;
use std::cmp::Ordering;
use tracing::{debug, warn};

/// Outcome for a single candidate file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Sync,
    /// Tracked at this exact timestamp
    AlreadySynced,
    /// Tracked, and the listing reports an older timestamp
    OlderThanRecorded,
    /// Not full: untracked and modified before the start time
    BeforeStartTime,
    /// Full: untracked, and ordered before the earliest file of the initial history
    OlderThanHistory,
}

/// Decides which files need to be synced and records synced files
#[derive(Debug, Clone)]
pub struct CursorPolicy {
    history: SyncHistory,
    time_window_if_history_is_full: TimeDelta,
    /// Earliest history entry when the initial state was loaded. Evictions
    /// during the current sync do not move it.
    initial_earliest_file_in_history: Option<HistoryEntry>,
}

impl CursorPolicy {
    /// Create a policy with an empty history
    pub fn new(config: &CursorConfig) -> Result<Self> {
        config.validate()?;

        let max_size = usize::try_from(config.max_history_size).map_err(|_| {
            Error::invalid_argument(
                "max_history_size",
                format!("{} does not fit in memory", config.max_history_size),
            )
        })?;
        let time_window = TimeDelta::try_days(config.days_to_sync_if_history_is_full)
            .ok_or_else(|| {
                Error::invalid_argument(
                    "days_to_sync_if_history_is_full",
                    format!("{} days is out of range", config.days_to_sync_if_history_is_full),
                )
            })?;

        Ok(Self {
            history: SyncHistory::new(max_size)?,
            time_window_if_history_is_full: time_window,
            initial_earliest_file_in_history: None,
        })
    }

    /// Load persisted state and freeze the earliest tracked file
    pub fn set_initial_state(&mut self, state: &FileCursorState) -> Result<()> {
        self.history.set_initial_state(&state.history)?;
        self.initial_earliest_file_in_history = self.history.compute_earliest_file_in_history();
        debug!(
            tracked = self.history.len(),
            full = self.history.is_history_full(),
            "Loaded cursor state"
        );
        Ok(())
    }

    /// Record a file as synced
    pub fn add_file(&mut self, file: &RemoteFileRecord) -> Option<HistoryEntry> {
        self.history.add_file(file)
    }

    /// Current state in its persisted shape
    pub fn get_state(&self) -> FileCursorState {
        FileCursorState::from_history(self.history.get_state())
    }

    pub fn history(&self) -> &SyncHistory {
        &self.history
    }

    pub fn initial_earliest_file_in_history(&self) -> Option<&HistoryEntry> {
        self.initial_earliest_file_in_history.as_ref()
    }

    /// Earliest timestamp covered by history
    pub fn get_start_time(&self) -> Timestamp {
        self.history.compute_start_time()
    }

    /// Lower bound on `last_modified` a lister may filter on
    ///
    /// Once history is full it no longer covers everything since its earliest
    /// entry, so the bound also reaches back `days_to_sync_if_history_is_full`
    /// from `now`.
    pub fn listing_start_time(&self, now: Timestamp) -> Timestamp {
        let start_time = self.history.compute_start_time();
        if !self.history.is_history_full() {
            return start_time;
        }

        let window_start = now
            .checked_sub_signed(self.time_window_if_history_is_full)
            .unwrap_or_else(min_timestamp);
        start_time.min(window_start)
    }

    /// Lazily select the files that need syncing, in listing order
    ///
    /// The returned iterator does not record anything. Call
    /// [`FilesToSync::add_file`] for each yielded file once it has been
    /// processed; files that were not recorded are selected again next run.
    pub fn get_files_to_sync<'a, I>(
        &'a mut self,
        files: I,
        logger: &'a dyn SyncLogger,
    ) -> FilesToSync<'a, I::IntoIter>
    where
        I: IntoIterator<Item = RemoteFileRecord>,
    {
        let start_time = self.history.compute_start_time();
        FilesToSync {
            policy: self,
            files: files.into_iter(),
            logger,
            start_time,
            warned_older_than_history: false,
        }
    }

    fn decide(&self, file: &RemoteFileRecord, start_time: Timestamp) -> Decision {
        if let Some(recorded) = self.history.get(file.uri()) {
            return match file.last_modified().cmp(&recorded) {
                Ordering::Greater => Decision::Sync,
                Ordering::Equal => Decision::AlreadySynced,
                Ordering::Less => Decision::OlderThanRecorded,
            };
        }

        if !self.history.is_history_full() {
            return if file.last_modified() >= start_time {
                Decision::Sync
            } else {
                Decision::BeforeStartTime
            };
        }

        match &self.initial_earliest_file_in_history {
            Some(earliest) if earliest.is_after(file) => Decision::OlderThanHistory,
            // Started empty and filled up during this sync
            _ => Decision::Sync,
        }
    }
}

/// Files selected for syncing, produced lazily
///
/// Holds the policy mutably so the caller can record each file through
/// [`FilesToSync::add_file`] between calls to `next`.
pub struct FilesToSync<'a, I> {
    policy: &'a mut CursorPolicy,
    files: I,
    logger: &'a dyn SyncLogger,
    start_time: Timestamp,
    warned_older_than_history: bool,
}

impl<I> FilesToSync<'_, I> {
    /// Record a yielded file as synced
    pub fn add_file(&mut self, file: &RemoteFileRecord) -> Option<HistoryEntry> {
        self.policy.add_file(file)
    }

    /// Start time frozen when the selection began
    pub fn start_time(&self) -> Timestamp {
        self.start_time
    }

    pub fn policy(&self) -> &CursorPolicy {
        self.policy
    }

    fn warn_older_than_history(&mut self) {
        if self.warned_older_than_history {
            return;
        }
        self.warned_older_than_history = true;

        let since = self
            .policy
            .initial_earliest_file_in_history
            .as_ref()
            .map(|entry| format_timestamp(&entry.last_modified))
            .unwrap_or_default();
        self.logger.warning(&format!(
            "The state history is full. Files last modified before {since} that are not \
             tracked in the history will not be synced."
        ));
    }
}

impl<I> Iterator for FilesToSync<'_, I>
where
    I: Iterator<Item = RemoteFileRecord>,
{
    type Item = RemoteFileRecord;

    // `for` over `by_ref()` would hold `self.files` across the warning call
    #[allow(clippy::while_let_on_iterator)]
    fn next(&mut self) -> Option<Self::Item> {
        while let Some(file) = self.files.next() {
            match self.policy.decide(&file, self.start_time) {
                Decision::Sync => {
                    debug!(uri = file.uri(), "Selected file for sync");
                    return Some(file);
                }
                Decision::OlderThanHistory => {
                    debug!(uri = file.uri(), "Skipping file older than history");
                    self.warn_older_than_history();
                }
                Decision::OlderThanRecorded => {
                    warn!(
                        uri = file.uri(),
                        "File's last modified date is older than the last time it was synced. \
                         Skipping the file."
                    );
                }
                decision => {
                    debug!(uri = file.uri(), ?decision, "Skipping file");
                }
            }
        }
        None
    }
}
