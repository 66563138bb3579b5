//! Bounded history of synced files

use crate::error::{Error, Result};
use crate::file::RemoteFileRecord;
use crate::types::{format_timestamp, min_timestamp, parse_timestamp, Timestamp};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// A tracked file and the timestamp it was synced at
///
/// Ordering is by `last_modified`, then `uri`. This is the eviction order:
/// the smallest entry is evicted first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HistoryEntry {
    pub last_modified: Timestamp,
    pub uri: String,
}

impl HistoryEntry {
    pub fn new(uri: impl Into<String>, last_modified: Timestamp) -> Self {
        Self {
            last_modified,
            uri: uri.into(),
        }
    }

    /// Compare against a file using the same `(last_modified, uri)` order
    pub fn is_after(&self, file: &RemoteFileRecord) -> bool {
        (self.last_modified, self.uri.as_str()) > file.sort_key()
    }
}

/// Capacity-bounded mapping from file URI to last-synced timestamp
///
/// Holds at most `max_size` entries. Adding a file beyond that evicts the
/// single earliest entry.
#[derive(Debug, Clone)]
pub struct SyncHistory {
    /// uri -> last_modified
    entries: BTreeMap<String, Timestamp>,
    /// Same entries, in eviction order
    by_age: BTreeSet<HistoryEntry>,
    max_size: usize,
}

impl SyncHistory {
    /// Create an empty history holding at most `max_size` files
    pub fn new(max_size: usize) -> Result<Self> {
        if max_size == 0 {
            return Err(Error::invalid_argument("max_history_size", "must be positive, got 0"));
        }

        Ok(Self {
            entries: BTreeMap::new(),
            by_age: BTreeSet::new(),
            max_size,
        })
    }

    /// Replace the history with persisted state
    ///
    /// An empty map is a first sync. On a parse error the current entries are
    /// left unchanged.
    pub fn set_initial_state(&mut self, history: &BTreeMap<String, String>) -> Result<()> {
        let mut entries = BTreeMap::new();
        let mut by_age = BTreeSet::new();

        for (uri, value) in history {
            let last_modified = parse_timestamp(value)
                .map_err(|e| Error::timestamp_parse(uri, value, e.to_string()))?;
            entries.insert(uri.clone(), last_modified);
            by_age.insert(HistoryEntry::new(uri, last_modified));
        }

        self.entries = entries;
        self.by_age = by_age;

        // State written with a larger bound
        while self.entries.len() > self.max_size {
            if let Some(evicted) = self.evict_earliest() {
                debug!(uri = %evicted.uri, "Trimmed history entry above max size");
            }
        }

        Ok(())
    }

    /// Record a synced file, evicting the earliest entry if over capacity
    ///
    /// Returns the evicted entry, which may be the file just added when it is
    /// older than everything else tracked.
    pub fn add_file(&mut self, file: &RemoteFileRecord) -> Option<HistoryEntry> {
        let last_modified = file.last_modified();
        if let Some(previous) = self.entries.insert(file.uri().to_string(), last_modified) {
            self.by_age.remove(&HistoryEntry::new(file.uri(), previous));
        }
        self.by_age.insert(HistoryEntry::new(file.uri(), last_modified));

        if self.entries.len() > self.max_size {
            let evicted = self.evict_earliest();
            if let Some(entry) = &evicted {
                debug!(uri = %entry.uri, "Evicted earliest file from history");
            }
            evicted
        } else {
            None
        }
    }

    fn evict_earliest(&mut self) -> Option<HistoryEntry> {
        let earliest = self.by_age.pop_first()?;
        self.entries.remove(&earliest.uri);
        Some(earliest)
    }

    /// Whether the history has reached capacity
    pub fn is_history_full(&self) -> bool {
        self.entries.len() >= self.max_size
    }

    /// Earliest `last_modified` in history, or the minimum timestamp if empty
    pub fn compute_start_time(&self) -> Timestamp {
        self.by_age
            .first()
            .map_or_else(min_timestamp, |entry| entry.last_modified)
    }

    /// Earliest entry by `(last_modified, uri)`, if any
    pub fn compute_earliest_file_in_history(&self) -> Option<HistoryEntry> {
        self.by_age.first().cloned()
    }

    /// Latest entry by `(last_modified, uri)`, if any
    pub fn latest_entry(&self) -> Option<&HistoryEntry> {
        self.by_age.last()
    }

    /// Latest entry rendered as `"{timestamp}_{uri}"`
    pub fn cursor_value(&self) -> Option<String> {
        self.latest_entry()
            .map(|entry| format!("{}_{}", format_timestamp(&entry.last_modified), entry.uri))
    }

    /// Recorded timestamp of a file
    pub fn get(&self, uri: &str) -> Option<Timestamp> {
        self.entries.get(uri).copied()
    }

    /// Entries in eviction order, earliest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.by_age.iter()
    }

    /// Serialize entries for persistence
    pub fn get_state(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(uri, ts)| (uri.clone(), format_timestamp(ts)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn ts(y: i32, m: u32, d: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn file(uri: &str, last_modified: Timestamp) -> RemoteFileRecord {
        RemoteFileRecord::from_uri(uri, last_modified).unwrap()
    }

    fn history_map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(uri, value)| ((*uri).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn test_new_rejects_zero() {
        assert!(matches!(
            SyncHistory::new(0),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_empty_history() {
        let history = SyncHistory::new(3).unwrap();
        assert!(history.is_empty());
        assert!(!history.is_history_full());
        assert_eq!(history.compute_start_time(), min_timestamp());
        assert!(history.compute_earliest_file_in_history().is_none());
        assert!(history.cursor_value().is_none());
        assert!(history.get_state().is_empty());
    }

    #[test]
    fn test_add_files_tracks_start_time() {
        let mut history = SyncHistory::new(3).unwrap();
        let mut start_times = Vec::new();

        for (uri, last_modified) in [
            ("a.csv", ts(2021, 1, 1)),
            ("b.csv", ts(2021, 1, 2)),
            ("c.csv", ts(2020, 12, 31)),
        ] {
            assert!(history.add_file(&file(uri, last_modified)).is_none());
            start_times.push(history.compute_start_time());
        }

        assert_eq!(
            start_times,
            vec![ts(2021, 1, 1), ts(2021, 1, 1), ts(2020, 12, 31)]
        );
        assert!(history.is_history_full());
        assert_eq!(
            history.get_state(),
            history_map(&[
                ("a.csv", "2021-01-01T00:00:00.000000Z"),
                ("b.csv", "2021-01-02T00:00:00.000000Z"),
                ("c.csv", "2020-12-31T00:00:00.000000Z"),
            ])
        );
    }

    #[test]
    fn test_add_file_evicts_earliest() {
        let mut history = SyncHistory::new(2).unwrap();
        history.add_file(&file("a.csv", ts(2021, 1, 1)));
        history.add_file(&file("b.csv", ts(2021, 1, 2)));

        let evicted = history.add_file(&file("c.csv", ts(2021, 1, 3)));

        assert_eq!(evicted, Some(HistoryEntry::new("a.csv", ts(2021, 1, 1))));
        assert_eq!(history.len(), 2);
        assert!(history.get("a.csv").is_none());
        assert_eq!(history.compute_start_time(), ts(2021, 1, 2));
    }

    #[test]
    fn test_eviction_tie_break_is_lexicographic() {
        let mut history = SyncHistory::new(2).unwrap();
        history.add_file(&file("b.csv", ts(2021, 1, 1)));
        history.add_file(&file("a.csv", ts(2021, 1, 1)));

        let evicted = history.add_file(&file("c.csv", ts(2021, 1, 1)));

        assert_eq!(evicted.unwrap().uri, "a.csv");
        assert!(history.get("b.csv").is_some());
        assert!(history.get("c.csv").is_some());
    }

    #[test]
    fn test_add_file_may_evict_itself() {
        let mut history = SyncHistory::new(1).unwrap();
        history.add_file(&file("b.csv", ts(2021, 1, 2)));

        let evicted = history.add_file(&file("a.csv", ts(2021, 1, 1)));

        assert_eq!(evicted.unwrap().uri, "a.csv");
        assert_eq!(history.get("b.csv"), Some(ts(2021, 1, 2)));
    }

    #[test]
    fn test_add_existing_file_updates_in_place() {
        let mut history = SyncHistory::new(2).unwrap();
        history.add_file(&file("a.csv", ts(2021, 1, 1)));
        history.add_file(&file("b.csv", ts(2021, 1, 2)));

        let evicted = history.add_file(&file("a.csv", ts(2021, 1, 5)));

        assert!(evicted.is_none());
        assert_eq!(history.len(), 2);
        assert_eq!(history.get("a.csv"), Some(ts(2021, 1, 5)));
        assert_eq!(history.compute_start_time(), ts(2021, 1, 2));
        assert_eq!(history.iter().count(), 2);
    }

    #[test]
    fn test_size_bound_holds_after_every_add() {
        let mut history = SyncHistory::new(4).unwrap();
        for i in 0..50u32 {
            // Revisit the same uris with shuffled timestamps
            let uri = format!("file{}.csv", (i * 7) % 11);
            let day = 1 + (i * 13) % 28;
            history.add_file(&file(&uri, ts(2021, 1, day)));

            assert!(history.len() <= history.max_size());
            assert_eq!(history.iter().count(), history.len());
            let expected_start = history.iter().map(|e| e.last_modified).min().unwrap();
            assert_eq!(history.compute_start_time(), expected_start);
        }
    }

    #[test]
    fn test_same_input_gives_same_history() {
        let run = || {
            let mut history = SyncHistory::new(3).unwrap();
            let mut evicted = Vec::new();
            for (uri, day) in [("d", 3), ("a", 1), ("c", 3), ("b", 1), ("e", 2), ("f", 1)] {
                evicted.extend(history.add_file(&file(uri, ts(2021, 1, day))));
            }
            (history.get_state(), evicted)
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_set_initial_state() {
        let mut history = SyncHistory::new(3).unwrap();
        history
            .set_initial_state(&history_map(&[
                ("file1.txt", "2023-08-01T10:11:12.000000Z"),
                ("file2.txt", "2023-08-01T10:11:12.000000Z"),
                ("file3.txt", "2023-07-31T23:59:59.999999Z"),
            ]))
            .unwrap();

        assert!(history.is_history_full());
        assert_eq!(
            history.compute_earliest_file_in_history().unwrap().uri,
            "file3.txt"
        );
        assert_eq!(
            history.cursor_value().as_deref(),
            Some("2023-08-01T10:11:12.000000Z_file2.txt")
        );
    }

    #[test]
    fn test_set_initial_state_empty() {
        let mut history = SyncHistory::new(3).unwrap();
        history.add_file(&file("a.csv", ts(2021, 1, 1)));

        history.set_initial_state(&BTreeMap::new()).unwrap();

        assert!(history.is_empty());
    }

    #[test]
    fn test_set_initial_state_invalid_timestamp() {
        let mut history = SyncHistory::new(3).unwrap();
        history.add_file(&file("a.csv", ts(2021, 1, 1)));

        let err = history
            .set_initial_state(&history_map(&[("b.csv", "2021-01-02")]))
            .unwrap_err();

        assert!(matches!(err, Error::TimestampParse { ref uri, .. } if uri == "b.csv"));
        assert_eq!(history.get("a.csv"), Some(ts(2021, 1, 1)));
    }

    #[test]
    fn test_set_initial_state_trims_oversized_history() {
        let mut history = SyncHistory::new(2).unwrap();
        history
            .set_initial_state(&history_map(&[
                ("a.csv", "2021-01-01T00:00:00.000000Z"),
                ("b.csv", "2021-01-02T00:00:00.000000Z"),
                ("c.csv", "2021-01-03T00:00:00.000000Z"),
            ]))
            .unwrap();

        assert_eq!(history.len(), 2);
        assert!(history.get("a.csv").is_none());
    }

    #[test]
    fn test_history_entry_is_after() {
        let entry = HistoryEntry::new("b.csv", ts(2021, 1, 1));
        assert!(entry.is_after(&file("a.csv", ts(2021, 1, 1))));
        assert!(entry.is_after(&file("z.csv", ts(2020, 12, 31))));
        assert!(!entry.is_after(&file("b.csv", ts(2021, 1, 1))));
        assert!(!entry.is_after(&file("c.csv", ts(2021, 1, 1))));
    }
}
