//! Remote file record type

use crate::error::{Error, Result};
use crate::types::{format_timestamp, normalize_timestamp, Timestamp};
use serde::{Serialize, Serializer};

/// File type reported when the extension is missing or unrecognised
pub const UNKNOWN_FILE_TYPE: &str = "unknown";

const KNOWN_FILE_TYPES: &[&str] = &[
    "avro", "csv", "json", "jsonl", "parquet", "tsv", "txt", "xlsx", "xml",
];

/// A file discovered on a remote store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteFileRecord {
    uri: String,
    #[serde(serialize_with = "serialize_timestamp")]
    last_modified: Timestamp,
    file_type: String,
}

fn serialize_timestamp<S: Serializer>(
    ts: &Timestamp,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(ts))
}

impl RemoteFileRecord {
    /// Create a new record
    ///
    /// `last_modified` is truncated to microseconds so it compares equal to
    /// its persisted form.
    pub fn new(
        uri: impl Into<String>,
        last_modified: Timestamp,
        file_type: impl Into<String>,
    ) -> Result<Self> {
        let uri = uri.into();
        if uri.is_empty() {
            return Err(Error::invalid_argument("uri", "must not be empty"));
        }

        Ok(Self {
            uri,
            last_modified: normalize_timestamp(last_modified),
            file_type: file_type.into(),
        })
    }

    /// Create a record, inferring the file type from the URI extension
    pub fn from_uri(uri: impl Into<String>, last_modified: Timestamp) -> Result<Self> {
        let uri = uri.into();
        let file_type = infer_file_type(&uri);
        Self::new(uri, last_modified, file_type)
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn last_modified(&self) -> Timestamp {
        self.last_modified
    }

    pub fn file_type(&self) -> &str {
        &self.file_type
    }

    /// Key used for ordering files: timestamp first, then URI
    pub fn sort_key(&self) -> (Timestamp, &str) {
        (self.last_modified, self.uri.as_str())
    }
}

/// Order a listing the way files are processed during a sync
///
/// Oldest first, equal timestamps ordered by URI.
pub fn sort_for_sync(files: &mut [RemoteFileRecord]) {
    files.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}

fn infer_file_type(uri: &str) -> String {
    let name = uri.rsplit('/').next().unwrap_or(uri);
    // "data.csv.gz" is still a csv file
    let name = name
        .strip_suffix(".gz")
        .or_else(|| name.strip_suffix(".zst"))
        .unwrap_or(name);

    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| KNOWN_FILE_TYPES.contains(&ext.as_str()))
        .unwrap_or_else(|| UNKNOWN_FILE_TYPE.to_string())
}
