//! Object store backed file source (S3, R2, GCS, Azure, local disk)

use super::{FileLister, GlobMatcher};
use crate::error::{Error, Result, ResultExt};
use crate::file::{sort_for_sync, RemoteFileRecord};
use crate::types::Timestamp;
use async_trait::async_trait;
use futures::TryStreamExt;
use object_store::aws::AmazonS3Builder;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::sync::Arc;
use tracing::debug;

/// A bucket, container or directory files are listed from
#[derive(Debug, Clone)]
pub struct FileSource {
    store: Arc<dyn ObjectStore>,
    /// Key prefix within the bucket/container
    prefix: String,
    /// URL scheme, for logging
    scheme: String,
}

impl FileSource {
    /// Parse a source URL and create the matching object store
    ///
    /// Supported formats:
    /// - `s3://bucket/path/` - AWS S3
    /// - `r2://bucket/path/` - Cloudflare R2 (S3-compatible)
    /// - `gs://bucket/path/` - Google Cloud Storage
    /// - `az://container/path/` - Azure Blob Storage
    /// - `/local/path/`, `./path/` or `file:///path/` - Local filesystem
    ///
    /// Credentials are read from the environment.
    pub fn parse(url: &str) -> Result<Self> {
        if let Some(rest) = url.strip_prefix("s3://") {
            Self::parse_s3(rest, url, "s3")
        } else if let Some(rest) = url.strip_prefix("r2://") {
            Self::parse_s3(rest, url, "r2")
        } else if let Some(rest) = url.strip_prefix("gs://") {
            let (bucket, prefix) = split_bucket(rest, url)?;
            let store = GoogleCloudStorageBuilder::from_env()
                .with_bucket_name(bucket)
                .build()
                .context("Failed to create GCS client")?;
            Ok(Self::from_store(Arc::new(store), prefix, "gs"))
        } else if let Some(rest) = url.strip_prefix("az://") {
            let (container, prefix) = split_bucket(rest, url)?;
            let store = MicrosoftAzureBuilder::from_env()
                .with_container_name(container)
                .build()
                .context("Failed to create Azure client")?;
            Ok(Self::from_store(Arc::new(store), prefix, "az"))
        } else {
            Self::parse_local(url.strip_prefix("file://").unwrap_or(url))
        }
    }

    /// Wrap an existing object store
    pub fn from_store(
        store: Arc<dyn ObjectStore>,
        prefix: impl Into<String>,
        scheme: impl Into<String>,
    ) -> Self {
        Self {
            store,
            prefix: prefix.into().trim_matches('/').to_string(),
            scheme: scheme.into(),
        }
    }

    fn parse_s3(rest: &str, url: &str, scheme: &str) -> Result<Self> {
        let (bucket, prefix) = split_bucket(rest, url)?;
        let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);

        // R2 endpoint: https://<account_id>.r2.cloudflarestorage.com
        if scheme == "r2" {
            if let Ok(endpoint) = std::env::var("R2_ENDPOINT_URL") {
                builder = builder.with_endpoint(endpoint);
            }
        }

        let store = builder
            .build()
            .with_context(|| format!("Failed to create {scheme} client"))?;
        Ok(Self::from_store(Arc::new(store), prefix, scheme))
    }

    fn parse_local(path: &str) -> Result<Self> {
        if !std::path::Path::new(path).is_dir() {
            return Err(Error::config(format!(
                "Source directory does not exist: {path}"
            )));
        }

        let store = LocalFileSystem::new_with_prefix(path)
            .with_context(|| format!("Failed to open local source {path}"))?;
        Ok(Self::from_store(Arc::new(store), "", "file"))
    }

    /// Get the scheme (s3, r2, gs, az, file)
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Check if this is a cloud source (not local)
    pub fn is_cloud(&self) -> bool {
        self.scheme != "file"
    }
}

#[async_trait]
impl FileLister for FileSource {
    async fn list_files(
        &self,
        globs: &GlobMatcher,
        start_time: Timestamp,
    ) -> Result<Vec<RemoteFileRecord>> {
        let prefix = (!self.prefix.is_empty()).then(|| ObjectPath::from(self.prefix.as_str()));

        let mut files = Vec::new();
        let mut listing = self.store.list(prefix.as_ref());
        while let Some(meta) = listing.try_next().await? {
            let uri = meta.location.to_string();
            if !globs.is_match(&uri) {
                continue;
            }
            let record = RemoteFileRecord::from_uri(uri, meta.last_modified)?;
            if record.last_modified() < start_time {
                continue;
            }
            files.push(record);
        }

        sort_for_sync(&mut files);
        debug!(scheme = %self.scheme, count = files.len(), "Listed files");
        Ok(files)
    }
}

/// Split `bucket/prefix/...` into bucket and prefix
fn split_bucket<'a>(rest: &'a str, url: &str) -> Result<(&'a str, String)> {
    let (bucket, prefix) = match rest.split_once('/') {
        Some((bucket, prefix)) => (bucket, prefix.to_string()),
        None => (rest, String::new()),
    };
    if bucket.is_empty() {
        return Err(Error::config(format!("Missing bucket name in URL: {url}")));
    }
    Ok((bucket, prefix))
}
