//! Download pipeline module
//!
//! Persists each unique text and binary item discovered by the crawl to its
//! own flat file, recording the realized byte count on the item.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::error::GopherError;
use crate::protocol::{Item, ItemSet};
use crate::session::GopherSession;

/// Totals for one download pass
#[derive(Debug, Clone, Copy, Default)]
pub struct DownloadTotals {
    /// Unique items persisted
    pub files: usize,
    /// Bytes written across all files
    pub bytes: u64,
    /// Items skipped because their listing line carried an unusable port
    pub skipped: usize,
}

/// Downloads the unique text and binary items of an aggregate [`ItemSet`].
///
/// Directory and error items are reporting-only and never downloaded. Each
/// item is fetched from its own host and port, one connection at a time.
#[derive(Debug, Clone)]
pub struct DownloadManager {
    output_dir: PathBuf,
}

impl DownloadManager {
    /// Create a manager writing into the given directory
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// The directory downloaded content is written into
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Download every unique text and binary item, once per identity.
    ///
    /// The realized size is recorded on the first occurrence of each item in
    /// its bucket. A transport failure aborts the pass and propagates.
    pub async fn download_all(&self, items: &mut ItemSet) -> Result<DownloadTotals> {
        let mut totals = DownloadTotals::default();
        let mut seen: HashSet<Item> = HashSet::new();

        for index in 0..items.text_items.len() {
            if !seen.insert(items.text_items[index].clone()) {
                continue;
            }
            match self.download_item(&items.text_items[index]).await? {
                Some(written) => {
                    items.text_items[index].size_in_bytes = written;
                    totals.files += 1;
                    totals.bytes += written;
                }
                None => totals.skipped += 1,
            }
        }

        for index in 0..items.binary_items.len() {
            if !seen.insert(items.binary_items[index].clone()) {
                continue;
            }
            match self.download_item(&items.binary_items[index]).await? {
                Some(written) => {
                    items.binary_items[index].size_in_bytes = written;
                    totals.files += 1;
                    totals.bytes += written;
                }
                None => totals.skipped += 1,
            }
        }

        info!(
            "Downloaded {} files ({} bytes), skipped {}",
            totals.files, totals.bytes, totals.skipped
        );
        Ok(totals)
    }

    /// Fetch one item into its deterministic output file.
    ///
    /// Returns `Ok(None)` when the item's port string cannot name a TCP port,
    /// mirroring the skip policy for malformed listing lines.
    async fn download_item(&self, item: &Item) -> Result<Option<u64>> {
        let port: u16 = match item.port.trim().parse() {
            Ok(port) => port,
            Err(_) => {
                warn!("Skipping {}: unusable port {:?}", item.selector, item.port);
                return Ok(None);
            }
        };

        fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            GopherError::storage_error_full(
                "Failed to create download directory",
                self.output_dir.display().to_string(),
                e.to_string(),
            )
        })?;

        let path = self.output_dir.join(item.file_name());
        let mut file = fs::File::create(&path).await.map_err(|e| {
            GopherError::storage_error_full(
                "Failed to create output file",
                path.display().to_string(),
                e.to_string(),
            )
        })?;

        let session = GopherSession::new(item.host.clone(), port);
        let written = session.download(&item.selector, &item.raw_type, &mut file).await?;
        file.flush().await.map_err(GopherError::from)?;

        debug!("Wrote {} bytes to {}", written, path.display());
        Ok(Some(written))
    }
}
