//! Listing capture store
//!
//! Persists one file per listing fetched during the crawl, so every server
//! response the traversal saw can be inspected afterwards.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tokio::fs;
use tracing::debug;

use crate::error::GopherError;

/// Capture file name for the root listing
pub const ROOT_CAPTURE: &str = "root.txt";

/// Directory of saved listing responses
#[derive(Debug, Clone)]
pub struct CaptureStore {
    dir: PathBuf,
}

impl CaptureStore {
    /// Create a store rooted at the given directory.
    ///
    /// The directory itself is created on first use, not here.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory captures are written into
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write a listing capture, overwriting any existing file of that name
    pub async fn record(&self, name: &str, lines: &[String]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).await.map_err(|e| {
            GopherError::storage_error_full(
                "Failed to create capture directory",
                self.dir.display().to_string(),
                e.to_string(),
            )
        })?;

        let path = self.dir.join(name);
        fs::write(&path, lines.join("\n")).await.map_err(|e| {
            GopherError::storage_error_full(
                "Failed to write listing capture",
                path.display().to_string(),
                e.to_string(),
            )
        })?;

        debug!("Recorded {} listing lines to {}", lines.len(), path.display());
        Ok(path)
    }
}
