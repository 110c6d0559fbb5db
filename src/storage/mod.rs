//! Storage module
//!
//! Handles listing captures and downloaded item content.

pub mod capture;
pub mod download;

// Re-export main types
pub use capture::{CaptureStore, ROOT_CAPTURE};
pub use download::{DownloadManager, DownloadTotals};
