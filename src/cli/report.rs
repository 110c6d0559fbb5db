//! Crawl report module
//!
//! Summarizes the aggregate item set after the download pass: totals,
//! unique counts, external and invalid references.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use tokio::fs;

use crate::error::GopherError;
use crate::protocol::{Item, ItemSet};

/// Summary of one finished crawl
#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlReport {
    /// Origin host the crawl was restricted to
    pub origin_host: String,
    /// All text references seen, including repeats
    pub text_total: usize,
    /// All binary references seen, including repeats
    pub binary_total: usize,
    /// All directory references seen, including repeats
    pub directory_total: usize,
    /// Error (invalid) references seen
    pub invalid_references: usize,
    /// References whose host differs from the origin
    pub external_references: usize,
    /// Unique text items with realized sizes
    pub unique_text: Vec<Item>,
    /// Unique binary items with realized sizes
    pub unique_binaries: Vec<Item>,
    /// Unique directory items
    pub unique_directories: Vec<Item>,
}

impl CrawlReport {
    /// Build a report from the aggregate item set.
    ///
    /// Run this after the download pass so the unique item lines carry their
    /// realized sizes.
    pub fn from_items(items: &ItemSet, origin_host: &str) -> Self {
        Self {
            origin_host: origin_host.to_string(),
            text_total: items.text_items.len(),
            binary_total: items.binary_items.len(),
            directory_total: items.directory_items.len(),
            invalid_references: items.error_items.len(),
            external_references: items.external_references(origin_host).len(),
            unique_text: items.unique_text(),
            unique_binaries: items.unique_binaries(),
            unique_directories: items.unique_directories(),
        }
    }

    /// Total bytes realized across unique text and binary items
    pub fn downloaded_bytes(&self) -> u64 {
        self.unique_text
            .iter()
            .chain(self.unique_binaries.iter())
            .map(|item| item.size_in_bytes)
            .sum()
    }

    /// Print the human-readable summary
    pub fn print(&self) {
        println!();
        println!("Crawl summary for {}:", self.origin_host);
        println!();

        println!("Text files: {} unique of {} references", self.unique_text.len(), self.text_total);
        for item in &self.unique_text {
            println!("  {}", item);
        }
        println!();

        println!(
            "Binary files: {} unique of {} references",
            self.unique_binaries.len(),
            self.binary_total
        );
        for item in &self.unique_binaries {
            println!("  {}", item);
        }
        println!();

        println!(
            "Directories: {} unique of {} references",
            self.unique_directories.len(),
            self.directory_total
        );
        for item in &self.unique_directories {
            println!("  {}", item);
        }
        println!();

        println!("Invalid references: {}", self.invalid_references);
        println!("External references: {}", self.external_references);
        println!("Downloaded: {}", Self::format_bytes(self.downloaded_bytes()));
    }

    /// Persist the summary as JSON, overwriting any existing file
    pub async fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec_pretty(self).map_err(|e| {
            GopherError::storage_error_full(
                "Failed to serialize crawl summary",
                path.display().to_string(),
                e.to_string(),
            )
        })?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(GopherError::from)?;
        }
        fs::write(path, json).await.map_err(|e| {
            GopherError::storage_error_full(
                "Failed to write crawl summary",
                path.display().to_string(),
                e.to_string(),
            )
        })?;

        Ok(())
    }

    /// Format bytes to human readable string
    pub fn format_bytes(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        format!("{:.2} {}", size, UNITS[unit_index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ItemFactory;

    fn sample_items() -> ItemSet {
        let mut factory = ItemFactory::new();
        let mut items = ItemSet::new();

        let mut text = factory.create('0', "t1", "example.org", "70");
        text.size_in_bytes = 100;
        items.text_items.push(text);
        items.text_items.push(factory.create('0', "t1", "example.org", "70"));
        items.binary_items.push(factory.create('9', "b1", "example.org", "70"));
        items.directory_items.push(factory.create('1', "d1", "example.org", "70"));
        items.directory_items.push(factory.create('1', "d2", "other.example", "70"));
        items.error_items.push(factory.create('3', "gone", "example.org", "70"));

        items
    }

    #[test]
    fn test_report_counts() {
        let report = CrawlReport::from_items(&sample_items(), "example.org");

        assert_eq!(report.text_total, 2);
        assert_eq!(report.unique_text.len(), 1);
        assert_eq!(report.binary_total, 1);
        assert_eq!(report.unique_binaries.len(), 1);
        assert_eq!(report.directory_total, 2);
        assert_eq!(report.unique_directories.len(), 2);
        assert_eq!(report.invalid_references, 1);
        assert_eq!(report.external_references, 1);
    }

    #[test]
    fn test_report_keeps_realized_sizes() {
        let report = CrawlReport::from_items(&sample_items(), "example.org");

        assert_eq!(report.unique_text[0].size_in_bytes, 100);
        assert_eq!(report.downloaded_bytes(), 100);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(CrawlReport::format_bytes(0), "0.00 B");
        assert_eq!(CrawlReport::format_bytes(1023), "1023.00 B");
        assert_eq!(CrawlReport::format_bytes(1024), "1.00 KB");
        assert_eq!(CrawlReport::format_bytes(1536), "1.50 KB");
        assert_eq!(CrawlReport::format_bytes(1048576), "1.00 MB");
    }

    #[tokio::test]
    async fn test_write_json() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("summary.json");

        let report = CrawlReport::from_items(&sample_items(), "example.org");
        report.write_json(&path).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed["origin_host"], "example.org");
        assert_eq!(parsed["text_total"], 2);
        assert_eq!(parsed["unique_text"][0]["selector"], "t1");
        assert_eq!(parsed["unique_text"][0]["kind"], "text");
    }
}
