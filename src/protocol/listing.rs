//! Listing parser
//!
//! Turns one raw listing response into the four-way item partition used by
//! the crawler and the download pipeline.

use std::collections::HashSet;

use tracing::warn;

use crate::protocol::item::{Item, ItemFactory, ItemKind};

/// The four-way partition of items discovered in listings.
///
/// Buckets keep insertion order; merging never deduplicates. Dedup is a
/// property of the identity rule on [`Item`], applied when a display or
/// download set is built.
#[derive(Debug, Clone, Default)]
pub struct ItemSet {
    pub text_items: Vec<Item>,
    pub binary_items: Vec<Item>,
    pub directory_items: Vec<Item>,
    pub error_items: Vec<Item>,
}

impl ItemSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether all four buckets are empty
    pub fn is_empty(&self) -> bool {
        self.text_items.is_empty()
            && self.binary_items.is_empty()
            && self.directory_items.is_empty()
            && self.error_items.is_empty()
    }

    /// Total number of items across all buckets
    pub fn len(&self) -> usize {
        self.text_items.len()
            + self.binary_items.len()
            + self.directory_items.len()
            + self.error_items.len()
    }

    /// Concatenate corresponding buckets from each set, in traversal order
    pub fn merge(&mut self, others: Vec<ItemSet>) {
        for other in others {
            self.text_items.extend(other.text_items);
            self.binary_items.extend(other.binary_items);
            self.directory_items.extend(other.directory_items);
            self.error_items.extend(other.error_items);
        }
    }

    /// Unique text items, insertion-ordered
    pub fn unique_text(&self) -> Vec<Item> {
        Self::dedup(&self.text_items)
    }

    /// Unique binary items, insertion-ordered
    pub fn unique_binaries(&self) -> Vec<Item> {
        Self::dedup(&self.binary_items)
    }

    /// Unique directory items, insertion-ordered
    pub fn unique_directories(&self) -> Vec<Item> {
        Self::dedup(&self.directory_items)
    }

    /// Directory, text and binary references that live on another host
    pub fn external_references(&self, origin_host: &str) -> Vec<Item> {
        self.directory_items
            .iter()
            .chain(self.text_items.iter())
            .chain(self.binary_items.iter())
            .filter(|item| item.is_external(origin_host))
            .cloned()
            .collect()
    }

    fn dedup(bucket: &[Item]) -> Vec<Item> {
        let mut seen = HashSet::new();
        bucket
            .iter()
            .filter(|item| seen.insert((*item).clone()))
            .cloned()
            .collect()
    }
}

/// Parser for tab-delimited listing responses
pub struct ListingParser;

impl ListingParser {
    /// Parse a listing into its item buckets.
    ///
    /// Lines whose first field starts with `i` are informational and carry no
    /// fetchable reference. Lines with fewer than four tab-delimited fields
    /// are skipped rather than aborting the whole listing. Returns `None`
    /// when no line yielded an item, signaling an empty listing.
    pub fn parse(lines: &[String], factory: &mut ItemFactory) -> Option<ItemSet> {
        let mut items = ItemSet::new();

        for line in lines {
            let fields: Vec<&str> = line.split('\t').collect();

            let Some(type_char) = fields[0].chars().next() else {
                continue;
            };
            if type_char == 'i' {
                continue;
            }
            if fields.len() < 4 {
                warn!("Skipping malformed listing line: {:?}", line);
                continue;
            }

            let item = factory.create(type_char, fields[1], fields[2], fields[3]);
            match item.kind {
                ItemKind::Text => items.text_items.push(item),
                ItemKind::Binary => items.binary_items.push(item),
                ItemKind::Directory => items.directory_items.push(item),
                ItemKind::Error => items.error_items.push(item),
            }
        }

        if items.is_empty() {
            None
        } else {
            Some(items)
        }
    }
}
