//! Item model
//!
//! Represents a single reference discovered in a gopher listing, classified
//! from its protocol type character.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

/// Coarse classification of a listing reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Plain text file (type code '0')
    Text,
    /// Anything without special handling collapses here
    Binary,
    /// A sub-listing that can be traversed (type code '1')
    Directory,
    /// A server-reported error reference (type code '3')
    Error,
}

impl ItemKind {
    /// Classify a protocol type character.
    ///
    /// Only '0', '1' and '3' carry special handling; every other character,
    /// digit or not, is treated as a binary payload.
    pub fn from_type_char(type_char: char) -> Self {
        match type_char {
            '0' => ItemKind::Text,
            '1' => ItemKind::Directory,
            '3' => ItemKind::Error,
            _ => ItemKind::Binary,
        }
    }

    /// File extension used when persisting an item of this kind
    pub fn extension(&self) -> &'static str {
        match self {
            ItemKind::Text => "txt",
            _ => "bin",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemKind::Text => "text",
            ItemKind::Binary => "binary",
            ItemKind::Directory => "directory",
            ItemKind::Error => "error",
        };
        write!(f, "{}", name)
    }
}

/// A single reference discovered in a listing.
///
/// Two items are the same reference iff their `(kind, selector, host, port,
/// raw_type)` tuples match; `id` and `size_in_bytes` are excluded from
/// equality so the same logical reference deduplicates across listings.
#[derive(Debug, Clone, Serialize)]
pub struct Item {
    /// Process-local sequential identifier, used only for output file names
    pub id: u32,
    /// Coarse classification derived from the raw type code
    pub kind: ItemKind,
    /// The protocol type character as received, preserved verbatim
    pub raw_type: String,
    /// Opaque path string used to re-request this item
    pub selector: String,
    /// Origin host as given in the listing line
    pub host: String,
    /// Origin port as given in the listing line, kept as a string
    pub port: String,
    /// Realized byte count, populated after a successful download
    pub size_in_bytes: u64,
}

impl Item {
    /// Detect a self-referential directory selector, e.g. `a/b/a`.
    ///
    /// Splits the selector on `/` (ignoring a trailing separator); a
    /// directory whose final segment equals any earlier segment links back
    /// into one of its own ancestors. Non-directories are never loops.
    pub fn is_loop(&self) -> bool {
        if self.kind != ItemKind::Directory {
            return false;
        }

        let segments: Vec<&str> = self.selector.split_terminator('/').collect();
        if segments.len() < 2 {
            return false;
        }
        let last = segments[segments.len() - 1];
        segments[..segments.len() - 1].iter().any(|s| *s == last)
    }

    /// Whether this item lives on a different host than the crawl origin
    pub fn is_external(&self, origin_host: &str) -> bool {
        self.host != origin_host
    }

    /// Deterministic file name for this item's downloaded content
    pub fn file_name(&self) -> String {
        format!("{}{}.{}", self.kind, self.id, self.kind.extension())
    }

    /// File name under which this item's listing capture is saved
    pub fn capture_name(&self) -> String {
        format!("{}{}.txt", self.kind, self.id)
    }

    fn identity(&self) -> (ItemKind, &str, &str, &str, &str) {
        (self.kind, &self.selector, &self.host, &self.port, &self.raw_type)
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} #{} (raw type {}, {} bytes) selector {:?} on {}:{}",
            self.kind, self.id, self.raw_type, self.size_in_bytes, self.selector, self.host, self.port
        )
    }
}

/// Constructs items, owning the sequential id counter.
///
/// Identifier uniqueness is only required within one run, so the counter is
/// explicit state here rather than a process-wide global.
#[derive(Debug, Default)]
pub struct ItemFactory {
    next_id: u32,
}

impl ItemFactory {
    /// Create a new factory starting at id 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a type character and construct the item it describes
    pub fn create(
        &mut self,
        type_char: char,
        selector: impl Into<String>,
        host: impl Into<String>,
        port: impl Into<String>,
    ) -> Item {
        let id = self.next_id;
        self.next_id += 1;

        Item {
            id,
            kind: ItemKind::from_type_char(type_char),
            raw_type: type_char.to_string(),
            selector: selector.into(),
            host: host.into(),
            port: port.into(),
            size_in_bytes: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn item(kind_char: char, selector: &str) -> Item {
        ItemFactory::new().create(kind_char, selector, "example.org", "70")
    }

    #[test]
    fn test_classify_type_chars() {
        assert_eq!(ItemKind::from_type_char('0'), ItemKind::Text);
        assert_eq!(ItemKind::from_type_char('1'), ItemKind::Directory);
        assert_eq!(ItemKind::from_type_char('3'), ItemKind::Error);
        assert_eq!(ItemKind::from_type_char('5'), ItemKind::Binary);
        assert_eq!(ItemKind::from_type_char('9'), ItemKind::Binary);
        assert_eq!(ItemKind::from_type_char('g'), ItemKind::Binary);
    }

    #[test]
    fn test_raw_type_preserved() {
        let binary = item('5', "/archive");
        assert_eq!(binary.kind, ItemKind::Binary);
        assert_eq!(binary.raw_type, "5");
    }

    #[test]
    fn test_sequential_ids() {
        let mut factory = ItemFactory::new();
        let a = factory.create('0', "/a", "example.org", "70");
        let b = factory.create('0', "/b", "example.org", "70");
        assert_eq!(a.id, 0);
        assert_eq!(b.id, 1);
    }

    #[test]
    fn test_equality_ignores_id_and_size() {
        let mut factory = ItemFactory::new();
        let a = factory.create('1', "/menu", "example.org", "70");
        let mut b = factory.create('1', "/menu", "example.org", "70");
        b.size_in_bytes = 42;

        assert_ne!(a.id, b.id);
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_distinguishes_identity_fields() {
        let mut factory = ItemFactory::new();
        let base = factory.create('1', "/menu", "example.org", "70");
        let other_selector = factory.create('1', "/other", "example.org", "70");
        let other_host = factory.create('1', "/menu", "elsewhere.org", "70");
        let other_port = factory.create('1', "/menu", "example.org", "7070");
        let other_kind = factory.create('0', "/menu", "example.org", "70");

        assert_ne!(base, other_selector);
        assert_ne!(base, other_host);
        assert_ne!(base, other_port);
        assert_ne!(base, other_kind);
    }

    #[test]
    fn test_hash_consistent_with_equality() {
        let mut factory = ItemFactory::new();
        let mut set = HashSet::new();
        set.insert(factory.create('1', "/menu", "example.org", "70"));
        set.insert(factory.create('1', "/menu", "example.org", "70"));
        set.insert(factory.create('1', "/other", "example.org", "70"));

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_loop_detected() {
        assert!(item('1', "a/b/a").is_loop());
        assert!(item('1', "d1/d1").is_loop());
        assert!(item('1', "d1/d1/").is_loop());
    }

    #[test]
    fn test_no_loop_for_distinct_segments() {
        assert!(!item('1', "a/b/c").is_loop());
        assert!(!item('1', "/menu").is_loop());
        assert!(!item('1', "menu").is_loop());
        assert!(!item('1', "").is_loop());
    }

    #[test]
    fn test_non_directories_are_never_loops() {
        assert!(!item('0', "a/b/a").is_loop());
        assert!(!item('9', "a/b/a").is_loop());
    }

    #[test]
    fn test_is_external() {
        let reference = item('1', "/menu");
        assert!(!reference.is_external("example.org"));
        assert!(reference.is_external("other.example"));
    }

    #[test]
    fn test_file_names() {
        let mut factory = ItemFactory::new();
        let text = factory.create('0', "/readme", "example.org", "70");
        let binary = factory.create('9', "/blob", "example.org", "70");

        assert_eq!(text.file_name(), "text0.txt");
        assert_eq!(binary.file_name(), "binary1.bin");
        assert_eq!(binary.capture_name(), "binary1.txt");
    }
}
