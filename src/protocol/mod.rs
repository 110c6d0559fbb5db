//! Gopher listing protocol module
//!
//! Implements the item model and the tab-delimited listing format.

pub mod item;
pub mod listing;

// Re-export main types
pub use item::{Item, ItemFactory, ItemKind};
pub use listing::{ItemSet, ListingParser};
