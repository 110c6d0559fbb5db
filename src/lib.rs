//! rust-gopher-crawler
//!
//! A recursive Gopher (RFC 1436) crawler and downloader with loop detection
//! and host-boundary enforcement.

pub mod cli;
pub mod crawler;
pub mod error;
pub mod protocol;
pub mod session;
pub mod storage;

pub use error::GopherError;

pub use cli::{CliArgs, Config, CrawlReport};
pub use crawler::Crawler;
pub use protocol::{Item, ItemFactory, ItemKind, ItemSet, ListingParser};
pub use session::{copy_raw, copy_terminated, is_raw_type, GopherSession, TERMINATOR_LEN};
pub use storage::{CaptureStore, DownloadManager, DownloadTotals, ROOT_CAPTURE};
