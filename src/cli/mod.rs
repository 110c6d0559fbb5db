//! CLI module
//!
//! Command-line interface for the gopher crawler.

pub mod args;
pub mod config;
pub mod report;

pub use args::CliArgs;
pub use config::Config;
pub use report::CrawlReport;
