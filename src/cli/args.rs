//! CLI arguments module
//!
//! Defines command-line argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the gopher crawler
#[derive(Debug, Parser)]
#[command(name = "rust-gopher-crawler")]
#[command(about = "A recursive Gopher (RFC 1436) crawler and downloader", long_about = None)]
pub struct CliArgs {
    /// Server to crawl: a hostname or a gopher://host:port URL
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Server port (ignored when TARGET is a URL carrying its own port)
    #[arg(short, long, default_value_t = 70)]
    pub port: u16,

    /// Directory for downloaded item content
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Directory for saved listing captures
    #[arg(long, value_name = "DIR")]
    pub captures_dir: Option<PathBuf>,

    /// Write a JSON crawl summary into the output directory
    #[arg(long)]
    pub summary: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode (no output except errors)
    #[arg(short, long)]
    pub quiet: bool,
}

impl CliArgs {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Get the log level based on verbosity settings
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::ERROR
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(target: &str) -> CliArgs {
        CliArgs {
            target: target.to_string(),
            port: 70,
            output_dir: None,
            captures_dir: None,
            summary: false,
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn test_default_values() {
        let args = args("gopher.example.org");
        assert_eq!(args.port, 70);
        assert!(args.output_dir.is_none());
        assert!(args.captures_dir.is_none());
        assert!(!args.summary);
    }

    #[test]
    fn test_log_level() {
        let mut args = args("gopher.example.org");
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
