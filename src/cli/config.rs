//! CLI configuration module
//!
//! Resolves parsed arguments into a validated crawl configuration.

use std::path::PathBuf;

use anyhow::Result;
use url::Url;

use crate::cli::args::CliArgs;
use crate::error::GopherError;

/// Configuration for one crawl run
#[derive(Debug, Clone)]
pub struct Config {
    /// Origin host the crawl is restricted to
    pub host: String,
    /// Origin port
    pub port: u16,
    /// Directory for downloaded item content
    pub output_dir: PathBuf,
    /// Directory for saved listing captures
    pub captures_dir: PathBuf,
    /// Write a JSON crawl summary
    pub summary: bool,
    /// Verbose output
    pub verbose: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Config {
    /// Create configuration from CLI arguments.
    ///
    /// The target may be a bare hostname or a `gopher://host:port` URL; a
    /// port in the URL overrides `--port`.
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        let (host, port) = Self::resolve_target(&args.target, args.port)?;

        let output_dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("./downloads"));
        let captures_dir = args
            .captures_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("./captures"));

        Ok(Self {
            host,
            port,
            output_dir,
            captures_dir,
            summary: args.summary,
            verbose: args.verbose,
            quiet: args.quiet,
        })
    }

    fn resolve_target(target: &str, default_port: u16) -> Result<(String, u16)> {
        if !target.contains("://") {
            return Ok((target.to_string(), default_port));
        }

        let url = Url::parse(target).map_err(|e| {
            GopherError::config_error_with_field(
                format!("Invalid target URL: {}", e),
                "target",
            )
        })?;

        if url.scheme() != "gopher" {
            return Err(GopherError::config_error_with_field(
                format!("Unsupported URL scheme: {}", url.scheme()),
                "target",
            )
            .into());
        }

        let host = url
            .host_str()
            .ok_or_else(|| {
                GopherError::config_error_with_field("Target URL has no host", "target")
            })?
            .to_string();

        Ok((host, url.port().unwrap_or(default_port)))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(anyhow::anyhow!("host cannot be empty"));
        }

        if self.port == 0 {
            return Err(anyhow::anyhow!("port cannot be 0"));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("output_dir cannot be empty"));
        }

        if self.captures_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("captures_dir cannot be empty"));
        }

        Ok(())
    }

    /// The origin address as `host:port`
    pub fn origin_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.quiet
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
    fn test_config_from_hostname() {
        let config = Config::from_args(&args("gopher.example.org")).unwrap();

        assert_eq!(config.host, "gopher.example.org");
        assert_eq!(config.port, 70);
        assert_eq!(config.output_dir, PathBuf::from("./downloads"));
        assert_eq!(config.captures_dir, PathBuf::from("./captures"));
        assert_eq!(config.origin_addr(), "gopher.example.org:70");
    }

    #[test]
    fn test_config_from_url_with_port() {
        let config = Config::from_args(&args("gopher://gopher.example.org:7070")).unwrap();

        assert_eq!(config.host, "gopher.example.org");
        assert_eq!(config.port, 7070);
    }

    #[test]
    fn test_config_from_url_without_port_uses_flag() {
        let mut cli = args("gopher://gopher.example.org");
        cli.port = 7071;
        let config = Config::from_args(&cli).unwrap();

        assert_eq!(config.port, 7071);
    }

    #[test]
    fn test_config_rejects_non_gopher_scheme() {
        assert!(Config::from_args(&args("http://example.org")).is_err());
    }

    #[test]
    fn test_config_explicit_directories() {
        let mut cli = args("gopher.example.org");
        cli.output_dir = Some(PathBuf::from("/tmp/items"));
        cli.captures_dir = Some(PathBuf::from("/tmp/listings"));
        let config = Config::from_args(&cli).unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/items"));
        assert_eq!(config.captures_dir, PathBuf::from("/tmp/listings"));
    }

    #[test]
    fn test_validate_rejects_port_zero() {
        let mut cli = args("gopher.example.org");
        cli.port = 0;
        let config = Config::from_args(&cli).unwrap();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        let config = Config::from_args(&args("gopher.example.org")).unwrap();
        assert!(config.validate().is_ok());
    }
}
