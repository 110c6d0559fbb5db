//! Error types for the gopher crawler
//!
//! This module defines the error types used across the crawl, transport,
//! and download components.

use std::fmt;

/// Comprehensive error type for crawler operations
#[derive(Debug, Clone)]
pub enum GopherError {
    /// Failure to open or write to a connection
    ConnectionError {
        message: String,
        address: Option<String>,
        source: Option<String>,
    },

    /// Read/write failure mid-transfer
    IoError {
        message: String,
        source: Option<String>,
    },

    /// Listing or response parsing errors
    ParseError {
        message: String,
        source: Option<String>,
    },

    /// File and directory errors on the local side
    StorageError {
        message: String,
        path: Option<String>,
        source: Option<String>,
    },

    /// Configuration errors
    ConfigError {
        message: String,
        field: Option<String>,
    },
}

impl GopherError {
    /// Create a new ConnectionError
    pub fn connection_error(message: impl Into<String>) -> Self {
        GopherError::ConnectionError {
            message: message.into(),
            address: None,
            source: None,
        }
    }

    /// Create a new ConnectionError with the peer address
    pub fn connection_error_with_address(message: impl Into<String>, address: impl Into<String>) -> Self {
        GopherError::ConnectionError {
            message: message.into(),
            address: Some(address.into()),
            source: None,
        }
    }

    /// Create a new ConnectionError with address and source
    pub fn connection_error_full(message: impl Into<String>, address: impl Into<String>, source: impl Into<String>) -> Self {
        GopherError::ConnectionError {
            message: message.into(),
            address: Some(address.into()),
            source: Some(source.into()),
        }
    }

    /// Create a new IoError
    pub fn io_error(message: impl Into<String>) -> Self {
        GopherError::IoError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new IoError with source
    pub fn io_error_with_source(message: impl Into<String>, source: impl Into<String>) -> Self {
        GopherError::IoError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new ParseError
    pub fn parse_error(message: impl Into<String>) -> Self {
        GopherError::ParseError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new ParseError with source
    pub fn parse_error_with_source(message: impl Into<String>, source: impl Into<String>) -> Self {
        GopherError::ParseError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new StorageError
    pub fn storage_error(message: impl Into<String>) -> Self {
        GopherError::StorageError {
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Create a new StorageError with path
    pub fn storage_error_with_path(message: impl Into<String>, path: impl Into<String>) -> Self {
        GopherError::StorageError {
            message: message.into(),
            path: Some(path.into()),
            source: None,
        }
    }

    /// Create a new StorageError with path and source
    pub fn storage_error_full(message: impl Into<String>, path: impl Into<String>, source: impl Into<String>) -> Self {
        GopherError::StorageError {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source.into()),
        }
    }

    /// Create a new ConfigError
    pub fn config_error(message: impl Into<String>) -> Self {
        GopherError::ConfigError {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new ConfigError with field
    pub fn config_error_with_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        GopherError::ConfigError {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

impl fmt::Display for GopherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GopherError::ConnectionError { message, address, source } => {
                match (address, source) {
                    (Some(a), Some(s)) => write!(f, "Connection error: {} (address: {}, source: {})", message, a, s),
                    (Some(a), None) => write!(f, "Connection error: {} (address: {})", message, a),
                    (None, Some(s)) => write!(f, "Connection error: {} (source: {})", message, s),
                    (None, None) => write!(f, "Connection error: {}", message),
                }
            }
            GopherError::IoError { message, source } => {
                if let Some(src) = source {
                    write!(f, "I/O error: {} (source: {})", message, src)
                } else {
                    write!(f, "I/O error: {}", message)
                }
            }
            GopherError::ParseError { message, source } => {
                if let Some(src) = source {
                    write!(f, "Parse error: {} (source: {})", message, src)
                } else {
                    write!(f, "Parse error: {}", message)
                }
            }
            GopherError::StorageError { message, path, source } => {
                match (path, source) {
                    (Some(p), Some(s)) => write!(f, "Storage error: {} (path: {}, source: {})", message, p, s),
                    (Some(p), None) => write!(f, "Storage error: {} (path: {})", message, p),
                    (None, Some(s)) => write!(f, "Storage error: {} (source: {})", message, s),
                    (None, None) => write!(f, "Storage error: {}", message),
                }
            }
            GopherError::ConfigError { message, field } => {
                if let Some(field_val) = field {
                    write!(f, "Config error: {} (field: {})", message, field_val)
                } else {
                    write!(f, "Config error: {}", message)
                }
            }
        }
    }
}

impl std::error::Error for GopherError {}

impl From<std::io::Error> for GopherError {
    fn from(err: std::io::Error) -> Self {
        GopherError::io_error_with_source(err.to_string(), err.kind().to_string())
    }
}
