//! Error types and handling infrastructure for clientdesk.
//!
//! Library code returns [`ClientsError`] through the crate-wide [`Result`] alias;
//! the binary layers `anyhow` context on top.
//!
//! "Not found" is never an error here: lookups that miss return `None`.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for clientdesk operations.
#[derive(Error, Debug)]
pub enum ClientsError {
    /// Snapshot or settings file could not be read or written
    #[error("Storage operation failed: {message}")]
    StorageError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot content could not be encoded or decoded
    #[error("Snapshot format error: {0}")]
    SnapshotFormat(#[from] serde_json::Error),

    /// A directory query failed (transient; callers may retry)
    #[error("Directory query failed: {message}")]
    DirectoryError { message: String },

    /// Settings file is malformed
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Configuration file path does not exist
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Invalid command line arguments or input values
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

/// Standard Result type for clientdesk operations.
pub type Result<T> = std::result::Result<T, ClientsError>;

impl ClientsError {
    /// Create a StorageError from an io::Error with additional context
    pub fn storage(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::StorageError {
            message: message.into(),
            source,
        }
    }

    /// Create a DirectoryError with a descriptive message
    pub fn directory(message: impl Into<String>) -> Self {
        Self::DirectoryError {
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an InvalidArgument error with a descriptive message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ClientsError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::StorageError {
                message: "File not found".to_string(),
                source: err,
            },
            std::io::ErrorKind::PermissionDenied => Self::StorageError {
                message: "Permission denied".to_string(),
                source: err,
            },
            _ => Self::StorageError {
                message: "IO operation failed".to_string(),
                source: err,
            },
        }
    }
}
