//! Error types for store operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing stored data.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to read from the file system.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write to the file system.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a directory.
    #[error("failed to create directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize data to JSON.
    #[error("failed to serialize: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A filename escapes the store directory or is otherwise unusable.
    #[error("invalid filename: {0}")]
    InvalidName(String),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
