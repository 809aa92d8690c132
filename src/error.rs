//! Error types for spillkv
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using SpillError
pub type Result<T> = std::result::Result<T, SpillError>;

/// Unified error type for spillkv operations
#[derive(Debug, Error)]
pub enum SpillError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O failure on a partition's backing file
    #[error("IO error on {}: {source}", .path.display())]
    PartitionIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Argument Errors
    // -------------------------------------------------------------------------
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl SpillError {
    /// Wrap an I/O error with the path of the file it happened on
    pub(crate) fn partition_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SpillError::PartitionIo {
            path: path.into(),
            source,
        }
    }

    /// True for both flavours of I/O failure
    pub fn is_io(&self) -> bool {
        matches!(self, SpillError::Io(_) | SpillError::PartitionIo { .. })
    }
}
