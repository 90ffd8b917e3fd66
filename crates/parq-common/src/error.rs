//! Error types for parq.

use thiserror::Error;

/// Result type alias for parq operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for parq.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a valid Parquet file
    #[error("Invalid file: {0}")]
    InvalidFile(String),

    /// Thrift compact protocol errors
    #[error("Thrift error: {0}")]
    Thrift(String),

    /// Schema errors
    #[error("Schema error: {0}")]
    Schema(String),

    /// Valid Parquet features this implementation does not handle
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),

    /// Other errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
