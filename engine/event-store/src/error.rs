//! Error types for the event store

use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while loading or storing events
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing errors in raw game records
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Store key that cannot be used as a file name
    #[error("Invalid store key: {0}")]
    InvalidKey(String),

    /// Nothing stored under the key
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// File exists but does not have the expected layout
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

impl StoreError {
    /// Create a new invalid key error
    pub fn invalid_key(msg: impl Into<String>) -> Self {
        Self::InvalidKey(msg.into())
    }

    /// Create a new not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new invalid format error
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }
}
