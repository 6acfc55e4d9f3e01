//! Error types for the store subsystem

use thiserror::Error;

/// Errors that can occur while loading or saving the state file
#[derive(Debug, Error)]
pub enum StoreError {
    /// Storage I/O error
    #[error("Storage error: {0}")]
    Storage(String),

    /// State file could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
