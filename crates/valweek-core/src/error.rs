//! Core error types for valweek-core.
//!
//! Missing or corrupt persisted data is deliberately *not* an error anywhere
//! in this crate (it loads as empty/default state); these types cover the
//! failures that must surface to the caller, such as photo store I/O and
//! card encoding.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for valweek-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Store-related errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Promise-card rendering errors
    #[error("Card error: {0}")]
    Card(#[from] CardError),

    /// Unknown day key in user input
    #[error("Unknown day key: {0}")]
    UnknownDay(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Store-specific errors (photo database, progress file writes).
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the photo database
    #[error("Failed to open photo store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Photo store is locked")]
    Locked,

    /// Failed to persist a file-backed store
    #[error("Failed to write {path}: {message}")]
    WriteFailed { path: PathBuf, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Promise-card rendering errors.
#[derive(Error, Debug)]
pub enum CardError {
    /// Pledge index outside the configured list
    #[error("No pledge with index {0}")]
    UnknownPledge(usize),

    /// PNG encode/write failed
    #[error("Failed to write card: {0}")]
    EncodeFailed(String),

    /// Malformed signature stroke data
    #[error("Failed to parse signature strokes: {0}")]
    BadSignature(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StoreError::Locked
                } else {
                    StoreError::QueryFailed(err.to_string())
                }
            }
            _ => StoreError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
