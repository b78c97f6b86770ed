use std::io;
use thiserror::Error;

/// Custom error type for schedmon
#[derive(Error, Debug)]
pub enum SchedError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Snapshot collection failed: {0}")]
    Collection(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for schedmon
pub type Result<T> = std::result::Result<T, SchedError>;

impl SchedError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SchedError::Config(msg.into())
    }

    /// Create a collection error
    pub fn collection<S: Into<String>>(msg: S) -> Self {
        SchedError::Collection(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SchedError::Other(msg.into())
    }

    /// True for failures raised by the persistence layer.
    pub fn is_persistence(&self) -> bool {
        matches!(self, SchedError::Database(_))
    }
}

/// Failure while reading a single process during enumeration.
///
/// These are expected while scanning a live process table and are always
/// skipped by the collector.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessReadError {
    #[error("process no longer exists")]
    NoSuchProcess,

    #[error("access denied")]
    AccessDenied,

    #[error("zombie process")]
    Zombie,
}
