//! State error types.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for state operations.
pub type StateResult<T> = Result<T, StateError>;

/// Errors that can occur while comparing or persisting snapshots.
///
/// A missing record is not an error: it is reported as `before: None`.
#[derive(Debug, Error)]
pub enum StateError {
    /// Key is empty or has no characters left after normalization.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Reading, parsing, or writing a record failed.
    #[error("Storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: StorageCause,
    },
}

/// Underlying cause of a [`StateError::Storage`].
#[derive(Debug, Error)]
pub enum StorageCause {
    /// IO error (permission denied, disk full, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record exists but is not valid JSON.
    #[error("corrupted record: {0}")]
    Parse(#[from] serde_json::Error),
}

impl StateError {
    /// Create an invalid key error.
    pub fn invalid_key(message: impl Into<String>) -> Self {
        Self::InvalidKey(message.into())
    }

    /// Create a storage error from an IO failure at `path`.
    pub fn io(path: &Path, err: std::io::Error) -> Self {
        Self::Storage {
            path: path.to_path_buf(),
            source: StorageCause::Io(err),
        }
    }

    /// Create a storage error for a record that failed to parse.
    pub fn parse(path: &Path, err: serde_json::Error) -> Self {
        Self::Storage {
            path: path.to_path_buf(),
            source: StorageCause::Parse(err),
        }
    }

    pub fn is_invalid_key(&self) -> bool {
        matches!(self, Self::InvalidKey(_))
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }
}
