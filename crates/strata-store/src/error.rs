//! Error types for snapshot storage.

use std::path::PathBuf;

use thiserror::Error;

/// A specialized Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while loading or storing snapshots.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing a snapshot file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The file or directory involved
        path: PathBuf,
        /// The underlying error
        #[source]
        source: std::io::Error,
    },

    /// A snapshot could not be encoded or decoded.
    #[error("Codec error for '{key}': {message}")]
    Codec {
        /// Rendered snapshot key
        key: String,
        /// Description of the failure
        message: String,
    },
}

impl StoreError {
    /// Creates an I/O error for a path.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a codec error for a snapshot key.
    #[must_use]
    pub fn codec(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Codec {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Returns true if the stored bytes were unreadable rather than missing.
    #[must_use]
    pub fn is_codec(&self) -> bool {
        matches!(self, Self::Codec { .. })
    }
}
