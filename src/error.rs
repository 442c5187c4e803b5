//! Error types for spanmerge.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for spanmerge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for spanmerge operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Input file could not be read.
    #[error("cannot read '{}': {source}", path.display())]
    SourceNotFound {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Input file was not a valid JSON task collection.
    #[error("'{}' is not valid JSON: {source}", path.display())]
    Decode {
        /// Path that failed to decode.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a source-not-found error for a path.
    pub fn source_not_found(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::SourceNotFound {
            path: path.into(),
            source,
        }
    }

    /// Create a decode error for a path.
    pub fn decode(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Error::Decode {
            path: path.into(),
            source,
        }
    }
}
