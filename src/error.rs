//! Centralized error types for emlinks.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the emlinks library.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error with the associated file or directory path.
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The specified file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// The parser could not make sense of the file as an RFC 5322 message.
    #[error("File does not appear to be a valid email message: {0}")]
    InvalidMessage(PathBuf),

    /// Writing the report failed.
    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),

    /// Serializing the JSON report failed.
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an `Io` variant from a path and an `io::Error`.
    ///
    /// `NotFound` is reported as [`Error::FileNotFound`].
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound(path)
        } else {
            Self::Io { path, source }
        }
    }
}
