//! Navigation data error types.

use std::path::PathBuf;

use crate::codec::Format;

/// Error returned when navigation data cannot be loaded or written.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// Data does not match the fixed label/target/children shape.
    #[error("Malformed navigation data: {0}")]
    Malformed(String),
    /// I/O error reading or writing a file.
    #[error("I/O error for {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// File extension does not map to a known format.
    #[error("Cannot infer navigation format from {}", .0.display())]
    UnknownFormat(PathBuf),
    /// Serializer failure.
    #[error("Failed to encode navigation data as {format}: {message}")]
    Encode {
        /// Requested output format.
        format: Format,
        /// Serializer message.
        message: String,
    },
}

impl NavError {
    pub(crate) fn malformed(format: Format, message: impl std::fmt::Display) -> Self {
        Self::Malformed(format!("{format}: {message}"))
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
