//! Error types for GSD file operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading GSD files.
#[derive(Debug, Error)]
pub enum GsdError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Structurally invalid GSD file.
    #[error("invalid GSD file: {message}")]
    InvalidFormat { message: String },

    /// Item descriptor carries an unknown type code.
    #[error("item {number} has invalid type code {code}")]
    InvalidType { number: usize, code: i16 },

    /// Dimension reference of an array item cannot be resolved.
    #[error("item {number}, axis {axis}: {message}")]
    InvalidDimension {
        number: usize,
        axis: usize,
        message: String,
    },

    /// A decode request does not fit in the available bytes.
    #[error("buffer underrun at offset {offset}: need {needed} bytes, {available} available")]
    BufferUnderrun {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// No item with the requested name.
    #[error("item {name} is not present in the file")]
    NotFound { name: String },

    /// Item number outside 1..=count.
    #[error("item number {number} is outside the file limits of 1 and {count}")]
    OutOfRange { number: usize, count: usize },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for GSD operations.
pub type Result<T> = std::result::Result<T, GsdError>;

impl GsdError {
    /// Create an InvalidFormat error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Create an InvalidDimension error.
    pub fn invalid_dimension(number: usize, axis: usize, message: impl Into<String>) -> Self {
        Self::InvalidDimension {
            number,
            axis,
            message: message.into(),
        }
    }

    /// Create a NotFound error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Create a BufferUnderrun error.
    pub fn underrun(offset: usize, needed: usize, available: usize) -> Self {
        Self::BufferUnderrun {
            offset,
            needed,
            available,
        }
    }

    /// Whether this error means the file structure is inconsistent.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidFormat { .. } | Self::InvalidType { .. } | Self::InvalidDimension { .. }
        )
    }

    /// Whether this error came from the filesystem.
    #[must_use]
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::FileNotFound { .. } | Self::Io(_))
    }
}
