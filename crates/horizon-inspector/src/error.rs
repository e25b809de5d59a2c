//! Error types for the inspector engine.

use std::path::PathBuf;

/// Result type alias for inspector operations.
pub type Result<T> = std::result::Result<T, InspectorError>;

/// Errors that can occur while binding records to a grid.
#[derive(Debug, thiserror::Error)]
pub enum InspectorError {
    /// The record kind has no enumerable instances. Not fatal: the grid shows
    /// an empty table.
    #[error("No records of kind '{kind}' were found")]
    EmptyEnumeration { kind: String },

    /// A typed read that does not match the column's value.
    #[error("Column {column} cannot be read as {expected} (found {found})")]
    InvalidAccess {
        column: usize,
        expected: &'static str,
        found: String,
    },

    /// Bad column declaration, empty search string, or an out-of-range
    /// row, column or record index.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A row id built against an earlier record set.
    #[error("Row {id} belongs to generation {generation}, the record set is at {current}")]
    StaleRowReference { id: usize, generation: u64, current: u64 },

    /// The backing store rejected a committed edit.
    #[error("Failed to commit record '{key}': {message}")]
    Commit { key: String, message: String },

    /// Configuration could not be parsed or serialized.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file I/O error.
    #[error("Failed to access configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl InspectorError {
    /// Create an empty-enumeration notice.
    pub fn empty(kind: impl Into<String>) -> Self {
        Self::EmptyEnumeration { kind: kind.into() }
    }

    /// Create a typed access error.
    pub fn invalid_access(column: usize, expected: &'static str, found: impl Into<String>) -> Self {
        Self::InvalidAccess {
            column,
            expected,
            found: found.into(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a commit error.
    pub fn commit(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Commit {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors that leave the grid usable.
    pub fn is_notice(&self) -> bool {
        matches!(self, Self::EmptyEnumeration { .. })
    }
}
