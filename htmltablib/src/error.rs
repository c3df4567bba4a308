//! Error types for htmltablib

use thiserror::Error;

/// Error returned by a formatter for a (row, column) pair it cannot project.
///
/// A formatter failure is recoverable: the renderer reports it to the
/// diagnostic sink and emits an empty cell in that position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FormatError {
    message: String,
}

impl FormatError {
    /// Create a format error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for FormatError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for FormatError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
