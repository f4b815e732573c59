//! Collection collaborator error types
//!
//! These errors are raised only by `Collection` and `Database`
//! implementations. The dispatcher never constructs one; it passes them
//! through `execute()` unmodified.

use thiserror::Error;

/// Failure reported by a collection or database implementation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// A database command failed server-side
    #[error("command failed: {0}")]
    CommandFailed(String),

    /// Cursor iteration failed mid-stream
    #[error("cursor failed: {0}")]
    CursorFailed(String),

    /// A write was rejected by the server
    #[error("write failed (code {code}): {message}")]
    WriteFailed { code: i32, message: String },

    /// The connection to the server was lost
    #[error("connection lost: {0}")]
    ConnectionLost(String),
}

/// Result type for collection operations
pub type CollectionResult<T> = Result<T, CollectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_failed_display() {
        let err = CollectionError::WriteFailed {
            code: 11000,
            message: "duplicate key".to_string(),
        };
        assert_eq!(err.to_string(), "write failed (code 11000): duplicate key");
    }

    #[test]
    fn test_command_failed_display() {
        let err = CollectionError::CommandFailed("ns not found".to_string());
        assert_eq!(err.to_string(), "command failed: ns not found");
    }
}
