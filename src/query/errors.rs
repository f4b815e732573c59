//! Query dispatch error types
//!
//! Descriptor problems are rejected at construction time and are not
//! recoverable. Collaborator failures pass through unmodified.

use thiserror::Error;

use crate::collection::CollectionError;

/// Errors surfaced by the query dispatcher
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// Descriptor kind is not one of the recognized operation kinds
    #[error("invalid query type: {0}")]
    InvalidType(String),

    /// Descriptor is missing a part required by its kind
    #[error("{kind} query requires the `{part}` part")]
    MissingPart {
        kind: &'static str,
        part: &'static str,
    },

    /// Descriptor could not be parsed
    #[error("malformed query descriptor: {0}")]
    Malformed(String),

    /// Executing this kind does not produce a document cursor
    #[error("{0} query does not produce a document cursor")]
    NotIterable(&'static str),

    /// Collaborator failure, passed through unmodified
    #[error(transparent)]
    Collection(#[from] CollectionError),
}

/// Result type for query dispatch operations
pub type QueryResult<T> = Result<T, QueryError>;
