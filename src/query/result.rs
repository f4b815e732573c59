//! Results produced by query execution

use serde_json::Value;

use crate::collection::WriteOutcome;

/// Result of executing one query descriptor
///
/// Which variant comes back is fixed by the descriptor kind: cursor-producing
/// reads yield `Cursor`, find-and-modify kinds yield `Document`, COUNT yields
/// `Count`, and write kinds yield `Write`.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionResult {
    /// Documents (or distinct values) from a cursor-producing read
    Cursor(Vec<Value>),
    /// Zero-or-one document from a find-and-modify operation
    Document(Option<Value>),
    /// Number of matching documents
    Count(u64),
    /// Acknowledgement of a write
    Write(WriteOutcome),
}

impl ExecutionResult {
    /// Borrows the cursor documents, if this result has any
    pub fn documents(&self) -> Option<&[Value]> {
        match self {
            ExecutionResult::Cursor(docs) => Some(docs),
            _ => None,
        }
    }

    /// Consumes the result into cursor documents, if this result has any
    pub fn into_documents(self) -> Option<Vec<Value>> {
        match self {
            ExecutionResult::Cursor(docs) => Some(docs),
            _ => None,
        }
    }

    /// Returns the count for a COUNT result
    pub fn count(&self) -> Option<u64> {
        match self {
            ExecutionResult::Count(count) => Some(*count),
            _ => None,
        }
    }
}
