//! Query dispatch subsystem
//!
//! Consumes declarative query descriptors and invokes exactly one
//! `Collection` operation per execution.
//!
//! # Dispatch flow (strict order)
//!
//! 1. Validate the descriptor at construction
//! 2. Select the single operation by kind
//! 3. Assemble positional and option arguments from the descriptor
//! 4. Invoke the collaborator, honoring read preference for command reads
//! 5. Return the collaborator's result, or its error unmodified
//!
//! # Invariants
//!
//! - Exactly one collaborator call per `execute()`
//! - Descriptor-level options override base options on merge
//! - No retries, no error wrapping

mod errors;
mod ops;
mod parts;
#[allow(clippy::module_inception)]
mod query;
mod result;

pub use errors::{QueryError, QueryResult};
pub use ops::{GeoNearSpec, GroupSpec, MapReduceSpec, QueryKind};
pub use parts::QueryParts;
pub use query::Query;
pub use result::ExecutionResult;
