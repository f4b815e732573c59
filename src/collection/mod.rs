//! Collection collaborator seam
//!
//! Defines the external boundary of the dispatch layer: the `Collection`
//! and `Database` traits plus the value types that cross them. This crate
//! calls these interfaces but does not implement them; a driver adapter
//! (or a mock in tests) does.

mod collection;
mod errors;
mod types;

pub use collection::{Collection, Database};
pub use errors::{CollectionError, CollectionResult};
pub use types::{FindOptions, MapReduceOut, ReadPreference, WriteOutcome};
