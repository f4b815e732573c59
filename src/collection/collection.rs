//! Collaborator traits for the dispatch layer
//!
//! The dispatcher calls exactly one of these operations per execution. The
//! traits are implemented by driver adapters (or by mocks in tests); this
//! crate only defines the seam.

use serde_json::{Map, Value};

use super::errors::CollectionResult;
use super::types::{FindOptions, MapReduceOut, ReadPreference, WriteOutcome};

/// A collection-like collaborator exposing the operations the dispatcher
/// translates descriptors into.
///
/// Options maps are assembled by the dispatcher; implementations receive
/// them verbatim and must not assume any particular key set.
pub trait Collection {
    /// Name of the underlying collection
    fn name(&self) -> &str;

    /// Returns documents matching `filter`, shaped by `options`
    fn find(&mut self, filter: &Value, options: &FindOptions) -> CollectionResult<Vec<Value>>;

    /// Atomically updates one matching document, returning it
    fn find_and_update(
        &mut self,
        filter: &Value,
        new_obj: &Value,
        options: &Map<String, Value>,
    ) -> CollectionResult<Option<Value>>;

    /// Atomically removes one matching document, returning it
    fn find_and_remove(
        &mut self,
        filter: &Value,
        options: &Map<String, Value>,
    ) -> CollectionResult<Option<Value>>;

    /// Inserts a document
    fn insert(
        &mut self,
        document: &Value,
        options: &Map<String, Value>,
    ) -> CollectionResult<WriteOutcome>;

    /// Updates documents matching `filter` with `new_obj`
    fn update(
        &mut self,
        filter: &Value,
        new_obj: &Value,
        options: &Map<String, Value>,
    ) -> CollectionResult<WriteOutcome>;

    /// Removes documents matching `filter`
    fn remove(
        &mut self,
        filter: &Value,
        options: &Map<String, Value>,
    ) -> CollectionResult<WriteOutcome>;

    /// Runs a group command
    fn group(
        &mut self,
        keys: &Value,
        initial: &Value,
        reduce: &str,
        options: &Map<String, Value>,
    ) -> CollectionResult<Vec<Value>>;

    /// Runs a map-reduce command
    fn map_reduce(
        &mut self,
        map: &str,
        reduce: &str,
        out: &MapReduceOut,
        filter: &Value,
        options: &Map<String, Value>,
    ) -> CollectionResult<Vec<Value>>;

    /// Runs a geoNear command
    fn geo_near(
        &mut self,
        near: &Value,
        filter: &Value,
        options: &Map<String, Value>,
    ) -> CollectionResult<Vec<Value>>;

    /// Returns distinct values of `field` among documents matching `filter`
    fn distinct(
        &mut self,
        field: &str,
        filter: &Value,
        options: &Map<String, Value>,
    ) -> CollectionResult<Vec<Value>>;

    /// Counts documents matching `filter`
    fn count(&mut self, filter: &Value, options: &Map<String, Value>) -> CollectionResult<u64>;
}

/// Database-level collaborator handle
///
/// The dispatcher only uses this to swap the read preference around
/// command-style reads and restore it afterwards.
pub trait Database {
    /// Name of the database
    fn name(&self) -> &str;

    /// Current database-level read preference
    fn read_preference(&self) -> ReadPreference;

    /// Replaces the database-level read preference
    fn set_read_preference(&mut self, preference: ReadPreference);
}
