//! Query dispatcher
//!
//! Translates a declarative descriptor into exactly one call on the
//! `Collection` collaborator, with correctly assembled positional and
//! option arguments.
//!
//! Dispatch rules:
//! 1. The descriptor is validated at construction; execution never sees an
//!    incomplete descriptor.
//! 2. Option maps are merged base-first: descriptor-level options override
//!    the base options supplied at construction.
//! 3. Command-style reads run under the descriptor's read preference, with
//!    the database-level preference restored afterwards.
//! 4. Collaborator errors propagate unmodified. No retries.

use serde_json::{Map, Value};

use crate::collection::{Collection, Database, FindOptions, MapReduceOut, ReadPreference};
use crate::observability::{Logger, Severity};

use super::errors::{QueryError, QueryResult};
use super::ops::{GeoNearSpec, GroupSpec, MapReduceSpec, QueryKind};
use super::parts::QueryParts;
use super::result::ExecutionResult;

/// Executes one declarative query against a collection
///
/// A dispatcher is constructed per execution and discarded after
/// [`execute`](Query::execute) returns. It holds no state beyond the
/// descriptor and the collaborator handles.
pub struct Query<'a, D: Database, C: Collection> {
    database: &'a mut D,
    collection: &'a mut C,
    parts: QueryParts,
    options: Map<String, Value>,
}

impl<'a, D: Database, C: Collection> Query<'a, D, C> {
    /// Creates a dispatcher, rejecting descriptors whose kind-specific part
    /// is missing
    pub fn new(
        database: &'a mut D,
        collection: &'a mut C,
        parts: QueryParts,
        options: Map<String, Value>,
    ) -> QueryResult<Self> {
        validate(&parts)?;
        Ok(Self {
            database,
            collection,
            parts,
            options,
        })
    }

    /// Executes the query, invoking exactly one collection operation
    ///
    /// Returns the collaborator's result, or its error unmodified. Failures
    /// are logged to stderr before propagating.
    pub fn execute(&mut self) -> QueryResult<ExecutionResult> {
        Logger::log(
            Severity::Trace,
            "query_execute",
            &[
                ("collection", self.collection.name()),
                ("op", self.parts.kind.as_str()),
            ],
        );

        let result = match self.parts.kind {
            QueryKind::Find => self.execute_find(),
            QueryKind::FindAndUpdate => self.execute_find_and_update(),
            QueryKind::FindAndRemove => self.execute_find_and_remove(),
            QueryKind::Insert => self.execute_insert(),
            QueryKind::Update => self.execute_update(),
            QueryKind::Remove => self.execute_remove(),
            QueryKind::Group => self.execute_group(),
            QueryKind::MapReduce => self.execute_map_reduce(),
            QueryKind::Distinct => self.execute_distinct(),
            QueryKind::GeoNear => self.execute_geo_near(),
            QueryKind::Count => self.execute_count(),
        };

        if let Err(error) = &result {
            let message = error.to_string();
            Logger::log_stderr(
                Severity::Error,
                "query_failed",
                &[
                    ("collection", self.collection.name()),
                    ("error", message.as_str()),
                    ("op", self.parts.kind.as_str()),
                ],
            );
        }
        result
    }

    /// Executes and returns the resulting documents
    ///
    /// Kinds that do not produce a cursor are rejected with
    /// [`QueryError::NotIterable`] before any collaborator call; a write
    /// descriptor is never executed by mistake.
    pub fn iterate(&mut self) -> QueryResult<Vec<Value>> {
        if !self.parts.kind.yields_cursor() {
            return Err(QueryError::NotIterable(self.parts.kind.as_str()));
        }
        let result = self.execute()?;
        result
            .into_documents()
            .ok_or(QueryError::NotIterable(self.parts.kind.as_str()))
    }

    fn execute_find(&mut self) -> QueryResult<ExecutionResult> {
        let options = FindOptions {
            select: self.parts.select.clone(),
            sort: self.parts.sort.clone(),
            limit: self.parts.limit,
            skip: self.parts.skip,
            read_preference: self.parts.read_preference,
        };
        let docs = self.collection.find(&self.parts.query, &options)?;
        Ok(ExecutionResult::Cursor(docs))
    }

    fn execute_find_and_update(&mut self) -> QueryResult<ExecutionResult> {
        let new_obj = self.required_new_obj()?;
        let options = self.merge_options(self.shared_options(&["new", "select", "sort", "upsert"]));
        let doc = self
            .collection
            .find_and_update(&self.parts.query, &new_obj, &options)?;
        Ok(ExecutionResult::Document(doc))
    }

    fn execute_find_and_remove(&mut self) -> QueryResult<ExecutionResult> {
        let options = self.merge_options(self.shared_options(&["select", "sort"]));
        let doc = self.collection.find_and_remove(&self.parts.query, &options)?;
        Ok(ExecutionResult::Document(doc))
    }

    fn execute_insert(&mut self) -> QueryResult<ExecutionResult> {
        let new_obj = self.required_new_obj()?;
        let options = self.options.clone();
        let outcome = self.collection.insert(&new_obj, &options)?;
        Ok(ExecutionResult::Write(outcome))
    }

    fn execute_update(&mut self) -> QueryResult<ExecutionResult> {
        let new_obj = self.required_new_obj()?;
        let options = self.merge_options(self.shared_options(&["multiple", "upsert"]));
        let outcome = self
            .collection
            .update(&self.parts.query, &new_obj, &options)?;
        Ok(ExecutionResult::Write(outcome))
    }

    fn execute_remove(&mut self) -> QueryResult<ExecutionResult> {
        let options = self.options.clone();
        let outcome = self.collection.remove(&self.parts.query, &options)?;
        Ok(ExecutionResult::Write(outcome))
    }

    fn execute_group(&mut self) -> QueryResult<ExecutionResult> {
        let spec = self.required_group()?;
        let mut group_options = spec.options.clone();
        // An empty filter matches everything; only a real filter becomes cond.
        if !self.parts.filter_is_empty() {
            group_options.insert("cond".to_string(), self.parts.query.clone());
        }
        let options = self.merge_options(group_options);

        let previous = self.apply_read_preference();
        let result = self
            .collection
            .group(&spec.keys, &spec.initial, &spec.reduce, &options);
        self.restore_read_preference(previous);

        Ok(ExecutionResult::Cursor(result?))
    }

    fn execute_map_reduce(&mut self) -> QueryResult<ExecutionResult> {
        let spec = self.required_map_reduce()?;
        let out = spec.out.clone().unwrap_or_else(MapReduceOut::inline);
        // Options are forwarded verbatim; the dispatcher does not validate keys.
        let options = self.merge_options(spec.options.clone());

        let previous = self.apply_read_preference();
        let result = self.collection.map_reduce(
            &spec.map,
            &spec.reduce,
            &out,
            &self.parts.query,
            &options,
        );
        self.restore_read_preference(previous);

        Ok(ExecutionResult::Cursor(result?))
    }

    fn execute_distinct(&mut self) -> QueryResult<ExecutionResult> {
        let field = self
            .parts
            .distinct
            .clone()
            .ok_or_else(|| missing(self.parts.kind, "distinct"))?;
        let options = self.options.clone();

        let previous = self.apply_read_preference();
        let result = self.collection.distinct(&field, &self.parts.query, &options);
        self.restore_read_preference(previous);

        Ok(ExecutionResult::Cursor(result?))
    }

    fn execute_geo_near(&mut self) -> QueryResult<ExecutionResult> {
        let spec = self.required_geo_near()?;
        let mut geo_options = Map::new();
        if let Some(multiplier) = spec.distance_multiplier {
            geo_options.insert("distanceMultiplier".to_string(), Value::from(multiplier));
        }
        if let Some(distance) = spec.max_distance {
            geo_options.insert("maxDistance".to_string(), Value::from(distance));
        }
        if let Some(spherical) = spec.spherical {
            geo_options.insert("spherical".to_string(), Value::Bool(spherical));
        }
        if let Some(limit) = self.parts.limit {
            geo_options.insert("num".to_string(), Value::from(limit));
        }
        let options = self.merge_options(geo_options);

        let previous = self.apply_read_preference();
        let result = self
            .collection
            .geo_near(&spec.near, &self.parts.query, &options);
        self.restore_read_preference(previous);

        Ok(ExecutionResult::Cursor(result?))
    }

    fn execute_count(&mut self) -> QueryResult<ExecutionResult> {
        let options = self.merge_options(self.shared_options(&["limit", "skip"]));

        let previous = self.apply_read_preference();
        let result = self.collection.count(&self.parts.query, &options);
        self.restore_read_preference(previous);

        Ok(ExecutionResult::Count(result?))
    }

    /// Collects the named shared descriptor fields into an options map
    fn shared_options(&self, keys: &[&str]) -> Map<String, Value> {
        let mut options = Map::new();
        for &key in keys {
            let value = match key {
                "select" => self.parts.select.clone(),
                "sort" => self.parts.sort.clone(),
                "limit" => self.parts.limit.map(Value::from),
                "skip" => self.parts.skip.map(Value::from),
                "upsert" => self.parts.upsert.map(Value::Bool),
                "multiple" => self.parts.multiple.map(Value::Bool),
                "new" => self.parts.new.map(Value::Bool),
                _ => None,
            };
            if let Some(value) = value {
                options.insert(key.to_string(), value);
            }
        }
        options
    }

    /// Merges descriptor-level options over the base options
    fn merge_options(&self, extra: Map<String, Value>) -> Map<String, Value> {
        let mut merged = self.options.clone();
        merged.extend(extra);
        merged
    }

    /// Swaps the descriptor's read preference in, returning the previous
    /// database-level preference for restoration
    ///
    /// Only command-style reads swap at the database handle; find reads
    /// carry their preference at the cursor level.
    fn apply_read_preference(&mut self) -> Option<ReadPreference> {
        if !self.parts.kind.is_command_read() {
            return None;
        }
        let preference = self.parts.read_preference?;
        let previous = self.database.read_preference();
        self.database.set_read_preference(preference);
        Some(previous)
    }

    fn restore_read_preference(&mut self, previous: Option<ReadPreference>) {
        if let Some(previous) = previous {
            self.database.set_read_preference(previous);
        }
    }

    fn required_new_obj(&self) -> QueryResult<Value> {
        self.parts
            .new_obj
            .clone()
            .ok_or_else(|| missing(self.parts.kind, "newObj"))
    }

    fn required_group(&self) -> QueryResult<GroupSpec> {
        self.parts
            .group
            .clone()
            .ok_or_else(|| missing(self.parts.kind, "group"))
    }

    fn required_map_reduce(&self) -> QueryResult<MapReduceSpec> {
        self.parts
            .map_reduce
            .clone()
            .ok_or_else(|| missing(self.parts.kind, "mapReduce"))
    }

    fn required_geo_near(&self) -> QueryResult<GeoNearSpec> {
        self.parts
            .geo_near
            .clone()
            .ok_or_else(|| missing(self.parts.kind, "geoNear"))
    }
}

/// Rejects descriptors whose kind-specific part is missing
fn validate(parts: &QueryParts) -> QueryResult<()> {
    match parts.kind {
        QueryKind::Group if parts.group.is_none() => Err(missing(parts.kind, "group")),
        QueryKind::MapReduce if parts.map_reduce.is_none() => {
            Err(missing(parts.kind, "mapReduce"))
        }
        QueryKind::GeoNear if parts.geo_near.is_none() => Err(missing(parts.kind, "geoNear")),
        QueryKind::Distinct if parts.distinct.is_none() => Err(missing(parts.kind, "distinct")),
        QueryKind::Insert | QueryKind::Update | QueryKind::FindAndUpdate
            if parts.new_obj.is_none() =>
        {
            Err(missing(parts.kind, "newObj"))
        }
        _ => Ok(()),
    }
}

fn missing(kind: QueryKind, part: &'static str) -> QueryError {
    QueryError::MissingPart {
        kind: kind.as_str(),
        part,
    }
}
