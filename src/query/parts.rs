//! Query parts: the declarative descriptor consumed by the dispatcher
//!
//! A descriptor carries a discriminant kind, shared fields (filter, cursor
//! shaping, write payload), and one kind-specific sub-structure. It is
//! constructed immutable by the caller, either through the builder methods
//! here or by parsing a raw JSON mapping with [`QueryParts::from_value`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::collection::ReadPreference;

use super::errors::{QueryError, QueryResult};
use super::ops::{GeoNearSpec, GroupSpec, MapReduceSpec, QueryKind};

/// Declarative description of one database operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParts {
    /// Operation kind discriminant
    #[serde(rename = "type")]
    pub kind: QueryKind,

    /// Filter document applied to the operation
    #[serde(default = "empty_filter")]
    pub query: Value,

    /// Field projection for cursor-producing reads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<Value>,

    /// Sort document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Value>,

    /// Maximum number of results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,

    /// Number of results to skip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,

    /// Replacement or update document for write kinds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_obj: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upsert: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple: Option<bool>,

    /// Return the post-update document from find-and-update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new: Option<bool>,

    /// Read preference for command-style reads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_preference: Option<ReadPreference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_reduce: Option<MapReduceSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_near: Option<GeoNearSpec>,

    /// Field name for a distinct query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distinct: Option<String>,
}

fn empty_filter() -> Value {
    Value::Object(Map::new())
}

impl QueryParts {
    /// Creates an empty descriptor of the given kind
    pub fn new(kind: QueryKind) -> Self {
        Self {
            kind,
            query: empty_filter(),
            select: None,
            sort: None,
            limit: None,
            skip: None,
            new_obj: None,
            upsert: None,
            multiple: None,
            new: None,
            read_preference: None,
            group: None,
            map_reduce: None,
            geo_near: None,
            distinct: None,
        }
    }

    /// Parses a raw JSON descriptor mapping
    ///
    /// The `type` field may be a numeric wire code or a snake_case name;
    /// anything else is rejected as an invalid type before the rest of the
    /// descriptor is considered.
    pub fn from_value(value: Value) -> QueryResult<Self> {
        let kind = match value.get("type") {
            Some(Value::Number(n)) => n.as_i64().and_then(QueryKind::from_code),
            Some(Value::String(name)) => QueryKind::from_name(name),
            _ => None,
        };
        if kind.is_none() {
            let shown = value
                .get("type")
                .map_or_else(|| "(none)".to_string(), |v| v.to_string());
            return Err(QueryError::InvalidType(shown));
        }
        serde_json::from_value(value).map_err(|e| QueryError::Malformed(e.to_string()))
    }

    /// Sets the filter document
    pub fn with_filter(mut self, filter: Value) -> Self {
        self.query = filter;
        self
    }

    /// Sets the field projection
    pub fn with_select(mut self, select: Value) -> Self {
        self.select = Some(select);
        self
    }

    /// Sets the sort document
    pub fn with_sort(mut self, sort: Value) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Sets the result limit
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the number of results to skip
    pub fn with_skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Sets the write payload
    pub fn with_new_obj(mut self, new_obj: Value) -> Self {
        self.new_obj = Some(new_obj);
        self
    }

    pub fn with_upsert(mut self, upsert: bool) -> Self {
        self.upsert = Some(upsert);
        self
    }

    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = Some(multiple);
        self
    }

    pub fn with_new(mut self, new: bool) -> Self {
        self.new = Some(new);
        self
    }

    pub fn with_read_preference(mut self, preference: ReadPreference) -> Self {
        self.read_preference = Some(preference);
        self
    }

    pub fn with_group(mut self, group: GroupSpec) -> Self {
        self.group = Some(group);
        self
    }

    pub fn with_map_reduce(mut self, map_reduce: MapReduceSpec) -> Self {
        self.map_reduce = Some(map_reduce);
        self
    }

    pub fn with_geo_near(mut self, geo_near: GeoNearSpec) -> Self {
        self.geo_near = Some(geo_near);
        self
    }

    pub fn with_distinct(mut self, field: impl Into<String>) -> Self {
        self.distinct = Some(field.into());
        self
    }

    /// Returns true if the filter matches every document
    pub fn filter_is_empty(&self) -> bool {
        match &self.query {
            Value::Object(map) => map.is_empty(),
            Value::Null => true,
            _ => false,
        }
    }
}
