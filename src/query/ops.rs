//! Operation kinds and kind-specific descriptor sub-structures

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::collection::MapReduceOut;

/// Enumerated query operation kinds
///
/// Each kind maps to exactly one `Collection` operation. The numeric wire
/// codes are stable; serde accepts either the code or the snake_case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "KindRepr", into = "String")]
pub enum QueryKind {
    Find,
    FindAndUpdate,
    FindAndRemove,
    Insert,
    Update,
    Remove,
    Group,
    MapReduce,
    Distinct,
    GeoNear,
    Count,
}

impl QueryKind {
    /// Numeric wire code for this kind
    pub const fn code(&self) -> i64 {
        match self {
            QueryKind::Find => 1,
            QueryKind::FindAndUpdate => 2,
            QueryKind::FindAndRemove => 3,
            QueryKind::Insert => 4,
            QueryKind::Update => 5,
            QueryKind::Remove => 6,
            QueryKind::Group => 7,
            QueryKind::MapReduce => 8,
            QueryKind::Distinct => 9,
            QueryKind::GeoNear => 10,
            QueryKind::Count => 11,
        }
    }

    /// Returns the snake_case name
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::Find => "find",
            QueryKind::FindAndUpdate => "find_and_update",
            QueryKind::FindAndRemove => "find_and_remove",
            QueryKind::Insert => "insert",
            QueryKind::Update => "update",
            QueryKind::Remove => "remove",
            QueryKind::Group => "group",
            QueryKind::MapReduce => "map_reduce",
            QueryKind::Distinct => "distinct",
            QueryKind::GeoNear => "geo_near",
            QueryKind::Count => "count",
        }
    }

    /// Resolves a numeric wire code, rejecting unrecognized codes
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(QueryKind::Find),
            2 => Some(QueryKind::FindAndUpdate),
            3 => Some(QueryKind::FindAndRemove),
            4 => Some(QueryKind::Insert),
            5 => Some(QueryKind::Update),
            6 => Some(QueryKind::Remove),
            7 => Some(QueryKind::Group),
            8 => Some(QueryKind::MapReduce),
            9 => Some(QueryKind::Distinct),
            10 => Some(QueryKind::GeoNear),
            11 => Some(QueryKind::Count),
            _ => None,
        }
    }

    /// Resolves a snake_case name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "find" => Some(QueryKind::Find),
            "find_and_update" => Some(QueryKind::FindAndUpdate),
            "find_and_remove" => Some(QueryKind::FindAndRemove),
            "insert" => Some(QueryKind::Insert),
            "update" => Some(QueryKind::Update),
            "remove" => Some(QueryKind::Remove),
            "group" => Some(QueryKind::Group),
            "map_reduce" => Some(QueryKind::MapReduce),
            "distinct" => Some(QueryKind::Distinct),
            "geo_near" => Some(QueryKind::GeoNear),
            "count" => Some(QueryKind::Count),
            _ => None,
        }
    }

    /// Returns true for command-style reads executed under the database
    /// read preference
    pub fn is_command_read(&self) -> bool {
        matches!(
            self,
            QueryKind::Group
                | QueryKind::MapReduce
                | QueryKind::Distinct
                | QueryKind::GeoNear
                | QueryKind::Count
        )
    }

    /// Returns true if executing this kind yields a document cursor
    pub fn yields_cursor(&self) -> bool {
        matches!(
            self,
            QueryKind::Find
                | QueryKind::Group
                | QueryKind::MapReduce
                | QueryKind::Distinct
                | QueryKind::GeoNear
        )
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<QueryKind> for String {
    fn from(kind: QueryKind) -> String {
        kind.as_str().to_string()
    }
}

/// Wire representation accepted for a kind: numeric code or name
#[derive(Deserialize)]
#[serde(untagged)]
enum KindRepr {
    Code(i64),
    Name(String),
}

impl TryFrom<KindRepr> for QueryKind {
    type Error = String;

    fn try_from(repr: KindRepr) -> Result<Self, String> {
        match repr {
            KindRepr::Code(code) => {
                QueryKind::from_code(code).ok_or_else(|| format!("invalid query type: {}", code))
            }
            KindRepr::Name(name) => {
                QueryKind::from_name(&name).ok_or_else(|| format!("invalid query type: {}", name))
            }
        }
    }
}

/// Parameters for a group operation
///
/// `options` is forwarded to the collection after the dispatcher merges in
/// `cond` from the descriptor's top-level filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSpec {
    pub keys: Value,
    pub initial: Value,
    pub reduce: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,
}

impl GroupSpec {
    pub fn new(keys: Value, initial: Value, reduce: impl Into<String>) -> Self {
        Self {
            keys,
            initial,
            reduce: reduce.into(),
            options: Map::new(),
        }
    }

    /// Adds an arbitrary group option
    pub fn with_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    /// Sets the finalize function text as a group option
    pub fn with_finalize(self, finalize: impl Into<String>) -> Self {
        self.with_option("finalize", Value::String(finalize.into()))
    }
}

/// Parameters for a map-reduce operation
///
/// Options are passed through verbatim; no key filtering or validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapReduceSpec {
    pub map: String,
    pub reduce: String,
    /// Output target; a missing target means inline results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out: Option<MapReduceOut>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,
}

impl MapReduceSpec {
    pub fn new(map: impl Into<String>, reduce: impl Into<String>) -> Self {
        Self {
            map: map.into(),
            reduce: reduce.into(),
            out: None,
            options: Map::new(),
        }
    }

    pub fn with_out(mut self, out: MapReduceOut) -> Self {
        self.out = Some(out);
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }
}

/// Parameters for a geoNear operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoNearSpec {
    /// Point to search near, e.g. `[50, 50]`
    pub near: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spherical: Option<bool>,
}

impl GeoNearSpec {
    pub fn new(near: Value) -> Self {
        Self {
            near,
            distance_multiplier: None,
            max_distance: None,
            spherical: None,
        }
    }

    pub fn with_distance_multiplier(mut self, multiplier: f64) -> Self {
        self.distance_multiplier = Some(multiplier);
        self
    }

    pub fn with_max_distance(mut self, distance: f64) -> Self {
        self.max_distance = Some(distance);
        self
    }

    pub fn with_spherical(mut self, spherical: bool) -> Self {
        self.spherical = Some(spherical);
        self
    }
}
