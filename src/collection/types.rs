//! Shared types at the collection seam
//!
//! These are the value types that cross the boundary between the dispatcher
//! and a `Collection`/`Database` implementation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Read preference for command-style read operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadPreference {
    Primary,
    PrimaryPreferred,
    Secondary,
    SecondaryPreferred,
    Nearest,
}

impl ReadPreference {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadPreference::Primary => "primary",
            ReadPreference::PrimaryPreferred => "primary_preferred",
            ReadPreference::Secondary => "secondary",
            ReadPreference::SecondaryPreferred => "secondary_preferred",
            ReadPreference::Nearest => "nearest",
        }
    }
}

/// Acknowledgement returned by a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteOutcome {
    /// Whether the server acknowledged the write
    pub acknowledged: bool,
    /// Number of documents inserted, updated, or removed
    pub affected: u64,
}

impl WriteOutcome {
    /// Creates an acknowledged outcome touching `affected` documents
    pub fn acknowledged(affected: u64) -> Self {
        Self {
            acknowledged: true,
            affected,
        }
    }
}

/// Cursor shaping applied to a find operation
///
/// The driver applies these server-side; the dispatcher only assembles them
/// from the descriptor's shared fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FindOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_preference: Option<ReadPreference>,
}

/// Output target for a map-reduce operation
///
/// Either the name of a destination collection or an action mapping such as
/// `{"inline": true}` or `{"merge": "target"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MapReduceOut {
    Collection(String),
    Action(Map<String, Value>),
}

impl MapReduceOut {
    /// The inline action mapping, used when a descriptor omits `out`
    pub fn inline() -> Self {
        let mut action = Map::new();
        action.insert("inline".to_string(), Value::Bool(true));
        MapReduceOut::Action(action)
    }

    /// Returns true if results are returned inline rather than written out
    pub fn is_inline(&self) -> bool {
        match self {
            MapReduceOut::Collection(_) => false,
            MapReduceOut::Action(action) => {
                action.get("inline").map_or(false, |v| v == &Value::Bool(true))
            }
        }
    }
}
