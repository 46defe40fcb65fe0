//! Attribute values
//!
//! Attributes are kept as JSON values keyed by attribute name. The schema
//! decides which JSON shape each attribute must have.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A flat, ordered attribute set
pub type Attributes = BTreeMap<String, Value>;

/// Type of a schema attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Int,
    Bool,
    /// Unordered set of strings or numbers
    Set,
    /// Ordered list, elements may be objects
    List,
    /// String-to-string map (tags)
    Map,
}

impl AttributeType {
    /// Whether `value` has the JSON shape of this type (null always passes)
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (AttributeType::String, Value::String(_)) => true,
            (AttributeType::Int, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (AttributeType::Bool, Value::Bool(_)) => true,
            (AttributeType::Set | AttributeType::List, Value::Array(_)) => true,
            (AttributeType::Map, Value::Object(map)) => map.values().all(|v| v.is_string()),
            _ => false,
        }
    }

    /// Value used when an optional attribute is left out of the configuration
    pub fn zero_value(&self) -> Value {
        match self {
            AttributeType::Set | AttributeType::List => Value::Array(Vec::new()),
            AttributeType::Map => Value::Object(serde_json::Map::new()),
            _ => Value::Null,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Int => "int",
            AttributeType::Bool => "bool",
            AttributeType::Set => "set",
            AttributeType::List => "list",
            AttributeType::Map => "map",
        }
    }
}

impl std::fmt::Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a value carries no information (null, empty string or empty collection)
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

/// Compare two attribute values the way a diff should see them
///
/// Absent and empty are the same thing, and arrays compare as sets.
pub fn values_equivalent(a: Option<&Value>, b: Option<&Value>) -> bool {
    let a = a.filter(|v| !is_empty_value(v));
    let b = b.filter(|v| !is_empty_value(v));
    match (a, b) {
        (None, None) => true,
        (Some(Value::Array(x)), Some(Value::Array(y))) => {
            let mut x: Vec<String> = x.iter().map(Value::to_string).collect();
            let mut y: Vec<String> = y.iter().map(Value::to_string).collect();
            x.sort();
            y.sort();
            x == y
        }
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}
