//! Record identity and field access for the generic query engine.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of a record. Numbers and strings never compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Numeric identifier.
    Number(i64),
    /// Textual identifier.
    Text(String),
}

impl RecordId {
    /// Read an identifier out of a JSON value. Integral floats such as
    /// `1.0` read as the integer they equal.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| {
                    n.as_f64()
                        .filter(|f| {
                            f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64
                        })
                        .map(|f| f as i64)
                })
                .map(Self::Number),
            Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }

    /// JSON form of this identifier.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Number(n) => Value::from(*n),
            Self::Text(s) => Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// A record the query engine can filter, sort, and upsert.
pub trait Record: Clone + Send + Sync + 'static {
    /// The record's identifier, if it has one.
    fn id(&self) -> Option<RecordId>;

    /// Value of a named field, if present.
    fn field(&self, name: &str) -> Option<Value>;
}

/// JSON objects are records keyed by their `"id"` member.
impl Record for Value {
    fn id(&self) -> Option<RecordId> {
        self.get("id").and_then(RecordId::from_value)
    }

    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}
