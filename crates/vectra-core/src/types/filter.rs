//! Filter types for list requests.
//!
//! Filters are a map from field name to a JSON value. The shape of the
//! value selects the test applied to a record's field.

use std::collections::BTreeMap;

use serde_json::Value;

/// Field name → filter value. Every key must pass for a record to be kept.
pub type Filters = BTreeMap<String, Value>;

/// Classified filter value.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue<'a> {
    /// `null` or empty string: no constraint.
    Unconstrained,
    /// Array value: the field must equal one of the members.
    OneOf(&'a [Value]),
    /// Any other value: case-insensitive substring of the stringified field.
    Contains(String),
}

impl<'a> FilterValue<'a> {
    /// Classify a raw filter value.
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::Unconstrained,
            Value::String(s) if s.is_empty() => Self::Unconstrained,
            Value::Array(items) => Self::OneOf(items),
            other => Self::Contains(stringify(other).to_lowercase()),
        }
    }

    /// Test a record field against this filter. A missing field only
    /// passes an unconstrained filter.
    pub fn matches(&self, field: Option<&Value>) -> bool {
        match (self, field) {
            (Self::Unconstrained, _) => true,
            (_, None) => false,
            (Self::OneOf(items), Some(field)) => items.iter().any(|item| values_equal(item, field)),
            (Self::Contains(needle), Some(field)) => {
                stringify(field).to_lowercase().contains(needle.as_str())
            }
        }
    }
}

/// JSON equality that compares numbers by value, so `10` equals `10.0`.
/// Arrays and objects compare member-wise under the same rule.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            x == y || matches!((x.as_f64(), y.as_f64()), (Some(x), Some(y)) if x == y)
        }
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(a, b)| values_equal(a, b))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(key, a)| y.get(key).is_some_and(|b| values_equal(a, b)))
        }
        _ => a == b,
    }
}

/// Render a JSON value the way list filters compare it: strings verbatim,
/// everything else in its compact JSON form.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
