//! Dictionary entries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One label/value pair of a dictionary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictItem {
    /// Display label.
    pub label: String,
    /// Stored value (string or number in practice).
    pub value: Value,
    /// Optional tag color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Whether the option is selectable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    /// Any other loader-provided members.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DictItem {
    /// Create an item.
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            color: None,
            disabled: None,
            extra: Map::new(),
        }
    }

    /// Set the tag color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}
