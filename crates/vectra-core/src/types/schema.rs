//! Declarative schema records for search, table, and form screens.
//!
//! The core only carries these through the plugin context; rendering is
//! left to the host.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Input widget kind of a search or form field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    /// Single-line text.
    #[default]
    Input,
    /// Multi-line text.
    Textarea,
    /// Numeric input.
    Number,
    /// Select from inline options.
    Select,
    /// Select from a dictionary.
    DictSelect,
    /// Date picker.
    Date,
    /// Date and time picker.
    Datetime,
    /// Toggle.
    Switch,
    /// Radio group.
    Radio,
    /// Checkbox group.
    Checkbox,
    /// File upload.
    Upload,
    /// Nested form.
    Subform,
    /// Key/value editor.
    Keyvalue,
    /// Host-rendered widget.
    Custom,
}

/// Comparison a search field asks the data source to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchOperator {
    Eq,
    Like,
    In,
    Between,
    Gt,
    Lt,
    Gte,
    Lte,
}

/// A field of the search bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchField {
    pub prop: String,
    pub label: String,
    #[serde(default, rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<SearchOperator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dict_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl SearchField {
    /// Create a text search field.
    pub fn new(prop: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            prop: prop.into(),
            label: label.into(),
            field_type: FieldType::Input,
            operator: None,
            dict_code: None,
            default_value: None,
            placeholder: None,
        }
    }
}

/// A column of the result table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    pub prop: String,
    pub label: String,
    /// Column width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f64>,
    /// Hidden columns stay in the schema so their position survives.
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dict_code: Option<String>,
    /// `"left"` or `"right"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed: Option<String>,
}

impl TableColumn {
    /// Create a visible, unsized column.
    pub fn new(prop: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            prop: prop.into(),
            label: label.into(),
            width: None,
            min_width: None,
            visible: true,
            sortable: false,
            dict_code: None,
            fixed: None,
        }
    }

    /// Set the width.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }
}

/// A field of the edit form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub prop: String,
    pub label: String,
    #[serde(default, rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dict_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_fields: Vec<FormField>,
}

impl FormField {
    /// Create an optional text field.
    pub fn new(prop: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            prop: prop.into(),
            label: label.into(),
            field_type: FieldType::Input,
            required: false,
            disabled: false,
            dict_code: None,
            default_value: None,
            child_fields: Vec::new(),
        }
    }
}

fn default_visible() -> bool {
    true
}
