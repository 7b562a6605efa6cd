//! All hook point definitions with typed payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use vectra_core::result::AppResult;
use vectra_core::types::{ListParams, Pagination, SortSpec, TableColumn};

/// Enumeration of the hook points a screen fires.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookPoint {
    // ── Mount ──
    /// Fired before the search form mounts.
    BeforeMountSearch,
    /// Fired before the table mounts.
    BeforeMountTable,
    /// Fired before the edit form mounts.
    BeforeMountForm,

    // ── Interaction ──
    /// Fired when a search is submitted.
    OnSearch,
    /// Fired after the table changed page, sort, or column layout.
    OnTableChange,
    /// Fired when the edit form is submitted.
    OnFormSubmit,
    /// Fired when an inline cell edit closes.
    OnEditClosed,

    /// A plugin-defined hook invoked by name.
    Custom(String),
}

impl HookPoint {
    /// Returns the string name of this hook point.
    pub fn as_str(&self) -> &str {
        match self {
            Self::BeforeMountSearch => "before_mount_search",
            Self::BeforeMountTable => "before_mount_table",
            Self::BeforeMountForm => "before_mount_form",
            Self::OnSearch => "on_search",
            Self::OnTableChange => "on_table_change",
            Self::OnFormSubmit => "on_form_submit",
            Self::OnEditClosed => "on_edit_closed",
            Self::Custom(name) => name,
        }
    }

    /// Creates a custom hook point.
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }
}

impl std::fmt::Display for HookPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A table interaction reported through [`HookPoint::OnTableChange`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableChange {
    /// The page or page size changed.
    Page { pagination: Pagination },
    /// The sort column changed or was cleared.
    Sort { sort: Option<SortSpec> },
    /// A column was resized.
    ColumnResize { prop: String, width: f64 },
    /// A column was shown or hidden.
    ColumnVisibility { prop: String, visible: bool },
    /// Columns were reordered. Props not listed keep their relative order
    /// after the listed ones.
    ColumnOrder { order: Vec<String> },
}

impl TableChange {
    /// Applies a column-layout change to `columns`. Page and sort changes
    /// leave the schema untouched.
    pub fn apply(&self, columns: &mut Vec<TableColumn>) {
        match self {
            Self::Page { .. } | Self::Sort { .. } => {}
            Self::ColumnResize { prop, width } => {
                if let Some(column) = columns.iter_mut().find(|c| &c.prop == prop) {
                    column.width = Some(*width);
                }
            }
            Self::ColumnVisibility { prop, visible } => {
                if let Some(column) = columns.iter_mut().find(|c| &c.prop == prop) {
                    column.visible = *visible;
                }
            }
            Self::ColumnOrder { order } => {
                let mut rest = std::mem::take(columns);
                for prop in order {
                    if let Some(pos) = rest.iter().position(|c| &c.prop == prop) {
                        columns.push(rest.remove(pos));
                    }
                }
                columns.append(&mut rest);
            }
        }
    }
}

/// One hook invocation with the typed arguments of its point.
#[derive(Debug, Clone, Copy)]
pub enum HookEvent<'a> {
    BeforeMountSearch,
    BeforeMountTable,
    BeforeMountForm,
    OnSearch(&'a ListParams),
    OnTableChange(&'a TableChange),
    OnFormSubmit(&'a Value),
    OnEditClosed { row: &'a Value, column: &'a str },
    Custom { name: &'a str, args: &'a [Value] },
}

impl HookEvent<'_> {
    /// The hook point this event is dispatched to.
    pub fn point(&self) -> HookPoint {
        match self {
            Self::BeforeMountSearch => HookPoint::BeforeMountSearch,
            Self::BeforeMountTable => HookPoint::BeforeMountTable,
            Self::BeforeMountForm => HookPoint::BeforeMountForm,
            Self::OnSearch(_) => HookPoint::OnSearch,
            Self::OnTableChange(_) => HookPoint::OnTableChange,
            Self::OnFormSubmit(_) => HookPoint::OnFormSubmit,
            Self::OnEditClosed { .. } => HookPoint::OnEditClosed,
            Self::Custom { name, .. } => HookPoint::Custom((*name).to_string()),
        }
    }
}

/// What a hook returns: `Ok(None)` when it has nothing to report. The
/// first `Some` in execution order becomes the dispatch result.
pub type HookOutput = AppResult<Option<Value>>;
