//! Sorting types for list requests.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Sort order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortOrder {
    /// Apply this order to an ascending comparison result.
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort order '{other}'")),
        }
    }
}

/// A single sort selection: field name and order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field name to sort by.
    pub prop: String,
    /// Sort order.
    #[serde(default)]
    pub order: SortOrder,
}

impl SortSpec {
    /// Create a new sort spec.
    pub fn new(prop: impl Into<String>, order: SortOrder) -> Self {
        Self {
            prop: prop.into(),
            order,
        }
    }

    /// Ascending sort on the given field.
    pub fn asc(prop: impl Into<String>) -> Self {
        Self::new(prop, SortOrder::Asc)
    }

    /// Descending sort on the given field.
    pub fn desc(prop: impl Into<String>) -> Self {
        Self::new(prop, SortOrder::Desc)
    }
}
