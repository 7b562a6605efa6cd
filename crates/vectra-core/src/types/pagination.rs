//! Pagination types for list requests.

use serde::{Deserialize, Serialize};

/// Page selection for a list request. Both values are 1-based and at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
}

impl Pagination {
    /// Create a new pagination, clamping both values to at least 1.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Index of the first record on this page.
    pub fn offset(&self) -> u64 {
        self.page.max(1).saturating_sub(1).saturating_mul(self.limit())
    }

    /// Maximum number of records on this page.
    pub fn limit(&self) -> u64 {
        self.page_size.max(1)
    }
}

/// Partial pagination used when folding list parameters together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationPatch {
    /// Page number, if this patch sets one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    /// Page size, if this patch sets one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
}

impl PaginationPatch {
    /// A patch that only moves to another page.
    pub fn page(page: u64) -> Self {
        Self {
            page: Some(page),
            page_size: None,
        }
    }

    /// A patch that only changes the page size.
    pub fn page_size(page_size: u64) -> Self {
        Self {
            page: None,
            page_size: Some(page_size),
        }
    }

    /// Overlay `other` on top of `self`, key by key.
    pub fn overlay(self, other: PaginationPatch) -> Self {
        Self {
            page: other.page.or(self.page),
            page_size: other.page_size.or(self.page_size),
        }
    }

    /// Resolve into a full pagination, filling gaps with page 1 and
    /// `default_page_size`.
    pub fn resolve(self, default_page_size: u64) -> Pagination {
        Pagination::new(
            self.page.unwrap_or(1),
            self.page_size.unwrap_or(default_page_size),
        )
    }
}

impl From<Pagination> for PaginationPatch {
    fn from(p: Pagination) -> Self {
        Self {
            page: Some(p.page),
            page_size: Some(p.page_size),
        }
    }
}
