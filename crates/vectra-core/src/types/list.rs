//! List request and response shapes shared by every data source.

use serde::{Deserialize, Serialize};

use super::filter::Filters;
use super::pagination::{Pagination, PaginationPatch};
use super::sorting::SortSpec;

/// Parameters of a list request. An absent field means "no constraint of
/// that kind".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListParams {
    /// Page selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    /// Sort selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortSpec>,
    /// Field filters, combined with logical AND.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Filters>,
}

impl ListParams {
    /// Parameters with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page selection.
    pub fn with_pagination(mut self, page: u64, page_size: u64) -> Self {
        self.pagination = Some(Pagination::new(page, page_size));
        self
    }

    /// Set the sort selection.
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Add one filter.
    pub fn with_filter(mut self, field: impl Into<String>, value: serde_json::Value) -> Self {
        self.filters
            .get_or_insert_with(Filters::new)
            .insert(field.into(), value);
        self
    }

    /// Same parameters without the page selection.
    pub fn without_pagination(&self) -> Self {
        Self {
            pagination: None,
            ..self.clone()
        }
    }
}

/// Partial list parameters, folded together by the query engine's merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListParamsPatch {
    /// Pagination keys to overlay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationPatch>,
    /// Replacement sort selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortSpec>,
    /// Filter keys to overlay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Filters>,
}

impl ListParamsPatch {
    /// Patch carrying only pagination keys.
    pub fn pagination(patch: PaginationPatch) -> Self {
        Self {
            pagination: Some(patch),
            ..Self::default()
        }
    }

    /// Patch carrying only a sort selection.
    pub fn sort(sort: SortSpec) -> Self {
        Self {
            sort: Some(sort),
            ..Self::default()
        }
    }

    /// Patch carrying only filters.
    pub fn filters(filters: Filters) -> Self {
        Self {
            filters: Some(filters),
            ..Self::default()
        }
    }
}

impl From<ListParams> for ListParamsPatch {
    fn from(params: ListParams) -> Self {
        Self {
            pagination: params.pagination.map(PaginationPatch::from),
            sort: params.sort,
            filters: params.filters,
        }
    }
}

/// One page of a list response.
///
/// `total` counts every record that passed the filters, before pagination,
/// so it is never smaller than `data.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResult<T> {
    /// Records on this page, in sorted order.
    pub data: Vec<T>,
    /// Filtered record count before pagination.
    pub total: u64,
}

impl<T> ListResult<T> {
    /// Create a new list result.
    pub fn new(data: Vec<T>, total: u64) -> Self {
        Self { data, total }
    }

    /// An empty result.
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            total: 0,
        }
    }

    /// Number of pages needed for `total` at `page_size` (at least 1).
    pub fn total_pages(&self, page_size: u64) -> u64 {
        let page_size = page_size.max(1);
        if self.total == 0 {
            1
        } else {
            self.total.div_ceil(page_size)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_params_wire_shape() {
        let params: ListParams = serde_json::from_value(json!({
            "pagination": {"page": 2, "pageSize": 5},
            "sort": {"prop": "name", "order": "desc"},
            "filters": {"status": ["a", "b"]}
        }))
        .unwrap();
        assert_eq!(params.pagination, Some(Pagination::new(2, 5)));
        assert_eq!(params.sort, Some(SortSpec::desc("name")));
        assert_eq!(params.filters.unwrap()["status"], json!(["a", "b"]));
    }

    #[test]
    fn test_total_pages() {
        let result: ListResult<u8> = ListResult::new(vec![], 11);
        assert_eq!(result.total_pages(5), 3);
        assert_eq!(ListResult::<u8>::empty().total_pages(5), 1);
    }
}
