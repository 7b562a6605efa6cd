//! Folding partial list parameters.
//!
//! `pagination` and `filters` are overlaid key by key, later keys winning.
//! `sort` is a single selection: the last patch that sets it replaces it
//! wholesale.

use vectra_core::types::{Filters, ListParams, ListParamsPatch, PaginationPatch};

/// Page size used when no patch sets one.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Fold patches left to right using [`DEFAULT_PAGE_SIZE`].
pub fn merge_list_params<I>(patches: I) -> ListParams
where
    I: IntoIterator<Item = ListParamsPatch>,
{
    merge_list_params_with(patches, DEFAULT_PAGE_SIZE)
}

/// Fold patches left to right. A pagination missing its page resolves to
/// page 1; one missing its size resolves to `default_page_size`.
pub fn merge_list_params_with<I>(patches: I, default_page_size: u64) -> ListParams
where
    I: IntoIterator<Item = ListParamsPatch>,
{
    let mut pagination: Option<PaginationPatch> = None;
    let mut merged = ListParams::default();

    for patch in patches {
        if let Some(next) = patch.pagination {
            pagination = Some(pagination.unwrap_or_default().overlay(next));
        }
        if let Some(sort) = patch.sort {
            merged.sort = Some(sort);
        }
        if let Some(filters) = patch.filters {
            merged
                .filters
                .get_or_insert_with(Filters::new)
                .extend(filters);
        }
    }

    merged.pagination = pagination.map(|p| p.resolve(default_page_size));
    merged
}
