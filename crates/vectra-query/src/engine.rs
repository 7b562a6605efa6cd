//! Filter, sort, and paginate a candidate collection.
//!
//! The pipeline always runs in this order:
//!
//! 1. Filters (logical AND across keys)
//! 2. Stable sort on `sort.prop`, if any
//! 3. `total` is taken here, before pagination
//! 4. Page slice `[(page-1)*size, (page-1)*size + size)`

use std::cmp::Ordering;

use serde_json::Value;

use vectra_core::types::{FilterValue, Filters, ListParams, ListResult, Pagination, Record, SortSpec};

/// Run the whole list pipeline over an owned copy of the candidates.
pub fn run_query<T: Record>(records: Vec<T>, params: &ListParams) -> ListResult<T> {
    let mut records = match &params.filters {
        Some(filters) => apply_filters(records, filters),
        None => records,
    };

    if let Some(sort) = &params.sort {
        apply_sort(&mut records, sort);
    }

    let total = records.len() as u64;

    let data = match &params.pagination {
        Some(pagination) => paginate(records, pagination),
        None => records,
    };

    ListResult::new(data, total)
}

/// Keep only records that pass every filter.
pub fn apply_filters<T: Record>(records: Vec<T>, filters: &Filters) -> Vec<T> {
    let tests: Vec<(&str, FilterValue<'_>)> = filters
        .iter()
        .map(|(key, value)| (key.as_str(), FilterValue::classify(value)))
        .filter(|(_, test)| *test != FilterValue::Unconstrained)
        .collect();

    if tests.is_empty() {
        return records;
    }

    records
        .into_iter()
        .filter(|record| {
            tests
                .iter()
                .all(|(key, test)| test.matches(record.field(key).as_ref()))
        })
        .collect()
}

/// Stable sort by one field. Equal keys keep their prior relative order.
pub fn apply_sort<T: Record>(records: &mut [T], sort: &SortSpec) {
    if sort.prop.is_empty() {
        return;
    }
    records.sort_by(|a, b| {
        let ordering = compare_values(a.field(&sort.prop).as_ref(), b.field(&sort.prop).as_ref());
        sort.order.apply(ordering)
    });
}

/// Total order over optional JSON values.
///
/// Values of the same kind compare naturally (numbers numerically, strings
/// lexicographically, `false < true`). Different kinds are ranked
/// missing < null < bool < number < string < array < object, and arrays or
/// objects compare equal among themselves.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn rank(value: Option<&Value>) -> u8 {
    match value {
        None => 0,
        Some(Value::Null) => 1,
        Some(Value::Bool(_)) => 2,
        Some(Value::Number(_)) => 3,
        Some(Value::String(_)) => 4,
        Some(Value::Array(_)) => 5,
        Some(Value::Object(_)) => 6,
    }
}

/// Slice out one page. Pages past the end are empty.
pub fn paginate<T>(records: Vec<T>, pagination: &Pagination) -> Vec<T> {
    let start = usize::try_from(pagination.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(pagination.limit()).unwrap_or(usize::MAX);
    records.into_iter().skip(start).take(limit).collect()
}
