//! Integration tests for the list/save/remove contract and parameter merge.

use serde_json::{Value, json};

use vectra_core::traits::DataSource;
use vectra_core::types::{Filters, ListParams, ListParamsPatch, PaginationPatch, RecordId, SortSpec};
use vectra_query::{MemoryDataSource, merge_list_params};

use crate::helpers;

fn names(rows: &[Value]) -> Vec<&str> {
    rows.iter().map(|r| r["name"].as_str().unwrap_or_default()).collect()
}

#[tokio::test]
async fn test_filtered_rows_satisfy_every_filter() {
    let source = MemoryDataSource::new(helpers::users());
    let params = ListParams::new()
        .with_filter("city", json!("os"))
        .with_filter("status", json!([1, 2]))
        .with_filter("name", json!(""));

    let result = source.list(&params).await.unwrap();

    assert_eq!(names(&result.data), ["John", "Bob"]);
    assert_eq!(result.total, 2);
    for row in &result.data {
        assert!(helpers::users().contains(row));
    }
}

#[tokio::test]
async fn test_total_counts_before_pagination() {
    let source = MemoryDataSource::new(helpers::users());
    let params = ListParams::new()
        .with_sort(SortSpec::desc("age"))
        .with_pagination(2, 2);

    let result = source.list(&params).await.unwrap();
    assert_eq!(names(&result.data), ["John", "Alice"]);
    assert_eq!(result.total, 5);

    let beyond = source.list(&params.clone().with_pagination(9, 2)).await.unwrap();
    assert!(beyond.data.is_empty());
    assert_eq!(beyond.total, 5);
}

#[tokio::test]
async fn test_sort_is_stable_for_equal_keys() {
    let source = MemoryDataSource::new(helpers::users());
    let result = source
        .list(&ListParams::new().with_sort(SortSpec::asc("status")))
        .await
        .unwrap();
    assert_eq!(names(&result.data), ["Jane", "John", "Bob", "Johnny", "Alice"]);

    let by_city = source
        .list(&ListParams::new().with_sort(SortSpec::asc("city")))
        .await
        .unwrap();
    assert_eq!(by_city.data[0]["name"], json!("Alice"));
}

#[tokio::test]
async fn test_save_upserts_and_remove_ignores_unknown_ids() {
    let source = MemoryDataSource::new(vec![json!({"id": 1}), json!({"id": 2})]);

    source.save(json!({"id": 2, "name": "two"})).await.unwrap();
    assert_eq!(source.len().await, 2);
    source.save(json!({"id": 3})).await.unwrap();
    assert_eq!(source.len().await, 3);

    source.remove(&RecordId::from(1)).await.unwrap();
    source.remove(&RecordId::from(99)).await.unwrap();
    source.remove(&RecordId::from("2")).await.unwrap();

    let all = source.list(&ListParams::new()).await.unwrap();
    assert_eq!(all.data, [json!({"id": 2, "name": "two"}), json!({"id": 3})]);
}

#[test]
fn test_merge_overlays_filters_and_replaces_sort() {
    let merged = merge_list_params([
        ListParamsPatch::filters(Filters::from([("a".to_string(), json!(1))])),
        ListParamsPatch::sort(SortSpec::asc("x")),
        ListParamsPatch::filters(Filters::from([("b".to_string(), json!(2))])),
        ListParamsPatch::sort(SortSpec::desc("y")),
    ]);

    assert_eq!(merged.sort, Some(SortSpec::desc("y")));
    assert_eq!(
        merged.filters,
        Some(Filters::from([
            ("a".to_string(), json!(1)),
            ("b".to_string(), json!(2)),
        ]))
    );
    assert!(merged.pagination.is_none());

    let paged = merge_list_params([
        ListParamsPatch::pagination(PaginationPatch {
            page: Some(3),
            page_size: Some(20),
        }),
        ListParamsPatch::pagination(PaginationPatch {
            page: Some(1),
            page_size: None,
        }),
    ]);
    let pagination = paged.pagination.unwrap();
    assert_eq!((pagination.page, pagination.page_size), (1, 20));
}
