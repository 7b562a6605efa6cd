//! Integration tests for the dictionary cache.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures::future::join_all;
use serde_json::json;

use vectra_core::config::dict::DictDefaults;
use vectra_core::error::{AppError, ErrorKind};
use vectra_core::traits::DataSource;
use vectra_core::types::ListParams;
use vectra_dict::{DictConfig, DictItem, DictProvider};
use vectra_query::MemoryDataSource;

use crate::helpers;

fn status_items() -> Vec<DictItem> {
    vec![
        DictItem::new("Inactive", 0),
        DictItem::new("Active", 1).with_color("green"),
        DictItem::new("Locked", 2),
    ]
}

fn counting_config(code: &str, calls: Arc<AtomicUsize>) -> DictConfig {
    DictConfig::new(code).with_fn(move |_code| {
        let calls = calls.clone();
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(status_items())
        }
    })
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_loads_share_one_loader_call() {
    let calls = Arc::new(AtomicUsize::new(0));
    let provider = DictProvider::new();
    provider.register([counting_config("status", calls.clone())]);

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let provider = provider.clone();
            tokio::spawn(async move { provider.load("status").await })
        })
        .collect();
    let results = join_all(tasks).await;

    for result in results {
        assert_eq!(result.unwrap().unwrap().len(), 3);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(!provider.is_loading("status"));
}

#[tokio::test(start_paused = true)]
async fn test_reload_only_after_expiry() {
    let calls = Arc::new(AtomicUsize::new(0));
    let provider = DictProvider::with_defaults(DictDefaults {
        cache: true,
        expiry_ms: 1_000,
    });
    provider.register([counting_config("status", calls.clone())]);

    provider.load("status").await.unwrap();
    tokio::time::advance(Duration::from_millis(500)).await;
    provider.load("status").await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    tokio::time::advance(Duration::from_millis(600)).await;
    provider.load("status").await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_failed_load_reaches_every_waiter_and_allows_retry() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let provider = DictProvider::new();
    provider.register([DictConfig::new("flaky").with_fn(move |_code| {
        let calls = counter.clone();
        async move {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            if n == 0 {
                return Err(AppError::dictionary("backend unavailable"));
            }
            Ok(vec![DictItem::new("Ok", "ok")])
        }
    })]);

    let (a, b) = tokio::join!(provider.load("flaky"), provider.load("flaky"));
    assert_eq!(a.unwrap_err().kind, ErrorKind::Dictionary);
    assert_eq!(b.unwrap_err().kind, ErrorKind::Dictionary);
    assert!(provider.get("flaky").is_empty());

    assert_eq!(provider.load("flaky").await.unwrap().len(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_labels_for_listed_rows() {
    let provider = DictProvider::new();
    provider.register([DictConfig::new("status").with_items(status_items())]);
    provider.load("status").await.unwrap();

    let source = MemoryDataSource::new(helpers::users());
    let result = source
        .list(&ListParams::new().with_filter("name", json!("jo")))
        .await
        .unwrap();
    let labels: Vec<String> = result
        .data
        .iter()
        .map(|row| provider.get_label("status", &row["status"]))
        .collect();
    assert_eq!(labels, ["Active", "Active"]);

    assert_eq!(provider.get_label("status", &json!(7)), "7");
    assert_eq!(
        provider.get_item("status", &json!(1)).and_then(|i| i.color),
        Some("green".to_string())
    );
}

#[tokio::test]
async fn test_unknown_code_and_cache_disabled() {
    let provider = DictProvider::new();
    assert!(provider.load("missing").await.unwrap().is_empty());
    assert!(provider.get("missing").is_empty());

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    provider.register([DictConfig::new("live")
        .with_cache(false)
        .with_fn(move |_code| {
            let calls = counter.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(vec![DictItem::new("Now", 1)])
            }
        })]);

    provider.load("live").await.unwrap();
    provider.load("live").await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(provider.get("live").is_empty());
}
