//! Integration tests for permission checks and permission-gated actions.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde_json::{Value, json};

use vectra_core::error::ErrorKind;
use vectra_core::traits::{DataSource, NoticeLevel};
use vectra_core::types::{Record, RecordId};
use vectra_permission::{FnChecker, PermissionEvaluator, StaticPermissionChecker};
use vectra_plugin::{Action, ActionContext, ActionOutcome, ActionRunner, CrudProvider};

use crate::helpers::{self, RecordingNotifier, TestScreen};

fn owner_checker() -> FnChecker {
    FnChecker::sync(|permission, row| match permission {
        "user:edit" => row.and_then(|r| r.get("status")) == Some(&json!(1)),
        "user:view" => true,
        _ => false,
    })
}

#[tokio::test]
async fn test_list_permissions_require_every_grant() {
    let evaluator = PermissionEvaluator::with_checker(StaticPermissionChecker::new([
        "user:view",
        "user:edit",
    ]));

    assert!(evaluator.has_permission("user:view", None).await);
    assert!(evaluator.has_permission(["user:view", "user:edit"], None).await);
    assert!(!evaluator.has_permission(["user:view", "user:delete"], None).await);
    assert!(evaluator.has_permission(Vec::<String>::new(), None).await);

    assert!(evaluator.has_any_permission(&["user:delete", "user:view"], None).await);
    assert!(!evaluator.has_any_permission(&[], None).await);

    let err = evaluator
        .require_permission(["user:delete"], None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Permission);
    assert!(err.message.contains("user:delete"));
}

#[tokio::test]
async fn test_no_checker_allows_everything() {
    let evaluator = PermissionEvaluator::new();
    assert!(!evaluator.has_checker());
    assert!(evaluator.has_permission(["anything", "at:all"], None).await);
    assert!(evaluator.has_any_permission(&[], None).await);
}

#[tokio::test(start_paused = true)]
async fn test_batch_checks_run_concurrently() {
    let in_progress = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let (current, max) = (in_progress.clone(), peak.clone());
    let evaluator = PermissionEvaluator::with_checker(FnChecker::new(move |_permission, _row| {
        let (current, max) = (current.clone(), max.clone());
        async move {
            let now = current.fetch_add(1, Ordering::SeqCst) + 1;
            max.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(100)).await;
            current.fetch_sub(1, Ordering::SeqCst);
            true
        }
    }));

    let started = tokio::time::Instant::now();
    assert!(evaluator.has_permission(["a", "b", "c"], None).await);
    assert_eq!(peak.load(Ordering::SeqCst), 3);
    assert!(started.elapsed() < Duration::from_millis(200));
}

#[tokio::test]
async fn test_row_action_checks_permission_against_the_row() {
    let mut screen = TestScreen::new(CrudProvider::new()).await;
    let source = screen.source.clone();
    let saved = Arc::new(AtomicUsize::new(0));
    let counter = saved.clone();

    screen.controller.context_mut().add_action(
        Action::new("activate", "Activate", move |ctx: ActionContext| {
            let counter = counter.clone();
            let source = source.clone();
            async move {
                let mut row: Value = ctx.row.unwrap_or_default();
                row["status"] = json!(2);
                source.save(row).await?;
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })
        .permission("user:edit"),
    );

    let notifier = RecordingNotifier::new(true);
    let runner = ActionRunner::with_permissions(
        notifier.clone(),
        PermissionEvaluator::with_checker(owner_checker()),
    );

    let users = helpers::users();
    let denied = screen
        .controller
        .run_action(&runner, "activate", |ctx| ctx.with_row(users[1].clone()))
        .await
        .unwrap();
    assert_eq!(denied, ActionOutcome::Denied);
    assert_eq!(notifier.levels(), [NoticeLevel::Warning]);

    let done = screen
        .controller
        .run_action(&runner, "activate", |ctx| ctx.with_row(users[0].clone()))
        .await
        .unwrap();
    assert_eq!(done, ActionOutcome::Completed);
    assert_eq!(saved.load(Ordering::SeqCst), 1);
    assert_eq!(notifier.levels().last(), Some(&NoticeLevel::Success));

    let rows = screen.source.snapshot().await;
    let john = rows
        .iter()
        .find(|r| r.id() == Some(RecordId::from(1)))
        .unwrap();
    assert_eq!(john["status"], json!(2));
}
