//! Integration tests for the controller: event order, hook dispatch, and
//! plugin installation.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use vectra_core::error::{AppError, ErrorKind};
use vectra_core::result::AppResult;
use vectra_core::traits::{DataSource, DynDataSource, ImportFile, NoticeLevel};
use vectra_core::types::{ListParams, ListResult, RecordId};
use vectra_plugin::{
    Action, ActionContext, ActionOutcome, ActionRunner, ClosureHandler, CrudController,
    CrudProvider, HookEvent, HookOutput, HookPoint, LifecycleEvent, Plugin, PluginContext,
};

use crate::helpers::{self, RecordingNotifier, TestScreen, event_logger};

/// Plugin that logs its name for every hook and answers with a fixed value.
#[derive(Debug)]
struct Tracer {
    name: &'static str,
    answer: Option<Value>,
    log: Arc<Mutex<Vec<String>>>,
}

impl Tracer {
    fn new(name: &'static str, answer: Option<Value>, log: Arc<Mutex<Vec<String>>>) -> Arc<Self> {
        Arc::new(Self { name, answer, log })
    }

    fn record(&self, what: &str) {
        self.log.lock().unwrap().push(format!("{}:{what}", self.name));
    }
}

#[async_trait]
impl Plugin for Tracer {
    fn name(&self) -> &str {
        self.name
    }

    fn hooks(&self) -> Vec<HookPoint> {
        vec![
            HookPoint::OnSearch,
            HookPoint::BeforeMountTable,
            HookPoint::custom("refresh"),
        ]
    }

    async fn install(&self, _ctx: &mut PluginContext) -> AppResult<()> {
        self.record("install");
        Ok(())
    }

    async fn on_search(&self, _ctx: &mut PluginContext, _params: &ListParams) -> HookOutput {
        self.record("on_search");
        Ok(None)
    }

    async fn before_mount_table(&self, _ctx: &mut PluginContext) -> HookOutput {
        self.record("mount_table");
        Ok(self.answer.clone())
    }

    async fn on_custom(&self, _ctx: &mut PluginContext, name: &str, args: &[Value]) -> HookOutput {
        self.record(name);
        Ok(Some(json!({"plugin": self.name, "args": args})))
    }
}

/// Plugin whose install always fails.
#[derive(Debug)]
struct Broken;

#[async_trait]
impl Plugin for Broken {
    fn name(&self) -> &str {
        "broken"
    }

    async fn install(&self, _ctx: &mut PluginContext) -> AppResult<()> {
        Err(AppError::configuration("missing endpoint"))
    }
}

/// Plugin whose search hook rejects every search.
#[derive(Debug)]
struct Veto;

#[async_trait]
impl Plugin for Veto {
    fn name(&self) -> &str {
        "veto"
    }

    fn hooks(&self) -> Vec<HookPoint> {
        vec![HookPoint::OnSearch]
    }

    async fn on_search(&self, _ctx: &mut PluginContext, _params: &ListParams) -> HookOutput {
        Err(AppError::validation("search is locked"))
    }
}

/// Read-only source without export or import support.
#[derive(Debug)]
struct ReadOnly;

#[async_trait]
impl DataSource<Value> for ReadOnly {
    async fn list(&self, _params: &ListParams) -> AppResult<ListResult<Value>> {
        Ok(ListResult::new(Vec::new(), 0))
    }

    async fn save(&self, _record: Value) -> AppResult<Value> {
        Err(AppError::validation("read only"))
    }

    async fn remove(&self, _id: &RecordId) -> AppResult<()> {
        Err(AppError::validation("read only"))
    }
}

fn log() -> Arc<Mutex<Vec<String>>> {
    Arc::new(Mutex::new(Vec::new()))
}

fn entries(log: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
    log.lock().unwrap().clone()
}

#[tokio::test]
async fn test_crud_round_emits_events_in_order() {
    let trace = log();
    let provider = CrudProvider::new();
    for event in [
        LifecycleEvent::BeforeSearch,
        LifecycleEvent::AfterSearch,
        LifecycleEvent::BeforeSave,
        LifecycleEvent::AfterSave,
        LifecycleEvent::BeforeRemove,
        LifecycleEvent::AfterRemove,
        LifecycleEvent::BeforeExport,
        LifecycleEvent::AfterExport,
        LifecycleEvent::BeforeImport,
        LifecycleEvent::AfterImport,
    ] {
        assert!(provider.on(event, event_logger(trace.clone())));
    }
    provider
        .register(Tracer::new("tracer", None, trace.clone()))
        .await;

    let mut screen = TestScreen::new(provider).await;
    let controller = &mut screen.controller;

    controller.search(ListParams::new()).await.unwrap();
    controller
        .save(json!({"id": 6, "name": "Eve", "age": 22, "status": 1}))
        .await
        .unwrap();
    controller.remove(&RecordId::from(2)).await.unwrap();
    controller.export(ListParams::new()).await.unwrap();
    controller
        .import(ImportFile::new("one.json", r#"[{"id": 7, "name": "Kim"}]"#))
        .await
        .unwrap();

    assert_eq!(
        entries(&trace),
        [
            "tracer:install",
            "before_search",
            "tracer:on_search",
            "after_search",
            "before_save",
            "after_save",
            "before_remove",
            "after_remove",
            "before_export",
            "after_export",
            "before_import",
            "after_import",
        ]
    );
    assert_eq!(screen.source.len().await, 6);
}

#[tokio::test]
async fn test_first_hook_result_wins() {
    let trace = log();
    let base_trace = trace.clone();
    let provider = CrudProvider::new().with_base_hook(
        HookPoint::BeforeMountTable,
        ClosureHandler::wrap("host-layout", move |_ctx, _event| {
            base_trace.lock().unwrap().push("base".to_string());
            Ok(None)
        }),
    );
    provider
        .register(Tracer::new("quiet", None, trace.clone()))
        .await;
    provider
        .register(Tracer::new("first", Some(json!("first")), trace.clone()))
        .await;
    provider
        .register(Tracer::new("second", Some(json!("second")), trace.clone()))
        .await;

    let mut screen = TestScreen::new(provider).await;
    trace.lock().unwrap().clear();

    let result = screen.controller.mount_table().await.unwrap();
    assert_eq!(result, Some(json!("first")));
    assert_eq!(
        entries(&trace),
        [
            "base",
            "quiet:mount_table",
            "first:mount_table",
            "second:mount_table",
        ]
    );

    screen
        .controller
        .provider()
        .set_base_hook(
            HookPoint::BeforeMountTable,
            ClosureHandler::wrap("host-layout", |_ctx, _event| Ok(Some(json!("base")))),
        )
        .await;
    let result = screen.controller.mount_table().await.unwrap();
    assert_eq!(result, Some(json!("base")));
}

#[tokio::test]
async fn test_custom_hook_receives_arguments() {
    let trace = log();
    let provider = CrudProvider::new();
    provider
        .register(Tracer::new("tracer", None, trace.clone()))
        .await;
    let mut context = PluginContext::new();
    provider.install(&mut context).await.unwrap();

    let args = [json!(1), json!("all")];
    let result = provider
        .run_custom_hook(&mut context, "refresh", &args)
        .await
        .unwrap();
    assert_eq!(result, Some(json!({"plugin": "tracer", "args": [1, "all"]})));

    let untouched = provider
        .run_custom_hook(&mut context, "unknown", &[])
        .await
        .unwrap();
    assert!(untouched.is_none());
    assert_eq!(entries(&trace), ["tracer:install", "tracer:refresh"]);
}

#[tokio::test]
async fn test_install_stops_at_first_failure() {
    let trace = log();
    let provider = CrudProvider::new();
    provider
        .register(Tracer::new("before", None, trace.clone()))
        .await;
    provider.register(Arc::new(Broken)).await;
    provider
        .register(Tracer::new("after", None, trace.clone()))
        .await;

    let mut controller = CrudController::new(Arc::new(provider), PluginContext::new());
    let err = controller.install().await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Plugin);
    assert!(err.message.starts_with("Plugin 'broken' install failed"));
    assert!(err.message.contains("missing endpoint"));
    assert_eq!(entries(&trace), ["before:install"]);
}

#[tokio::test]
async fn test_failing_search_hook_aborts_the_search() {
    let trace = log();
    let provider = CrudProvider::new();
    provider.on(LifecycleEvent::BeforeSearch, event_logger(trace.clone()));
    provider.on(LifecycleEvent::AfterSearch, event_logger(trace.clone()));
    provider.register(Arc::new(Veto)).await;
    provider
        .register(Tracer::new("tracer", None, trace.clone()))
        .await;

    let mut screen = TestScreen::new(provider).await;
    trace.lock().unwrap().clear();

    let err = screen
        .controller
        .search(ListParams::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(entries(&trace), ["before_search"]);

    assert!(screen.controller.provider().unregister("veto").await);
    screen.controller.search(ListParams::new()).await.unwrap();
    assert_eq!(
        entries(&trace),
        ["before_search", "before_search", "tracer:on_search", "after_search"]
    );
}

#[tokio::test]
async fn test_removed_handler_is_not_called_again() {
    let trace = log();
    let provider = Arc::new(CrudProvider::new());
    let handler = event_logger(trace.clone());
    provider.on(LifecycleEvent::AfterSave, handler.clone());

    let source: DynDataSource = Arc::new(vectra_query::MemoryDataSource::new(helpers::users()));
    let mut controller =
        CrudController::new(provider.clone(), PluginContext::new().with_data_source(source));

    controller.save(json!({"id": 1, "name": "Jon"})).await.unwrap();
    assert!(provider.off(&LifecycleEvent::AfterSave, &handler));
    assert!(!provider.off(&LifecycleEvent::AfterSave, &handler));
    controller.save(json!({"id": 1, "name": "John"})).await.unwrap();

    assert_eq!(entries(&trace), ["after_save"]);
}

#[tokio::test]
async fn test_unsupported_export_and_import() {
    let source: DynDataSource = Arc::new(ReadOnly);
    let mut controller = CrudController::new(
        Arc::new(CrudProvider::new()),
        PluginContext::new().with_data_source(source),
    );

    let err = controller.export(ListParams::new()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotImplemented);
    let err = controller
        .import(ImportFile::new("x.json", "[]"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotImplemented);

    let err = controller.save(json!({"id": 1})).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_action_failure_and_declined_confirmation() {
    let mut screen = TestScreen::new(CrudProvider::new()).await;
    let context = screen.controller.context_mut();
    context.add_action(Action::new("sync", "Sync", |_ctx: ActionContext| async {
        Err(AppError::internal("upstream timed out"))
    }));
    context.add_action(
        Action::new("purge", "Purge", |_ctx: ActionContext| async { Ok(()) })
            .confirm("Purge every row?"),
    );

    let notifier = RecordingNotifier::new(false);
    let runner = ActionRunner::new(notifier.clone());

    let err = screen
        .controller
        .run_action(&runner, "sync", |ctx| ctx)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Internal);
    assert_eq!(notifier.levels(), [NoticeLevel::Error]);
    assert!(notifier.last_message().unwrap().contains("upstream timed out"));

    let outcome = screen
        .controller
        .run_action(&runner, "purge", |ctx| ctx)
        .await
        .unwrap();
    assert_eq!(outcome, ActionOutcome::Cancelled);
    assert_eq!(*notifier.confirms.lock().unwrap(), ["Purge every row?"]);
    assert_eq!(notifier.levels(), [NoticeLevel::Error]);
    assert!(!runner.is_running());

    let err = screen
        .controller
        .run_action(&runner, "missing", |ctx| ctx)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_plugin_hooks_only_for_declared_points() {
    let trace = log();
    let provider = CrudProvider::new();
    provider
        .register(Tracer::new("tracer", None, trace.clone()))
        .await;
    let mut screen = TestScreen::new(provider).await;
    trace.lock().unwrap().clear();

    assert!(screen.controller.mount_search().await.unwrap().is_none());
    assert!(screen.controller.mount_form().await.unwrap().is_none());
    let provider = screen.controller.provider().clone();
    provider
        .run_hook(
            screen.controller.context_mut(),
            HookEvent::OnFormSubmit(&json!({"name": "x"})),
        )
        .await
        .unwrap();
    assert!(entries(&trace).is_empty());
}
