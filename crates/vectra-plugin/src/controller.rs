//! Screen controller: drives a data source through lifecycle events and
//! plugin hooks.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::debug;

use vectra_core::error::AppError;
use vectra_core::result::AppResult;
use vectra_core::traits::{DynDataSource, ExportPayload, ImportFile};
use vectra_core::types::{ListParams, ListResult, RecordId};

use crate::action::{ActionContext, ActionOutcome, ActionRunner};
use crate::context::PluginContext;
use crate::events::LifecycleEvent;
use crate::hooks::definitions::{HookEvent, HookOutput, TableChange};
use crate::provider::CrudProvider;

/// Owns the context of one screen and routes every operation through the
/// provider.
///
/// Each data-source call is wrapped in its `Before*` / `After*` events. A
/// failing event handler or data-source call aborts the operation and is
/// returned to the caller.
#[derive(Debug)]
pub struct CrudController {
    provider: Arc<CrudProvider>,
    context: PluginContext,
}

impl CrudController {
    pub fn new(provider: Arc<CrudProvider>, context: PluginContext) -> Self {
        Self { provider, context }
    }

    pub fn provider(&self) -> &Arc<CrudProvider> {
        &self.provider
    }

    pub fn context(&self) -> &PluginContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut PluginContext {
        &mut self.context
    }

    pub fn into_context(self) -> PluginContext {
        self.context
    }

    /// Installs the provider's plugins against this context.
    pub async fn install(&mut self) -> AppResult<()> {
        self.provider.install(&mut self.context).await
    }

    pub async fn mount_search(&mut self) -> HookOutput {
        self.provider
            .run_hook(&mut self.context, HookEvent::BeforeMountSearch)
            .await
    }

    pub async fn mount_table(&mut self) -> HookOutput {
        self.provider
            .run_hook(&mut self.context, HookEvent::BeforeMountTable)
            .await
    }

    pub async fn mount_form(&mut self) -> HookOutput {
        self.provider
            .run_hook(&mut self.context, HookEvent::BeforeMountForm)
            .await
    }

    /// Runs a search. The filters become the context's search params so
    /// that later actions (such as export) see them.
    pub async fn search(&mut self, params: ListParams) -> AppResult<ListResult<Value>> {
        let source = self.data_source()?;
        self.context.search_params = params.filters.clone().unwrap_or_default();

        self.provider
            .emit(&LifecycleEvent::BeforeSearch, &serde_json::to_value(&params)?)
            .await?;
        self.provider
            .run_hook(&mut self.context, HookEvent::OnSearch(&params))
            .await?;

        let result = source.list(&params).await?;
        debug!(total = result.total, rows = result.data.len(), "Search completed");

        self.provider
            .emit(&LifecycleEvent::AfterSearch, &serde_json::to_value(&result)?)
            .await?;
        Ok(result)
    }

    /// Applies a table change to the column schema, then runs the table
    /// change hook.
    pub async fn table_changed(&mut self, change: TableChange) -> HookOutput {
        change.apply(&mut self.context.table_schema);
        self.provider
            .run_hook(&mut self.context, HookEvent::OnTableChange(&change))
            .await
    }

    pub async fn form_submitted(&mut self, values: &Value) -> HookOutput {
        self.provider
            .run_hook(&mut self.context, HookEvent::OnFormSubmit(values))
            .await
    }

    pub async fn edit_closed(&mut self, row: &Value, column: &str) -> HookOutput {
        self.provider
            .run_hook(&mut self.context, HookEvent::OnEditClosed { row, column })
            .await
    }

    pub async fn save(&mut self, record: Value) -> AppResult<Value> {
        let source = self.data_source()?;
        self.provider.emit(&LifecycleEvent::BeforeSave, &record).await?;
        let saved = source.save(record).await?;
        self.provider.emit(&LifecycleEvent::AfterSave, &saved).await?;
        Ok(saved)
    }

    pub async fn remove(&mut self, id: &RecordId) -> AppResult<()> {
        let source = self.data_source()?;
        let payload = id.to_value();
        self.provider.emit(&LifecycleEvent::BeforeRemove, &payload).await?;
        source.remove(id).await?;
        self.provider.emit(&LifecycleEvent::AfterRemove, &payload).await
    }

    pub async fn export(&mut self, params: ListParams) -> AppResult<ExportPayload> {
        let source = self.data_source()?;
        if !source.supports_export() {
            return Err(AppError::not_implemented(
                "Export is not supported by this data source",
            ));
        }
        self.provider
            .emit(&LifecycleEvent::BeforeExport, &serde_json::to_value(&params)?)
            .await?;
        let payload = source.export(&params).await?;
        self.provider
            .emit(&LifecycleEvent::AfterExport, &payload_summary(&payload))
            .await?;
        Ok(payload)
    }

    pub async fn import(&mut self, file: ImportFile) -> AppResult<()> {
        let source = self.data_source()?;
        if !source.supports_import() {
            return Err(AppError::not_implemented(
                "Import is not supported by this data source",
            ));
        }
        let summary = json!({"name": file.name, "size": file.bytes.len()});
        self.provider.emit(&LifecycleEvent::BeforeImport, &summary).await?;
        source.import(file).await?;
        self.provider.emit(&LifecycleEvent::AfterImport, &summary).await
    }

    /// Runs the context action with `key`. `prepare` fills the
    /// row/selection/file part of the action context.
    pub async fn run_action(
        &self,
        runner: &ActionRunner,
        key: &str,
        prepare: impl FnOnce(ActionContext) -> ActionContext,
    ) -> AppResult<ActionOutcome> {
        let action = self
            .context
            .action(key)
            .ok_or_else(|| AppError::not_found(format!("Action '{key}' not found")))?;
        let ctx = prepare(self.context.action_context());
        runner.run(action, &ctx).await
    }

    fn data_source(&self) -> AppResult<DynDataSource> {
        self.context
            .data_source
            .clone()
            .ok_or_else(|| AppError::configuration("No data source configured"))
    }
}

fn payload_summary(payload: &ExportPayload) -> Value {
    match payload {
        ExportPayload::Binary(bytes) => json!({"kind": "binary", "size": bytes.len()}),
        ExportPayload::Text(text) => json!({"kind": "text", "size": text.len()}),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use vectra_core::error::ErrorKind;
    use vectra_core::types::TableColumn;
    use vectra_query::MemoryDataSource;

    use crate::events::{EventHandler, FnEventHandler};
    use crate::hooks::definitions::HookPoint;
    use crate::registry::Plugin;

    fn source() -> DynDataSource {
        Arc::new(MemoryDataSource::new(vec![
            json!({"id": 1, "name": "John"}),
            json!({"id": 2, "name": "Jane"}),
            json!({"id": 3, "name": "Bob"}),
        ]))
    }

    fn tracer(log: Arc<Mutex<Vec<String>>>) -> Arc<dyn EventHandler> {
        FnEventHandler::shared(move |event, _| {
            let log = log.clone();
            async move {
                log.lock().unwrap().push(event.to_string());
                Ok(())
            }
        })
    }

    #[derive(Debug)]
    struct SearchSpy(Arc<Mutex<Vec<String>>>);

    #[async_trait]
    impl Plugin for SearchSpy {
        fn name(&self) -> &str {
            "search-spy"
        }

        fn hooks(&self) -> Vec<HookPoint> {
            vec![HookPoint::OnSearch]
        }

        async fn on_search(&self, _ctx: &mut PluginContext, params: &ListParams) -> HookOutput {
            let filters = params.filters.clone().unwrap_or_default();
            self.0.lock().unwrap().push(format!("on_search:{}", filters.len()));
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_search_emits_events_around_hook_and_list() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let provider = Arc::new(CrudProvider::new());
        provider.register(Arc::new(SearchSpy(log.clone()))).await;
        provider.on(LifecycleEvent::BeforeSearch, tracer(log.clone()));
        provider.on(LifecycleEvent::AfterSearch, tracer(log.clone()));

        let mut controller =
            CrudController::new(provider, PluginContext::new().with_data_source(source()));
        let result = controller
            .search(ListParams::new().with_filter("name", json!("jo")))
            .await
            .unwrap();

        assert_eq!(result.total, 1);
        assert_eq!(
            *log.lock().unwrap(),
            ["before_search", "on_search:1", "after_search"]
        );
        assert_eq!(controller.context().search_params["name"], json!("jo"));
    }

    #[tokio::test]
    async fn test_failing_before_event_aborts_save() {
        let provider = Arc::new(CrudProvider::new());
        provider.on(
            LifecycleEvent::BeforeSave,
            FnEventHandler::shared(|_, record| async move {
                if record.get("name").is_none() {
                    return Err(AppError::validation("name is required"));
                }
                Ok(())
            }),
        );
        let mut controller =
            CrudController::new(provider, PluginContext::new().with_data_source(source()));

        let err = controller.save(json!({"id": 9})).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let all = controller.search(ListParams::new()).await.unwrap();
        assert_eq!(all.total, 3);

        controller.save(json!({"id": 9, "name": "Ann"})).await.unwrap();
        controller.remove(&RecordId::from(1)).await.unwrap();
        let all = controller.search(ListParams::new()).await.unwrap();
        assert_eq!(all.total, 3);
        assert_eq!(all.data[0]["id"], json!(2));
    }

    #[tokio::test]
    async fn test_missing_data_source_is_configuration_error() {
        let mut controller = CrudController::new(Arc::new(CrudProvider::new()), PluginContext::new());
        let err = controller.search(ListParams::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_table_change_updates_schema() {
        let mut controller = CrudController::new(
            Arc::new(CrudProvider::new()),
            PluginContext::new().with_table_schema(vec![
                TableColumn::new("id", "ID"),
                TableColumn::new("name", "Name"),
            ]),
        );
        controller
            .table_changed(TableChange::ColumnOrder {
                order: vec!["name".into()],
            })
            .await
            .unwrap();

        let props: Vec<_> = controller
            .context()
            .table_schema
            .iter()
            .map(|c| c.prop.as_str())
            .collect();
        assert_eq!(props, ["name", "id"]);
    }

    #[tokio::test]
    async fn test_export_runs_without_pagination() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let provider = Arc::new(CrudProvider::new());
        provider.on(LifecycleEvent::AfterExport, tracer(log.clone()));
        let mut controller =
            CrudController::new(provider, PluginContext::new().with_data_source(source()));

        let payload = controller
            .export(ListParams::new().with_pagination(1, 1))
            .await
            .unwrap();
        let ExportPayload::Text(text) = payload else {
            panic!("expected text export");
        };
        let rows: Vec<Value> = serde_json::from_str(&text).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(*log.lock().unwrap(), ["after_export"]);
    }
}
