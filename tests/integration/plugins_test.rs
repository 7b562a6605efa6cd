//! Integration tests for the built-in plugins running under a provider.

use std::sync::Arc;

use serde_json::{Value, json};

use vectra_core::traits::{DataSource, ImportFile, KeyValueStore};
use vectra_core::types::{ListParams, RecordId};
use vectra_plugin::{
    Action, ActionContext, ActionOutcome, ActionRunner, CrudProvider, LogNotifier, TableChange,
};
use vectra_plugins::batch_actions::{self, BatchSelection};
use vectra_plugins::column_persist::ColumnPersistPlugin;
use vectra_plugins::export::{self, ExportPlugin};
use vectra_plugins::inline_edit::{self, EditConfig};
use vectra_plugins::virtual_scroll::{self, ScrollConfig};
use vectra_plugins::{
    BuiltinOptions, FileKeyValueStore, ImportPlugin, MemoryKeyValueStore, builtin_plugin,
};

use crate::helpers::TestScreen;

async fn provider_with(names: &[&str], opts: &BuiltinOptions) -> CrudProvider {
    let provider = CrudProvider::new();
    for name in names {
        let plugin = builtin_plugin(name, opts).expect("unknown built-in plugin");
        assert!(provider.register(plugin).await);
    }
    provider
}

#[tokio::test]
async fn test_column_layout_survives_a_new_screen() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileKeyValueStore::new(dir.path()).await.unwrap());
    let opts = BuiltinOptions {
        store: store.clone(),
        ..BuiltinOptions::default()
    };

    let mut first = TestScreen::new(provider_with(&["column-persist"], &opts).await).await;
    first.controller.mount_table().await.unwrap();
    first
        .controller
        .table_changed(TableChange::ColumnOrder {
            order: vec!["name".into(), "id".into()],
        })
        .await
        .unwrap();
    first
        .controller
        .table_changed(TableChange::ColumnVisibility {
            prop: "city".into(),
            visible: false,
        })
        .await
        .unwrap();
    first
        .controller
        .table_changed(TableChange::ColumnResize {
            prop: "age".into(),
            width: 90.0,
        })
        .await
        .unwrap();

    let stored = store.get("vectra-crud-columns-users").await.unwrap().unwrap();
    let stored: Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(stored["hidden"], json!(["city"]));
    assert_eq!(stored["widths"]["age"], json!(90.0));

    let mut second = TestScreen::new(provider_with(&["column-persist"], &opts).await).await;
    assert_eq!(second.column_order(), ["id", "name", "age", "status", "city"]);
    second.controller.mount_table().await.unwrap();

    assert_eq!(second.column_order(), ["name", "id", "age", "status", "city"]);
    let schema = &second.controller.context().table_schema;
    assert!(!schema[4].visible);
    assert_eq!(schema[2].width, Some(90.0));
    assert_eq!(schema[1].width, Some(60.0));
}

#[tokio::test]
async fn test_column_persist_without_page_key_is_skipped() {
    let store = Arc::new(MemoryKeyValueStore::new());
    let provider = CrudProvider::new();
    provider
        .register(Arc::new(ColumnPersistPlugin::new(store.clone())))
        .await;

    let mut screen = TestScreen::new(provider).await;
    screen.controller.context_mut().page_key = None;
    screen.controller.mount_table().await.unwrap();
    screen
        .controller
        .table_changed(TableChange::Sort { sort: None })
        .await
        .unwrap();
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_inline_edit_saves_closed_rows() {
    let opts = BuiltinOptions::default();
    let mut screen = TestScreen::new(provider_with(&["inline-edit"], &opts).await).await;
    screen.controller.mount_table().await.unwrap();
    assert!(
        screen
            .controller
            .context()
            .extension::<EditConfig>(inline_edit::NAME)
            .is_some()
    );

    screen
        .controller
        .edit_closed(&json!({"id": 2, "name": "Janet", "age": 26}), "name")
        .await
        .unwrap();

    let result = screen
        .controller
        .search(ListParams::new().with_filter("name", json!("janet")))
        .await
        .unwrap();
    assert_eq!(result.total, 1);
    assert_eq!(result.data[0]["age"], json!(26));
}

#[tokio::test]
async fn test_export_and_import_actions() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = Arc::new(ExportPlugin::new(dir.path()));
    let provider = CrudProvider::new();
    provider.register(exporter.clone()).await;
    provider.register(Arc::new(ImportPlugin::new())).await;

    let mut screen = TestScreen::new(provider).await;
    let keys: Vec<&str> = screen
        .controller
        .context()
        .actions
        .iter()
        .map(|a| a.key.as_str())
        .collect();
    assert_eq!(keys, ["export", "import"]);

    screen
        .controller
        .search(ListParams::new().with_filter("city", json!("oslo")))
        .await
        .unwrap();

    let runner = ActionRunner::new(Arc::new(LogNotifier::default()));
    let outcome = screen
        .controller
        .run_action(&runner, export::ACTION_KEY, |ctx| ctx)
        .await
        .unwrap();
    assert_eq!(outcome, ActionOutcome::Completed);

    let written = std::fs::read(exporter.last_export().unwrap()).unwrap();
    let rows: Vec<Value> = serde_json::from_slice(&written).unwrap();
    assert_eq!(rows.len(), 2);

    let file = ImportFile::new("more.json", r#"[{"id": 6, "name": "Zed"}]"#);
    screen
        .controller
        .run_action(&runner, "import", |ctx| ctx.with_file(file))
        .await
        .unwrap();
    assert_eq!(screen.source.len().await, 6);
}

#[tokio::test]
async fn test_batch_selection_feeds_a_batch_action() {
    let opts = BuiltinOptions::default();
    let mut screen = TestScreen::new(provider_with(&["batch-actions"], &opts).await).await;

    let source = screen.source.clone();
    screen.controller.context_mut().add_action(
        Action::new("delete", "Delete", move |ctx: ActionContext| {
            let source = source.clone();
            async move {
                for id in &ctx.selection {
                    source.remove(id).await?;
                }
                Ok(())
            }
        })
        .variant("danger")
        .confirm("Delete the selected rows?"),
    );

    let selection = screen
        .controller
        .context_mut()
        .extension_mut::<BatchSelection>(batch_actions::NAME)
        .unwrap();
    selection.select(RecordId::from(4));
    selection.select(RecordId::from(2));
    selection.toggle(RecordId::from(5));
    let selected = selection.selected().to_vec();

    let runner = ActionRunner::new(Arc::new(LogNotifier::default()));
    screen
        .controller
        .run_action(&runner, "delete", |ctx| ctx.with_selection(selected))
        .await
        .unwrap();

    let remaining: Vec<Value> = screen.source.snapshot().await;
    let ids: Vec<i64> = remaining.iter().filter_map(|r| r["id"].as_i64()).collect();
    assert_eq!(ids, [1, 3]);
}

#[tokio::test]
async fn test_virtual_scroll_and_duplicate_registration() {
    let opts = BuiltinOptions::default();
    let provider = provider_with(&["virtual-scroll", "row-expand"], &opts).await;
    assert!(
        !provider
            .register(builtin_plugin("virtual-scroll", &opts).unwrap())
            .await
    );
    assert_eq!(provider.plugin_names().await, ["virtual-scroll", "row-expand"]);

    let mut screen = TestScreen::new(provider).await;
    screen.controller.mount_table().await.unwrap();
    let scroll = screen
        .controller
        .context()
        .extension::<ScrollConfig>(virtual_scroll::NAME)
        .unwrap();
    assert_eq!(scroll.r_height, 40);
    assert!(screen.controller.context().has_extension("row-expand"));
}
