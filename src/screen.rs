//! Wires a JSON dataset into a CRUD screen: data source, built-in plugins,
//! and mount hooks.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use vectra_core::config::AppConfig;
use vectra_core::result::AppResult;
use vectra_core::types::TableColumn;
use vectra_plugin::{CrudController, CrudProvider, Plugin, PluginContext};
use vectra_plugins::export::{self, ExportPlugin};
use vectra_plugins::{BuiltinOptions, FileKeyValueStore, builtin_plugin};
use vectra_query::MemoryDataSource;

use crate::commands::read_json;

/// Permission the CLI's export action requires.
pub const EXPORT_PERMISSION: &str = "data:export";

/// A mounted screen.
#[derive(Debug)]
pub struct Screen {
    pub controller: CrudController,
    /// The export plugin, when enabled.
    pub export: Option<Arc<ExportPlugin>>,
    pub source: Arc<MemoryDataSource<Value>>,
}

/// Builds the provider from `config.plugins.enabled`, installs it against a
/// context over the rows of `data`, and runs the search and table mount
/// hooks.
///
/// The page key is the file stem of `data`, so column layouts persist per
/// dataset.
pub async fn open(config: &AppConfig, data: &Path, export_dir: PathBuf) -> AppResult<Screen> {
    let rows: Vec<Value> = read_json(data).await?;
    let columns = derive_columns(&rows);
    let page_key = data
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "default".to_string());

    let store = FileKeyValueStore::new(&config.persist.directory).await?;
    let opts = BuiltinOptions {
        store: Arc::new(store),
        key_prefix: config.persist.key_prefix.clone(),
        export_dir,
    };

    let provider = CrudProvider::new();
    let mut export_plugin = None;
    for name in &config.plugins.enabled {
        let plugin: Arc<dyn Plugin> = if name == export::NAME {
            let plugin =
                Arc::new(ExportPlugin::new(opts.export_dir.clone()).with_permission(EXPORT_PERMISSION));
            export_plugin = Some(plugin.clone());
            plugin
        } else if let Some(plugin) = builtin_plugin(name, &opts) {
            plugin
        } else {
            warn!(plugin = %name, "Unknown built-in plugin, skipping");
            continue;
        };
        provider.register(plugin).await;
    }

    let source = Arc::new(MemoryDataSource::new(rows));
    let context = PluginContext::new()
        .with_data_source(source.clone())
        .with_page_key(page_key.clone())
        .with_table_schema(columns);

    let mut controller = CrudController::new(Arc::new(provider), context);
    controller.install().await?;
    controller.mount_search().await?;
    controller.mount_table().await?;

    info!(
        page_key = %page_key,
        plugins = controller.provider().plugin_registry().count().await,
        "Screen mounted"
    );

    Ok(Screen {
        controller,
        export: export_plugin,
        source,
    })
}

/// One column per top-level key, in first-seen order across `rows`.
pub fn derive_columns(rows: &[Value]) -> Vec<TableColumn> {
    let mut columns: Vec<TableColumn> = Vec::new();
    for row in rows {
        let Some(object) = row.as_object() else {
            continue;
        };
        for key in object.keys() {
            if !columns.iter().any(|c| &c.prop == key) {
                columns.push(TableColumn::new(key.clone(), key.clone()));
            }
        }
    }
    columns
}
