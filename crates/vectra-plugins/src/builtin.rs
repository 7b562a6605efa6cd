//! Lookup of built-in plugins by registry name.

use std::path::PathBuf;
use std::sync::Arc;

use vectra_core::traits::KeyValueStore;
use vectra_plugin::Plugin;

use crate::batch_actions::{self, BatchActionsPlugin};
use crate::column_persist::{self, ColumnPersistPlugin};
use crate::export::{self, ExportPlugin};
use crate::import::{self, ImportPlugin};
use crate::inline_edit::{self, InlineEditPlugin};
use crate::row_expand::{self, RowExpandPlugin};
use crate::storage::MemoryKeyValueStore;
use crate::virtual_scroll::{self, VirtualScrollPlugin};

/// Every built-in plugin name.
pub const BUILTIN_NAMES: [&str; 7] = [
    column_persist::NAME,
    inline_edit::NAME,
    export::NAME,
    import::NAME,
    virtual_scroll::NAME,
    row_expand::NAME,
    batch_actions::NAME,
];

/// Shared dependencies of the built-in plugins.
#[derive(Debug, Clone)]
pub struct BuiltinOptions {
    /// Store used by `column-persist`.
    pub store: Arc<dyn KeyValueStore>,
    /// Storage key prefix used by `column-persist`.
    pub key_prefix: String,
    /// Output directory of `export-basic`.
    pub export_dir: PathBuf,
}

impl Default for BuiltinOptions {
    fn default() -> Self {
        Self {
            store: Arc::new(MemoryKeyValueStore::new()),
            key_prefix: column_persist::DEFAULT_KEY_PREFIX.to_string(),
            export_dir: PathBuf::from("exports"),
        }
    }
}

/// Creates the built-in plugin called `name` with default options, or
/// `None` for an unknown name.
pub fn builtin_plugin(name: &str, opts: &BuiltinOptions) -> Option<Arc<dyn Plugin>> {
    let plugin: Arc<dyn Plugin> = match name {
        column_persist::NAME => Arc::new(ColumnPersistPlugin::with_prefix(
            opts.store.clone(),
            opts.key_prefix.clone(),
        )),
        inline_edit::NAME => Arc::new(InlineEditPlugin::default()),
        export::NAME => Arc::new(ExportPlugin::new(opts.export_dir.clone())),
        import::NAME => Arc::new(ImportPlugin::new()),
        virtual_scroll::NAME => Arc::new(VirtualScrollPlugin::default()),
        row_expand::NAME => Arc::new(RowExpandPlugin::default()),
        batch_actions::NAME => Arc::new(BatchActionsPlugin::default()),
        _ => return None,
    };
    Some(plugin)
}
