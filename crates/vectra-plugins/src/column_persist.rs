//! Column layout persistence per page key.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use vectra_core::result::AppResult;
use vectra_core::traits::KeyValueStore;
use vectra_core::types::TableColumn;
use vectra_plugin::{HookOutput, HookPoint, Plugin, PluginContext, TableChange};

/// Registry name.
pub const NAME: &str = "column-persist";

/// Default storage key prefix.
pub const DEFAULT_KEY_PREFIX: &str = "vectra-crud-columns";

/// Persisted layout of one table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnState {
    pub visible: Vec<String>,
    pub hidden: Vec<String>,
    pub widths: BTreeMap<String, f64>,
    pub order: Vec<String>,
}

impl ColumnState {
    /// Captures the layout of `columns`.
    pub fn capture(columns: &[TableColumn]) -> Self {
        let mut state = Self::default();
        for column in columns {
            if column.visible {
                state.visible.push(column.prop.clone());
            } else {
                state.hidden.push(column.prop.clone());
            }
            if let Some(width) = column.width.filter(|w| *w != 0.0) {
                state.widths.insert(column.prop.clone(), width);
            }
            state.order.push(column.prop.clone());
        }
        state
    }

    /// Applies the layout to `columns`. Columns missing from a non-empty
    /// `order` follow the ordered ones in their current relative order.
    pub fn restore(&self, columns: &mut Vec<TableColumn>) {
        for column in columns.iter_mut() {
            if self.hidden.contains(&column.prop) {
                column.visible = false;
            }
            if let Some(width) = self.widths.get(&column.prop).filter(|w| **w != 0.0) {
                column.width = Some(*width);
            }
        }

        if self.order.is_empty() {
            return;
        }
        TableChange::ColumnOrder {
            order: self.order.clone(),
        }
        .apply(columns);
    }
}

/// Restores the column layout before the table mounts and saves it after
/// every table change.
///
/// Requires a page key; without one the plugin logs a warning and does
/// nothing.
#[derive(Debug, Clone)]
pub struct ColumnPersistPlugin {
    store: Arc<dyn KeyValueStore>,
    key_prefix: String,
}

impl ColumnPersistPlugin {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_prefix(store, DEFAULT_KEY_PREFIX)
    }

    pub fn with_prefix(store: Arc<dyn KeyValueStore>, key_prefix: impl Into<String>) -> Self {
        Self {
            store,
            key_prefix: key_prefix.into(),
        }
    }

    /// Storage key of a page.
    pub fn storage_key(&self, page_key: &str) -> String {
        format!("{}-{}", self.key_prefix, page_key)
    }

    /// Deletes the stored layout of a page.
    pub async fn clear(&self, page_key: &str) -> AppResult<()> {
        self.store.remove(&self.storage_key(page_key)).await
    }

    /// Stored layout of a page, if present and readable.
    pub async fn load(&self, page_key: &str) -> AppResult<Option<ColumnState>> {
        let Some(stored) = self.store.get(&self.storage_key(page_key)).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&stored) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                warn!(page_key = %page_key, error = %e, "Failed to load column state");
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl Plugin for ColumnPersistPlugin {
    fn name(&self) -> &str {
        NAME
    }

    fn options(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({"keyPrefix": self.key_prefix}))
    }

    fn hooks(&self) -> Vec<HookPoint> {
        vec![HookPoint::BeforeMountTable, HookPoint::OnTableChange]
    }

    async fn before_mount_table(&self, ctx: &mut PluginContext) -> HookOutput {
        let Some(page_key) = ctx.page_key.clone() else {
            warn!("column-persist: page key is required");
            return Ok(None);
        };

        match self.load(&page_key).await {
            Ok(Some(state)) => {
                state.restore(&mut ctx.table_schema);
                debug!(page_key = %page_key, columns = ctx.table_schema.len(), "Column state restored");
            }
            Ok(None) => {}
            Err(e) => warn!(page_key = %page_key, error = %e, "Failed to read column state"),
        }
        Ok(None)
    }

    async fn on_table_change(&self, ctx: &mut PluginContext, _change: &TableChange) -> HookOutput {
        let Some(page_key) = ctx.page_key.as_deref() else {
            return Ok(None);
        };

        let state = ColumnState::capture(&ctx.table_schema);
        let serialized = serde_json::to_string(&state)?;
        match self.store.set(&self.storage_key(page_key), &serialized).await {
            Ok(()) => debug!(page_key = %page_key, "Column state saved"),
            Err(e) => warn!(page_key = %page_key, error = %e, "Failed to save column state"),
        }
        Ok(None)
    }
}
