//! Inline cell editing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use vectra_plugin::{HookOutput, HookPoint, Plugin, PluginContext};

/// Registry name.
pub const NAME: &str = "inline-edit";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditTrigger {
    #[default]
    Click,
    Dblclick,
    Manual,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    #[default]
    Cell,
    Row,
}

/// Plugin options. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InlineEditOptions {
    pub trigger: EditTrigger,
    pub mode: EditMode,
    pub auto_clear: bool,
}

impl Default for InlineEditOptions {
    fn default() -> Self {
        Self {
            trigger: EditTrigger::Click,
            mode: EditMode::Cell,
            auto_clear: true,
        }
    }
}

/// Edit settings published to the table, stored as the `inline-edit`
/// extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditConfig {
    pub trigger: EditTrigger,
    pub mode: EditMode,
    pub show_status: bool,
    pub auto_clear: bool,
}

/// Publishes an [`EditConfig`] before the table mounts and saves the row
/// through the data source when a cell edit closes.
///
/// A failed save is logged and not returned: the edit stays on screen and
/// the user can retry.
#[derive(Debug, Clone, Default)]
pub struct InlineEditPlugin {
    options: InlineEditOptions,
}

impl InlineEditPlugin {
    pub fn new(options: InlineEditOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Plugin for InlineEditPlugin {
    fn name(&self) -> &str {
        NAME
    }

    fn options(&self) -> Option<Value> {
        serde_json::to_value(&self.options).ok()
    }

    fn hooks(&self) -> Vec<HookPoint> {
        vec![HookPoint::BeforeMountTable, HookPoint::OnEditClosed]
    }

    async fn before_mount_table(&self, ctx: &mut PluginContext) -> HookOutput {
        ctx.insert_extension(
            NAME,
            EditConfig {
                trigger: self.options.trigger,
                mode: self.options.mode,
                show_status: true,
                auto_clear: self.options.auto_clear,
            },
        );
        Ok(None)
    }

    async fn on_edit_closed(&self, ctx: &mut PluginContext, row: &Value, column: &str) -> HookOutput {
        let Some(source) = ctx.data_source.clone() else {
            warn!("inline-edit: data source is required");
            return Ok(None);
        };

        match source.save(row.clone()).await {
            Ok(_) => debug!(column, "Edited row saved"),
            Err(e) => error!(column, error = %e, "Failed to save edited row"),
        }
        Ok(None)
    }
}
