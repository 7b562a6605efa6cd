//! Toolbar import action.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use vectra_core::error::AppError;
use vectra_core::result::AppResult;
use vectra_plugin::{Action, ActionContext, Plugin, PluginContext};

/// Registry name.
pub const NAME: &str = "import-basic";

/// Key of the action added to the context.
pub const ACTION_KEY: &str = "import";

/// Adds an `import` action when the data source can import. The action
/// hands the file from its context to the data source; running it without
/// a file is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportPlugin;

impl ImportPlugin {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Plugin for ImportPlugin {
    fn name(&self) -> &str {
        NAME
    }

    async fn install(&self, ctx: &mut PluginContext) -> AppResult<()> {
        let supported = ctx
            .data_source
            .as_ref()
            .is_some_and(|source| source.supports_import());
        if !supported {
            debug!("Data source does not support import, skipping action");
            return Ok(());
        }

        let action = Action::new(ACTION_KEY, "Import", |action_ctx: ActionContext| async move {
            let Some(file) = action_ctx.file else {
                warn!("import: no file selected");
                return Ok(());
            };
            let source = action_ctx
                .data_source
                .ok_or_else(|| AppError::configuration("No data source configured"))?;

            let name = file.name.clone();
            source.import(file).await?;
            info!(file = %name, "Import completed");
            Ok(())
        })
        .tooltip("Import data");

        ctx.add_action(action);
        Ok(())
    }
}
