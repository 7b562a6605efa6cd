//! Toolbar export action.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::fs;
use tracing::{debug, info};

use vectra_core::error::{AppError, ErrorKind};
use vectra_core::result::AppResult;
use vectra_core::traits::ExportPayload;
use vectra_core::types::ListParams;
use vectra_plugin::{Action, ActionContext, Plugin, PluginContext};

/// Registry name.
pub const NAME: &str = "export-basic";

/// Key of the action added to the context.
pub const ACTION_KEY: &str = "export";

/// Adds an `export` action when the data source can export.
///
/// The action exports every record matching the current search filters and
/// writes the payload to `<dir>/export-<millis>.<ext>`: `json` for text
/// payloads, `bin` for binary ones.
#[derive(Debug, Clone)]
pub struct ExportPlugin {
    dir: PathBuf,
    permission: Option<String>,
    last_export: Arc<Mutex<Option<PathBuf>>>,
}

impl ExportPlugin {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            permission: None,
            last_export: Arc::new(Mutex::new(None)),
        }
    }

    /// Permission the export action requires.
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path written by the most recent successful export.
    pub fn last_export(&self) -> Option<PathBuf> {
        self.last_export.lock().ok().and_then(|last| last.clone())
    }
}

async fn write_export(dir: &Path, ctx: &ActionContext) -> AppResult<PathBuf> {
    let source = ctx
        .data_source
        .clone()
        .ok_or_else(|| AppError::configuration("No data source configured"))?;

    let mut params = ListParams::new();
    if !ctx.filters.is_empty() {
        params.filters = Some(ctx.filters.clone());
    }

    let (bytes, ext) = match source.export(&params).await? {
        ExportPayload::Text(text) => (text.into_bytes(), "json"),
        ExportPayload::Binary(bytes) => (bytes, "bin"),
    };

    fs::create_dir_all(dir).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Storage,
            format!("Failed to create export directory: {}", dir.display()),
            e,
        )
    })?;
    let path = dir.join(format!("export-{}.{ext}", Utc::now().timestamp_millis()));
    fs::write(&path, &bytes).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Storage,
            format!("Failed to write export: {}", path.display()),
            e,
        )
    })?;

    info!(path = %path.display(), bytes = bytes.len(), "Export written");
    Ok(path)
}

#[async_trait]
impl Plugin for ExportPlugin {
    fn name(&self) -> &str {
        NAME
    }

    fn options(&self) -> Option<serde_json::Value> {
        Some(json!({
            "dir": self.dir.display().to_string(),
            "permission": self.permission,
        }))
    }

    async fn install(&self, ctx: &mut PluginContext) -> AppResult<()> {
        let supported = ctx
            .data_source
            .as_ref()
            .is_some_and(|source| source.supports_export());
        if !supported {
            debug!("Data source does not support export, skipping action");
            return Ok(());
        }

        let dir = self.dir.clone();
        let last_export = self.last_export.clone();
        let mut action = Action::new(ACTION_KEY, "Export", move |action_ctx: ActionContext| {
            let dir = dir.clone();
            let last_export = last_export.clone();
            async move {
                let path = write_export(&dir, &action_ctx).await?;
                if let Ok(mut last) = last_export.lock() {
                    *last = Some(path);
                }
                Ok(())
            }
        })
        .variant("primary")
        .tooltip("Export data");
        if let Some(permission) = &self.permission {
            action = action.permission(permission.clone());
        }

        ctx.add_action(action);
        Ok(())
    }
}
