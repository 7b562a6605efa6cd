//! Plugin registry: stores registered plugin instances in order.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{info, warn};

use vectra_core::result::AppResult;
use vectra_core::types::ListParams;

use crate::context::PluginContext;
use crate::hooks::definitions::{HookEvent, HookOutput, HookPoint, TableChange};

/// Trait that all plugins implement.
///
/// Every hook method defaults to a no-op. A hook method is only invoked
/// for the points listed by [`hooks`](Plugin::hooks).
#[async_trait]
pub trait Plugin: Send + Sync + std::fmt::Debug + 'static {
    /// Unique registry key.
    fn name(&self) -> &str;

    /// Effective options, for diagnostics.
    fn options(&self) -> Option<Value> {
        None
    }

    /// Hook points this plugin handles.
    fn hooks(&self) -> Vec<HookPoint> {
        Vec::new()
    }

    /// One-time setup against the shared context.
    async fn install(&self, _ctx: &mut PluginContext) -> AppResult<()> {
        Ok(())
    }

    async fn before_mount_search(&self, _ctx: &mut PluginContext) -> HookOutput {
        Ok(None)
    }

    async fn before_mount_table(&self, _ctx: &mut PluginContext) -> HookOutput {
        Ok(None)
    }

    async fn before_mount_form(&self, _ctx: &mut PluginContext) -> HookOutput {
        Ok(None)
    }

    async fn on_search(&self, _ctx: &mut PluginContext, _params: &ListParams) -> HookOutput {
        Ok(None)
    }

    async fn on_table_change(&self, _ctx: &mut PluginContext, _change: &TableChange) -> HookOutput {
        Ok(None)
    }

    async fn on_form_submit(&self, _ctx: &mut PluginContext, _values: &Value) -> HookOutput {
        Ok(None)
    }

    async fn on_edit_closed(
        &self,
        _ctx: &mut PluginContext,
        _row: &Value,
        _column: &str,
    ) -> HookOutput {
        Ok(None)
    }

    /// Handles a [`HookPoint::Custom`] hook.
    async fn on_custom(&self, _ctx: &mut PluginContext, _name: &str, _args: &[Value]) -> HookOutput {
        Ok(None)
    }
}

/// Routes an event to the typed method of `plugin`.
pub(crate) async fn invoke(
    plugin: &dyn Plugin,
    ctx: &mut PluginContext,
    event: &HookEvent<'_>,
) -> HookOutput {
    match *event {
        HookEvent::BeforeMountSearch => plugin.before_mount_search(ctx).await,
        HookEvent::BeforeMountTable => plugin.before_mount_table(ctx).await,
        HookEvent::BeforeMountForm => plugin.before_mount_form(ctx).await,
        HookEvent::OnSearch(params) => plugin.on_search(ctx, params).await,
        HookEvent::OnTableChange(change) => plugin.on_table_change(ctx, change).await,
        HookEvent::OnFormSubmit(values) => plugin.on_form_submit(ctx, values).await,
        HookEvent::OnEditClosed { row, column } => plugin.on_edit_closed(ctx, row, column).await,
        HookEvent::Custom { name, args } => plugin.on_custom(ctx, name, args).await,
    }
}

/// Registry of all registered plugins, in registration order.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    plugins: RwLock<Vec<Arc<dyn Plugin>>>,
}

impl PluginRegistry {
    /// Creates a new empty plugin registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plugin. A name already present is ignored with a warning
    /// and the existing plugin is kept. Returns whether it was added.
    pub async fn register(&self, plugin: Arc<dyn Plugin>) -> bool {
        let mut plugins = self.plugins.write().await;

        if plugins.iter().any(|p| p.name() == plugin.name()) {
            warn!(plugin = %plugin.name(), "Plugin already registered, ignoring");
            return false;
        }

        info!(
            plugin = %plugin.name(),
            hooks = plugin.hooks().len(),
            "Registering plugin"
        );
        plugins.push(plugin);
        true
    }

    /// Unregisters a plugin by name.
    pub async fn unregister(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        let mut plugins = self.plugins.write().await;
        let pos = plugins.iter().position(|p| p.name() == name)?;
        info!(plugin = %name, "Plugin unregistered");
        Some(plugins.remove(pos))
    }

    /// Gets a plugin by name.
    pub async fn get(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        self.plugins
            .read()
            .await
            .iter()
            .find(|p| p.name() == name)
            .cloned()
    }

    /// All plugins in registration order.
    pub async fn all_plugins(&self) -> Vec<Arc<dyn Plugin>> {
        self.plugins.read().await.clone()
    }

    /// Registered names in registration order.
    pub async fn names(&self) -> Vec<String> {
        self.plugins
            .read()
            .await
            .iter()
            .map(|p| p.name().to_string())
            .collect()
    }

    /// Returns plugin count.
    pub async fn count(&self) -> usize {
        self.plugins.read().await.len()
    }

    /// Checks whether a plugin is registered.
    pub async fn contains(&self, name: &str) -> bool {
        self.plugins.read().await.iter().any(|p| p.name() == name)
    }
}
