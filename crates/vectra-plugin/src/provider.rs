//! Crud provider: plugin registration, installation, hook dispatch, and
//! the lifecycle event bus.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{error, info};

use vectra_core::error::{AppError, ErrorKind};
use vectra_core::result::AppResult;

use crate::context::PluginContext;
use crate::events::{EventBus, EventHandler, LifecycleEvent};
use crate::hooks::definitions::{HookEvent, HookOutput, HookPoint};
use crate::hooks::dispatcher::HookDispatcher;
use crate::hooks::handler::HookHandler;
use crate::hooks::registry::HookRegistry;
use crate::registry::{Plugin, PluginRegistry};

/// Central extensibility hub of one screen.
#[derive(Debug, Default)]
pub struct CrudProvider {
    /// Registered plugins.
    plugin_registry: PluginRegistry,
    /// Base hooks and the per-point plugin index.
    hook_registry: HookRegistry,
    /// Lifecycle events.
    events: EventBus,
    /// Held across registry and hook index updates so both see plugins in
    /// the same order.
    membership: Mutex<()>,
}

impl CrudProvider {
    /// Creates a provider with no plugins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a base hook, which runs before every plugin hook of `point`.
    pub fn with_base_hook(mut self, point: HookPoint, handler: Arc<dyn HookHandler>) -> Self {
        self.hook_registry.set_base_mut(point, handler);
        self
    }

    /// Sets a base hook on a shared provider.
    pub async fn set_base_hook(&self, point: HookPoint, handler: Arc<dyn HookHandler>) {
        self.hook_registry.set_base(point, handler).await;
    }

    /// Registers a plugin and indexes its hooks. A duplicate name is
    /// ignored with a warning. Returns whether the plugin was added.
    pub async fn register(&self, plugin: Arc<dyn Plugin>) -> bool {
        let _membership = self.membership.lock().await;
        if !self.plugin_registry.register(plugin.clone()).await {
            return false;
        }
        self.hook_registry.index_plugin(plugin).await;
        true
    }

    /// Registers several plugins in order.
    pub async fn register_all<I>(&self, plugins: I) -> usize
    where
        I: IntoIterator<Item = Arc<dyn Plugin>>,
    {
        let mut added = 0;
        for plugin in plugins {
            if self.register(plugin).await {
                added += 1;
            }
        }
        added
    }

    /// Removes a plugin and its hooks.
    pub async fn unregister(&self, name: &str) -> bool {
        let _membership = self.membership.lock().await;
        let removed = self.plugin_registry.unregister(name).await.is_some();
        if removed {
            self.hook_registry.unindex_plugin(name).await;
        }
        removed
    }

    /// Installs every plugin against `ctx`, one after another in
    /// registration order. The first failure stops the remaining installs;
    /// plugins already installed are not rolled back.
    pub async fn install(&self, ctx: &mut PluginContext) -> AppResult<()> {
        let plugins = self.plugin_registry.all_plugins().await;

        for plugin in &plugins {
            plugin.install(ctx).await.map_err(|e| {
                error!(plugin = %plugin.name(), error = %e, "Plugin install failed");
                AppError::with_source(
                    ErrorKind::Plugin,
                    format!("Plugin '{}' install failed: {}", plugin.name(), e.message),
                    e,
                )
            })?;
            info!(plugin = %plugin.name(), "Plugin installed");
        }

        Ok(())
    }

    /// Runs a hook: the base hook first, then every plugin declaring the
    /// point. Returns the first non-`None` result.
    pub async fn run_hook(&self, ctx: &mut PluginContext, event: HookEvent<'_>) -> HookOutput {
        HookDispatcher::new(&self.hook_registry)
            .dispatch(ctx, &event)
            .await
    }

    /// Runs a custom hook by name.
    pub async fn run_custom_hook(
        &self,
        ctx: &mut PluginContext,
        name: &str,
        args: &[Value],
    ) -> HookOutput {
        self.run_hook(ctx, HookEvent::Custom { name, args }).await
    }

    /// Adds an event handler.
    pub fn on(&self, event: LifecycleEvent, handler: Arc<dyn EventHandler>) -> bool {
        self.events.on(event, handler)
    }

    /// Removes an event handler.
    pub fn off(&self, event: &LifecycleEvent, handler: &Arc<dyn EventHandler>) -> bool {
        self.events.off(event, handler)
    }

    /// Emits an event to its handlers in order.
    pub async fn emit(&self, event: &LifecycleEvent, payload: &Value) -> AppResult<()> {
        self.events.emit(event, payload).await
    }

    /// Returns the event bus.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Returns the plugin registry.
    pub fn plugin_registry(&self) -> &PluginRegistry {
        &self.plugin_registry
    }

    /// Returns the hook registry.
    pub fn hook_registry(&self) -> &HookRegistry {
        &self.hook_registry
    }

    /// Names of the registered plugins in registration order.
    pub async fn plugin_names(&self) -> Vec<String> {
        self.plugin_registry.names().await
    }
}
