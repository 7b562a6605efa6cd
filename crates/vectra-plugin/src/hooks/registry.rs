//! Hook registry: base handlers and the per-point ordered plugin index.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use super::definitions::HookPoint;
use super::handler::HookHandler;
use crate::registry::Plugin;

/// Hook handlers organized by hook point.
///
/// Plugins are appended per point in registration order; there is no
/// priority. At most one base handler exists per point.
#[derive(Debug, Default)]
pub struct HookRegistry {
    /// Hook point → host-level handler.
    base: RwLock<HashMap<HookPoint, Arc<dyn HookHandler>>>,
    /// Hook point → plugins declaring it, in registration order.
    plugins: RwLock<HashMap<HookPoint, Vec<Arc<dyn Plugin>>>>,
}

impl HookRegistry {
    /// Creates a new empty hook registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base handler for a point, replacing any previous one.
    pub async fn set_base(&self, hook: HookPoint, handler: Arc<dyn HookHandler>) {
        debug!(hook = %hook, "Base hook registered");
        self.base.write().await.insert(hook, handler);
    }

    /// Synchronous [`set_base`](Self::set_base) for exclusive owners.
    pub fn set_base_mut(&mut self, hook: HookPoint, handler: Arc<dyn HookHandler>) {
        debug!(hook = %hook, "Base hook registered");
        self.base.get_mut().insert(hook, handler);
    }

    /// Removes the base handler of a point.
    pub async fn remove_base(&self, hook: &HookPoint) -> bool {
        self.base.write().await.remove(hook).is_some()
    }

    /// Indexes `plugin` under every point it declares.
    pub async fn index_plugin(&self, plugin: Arc<dyn Plugin>) {
        let hooks = plugin.hooks();
        if hooks.is_empty() {
            return;
        }

        let mut index = self.plugins.write().await;
        for hook in hooks {
            let entries = index.entry(hook.clone()).or_default();
            if entries.iter().any(|p| p.name() == plugin.name()) {
                continue;
            }
            debug!(hook = %hook, plugin = %plugin.name(), "Plugin hook indexed");
            entries.push(plugin.clone());
        }
    }

    /// Removes a plugin from every point.
    pub async fn unindex_plugin(&self, name: &str) {
        let mut index = self.plugins.write().await;
        for entries in index.values_mut() {
            entries.retain(|p| p.name() != name);
        }
        index.retain(|_, entries| !entries.is_empty());
    }

    /// Base handler of a point.
    pub async fn base(&self, hook: &HookPoint) -> Option<Arc<dyn HookHandler>> {
        self.base.read().await.get(hook).cloned()
    }

    /// Plugins declaring a point, in registration order.
    pub async fn plugins_for(&self, hook: &HookPoint) -> Vec<Arc<dyn Plugin>> {
        self.plugins
            .read()
            .await
            .get(hook)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns whether anything handles a point.
    pub async fn has_handlers(&self, hook: &HookPoint) -> bool {
        self.base.read().await.contains_key(hook)
            || self
                .plugins
                .read()
                .await
                .get(hook)
                .is_some_and(|entries| !entries.is_empty())
    }

    /// Number of plugins declaring a point.
    pub async fn handler_count(&self, hook: &HookPoint) -> usize {
        self.plugins
            .read()
            .await
            .get(hook)
            .map(|entries| entries.len())
            .unwrap_or(0)
    }
}
