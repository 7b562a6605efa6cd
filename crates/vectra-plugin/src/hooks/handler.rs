//! Host-level hook handlers.

use std::sync::Arc;

use async_trait::async_trait;

use crate::context::PluginContext;
use crate::hooks::definitions::{HookEvent, HookOutput};

/// A base hook registered by the host rather than by a plugin. It runs
/// before every plugin hook of the same point.
#[async_trait]
pub trait HookHandler: Send + Sync + std::fmt::Debug {
    /// Handles a hook invocation.
    async fn handle(&self, ctx: &mut PluginContext, event: &HookEvent<'_>) -> HookOutput;
}

type HandlerFn = dyn Fn(&mut PluginContext, &HookEvent<'_>) -> HookOutput + Send + Sync;

/// A closure-based hook handler for quick handler creation.
///
/// The closure runs synchronously; implement [`HookHandler`] directly when
/// the handler needs to await.
pub struct ClosureHandler {
    /// Label used in diagnostics.
    label: String,
    /// Handler function.
    handler: Arc<HandlerFn>,
}

impl ClosureHandler {
    /// Creates a new closure-based handler.
    pub fn new<F>(label: &str, handler: F) -> Self
    where
        F: Fn(&mut PluginContext, &HookEvent<'_>) -> HookOutput + Send + Sync + 'static,
    {
        Self {
            label: label.to_string(),
            handler: Arc::new(handler),
        }
    }

    /// Wraps the closure into an `Arc<dyn HookHandler>`.
    pub fn wrap<F>(label: &str, handler: F) -> Arc<dyn HookHandler>
    where
        F: Fn(&mut PluginContext, &HookEvent<'_>) -> HookOutput + Send + Sync + 'static,
    {
        Arc::new(Self::new(label, handler))
    }
}

impl std::fmt::Debug for ClosureHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosureHandler")
            .field("label", &self.label)
            .field("handler", &"<closure>")
            .finish()
    }
}

#[async_trait]
impl HookHandler for ClosureHandler {
    async fn handle(&self, ctx: &mut PluginContext, event: &HookEvent<'_>) -> HookOutput {
        (self.handler)(ctx, event)
    }
}
