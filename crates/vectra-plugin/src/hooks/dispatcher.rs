//! Hook dispatcher: runs one hook point against the shared context.
//!
//! - The base handler of the point, if any, runs first
//! - Plugins declaring the point run next, one at a time, in registration
//!   order
//! - The result is the first `Some` produced in that order; later results
//!   are discarded but their side effects remain
//! - An `Err` stops the chain and is returned to the caller

use tracing::{debug, error};

use vectra_core::error::AppError;

use super::definitions::{HookEvent, HookOutput};
use super::registry::HookRegistry;
use crate::context::PluginContext;
use crate::registry::invoke;

/// Dispatches hook events to the handlers of a [`HookRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct HookDispatcher<'r> {
    registry: &'r HookRegistry,
}

impl<'r> HookDispatcher<'r> {
    /// Creates a dispatcher over `registry`.
    pub fn new(registry: &'r HookRegistry) -> Self {
        Self { registry }
    }

    /// Dispatches `event` to its point.
    pub async fn dispatch(&self, ctx: &mut PluginContext, event: &HookEvent<'_>) -> HookOutput {
        let point = event.point();
        let base = self.registry.base(&point).await;
        let plugins = self.registry.plugins_for(&point).await;

        if base.is_none() && plugins.is_empty() {
            return Ok(None);
        }

        debug!(
            hook = %point,
            base = base.is_some(),
            plugins = plugins.len(),
            "Dispatching hook"
        );

        let mut result = None;

        if let Some(handler) = base {
            let output = handler.handle(ctx, event).await.map_err(|e| {
                error!(hook = %point, error = %e, "Base hook failed");
                e
            })?;
            result = result.or(output);
        }

        for plugin in &plugins {
            let output = invoke(plugin.as_ref(), ctx, event)
                .await
                .map_err(|e| {
                    error!(hook = %point, plugin = %plugin.name(), error = %e, "Plugin hook failed");
                    e
                })?;
            if result.is_none() {
                result = output;
            }
        }

        Ok(result)
    }

    /// Dispatches and discards the result, keeping only failure.
    pub async fn fire(&self, ctx: &mut PluginContext, event: &HookEvent<'_>) -> Result<(), AppError> {
        self.dispatch(ctx, event).await.map(|_| ())
    }
}
