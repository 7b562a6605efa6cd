//! Lifecycle event bus: `on` / `off` / `emit`.
//!
//! Handlers of one event run one at a time in the order they were added.
//! `emit` works on a snapshot of the handler list, so `on` and `off` calls
//! made while an emission is in progress only affect later emissions.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use futures::FutureExt;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use vectra_core::result::AppResult;

/// Events fired around data-source operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleEvent {
    BeforeSearch,
    AfterSearch,
    BeforeSave,
    AfterSave,
    BeforeRemove,
    AfterRemove,
    BeforeExport,
    AfterExport,
    BeforeImport,
    AfterImport,
    Custom(String),
}

impl LifecycleEvent {
    /// Returns the string name of this event.
    pub fn as_str(&self) -> &str {
        match self {
            Self::BeforeSearch => "before_search",
            Self::AfterSearch => "after_search",
            Self::BeforeSave => "before_save",
            Self::AfterSave => "after_save",
            Self::BeforeRemove => "before_remove",
            Self::AfterRemove => "after_remove",
            Self::BeforeExport => "before_export",
            Self::AfterExport => "after_export",
            Self::BeforeImport => "before_import",
            Self::AfterImport => "after_import",
            Self::Custom(name) => name,
        }
    }

    /// Creates a custom event.
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }
}

impl std::fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Receives emitted events.
#[async_trait]
pub trait EventHandler: Send + Sync + 'static {
    async fn handle(&self, event: &LifecycleEvent, payload: &Value) -> AppResult<()>;
}

/// Closure adapter for [`EventHandler`]. The closure receives its own copy
/// of the payload.
pub struct FnEventHandler {
    f: Box<dyn Fn(LifecycleEvent, Value) -> BoxFuture<'static, AppResult<()>> + Send + Sync>,
}

impl FnEventHandler {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(LifecycleEvent, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<()>> + Send + 'static,
    {
        Self {
            f: Box::new(move |event, payload| f(event, payload).boxed()),
        }
    }

    /// Wraps the closure into a shared handler, ready for `on` and `off`.
    pub fn shared<F, Fut>(f: F) -> Arc<dyn EventHandler>
    where
        F: Fn(LifecycleEvent, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<()>> + Send + 'static,
    {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl EventHandler for FnEventHandler {
    async fn handle(&self, event: &LifecycleEvent, payload: &Value) -> AppResult<()> {
        (self.f)(event.clone(), payload.clone()).await
    }
}

/// Ordered handler sets keyed by event.
///
/// Handler identity is the `Arc` allocation: adding the same `Arc` twice
/// keeps one entry, and `off` needs a clone of the `Arc` passed to `on`.
#[derive(Default)]
pub struct EventBus {
    handlers: DashMap<LifecycleEvent, Vec<Arc<dyn EventHandler>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a handler. Returns `false` if it was already present.
    pub fn on(&self, event: LifecycleEvent, handler: Arc<dyn EventHandler>) -> bool {
        let mut entries = self.handlers.entry(event.clone()).or_default();
        if entries.iter().any(|h| Arc::ptr_eq(h, &handler)) {
            return false;
        }
        entries.push(handler);
        debug!(event = %event, handlers = entries.len(), "Event handler added");
        true
    }

    /// Removes a handler. Returns whether it was present.
    pub fn off(&self, event: &LifecycleEvent, handler: &Arc<dyn EventHandler>) -> bool {
        let Some(mut entries) = self.handlers.get_mut(event) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|h| !Arc::ptr_eq(h, handler));
        let removed = entries.len() != before;
        if removed {
            debug!(event = %event, handlers = entries.len(), "Event handler removed");
        }
        removed
    }

    /// Runs the handlers of `event` in order. The first failure stops the
    /// emission and is returned.
    pub async fn emit(&self, event: &LifecycleEvent, payload: &Value) -> AppResult<()> {
        let snapshot = match self.handlers.get(event) {
            Some(entries) => entries.clone(),
            None => return Ok(()),
        };

        for handler in snapshot {
            handler.handle(event, payload).await.map_err(|e| {
                error!(event = %event, error = %e, "Event handler failed");
                e
            })?;
        }

        Ok(())
    }

    /// Number of handlers for `event`.
    pub fn handler_count(&self, event: &LifecycleEvent) -> usize {
        self.handlers.get(event).map(|e| e.len()).unwrap_or(0)
    }

    /// Removes every handler of `event`, or of all events.
    pub fn clear(&self, event: Option<&LifecycleEvent>) {
        match event {
            Some(event) => {
                self.handlers.remove(event);
            }
            None => self.handlers.clear(),
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("events", &self.handlers.len())
            .finish()
    }
}
