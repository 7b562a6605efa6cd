//! Toolbar actions and their execution.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;
use tracing::{debug, error, info};

use vectra_core::result::AppResult;
use vectra_core::traits::{DynDataSource, ImportFile, NoticeLevel, Notifier};
use vectra_core::types::{Filters, RecordId};
use vectra_permission::{Permission, PermissionEvaluator};

const DISABLED_MESSAGE: &str = "This action is disabled";
const DENIED_MESSAGE: &str = "You do not have permission to perform this action";
const CONFIRM_MESSAGE: &str = "Confirm this operation?";
const SUCCESS_MESSAGE: &str = "Operation succeeded";
const FAILURE_MESSAGE: &str = "Operation failed";

/// What an action handler sees.
#[derive(Clone, Default)]
pub struct ActionContext {
    /// Data source of the screen.
    pub data_source: Option<DynDataSource>,
    /// Filters of the current search.
    pub filters: Filters,
    /// Row the action targets, for row actions.
    pub row: Option<Value>,
    /// Selected row identifiers, for batch actions.
    pub selection: Vec<RecordId>,
    /// File picked by the user, for import.
    pub file: Option<ImportFile>,
}

impl ActionContext {
    pub fn with_row(mut self, row: Value) -> Self {
        self.row = Some(row);
        self
    }

    pub fn with_selection(mut self, selection: Vec<RecordId>) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_file(mut self, file: ImportFile) -> Self {
        self.file = Some(file);
        self
    }
}

impl std::fmt::Debug for ActionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionContext")
            .field("data_source", &self.data_source.is_some())
            .field("filters", &self.filters)
            .field("row", &self.row)
            .field("selection", &self.selection)
            .field("file", &self.file.as_ref().map(|file| &file.name))
            .finish()
    }
}

/// Body of an action, or its `after` step.
#[async_trait]
pub trait ActionHandler: Send + Sync + 'static {
    async fn run(&self, ctx: &ActionContext) -> AppResult<()>;
}

/// Pre-check of an action. `Ok(false)` stops the action silently.
#[async_trait]
pub trait ActionGuard: Send + Sync + 'static {
    async fn check(&self, ctx: &ActionContext) -> AppResult<bool>;
}

/// Closure adapter for [`ActionHandler`] and [`ActionGuard`]. The closure
/// receives its own copy of the context.
pub struct FnAction<R> {
    f: Arc<dyn Fn(ActionContext) -> BoxFuture<'static, AppResult<R>> + Send + Sync>,
}

impl<R: 'static> FnAction<R> {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(ActionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<R>> + Send + 'static,
    {
        Self {
            f: Arc::new(move |ctx| f(ctx).boxed()),
        }
    }
}

#[async_trait]
impl ActionHandler for FnAction<()> {
    async fn run(&self, ctx: &ActionContext) -> AppResult<()> {
        (self.f)(ctx.clone()).await
    }
}

#[async_trait]
impl ActionGuard for FnAction<bool> {
    async fn check(&self, ctx: &ActionContext) -> AppResult<bool> {
        (self.f)(ctx.clone()).await
    }
}

/// A yes/no flag that may depend on the action context.
#[derive(Clone, Default)]
pub enum Condition {
    #[default]
    Never,
    Always,
    When(Arc<dyn Fn(&ActionContext) -> bool + Send + Sync>),
}

impl Condition {
    pub fn when<F>(f: F) -> Self
    where
        F: Fn(&ActionContext) -> bool + Send + Sync + 'static,
    {
        Self::When(Arc::new(f))
    }

    pub fn eval(&self, ctx: &ActionContext) -> bool {
        match self {
            Self::Never => false,
            Self::Always => true,
            Self::When(f) => f(ctx),
        }
    }
}

impl From<bool> for Condition {
    fn from(flag: bool) -> Self {
        if flag { Self::Always } else { Self::Never }
    }
}

impl std::fmt::Debug for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Never => write!(f, "Never"),
            Self::Always => write!(f, "Always"),
            Self::When(_) => write!(f, "When(<closure>)"),
        }
    }
}

/// A toolbar or row action.
#[derive(Clone)]
pub struct Action {
    /// Unique key within a context.
    pub key: String,
    /// Button label.
    pub label: String,
    /// Button style hint (`primary`, `danger`, ...).
    pub variant: Option<String>,
    pub icon: Option<String>,
    pub tooltip: Option<String>,
    /// Permission required to run; checked with ALL semantics.
    pub permission: Option<Permission>,
    pub hidden: Condition,
    pub disabled: Condition,
    /// Whether to ask before running.
    pub confirm: Condition,
    pub confirm_message: Option<String>,
    pub before: Option<Arc<dyn ActionGuard>>,
    pub handler: Arc<dyn ActionHandler>,
    pub after: Option<Arc<dyn ActionHandler>>,
}

impl Action {
    /// Creates an action with a closure handler.
    pub fn new<F, Fut>(key: impl Into<String>, label: impl Into<String>, handler: F) -> Self
    where
        F: Fn(ActionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<()>> + Send + 'static,
    {
        Self::with_handler(key, label, Arc::new(FnAction::new(handler)))
    }

    /// Creates an action with a handler object.
    pub fn with_handler(
        key: impl Into<String>,
        label: impl Into<String>,
        handler: Arc<dyn ActionHandler>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            variant: None,
            icon: None,
            tooltip: None,
            permission: None,
            hidden: Condition::Never,
            disabled: Condition::Never,
            confirm: Condition::Never,
            confirm_message: None,
            before: None,
            handler,
            after: None,
        }
    }

    pub fn variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn permission(mut self, permission: impl Into<Permission>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    pub fn hidden(mut self, hidden: impl Into<Condition>) -> Self {
        self.hidden = hidden.into();
        self
    }

    pub fn disabled(mut self, disabled: impl Into<Condition>) -> Self {
        self.disabled = disabled.into();
        self
    }

    /// Always ask for confirmation with `message`.
    pub fn confirm(mut self, message: impl Into<String>) -> Self {
        self.confirm = Condition::Always;
        self.confirm_message = Some(message.into());
        self
    }

    pub fn before<F, Fut>(mut self, guard: F) -> Self
    where
        F: Fn(ActionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<bool>> + Send + 'static,
    {
        self.before = Some(Arc::new(FnAction::new(guard)));
        self
    }

    pub fn after<F, Fut>(mut self, after: F) -> Self
    where
        F: Fn(ActionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<()>> + Send + 'static,
    {
        self.after = Some(Arc::new(FnAction::new(after)));
        self
    }
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("variant", &self.variant)
            .field("permission", &self.permission)
            .field("hidden", &self.hidden)
            .field("disabled", &self.disabled)
            .field("confirm", &self.confirm)
            .finish_non_exhaustive()
    }
}

/// How a run ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Hidden actions are skipped without feedback.
    Hidden,
    Disabled,
    Denied,
    /// The user declined the confirmation.
    Cancelled,
    /// The `before` guard returned `false`.
    Stopped,
    Completed,
}

/// Executes actions with confirmation, guards, and user feedback.
#[derive(Clone)]
pub struct ActionRunner {
    notifier: Arc<dyn Notifier>,
    permissions: PermissionEvaluator,
    running: Arc<AtomicUsize>,
}

struct RunningGuard(Arc<AtomicUsize>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ActionRunner {
    /// Creates a runner that admits every permission.
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self::with_permissions(notifier, PermissionEvaluator::new())
    }

    /// Creates a runner that checks action permissions with `permissions`.
    pub fn with_permissions(notifier: Arc<dyn Notifier>, permissions: PermissionEvaluator) -> Self {
        Self {
            notifier,
            permissions,
            running: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Whether any action is between its `before` step and completion.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst) > 0
    }

    /// Runs `action`.
    ///
    /// Failures of `before`, the handler, or `after` are reported through
    /// the notifier and then returned.
    pub async fn run(&self, action: &Action, ctx: &ActionContext) -> AppResult<ActionOutcome> {
        if action.hidden.eval(ctx) {
            debug!(action = %action.key, "Action hidden, skipping");
            return Ok(ActionOutcome::Hidden);
        }

        if action.disabled.eval(ctx) {
            self.notifier.notify(NoticeLevel::Warning, DISABLED_MESSAGE).await;
            return Ok(ActionOutcome::Disabled);
        }

        if let Some(permission) = &action.permission {
            if !self
                .permissions
                .has_permission(permission.clone(), ctx.row.as_ref())
                .await
            {
                self.notifier.notify(NoticeLevel::Warning, DENIED_MESSAGE).await;
                return Ok(ActionOutcome::Denied);
            }
        }

        if action.confirm.eval(ctx) {
            let message = action.confirm_message.as_deref().unwrap_or(CONFIRM_MESSAGE);
            if !self.notifier.confirm(message).await {
                debug!(action = %action.key, "Action cancelled by user");
                return Ok(ActionOutcome::Cancelled);
            }
        }

        self.running.fetch_add(1, Ordering::SeqCst);
        let _running = RunningGuard(self.running.clone());

        match self.execute(action, ctx).await {
            Ok(outcome) => {
                if outcome == ActionOutcome::Completed {
                    info!(action = %action.key, "Action completed");
                    self.notifier.notify(NoticeLevel::Success, SUCCESS_MESSAGE).await;
                }
                Ok(outcome)
            }
            Err(e) => {
                error!(action = %action.key, error = %e, "Action failed");
                let message = if e.message.is_empty() {
                    FAILURE_MESSAGE
                } else {
                    e.message.as_str()
                };
                self.notifier.notify(NoticeLevel::Error, message).await;
                Err(e)
            }
        }
    }

    async fn execute(&self, action: &Action, ctx: &ActionContext) -> AppResult<ActionOutcome> {
        if let Some(before) = &action.before {
            if !before.check(ctx).await? {
                debug!(action = %action.key, "Action stopped by guard");
                return Ok(ActionOutcome::Stopped);
            }
        }

        action.handler.run(ctx).await?;

        if let Some(after) = &action.after {
            after.run(ctx).await?;
        }

        Ok(ActionOutcome::Completed)
    }
}

impl std::fmt::Debug for ActionRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRunner")
            .field("notifier", &self.notifier)
            .field("permissions", &self.permissions)
            .field("running", &self.running.load(Ordering::SeqCst))
            .finish()
    }
}
