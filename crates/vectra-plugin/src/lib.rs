//! # vectra-plugin
//!
//! Plugin provider for Vectra CRUD screens. Provides:
//!
//! - Ordered plugin registry with duplicate-name protection
//! - Typed hook points dispatched sequentially in registration order,
//!   with an optional host-level base hook that runs first
//! - Sequential, fail-fast plugin installation
//! - Lifecycle event bus (`on` / `off` / `emit`)
//! - The shared [`PluginContext`] with a per-plugin extension area
//! - Action execution with confirmation, guards, and notifications
//! - [`CrudController`], which ties a data source to the events and hooks

pub mod action;
pub mod context;
pub mod controller;
pub mod events;
pub mod hooks;
pub mod notify;
pub mod provider;
pub mod registry;

pub use action::{Action, ActionContext, ActionHandler, ActionOutcome, ActionRunner, Condition};
pub use context::PluginContext;
pub use controller::CrudController;
pub use events::{EventBus, EventHandler, FnEventHandler, LifecycleEvent};
pub use hooks::definitions::{HookEvent, HookOutput, HookPoint, TableChange};
pub use hooks::handler::{ClosureHandler, HookHandler};
pub use notify::LogNotifier;
pub use provider::CrudProvider;
pub use registry::{Plugin, PluginRegistry};
