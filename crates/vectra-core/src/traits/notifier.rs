//! Notification port for user-visible feedback.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Severity of a user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Host-supplied message and confirmation surface.
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug + 'static {
    /// Show a message to the user.
    async fn notify(&self, level: NoticeLevel, message: &str);

    /// Ask the user to confirm. `false` cancels the pending operation.
    async fn confirm(&self, message: &str) -> bool;
}
