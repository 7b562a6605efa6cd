//! Permission checker trait.

use async_trait::async_trait;
use serde_json::Value;

/// Decides a single permission string, optionally against a context value
/// (for example the row an action targets).
#[async_trait]
pub trait PermissionChecker: Send + Sync + 'static {
    /// Returns `true` if the permission is granted.
    async fn check(&self, permission: &str, context: Option<&Value>) -> bool;
}
