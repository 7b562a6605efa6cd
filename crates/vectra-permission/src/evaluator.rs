//! Aggregation of individual permission checks.

use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;
use tracing::debug;

use vectra_core::error::AppError;
use vectra_core::traits::PermissionChecker;

use crate::permission::Permission;

/// Evaluates permissions against an optional host checker.
///
/// Without a checker every permission is granted. Checks over several
/// permissions run concurrently and aggregate once all have settled.
#[derive(Clone, Default)]
pub struct PermissionEvaluator {
    checker: Option<Arc<dyn PermissionChecker>>,
}

impl PermissionEvaluator {
    /// Creates an evaluator that allows everything.
    pub fn new() -> Self {
        Self { checker: None }
    }

    /// Creates an evaluator backed by `checker`.
    pub fn with_checker(checker: impl PermissionChecker) -> Self {
        Self {
            checker: Some(Arc::new(checker)),
        }
    }

    /// Creates an evaluator from a shared checker.
    pub fn from_shared(checker: Arc<dyn PermissionChecker>) -> Self {
        Self {
            checker: Some(checker),
        }
    }

    /// Replaces the checker.
    pub fn set_checker(&mut self, checker: Arc<dyn PermissionChecker>) {
        self.checker = Some(checker);
    }

    /// Whether a checker is configured.
    pub fn has_checker(&self) -> bool {
        self.checker.is_some()
    }

    /// Checks `permission`. A single string returns the checker's answer;
    /// several strings must **all** be granted (an empty list is granted).
    pub async fn has_permission(
        &self,
        permission: impl Into<Permission>,
        context: Option<&Value>,
    ) -> bool {
        match permission.into() {
            Permission::One(p) => self.check_one(&p, context).await,
            Permission::Many(ps) => self.check_many(&ps, context).await.into_iter().all(|ok| ok),
        }
    }

    /// Alias of [`has_permission`](Self::has_permission) for lists.
    pub async fn has_all_permissions(&self, permissions: &[&str], context: Option<&Value>) -> bool {
        let permissions: Vec<String> = permissions.iter().map(|p| p.to_string()).collect();
        self.has_permission(permissions, context).await
    }

    /// Whether at least one of `permissions` is granted.
    ///
    /// An empty list is denied unless no checker is configured.
    pub async fn has_any_permission(&self, permissions: &[&str], context: Option<&Value>) -> bool {
        if self.checker.is_none() {
            debug!("No permission checker configured, allowing");
            return true;
        }
        let permissions: Vec<String> = permissions.iter().map(|p| p.to_string()).collect();
        self.check_many(&permissions, context)
            .await
            .into_iter()
            .any(|ok| ok)
    }

    /// Like [`has_permission`](Self::has_permission) but returns a
    /// permission error naming what was denied.
    pub async fn require_permission(
        &self,
        permission: impl Into<Permission>,
        context: Option<&Value>,
    ) -> Result<(), AppError> {
        let permission = permission.into();
        if self.has_permission(permission.clone(), context).await {
            Ok(())
        } else {
            Err(AppError::permission(format!(
                "Permission denied: {}",
                permission.as_slice().join(", ")
            )))
        }
    }

    async fn check_one(&self, permission: &str, context: Option<&Value>) -> bool {
        match &self.checker {
            Some(checker) => checker.check(permission, context).await,
            None => {
                debug!(permission = %permission, "No permission checker configured, allowing");
                true
            }
        }
    }

    async fn check_many(&self, permissions: &[String], context: Option<&Value>) -> Vec<bool> {
        join_all(permissions.iter().map(|p| self.check_one(p, context))).await
    }
}

impl std::fmt::Debug for PermissionEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionEvaluator")
            .field("has_checker", &self.checker.is_some())
            .finish()
    }
}
