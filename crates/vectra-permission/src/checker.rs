//! Ready-made [`PermissionChecker`] implementations.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;

use vectra_core::traits::PermissionChecker;

/// Grant that admits every permission.
pub const WILDCARD: &str = "*";

/// Checker backed by a fixed set of granted permission strings.
#[derive(Debug, Clone, Default)]
pub struct StaticPermissionChecker {
    granted: HashSet<String>,
}

impl StaticPermissionChecker {
    /// Creates a checker granting exactly `granted`.
    pub fn new<I, S>(granted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            granted: granted.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a checker granting everything.
    pub fn allow_all() -> Self {
        Self::new([WILDCARD])
    }

    /// Adds a grant.
    pub fn grant(&mut self, permission: impl Into<String>) {
        self.granted.insert(permission.into());
    }

    /// Removes a grant.
    pub fn revoke(&mut self, permission: &str) {
        self.granted.remove(permission);
    }

    /// Synchronous form of the check.
    pub fn is_granted(&self, permission: &str) -> bool {
        self.granted.contains(WILDCARD) || self.granted.contains(permission)
    }
}

#[async_trait]
impl PermissionChecker for StaticPermissionChecker {
    async fn check(&self, permission: &str, _context: Option<&Value>) -> bool {
        self.is_granted(permission)
    }
}

type CheckFn = dyn Fn(String, Option<Value>) -> BoxFuture<'static, bool> + Send + Sync;

/// Closure-backed checker. The closure receives owned copies of the
/// permission and the optional context.
#[derive(Clone)]
pub struct FnChecker {
    f: Arc<CheckFn>,
}

impl FnChecker {
    /// Wraps an async closure.
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(String, Option<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        Self {
            f: Arc::new(move |permission, context| f(permission, context).boxed()),
        }
    }

    /// Wraps a synchronous predicate.
    pub fn sync<F>(f: F) -> Self
    where
        F: Fn(&str, Option<&Value>) -> bool + Send + Sync + 'static,
    {
        Self::new(move |permission, context| {
            let allowed = f(&permission, context.as_ref());
            async move { allowed }
        })
    }
}

#[async_trait]
impl PermissionChecker for FnChecker {
    async fn check(&self, permission: &str, context: Option<&Value>) -> bool {
        (self.f)(permission.to_string(), context.cloned()).await
    }
}

impl std::fmt::Debug for FnChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnChecker").finish_non_exhaustive()
    }
}
