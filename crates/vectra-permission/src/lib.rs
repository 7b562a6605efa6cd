//! # vectra-permission
//!
//! Admit/deny decisions for screen actions. A single host-supplied
//! [`PermissionChecker`] decides individual permission strings; the
//! [`PermissionEvaluator`] aggregates several of them.
//!
//! Multi-permission checks use **ALL** semantics in
//! [`PermissionEvaluator::has_permission`]; use
//! [`PermissionEvaluator::has_any_permission`] for ANY.
//!
//! [`PermissionChecker`]: vectra_core::traits::PermissionChecker

pub mod checker;
pub mod evaluator;
pub mod permission;

pub use checker::{FnChecker, StaticPermissionChecker};
pub use evaluator::PermissionEvaluator;
pub use permission::Permission;
