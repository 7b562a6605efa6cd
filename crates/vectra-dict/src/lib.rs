//! # vectra-dict
//!
//! Dictionary cache for small reference lists (label/value sets) keyed by
//! a code:
//!
//! - Per-code configuration with loader, cache flag, and expiry
//! - TTL cache (default 5 minutes)
//! - At most one outstanding loader call per code; concurrent callers
//!   share its result

pub mod config;
pub mod item;
pub mod provider;

pub use config::{DictConfig, DictLoader, FnLoader, StaticLoader};
pub use item::DictItem;
pub use provider::DictProvider;
