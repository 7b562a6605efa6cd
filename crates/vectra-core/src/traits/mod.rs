//! Core traits defined in `vectra-core` and implemented by other crates
//! or by the host application.

pub mod data_source;
pub mod notifier;
pub mod permission;
pub mod storage;

pub use data_source::{DataSource, DynDataSource, ExportPayload, ImportFile};
pub use notifier::{NoticeLevel, Notifier};
pub use permission::PermissionChecker;
pub use storage::KeyValueStore;
