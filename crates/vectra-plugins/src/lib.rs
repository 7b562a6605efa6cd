//! # vectra-plugins
//!
//! Built-in plugins for Vectra CRUD screens:
//!
//! - `column-persist`: restores and saves column layout per page key
//! - `inline-edit`: edit configuration and save-on-close for cells
//! - `export-basic` / `import-basic`: toolbar actions over the data source
//! - `virtual-scroll`, `row-expand`: table presentation settings
//! - `batch-actions`: ordered row selection
//!
//! Also provides the key-value storage ports used by `column-persist`.

pub mod batch_actions;
pub mod builtin;
pub mod column_persist;
pub mod export;
pub mod import;
pub mod inline_edit;
pub mod row_expand;
pub mod storage;
pub mod virtual_scroll;

pub use batch_actions::{BatchActionsOptions, BatchActionsPlugin, BatchSelection};
pub use builtin::{BUILTIN_NAMES, BuiltinOptions, builtin_plugin};
pub use column_persist::{ColumnPersistPlugin, ColumnState};
pub use export::ExportPlugin;
pub use import::ImportPlugin;
pub use inline_edit::{EditConfig, InlineEditOptions, InlineEditPlugin};
pub use row_expand::{ExpandConfig, RowExpandOptions, RowExpandPlugin};
pub use storage::{FileKeyValueStore, MemoryKeyValueStore};
pub use virtual_scroll::{ScrollConfig, VirtualScrollOptions, VirtualScrollPlugin};
