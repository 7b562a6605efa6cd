//! # vectra-query
//!
//! Generic query engine for list screens:
//!
//! - Filter → sort → count → paginate pipeline over any [`Record`] type
//! - [`MemoryDataSource`], an in-memory collection honoring the
//!   `list/save/remove` contract (plus JSON export/import)
//! - [`merge_list_params`] for folding partial list parameters
//!
//! [`Record`]: vectra_core::types::Record

pub mod engine;
pub mod memory;
pub mod merge;

pub use engine::{compare_values, run_query};
pub use memory::MemoryDataSource;
pub use merge::{DEFAULT_PAGE_SIZE, merge_list_params, merge_list_params_with};
