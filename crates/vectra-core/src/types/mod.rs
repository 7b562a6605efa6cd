//! Core type definitions used across the Vectra workspace.

pub mod filter;
pub mod list;
pub mod pagination;
pub mod record;
pub mod schema;
pub mod sorting;

pub use filter::{FilterValue, Filters, stringify, values_equal};
pub use list::{ListParams, ListParamsPatch, ListResult};
pub use pagination::{Pagination, PaginationPatch};
pub use record::{Record, RecordId};
pub use schema::{FieldType, FormField, SearchField, SearchOperator, TableColumn};
pub use sorting::{SortOrder, SortSpec};
