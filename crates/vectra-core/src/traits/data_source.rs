//! The data-source contract every list/search/edit screen talks to.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;
use crate::types::{ListParams, ListResult, Record, RecordId};

/// Output of a data source export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportPayload {
    /// Raw bytes (e.g. a spreadsheet).
    Binary(Vec<u8>),
    /// Text content or a download URL.
    Text(String),
}

/// A file handed to a data source import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFile {
    /// Original file name.
    pub name: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl ImportFile {
    /// Create an import file.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Trait implemented by in-memory collections and real backends alike.
///
/// `export` and `import` are optional; callers check `supports_export` /
/// `supports_import` before offering them.
#[async_trait]
pub trait DataSource<T: Record>: Send + Sync + 'static {
    /// Filter, sort, and paginate the collection.
    async fn list(&self, params: &ListParams) -> AppResult<ListResult<T>>;

    /// Insert or replace a record by identifier. Returns the saved record.
    async fn save(&self, record: T) -> AppResult<T>;

    /// Delete the record with this identifier. Unknown ids are not an error.
    async fn remove(&self, id: &RecordId) -> AppResult<()>;

    /// Whether `export` is implemented.
    fn supports_export(&self) -> bool {
        false
    }

    /// Export the records matching `params`.
    async fn export(&self, _params: &ListParams) -> AppResult<ExportPayload> {
        Err(AppError::not_implemented("Export is not supported by this data source"))
    }

    /// Whether `import` is implemented.
    fn supports_import(&self) -> bool {
        false
    }

    /// Import records from a file.
    async fn import(&self, _file: ImportFile) -> AppResult<()> {
        Err(AppError::not_implemented("Import is not supported by this data source"))
    }
}

/// Data source over JSON rows, as held by the plugin context.
pub type DynDataSource = Arc<dyn DataSource<serde_json::Value>>;
