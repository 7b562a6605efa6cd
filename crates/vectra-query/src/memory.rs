//! In-memory data source.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::debug;

use vectra_core::error::AppError;
use vectra_core::result::AppResult;
use vectra_core::traits::{DataSource, ExportPayload, ImportFile};
use vectra_core::types::{ListParams, ListResult, Record, RecordId};

use crate::engine::run_query;

/// A collection held in memory behind a shared lock.
///
/// Clones share the same collection, so writes through one handle are
/// visible through every other handle and through [`Self::snapshot`].
/// `list` always works on a copy and never reorders the stored records.
pub struct MemoryDataSource<T> {
    records: Arc<RwLock<Vec<T>>>,
}

impl<T: Record> MemoryDataSource<T> {
    /// Create a data source over `records`.
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    /// Create a data source over a collection the caller keeps a handle to.
    pub fn from_shared(records: Arc<RwLock<Vec<T>>>) -> Self {
        Self { records }
    }

    /// The shared collection.
    pub fn shared(&self) -> Arc<RwLock<Vec<T>>> {
        self.records.clone()
    }

    /// Copy of the stored records in storage order.
    pub async fn snapshot(&self) -> Vec<T> {
        self.records.read().await.clone()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the collection is empty.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl<T> Clone for MemoryDataSource<T> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
        }
    }
}

impl<T> std::fmt::Debug for MemoryDataSource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryDataSource").finish()
    }
}

#[async_trait]
impl<T> DataSource<T> for MemoryDataSource<T>
where
    T: Record + Serialize + DeserializeOwned,
{
    async fn list(&self, params: &ListParams) -> AppResult<ListResult<T>> {
        let candidates = self.records.read().await.clone();
        let result = run_query(candidates, params);
        debug!(total = result.total, returned = result.data.len(), "Listed in-memory records");
        Ok(result)
    }

    async fn save(&self, record: T) -> AppResult<T> {
        let mut records = self.records.write().await;
        let existing = record
            .id()
            .and_then(|id| records.iter().position(|r| r.id().as_ref() == Some(&id)));

        match existing {
            Some(index) => {
                debug!(index, "Replacing record in place");
                records[index] = record.clone();
            }
            None => records.push(record.clone()),
        }

        Ok(record)
    }

    async fn remove(&self, id: &RecordId) -> AppResult<()> {
        let mut records = self.records.write().await;
        if let Some(index) = records.iter().position(|r| r.id().as_ref() == Some(id)) {
            records.remove(index);
        } else {
            debug!(id = %id, "Remove ignored, no record with this id");
        }
        Ok(())
    }

    fn supports_export(&self) -> bool {
        true
    }

    /// Exports every matching record, ignoring pagination, as a JSON array.
    async fn export(&self, params: &ListParams) -> AppResult<ExportPayload> {
        let candidates = self.records.read().await.clone();
        let result = run_query(candidates, &params.without_pagination());
        let json = serde_json::to_string(&result.data)?;
        Ok(ExportPayload::Text(json))
    }

    fn supports_import(&self) -> bool {
        true
    }

    /// Imports a JSON array, upserting each element.
    async fn import(&self, file: ImportFile) -> AppResult<()> {
        let incoming: Vec<T> = serde_json::from_slice(&file.bytes).map_err(|e| {
            AppError::validation(format!("Import file '{}' is not a JSON array: {e}", file.name))
        })?;
        let count = incoming.len();
        for record in incoming {
            self.save(record).await?;
        }
        debug!(file = %file.name, count, "Imported records");
        Ok(())
    }
}
