//! Local filesystem key-value store: one file per key.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tokio::fs;
use tracing::debug;

use vectra_core::error::{AppError, ErrorKind};
use vectra_core::result::AppResult;
use vectra_core::traits::KeyValueStore;

/// Bytes escaped in file names. `.` and `/` are always escaped, so a key
/// never names a hidden file or a path outside the root.
const KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

/// Stores each key as `<root>/<percent-encoded key>.json`.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    /// Directory holding the entries.
    root: PathBuf,
}

impl FileKeyValueStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    pub async fn new(root: impl AsRef<Path>) -> AppResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create store directory: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Directory holding the entries.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &str) -> AppResult<PathBuf> {
        if key.is_empty() {
            return Err(AppError::validation("Storage key must not be empty"));
        }
        let file_name = utf8_percent_encode(key, KEY_ENCODE_SET);
        Ok(self.root.join(format!("{file_name}.json")))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.resolve(key)?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read key: {key}"),
                e,
            )),
        }
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let path = self.resolve(key)?;
        fs::write(&path, value).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, format!("Failed to write key: {key}"), e)
        })?;
        debug!(key, bytes = value.len(), "Wrote key");
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let path = self.resolve(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to remove key: {key}"),
                e,
            )),
        }
    }
}
