//! Column layout persistence configuration.

use serde::{Deserialize, Serialize};

/// Where and under which key prefix column layouts are stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistConfig {
    /// Fixed prefix of every storage key (`"<prefix>-<pageKey>"`).
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// Directory used by the file-backed key-value store.
    #[serde(default = "default_directory")]
    pub directory: String,
}

impl Default for PersistConfig {
    fn default() -> Self {
        Self {
            key_prefix: default_key_prefix(),
            directory: default_directory(),
        }
    }
}

fn default_key_prefix() -> String {
    "vectra-crud-columns".to_string()
}

fn default_directory() -> String {
    "data/columns".to_string()
}
