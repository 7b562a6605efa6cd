//! Query engine configuration.

use serde::{Deserialize, Serialize};

/// Pagination defaults for list requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Page size used when a merged pagination lacks one.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    /// Upper bound accepted from callers such as the CLI.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_page_size() -> u64 {
    10
}

fn default_max_page_size() -> u64 {
    500
}
