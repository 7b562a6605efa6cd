//! Dictionary cache defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Defaults applied to dictionary configurations that leave `cache` or
/// `expiry` unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictDefaults {
    /// Whether loaded dictionaries are cached.
    #[serde(default = "default_cache")]
    pub cache: bool,
    /// Cache entry lifetime in milliseconds.
    #[serde(default = "default_expiry_ms")]
    pub expiry_ms: u64,
}

impl DictDefaults {
    /// Cache entry lifetime as a [`Duration`].
    pub fn expiry(&self) -> Duration {
        Duration::from_millis(self.expiry_ms)
    }
}

impl Default for DictDefaults {
    fn default() -> Self {
        Self {
            cache: default_cache(),
            expiry_ms: default_expiry_ms(),
        }
    }
}

fn default_cache() -> bool {
    true
}

fn default_expiry_ms() -> u64 {
    300_000
}
