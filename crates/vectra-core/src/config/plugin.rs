//! Plugin selection configuration.

use serde::{Deserialize, Serialize};

/// Built-in plugins a host installs at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Plugin names, installed in this order.
    #[serde(default = "default_enabled")]
    pub enabled: Vec<String>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
        }
    }
}

fn default_enabled() -> Vec<String> {
    vec!["column-persist".to_string(), "export-basic".to_string()]
}
