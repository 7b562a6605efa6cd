//! `vectra plugins`: built-in plugins and whether the config enables them.

use serde::Serialize;
use tabled::Tabled;

use vectra_core::config::AppConfig;
use vectra_core::result::AppResult;
use vectra_plugins::BUILTIN_NAMES;

use crate::output::{self, OutputFormat};

/// Plugin display row
#[derive(Debug, Serialize, Tabled)]
struct PluginRow {
    /// Name
    name: String,
    /// Enabled in configuration
    enabled: bool,
    /// Install position
    position: String,
}

/// Execute the plugins command
pub fn execute(config: &AppConfig, format: OutputFormat) -> AppResult<()> {
    let rows: Vec<PluginRow> = BUILTIN_NAMES
        .iter()
        .map(|name| {
            let position = config.plugins.enabled.iter().position(|e| e == name);
            PluginRow {
                name: name.to_string(),
                enabled: position.is_some(),
                position: position.map(|p| (p + 1).to_string()).unwrap_or_default(),
            }
        })
        .collect();
    output::print_list(&rows, format);
    Ok(())
}
