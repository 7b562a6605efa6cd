//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section; every field has a serde default so an empty file is valid.

pub mod dict;
pub mod logging;
pub mod persist;
pub mod plugin;
pub mod query;

use serde::{Deserialize, Serialize};

use self::dict::DictDefaults;
use self::logging::LoggingConfig;
use self::persist::PersistConfig;
use self::plugin::PluginConfig;
use self::query::QueryConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Query engine settings.
    #[serde(default)]
    pub query: QueryConfig,
    /// Dictionary cache defaults.
    #[serde(default)]
    pub dict: DictDefaults,
    /// Column layout persistence settings.
    #[serde(default)]
    pub persist: PersistConfig,
    /// Built-in plugin selection.
    #[serde(default)]
    pub plugins: PluginConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `path` with an optional `config/{env}` overlay and environment
    /// variables prefixed with `VECTRA`.
    pub fn load(path: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("VECTRA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
