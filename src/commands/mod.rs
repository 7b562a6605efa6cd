//! CLI command definitions and dispatch.

pub mod dict;
pub mod export;
pub mod list;
pub mod plugins;

use std::path::Path;

use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde_json::Value;

use vectra_core::config::AppConfig;
use vectra_core::error::{AppError, ErrorKind};
use vectra_core::result::AppResult;
use vectra_core::types::{Filters, SortOrder, SortSpec};

use crate::output::OutputFormat;

/// Vectra: schema-driven CRUD screens over JSON datasets
#[derive(Debug, Parser)]
#[command(name = "vectra", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Search a JSON dataset
    List(list::ListArgs),
    /// Export the rows of a JSON dataset matching the filters
    Export(export::ExportArgs),
    /// Inspect a dictionary file
    Dict(dict::DictArgs),
    /// Show built-in plugins
    Plugins,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        match &self.command {
            Commands::List(args) => list::execute(args, config, self.format).await,
            Commands::Export(args) => export::execute(args, config, self.format).await,
            Commands::Dict(args) => dict::execute(args, config, self.format).await,
            Commands::Plugins => plugins::execute(config, self.format),
        }
    }
}

/// Parses `key=value`. The value is read as JSON when it parses (so
/// `age=30` and `status=[1,2]` keep their types) and as a string otherwise.
pub(crate) fn parse_filter(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty filter key in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Parses `prop` or `prop:asc|desc`.
pub(crate) fn parse_sort(raw: &str) -> Result<SortSpec, String> {
    let (prop, order): (&str, SortOrder) = match raw.split_once(':') {
        Some((prop, order)) => (prop, order.parse()?),
        None => (raw, SortOrder::Asc),
    };
    if prop.is_empty() {
        return Err(format!("empty sort field in '{raw}'"));
    }
    Ok(SortSpec::new(prop, order))
}

/// Parses `left=right` into two strings.
pub(crate) fn parse_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((left, right)) if !left.is_empty() && !right.is_empty() => {
            Ok((left.to_string(), right.to_string()))
        }
        _ => Err(format!("expected name=value, got '{raw}'")),
    }
}

pub(crate) fn to_filters(pairs: &[(String, Value)]) -> Filters {
    pairs.iter().cloned().collect()
}

/// Reads and deserializes a JSON file.
pub(crate) async fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::NotFound,
            format!("Failed to read {}", path.display()),
            e,
        )
    })?;
    serde_json::from_slice(&bytes).map_err(|e| {
        AppError::with_source(
            ErrorKind::Validation,
            format!("{} is not valid JSON", path.display()),
            e,
        )
    })
}
