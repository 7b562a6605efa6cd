//! `vectra dict`: inspect one dictionary of a dictionary file.

use std::collections::HashMap;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use serde_json::Value;
use tabled::Tabled;

use vectra_core::config::AppConfig;
use vectra_core::result::AppResult;
use vectra_dict::{DictConfig, DictItem, DictProvider};

use crate::output::{self, OutputFormat};

/// Arguments for the dict command
#[derive(Debug, Args)]
pub struct DictArgs {
    /// JSON file mapping dictionary codes to item arrays
    #[arg(long)]
    pub file: PathBuf,

    /// Dictionary code
    #[arg(long)]
    pub code: String,

    /// Print only the label of this value
    #[arg(long)]
    pub value: Option<String>,
}

/// Dictionary display row
#[derive(Debug, Serialize, Tabled)]
struct DictRow {
    /// Label
    label: String,
    /// Value
    value: String,
    /// Color
    color: String,
}

/// Execute the dict command
pub async fn execute(args: &DictArgs, config: &AppConfig, format: OutputFormat) -> AppResult<()> {
    let dicts: HashMap<String, Vec<DictItem>> = super::read_json(&args.file).await?;
    let provider = DictProvider::with_defaults(config.dict.clone());
    provider.register(
        dicts
            .into_iter()
            .map(|(code, items)| DictConfig::new(code).with_items(items)),
    );

    let items = provider.load(&args.code).await?;

    if let Some(raw) = &args.value {
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.clone()));
        let label = provider.get_label(&args.code, &value);
        match format {
            OutputFormat::Table => output::print_kv(raw, &label),
            OutputFormat::Json => output::print_item(&label, format),
        }
        return Ok(());
    }

    let rows: Vec<DictRow> = items
        .iter()
        .map(|item| DictRow {
            label: item.label.clone(),
            value: vectra_core::types::stringify(&item.value),
            color: item.color.clone().unwrap_or_default(),
        })
        .collect();
    match format {
        OutputFormat::Table => output::print_list(&rows, format),
        OutputFormat::Json => output::print_item(&items, format),
    }
    Ok(())
}
