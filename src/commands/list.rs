//! `vectra list`: search a dataset through the screen's hooks and events.

use std::collections::HashMap;
use std::path::PathBuf;

use clap::Args;
use serde_json::Value;
use tracing::{debug, warn};

use vectra_core::config::AppConfig;
use vectra_core::result::AppResult;
use vectra_core::types::{ListParamsPatch, PaginationPatch, SortSpec};
use vectra_dict::{DictConfig, DictItem, DictProvider};
use vectra_plugin::TableChange;
use vectra_query::merge_list_params_with;

use crate::output::{self, OutputFormat};
use crate::screen;

/// Arguments for the list command
#[derive(Debug, Args)]
pub struct ListArgs {
    /// JSON file holding an array of rows
    #[arg(short, long)]
    pub data: PathBuf,

    /// Filter as key=value (repeatable)
    #[arg(long, value_parser = super::parse_filter)]
    pub filter: Vec<(String, Value)>,

    /// Sort as prop or prop:asc|desc
    #[arg(long, value_parser = super::parse_sort)]
    pub sort: Option<SortSpec>,

    /// Page number (1-based)
    #[arg(long)]
    pub page: Option<u64>,

    /// Rows per page
    #[arg(long)]
    pub page_size: Option<u64>,

    /// Hide a column; remembered for this dataset (repeatable)
    #[arg(long)]
    pub hide: Vec<String>,

    /// Show a previously hidden column (repeatable)
    #[arg(long)]
    pub show: Vec<String>,

    /// Column order, comma separated; remembered for this dataset
    #[arg(long, value_delimiter = ',')]
    pub order: Vec<String>,

    /// JSON file mapping dictionary codes to item arrays
    #[arg(long)]
    pub dicts: Option<PathBuf>,

    /// Display a column through a dictionary, as prop=code (repeatable)
    #[arg(long = "dict", value_parser = super::parse_pair)]
    pub dict: Vec<(String, String)>,
}

/// Execute the list command
pub async fn execute(args: &ListArgs, config: &AppConfig, format: OutputFormat) -> AppResult<()> {
    let mut screen = screen::open(config, &args.data, PathBuf::from("exports")).await?;
    let controller = &mut screen.controller;

    for prop in &args.hide {
        controller
            .table_changed(TableChange::ColumnVisibility {
                prop: prop.clone(),
                visible: false,
            })
            .await?;
    }
    for prop in &args.show {
        controller
            .table_changed(TableChange::ColumnVisibility {
                prop: prop.clone(),
                visible: true,
            })
            .await?;
    }
    if !args.order.is_empty() {
        controller
            .table_changed(TableChange::ColumnOrder {
                order: args.order.clone(),
            })
            .await?;
    }

    let page_size = args
        .page_size
        .map(|size| size.min(config.query.max_page_size));
    let mut patches = vec![ListParamsPatch::pagination(PaginationPatch {
        page: args.page,
        page_size,
    })];
    if let Some(sort) = &args.sort {
        patches.push(ListParamsPatch::sort(sort.clone()));
    }
    if !args.filter.is_empty() {
        patches.push(ListParamsPatch::filters(super::to_filters(&args.filter)));
    }
    let params = merge_list_params_with(patches, config.query.default_page_size);
    debug!(?params, "List parameters");

    let mut result = controller.search(params.clone()).await?;

    if !args.dict.is_empty() {
        let provider = load_dicts(args, config).await?;
        for (prop, code) in &args.dict {
            provider.load(code).await?;
            for row in result.data.iter_mut() {
                if let Some(cell) = row.get_mut(prop.as_str()) {
                    let label = provider.get_label(code, cell);
                    *cell = Value::String(label);
                }
            }
        }
    }

    output::print_rows(&result.data, &controller.context().table_schema, format);
    if format == OutputFormat::Table {
        if let Some(pagination) = params.pagination {
            output::print_kv(
                "Page",
                &format!(
                    "{} of {} ({} rows)",
                    pagination.page,
                    result.total_pages(pagination.page_size),
                    result.total
                ),
            );
        }
    }
    Ok(())
}

async fn load_dicts(args: &ListArgs, config: &AppConfig) -> AppResult<DictProvider> {
    let provider = DictProvider::with_defaults(config.dict.clone());
    let Some(path) = &args.dicts else {
        warn!("--dict given without --dicts, labels fall back to raw values");
        return Ok(provider);
    };

    let dicts: HashMap<String, Vec<DictItem>> = super::read_json(path).await?;
    provider.register(
        dicts
            .into_iter()
            .map(|(code, items)| DictConfig::new(code).with_items(items)),
    );
    Ok(provider)
}
