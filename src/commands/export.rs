//! `vectra export`: runs the screen's `export` action.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use serde::Serialize;
use serde_json::Value;

use vectra_core::config::AppConfig;
use vectra_core::error::AppError;
use vectra_core::result::AppResult;
use vectra_permission::{PermissionEvaluator, StaticPermissionChecker};
use vectra_plugin::{ActionOutcome, ActionRunner, LogNotifier};
use vectra_plugins::export::ACTION_KEY;

use crate::output::{self, OutputFormat};
use crate::screen;

/// Arguments for the export command
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// JSON file holding an array of rows
    #[arg(short, long)]
    pub data: PathBuf,

    /// Filter as key=value (repeatable)
    #[arg(long, value_parser = super::parse_filter)]
    pub filter: Vec<(String, Value)>,

    /// Output directory
    #[arg(short, long, default_value = "exports")]
    pub out_dir: PathBuf,

    /// Permissions held by the caller (repeatable). Without any, permission
    /// checks are skipped.
    #[arg(long)]
    pub grant: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ExportReport {
    outcome: String,
    path: Option<String>,
}

/// Execute the export command
pub async fn execute(args: &ExportArgs, config: &AppConfig, format: OutputFormat) -> AppResult<()> {
    let mut screen = screen::open(config, &args.data, args.out_dir.clone()).await?;
    let Some(export) = screen.export.clone() else {
        return Err(AppError::configuration(
            "The export-basic plugin is not enabled",
        ));
    };
    screen.controller.context_mut().search_params = super::to_filters(&args.filter);

    let permissions = if args.grant.is_empty() {
        PermissionEvaluator::new()
    } else {
        PermissionEvaluator::with_checker(StaticPermissionChecker::new(args.grant.iter().cloned()))
    };
    let runner = ActionRunner::with_permissions(Arc::new(LogNotifier::default()), permissions);

    let outcome = screen
        .controller
        .run_action(&runner, ACTION_KEY, |ctx| ctx)
        .await?;

    let report = ExportReport {
        outcome: format!("{outcome:?}"),
        path: export
            .last_export()
            .filter(|_| outcome == ActionOutcome::Completed)
            .map(|path| path.display().to_string()),
    };
    match (format, &report.path) {
        (OutputFormat::Table, Some(path)) => output::print_success(&format!("Exported to {path}")),
        (OutputFormat::Table, None) => output::print_warning(&format!("Export {}", report.outcome)),
        (OutputFormat::Json, _) => output::print_item(&report, format),
    }
    Ok(())
}
