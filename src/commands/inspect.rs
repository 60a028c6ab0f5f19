//! `inspect`: list the cooked hooks for a project.

use std::path::Path;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use hookfile_core::config::AppConfig;
use hookfile_core::error::AppError;
use hookfile_hooks::HookCategory;
use hookfile_hooks::hooks::HookSummary;

use super::HookfileArgs;
use crate::output::{self, OutputFormat};

/// Arguments for the inspect command
#[derive(Debug, Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub hookfiles: HookfileArgs,

    /// Only show one hook, e.g. `readPackage`
    #[arg(long)]
    pub hook: Option<HookCategory>,
}

/// One cooked hook as printed
#[derive(Debug, Serialize, Tabled)]
pub struct HookRow {
    /// Hook category
    pub hook: String,
    /// Declaring scope
    pub scope: String,
    /// Declaring hookfile
    pub from: String,
}

impl From<HookSummary> for HookRow {
    fn from(summary: HookSummary) -> Self {
        Self {
            hook: summary.hook.to_string(),
            scope: summary.scope.to_string(),
            from: summary.from.unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Execute the inspect command
pub async fn execute(
    args: &InspectArgs,
    project_root: &Path,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let cooked = super::require_hooks(project_root, &args.hookfiles, config).await?;

    let rows: Vec<HookRow> = cooked
        .summary()
        .into_iter()
        .filter(|row| args.hook.is_none_or(|hook| hook == row.hook))
        .map(HookRow::from)
        .collect();

    output::print_list(&rows, format);

    if format == OutputFormat::Table {
        let checksum = cooked
            .checksum_provider()
            .map(|p| p.path().display().to_string())
            .unwrap_or_else(|| "none".to_string());
        output::print_kv("Checksum source", &checksum);
    }

    Ok(())
}
