//! `checksum`: print the checksum of the project hookfile.

use std::path::Path;

use hookfile_core::config::AppConfig;
use hookfile_core::error::AppError;

use super::HookfileArgs;
use crate::output::{self, OutputFormat};

/// Execute the checksum command
pub async fn execute(
    args: &HookfileArgs,
    project_root: &Path,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let cooked = super::require_hooks(project_root, args, config).await?;
    let checksum = cooked.calculate_checksum().await?;

    match format {
        OutputFormat::Table => println!("{}", checksum.as_deref().unwrap_or("none")),
        OutputFormat::Json => {
            output::print_item(&serde_json::json!({ "checksum": checksum }), format)
        }
    }

    Ok(())
}
