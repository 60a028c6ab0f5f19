//! `config`: print the effective configuration.

use hookfile_core::config::AppConfig;
use hookfile_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Execute the config command
pub fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    output::print_item(config, format);
    Ok(())
}
