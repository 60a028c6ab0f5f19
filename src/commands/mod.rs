//! CLI command definitions and dispatch.

pub mod checksum;
pub mod config;
pub mod inspect;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use hookfile_core::config::AppConfig;
use hookfile_core::config::hooks::HooksConfig;
use hookfile_core::error::AppError;
use hookfile_hooks::{HookLoader, HookManager};

use crate::output::OutputFormat;

/// Inspect global and project hookfiles
#[derive(Debug, Parser)]
#[command(name = "hookfile", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "hookfile.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Project root
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the cooked hooks for the project
    Inspect(inspect::InspectArgs),
    /// Print the checksum of the project hookfile
    Checksum(HookfileArgs),
    /// Print the effective configuration
    Config,
}

/// Hookfile location overrides shared by commands that load hooks
#[derive(Debug, Clone, Default, Args)]
pub struct HookfileArgs {
    /// Global hookfile path
    #[arg(long)]
    pub global_hookfile: Option<String>,

    /// Project hookfile path
    #[arg(long)]
    pub hookfile: Option<String>,

    /// Do not load the project hookfile
    #[arg(long)]
    pub ignore_hookfile: bool,
}

impl HookfileArgs {
    /// Applies the overrides on top of the configured locations
    pub fn apply(&self, config: &HooksConfig) -> HooksConfig {
        HooksConfig {
            global_hookfile: self
                .global_hookfile
                .clone()
                .or_else(|| config.global_hookfile.clone()),
            hookfile: self.hookfile.clone().or_else(|| config.hookfile.clone()),
            ignore_hookfile: self.ignore_hookfile || config.ignore_hookfile,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Inspect(args) => {
                inspect::execute(args, &self.project_root()?, &config, self.format).await
            }
            Commands::Checksum(args) => {
                checksum::execute(args, &self.project_root()?, &config, self.format).await
            }
            Commands::Config => config::execute(&config, self.format),
        }
    }

    fn project_root(&self) -> Result<PathBuf, AppError> {
        std::path::absolute(&self.dir).map_err(|e| {
            AppError::configuration(format!(
                "Invalid project directory '{}': {}",
                self.dir.display(),
                e
            ))
        })
    }
}

/// Helper: build a hook manager with the loader this binary was compiled with
pub fn hook_manager() -> HookManager {
    HookManager::with_loader(loader())
}

#[cfg(feature = "dynamic")]
fn loader() -> Arc<dyn HookLoader> {
    Arc::new(hookfile_hooks::loader::DynamicHookLoader::new())
}

#[cfg(not(feature = "dynamic"))]
fn loader() -> Arc<dyn HookLoader> {
    Arc::new(hookfile_hooks::StaticHookLoader::new())
}

/// Helper: load and compose the hooks for a project
pub async fn require_hooks(
    project_root: &Path,
    args: &HookfileArgs,
    config: &AppConfig,
) -> Result<hookfile_hooks::CookedHooks, AppError> {
    hook_manager()
        .require_hooks(project_root, &args.apply(&config.hooks))
        .await
}
