//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use hookfile_core::result::AppResult;
use hookfile_hooks::{
    HookDeclarationSet, HookManager, MemorySink, Sha256FileHasher, StaticHookLoader,
};

/// A project directory plus a separate directory for global hookfiles
pub struct TestProject {
    /// Project root
    pub project: TempDir,
    /// Directory standing in for the system-wide location
    pub system: TempDir,
    /// Loader the manager uses
    pub loader: Arc<StaticHookLoader>,
    /// Captures every hook log record
    pub sink: Arc<MemorySink>,
}

impl TestProject {
    /// Create empty project and system directories
    pub fn new() -> Self {
        Self {
            project: tempfile::tempdir().expect("Failed to create project dir"),
            system: tempfile::tempdir().expect("Failed to create system dir"),
            loader: Arc::new(StaticHookLoader::new()),
            sink: Arc::new(MemorySink::new()),
        }
    }

    /// Project root
    pub fn root(&self) -> &Path {
        self.project.path()
    }

    /// Write a hookfile under the project root
    pub async fn write_project_file(&self, relative: &str, contents: &str) -> PathBuf {
        write(self.project.path().join(relative), contents).await
    }

    /// Write a hookfile under the system directory
    pub async fn write_global_file(&self, name: &str, contents: &str) -> PathBuf {
        write(self.system.path().join(name), contents).await
    }

    /// Register compiled-in declarations for a hookfile path
    pub async fn register<F>(&self, path: &Path, factory: F)
    where
        F: Fn(&Path) -> AppResult<HookDeclarationSet> + Send + Sync + 'static,
    {
        self.loader.register(path, factory).await;
    }

    /// Manager wired to this project's loader and sink
    pub fn manager(&self) -> HookManager {
        HookManager::new(
            self.loader.clone(),
            Arc::new(Sha256FileHasher),
            self.sink.clone(),
        )
    }
}

async fn write(path: PathBuf, contents: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .expect("Failed to create hookfile dir");
    }
    tokio::fs::write(&path, contents)
        .await
        .expect("Failed to write hookfile");
    path
}
