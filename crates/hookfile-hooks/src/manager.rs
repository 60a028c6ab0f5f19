//! Hook manager: resolves, loads and composes the hookfiles for a project.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use hookfile_core::config::hooks::HooksConfig;
use hookfile_core::error::AppError;
use hookfile_core::result::AppResult;

use crate::checksum::{ContentHasher, Sha256FileHasher};
use crate::hooks::composer::{CookedHooks, HookComposer};
use crate::hooks::context::{HookLogSink, TracingSink};
use crate::hooks::declarations::HookDeclarationSet;
use crate::loader::HookLoader;
use crate::paths::{resolve_global_hookfile_path, resolve_hookfile_path};

/// Produces the cooked hooks for one resolution run.
#[derive(Debug, Clone)]
pub struct HookManager {
    loader: Arc<dyn HookLoader>,
    composer: HookComposer,
}

impl HookManager {
    /// Creates a manager with explicit collaborators.
    pub fn new(
        loader: Arc<dyn HookLoader>,
        hasher: Arc<dyn ContentHasher>,
        sink: Arc<dyn HookLogSink>,
    ) -> Self {
        Self {
            loader,
            composer: HookComposer::new(sink, hasher),
        }
    }

    /// Creates a manager that hashes with SHA-256 and logs through `tracing`.
    pub fn with_loader(loader: Arc<dyn HookLoader>) -> Self {
        Self::new(loader, Arc::new(Sha256FileHasher), Arc::new(TracingSink))
    }

    /// Loads the global and project hookfiles and composes them.
    ///
    /// A configured global hookfile, or an explicitly configured project
    /// hookfile, that does not exist is an error. The default project
    /// hookfile is optional.
    pub async fn require_hooks(
        &self,
        project_root: &Path,
        config: &HooksConfig,
    ) -> AppResult<CookedHooks> {
        let global = match &config.global_hookfile {
            Some(configured) => {
                let path = resolve_global_hookfile_path(project_root, configured);
                Some(self.load_required(&path, project_root).await?)
            }
            None => None,
        };

        let project = if config.ignore_hookfile {
            debug!("Project hookfile ignored by configuration");
            None
        } else {
            let path = resolve_hookfile_path(project_root, config.hookfile.as_deref());
            if config.hookfile.is_some() {
                Some(self.load_required(&path, project_root).await?)
            } else {
                self.load(&path, project_root).await?
            }
        };

        let cooked = self
            .composer
            .compose(project_root, global.as_ref(), project.as_ref());

        info!(
            project_root = %project_root.display(),
            global = global.is_some(),
            project = project.is_some(),
            hooks = cooked.summary().len(),
            "Hooks ready"
        );

        Ok(cooked)
    }

    /// Loads the hookfile at `path`, bound to `path` whatever origin the
    /// loader reported.
    async fn load(
        &self,
        path: &Path,
        project_root: &Path,
    ) -> AppResult<Option<HookDeclarationSet>> {
        let declarations = self.loader.load(path, project_root).await?;
        Ok(declarations.map(|d| d.with_origin(path)))
    }

    async fn load_required(
        &self,
        path: &Path,
        project_root: &Path,
    ) -> AppResult<HookDeclarationSet> {
        self.load(path, project_root)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Hookfile '{}' not found", path.display()))
            })
    }
}
