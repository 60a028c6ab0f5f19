//! Hook composer: merges the global and project declaration sets into one
//! cooked bundle.
//!
//! Rules:
//! - `readPackage`, `afterAllResolved` and `filterLog` collect one entry per
//!   scope, global first. Each entry is bound to a context naming its hookfile.
//! - `importPackage`, `preResolution` and `fetchers` come from the global
//!   hookfile only.
//! - A checksum provider exists iff a project hookfile was loaded.
//!
//! Composition performs no I/O and cannot fail.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use hookfile_core::error::AppError;
use hookfile_core::result::AppResult;

use crate::checksum::{ChecksumProvider, ContentHasher};

use super::context::{HookContext, HookLogSink, PreResolutionLogger};
use super::declarations::{
    AfterAllResolvedHook, CustomFetchers, FilterLogHook, HookDeclarationSet, ImportPackageHook,
    PreResolutionHook, ReadPackageHook,
};
use super::definitions::{HookCategory, HookScope, LogEvent, PreResolutionContext};

/// A hook bound to the context it runs with.
pub struct Cooked<H: ?Sized> {
    hook: Arc<H>,
    scope: HookScope,
    context: HookContext,
}

impl<H: ?Sized> Cooked<H> {
    fn new(hook: Arc<H>, scope: HookScope, context: HookContext) -> Self {
        Self {
            hook,
            scope,
            context,
        }
    }

    /// Scope of the hookfile that declared this hook.
    pub fn scope(&self) -> HookScope {
        self.scope
    }

    /// Context this hook logs through.
    pub fn context(&self) -> &HookContext {
        &self.context
    }
}

impl<H: ?Sized> Clone for Cooked<H> {
    fn clone(&self) -> Self {
        Self {
            hook: Arc::clone(&self.hook),
            scope: self.scope,
            context: self.context.clone(),
        }
    }
}

impl<H: ?Sized> std::fmt::Debug for Cooked<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cooked")
            .field("scope", &self.scope)
            .field("context", &self.context)
            .finish()
    }
}

impl Cooked<dyn ReadPackageHook> {
    /// Runs the hook on `manifest`.
    ///
    /// Fails if the hook does not hand back a manifest object.
    pub async fn call(&self, manifest: Value) -> AppResult<Value> {
        let manifest = self.hook.read_package(manifest, &self.context).await?;
        if !manifest.is_object() {
            return Err(AppError::plugin(format!(
                "readPackage hook from '{}' did not return a package manifest object",
                self.context.origin()
            )));
        }
        Ok(manifest)
    }
}

impl Cooked<dyn AfterAllResolvedHook> {
    /// Runs the hook on `lockfile`.
    pub async fn call(&self, lockfile: Value) -> AppResult<Value> {
        self.hook.after_all_resolved(lockfile, &self.context).await
    }
}

impl Cooked<dyn FilterLogHook> {
    /// Returns `true` if the hook keeps `event`.
    pub fn call(&self, event: &LogEvent) -> bool {
        self.hook.filter_log(event, &self.context)
    }
}

/// The `preResolution` hook bound to its dedicated logger.
#[derive(Clone)]
pub struct CookedPreResolution {
    hook: Arc<dyn PreResolutionHook>,
    logger: PreResolutionLogger,
}

impl CookedPreResolution {
    /// Runs the hook with the pipeline's context and the bound logger.
    pub async fn call(&self, ctx: &PreResolutionContext) -> AppResult<()> {
        self.hook.pre_resolution(ctx, &self.logger).await
    }
}

impl std::fmt::Debug for CookedPreResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookedPreResolution")
            .field("logger", &self.logger)
            .finish()
    }
}

/// One row of [`CookedHooks::summary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookSummary {
    pub hook: HookCategory,
    pub scope: HookScope,
    /// Hookfile path, when the entry carries a context.
    pub from: Option<String>,
}

/// The merged, wrapped hooks for one resolution run.
///
/// Composable categories are always present, possibly empty.
#[derive(Clone, Default)]
pub struct CookedHooks {
    read_package: Vec<Cooked<dyn ReadPackageHook>>,
    after_all_resolved: Vec<Cooked<dyn AfterAllResolvedHook>>,
    filter_log: Vec<Cooked<dyn FilterLogHook>>,
    import_package: Option<Arc<dyn ImportPackageHook>>,
    pre_resolution: Option<CookedPreResolution>,
    fetchers: Option<CustomFetchers>,
    checksum: Option<ChecksumProvider>,
}

impl CookedHooks {
    /// The bundle used when no hookfile is configured.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn read_package(&self) -> &[Cooked<dyn ReadPackageHook>] {
        &self.read_package
    }

    pub fn after_all_resolved(&self) -> &[Cooked<dyn AfterAllResolvedHook>] {
        &self.after_all_resolved
    }

    pub fn filter_log(&self) -> &[Cooked<dyn FilterLogHook>] {
        &self.filter_log
    }

    pub fn import_package(&self) -> Option<&Arc<dyn ImportPackageHook>> {
        self.import_package.as_ref()
    }

    pub fn pre_resolution(&self) -> Option<&CookedPreResolution> {
        self.pre_resolution.as_ref()
    }

    pub fn fetchers(&self) -> Option<&CustomFetchers> {
        self.fetchers.as_ref()
    }

    pub fn checksum_provider(&self) -> Option<&ChecksumProvider> {
        self.checksum.as_ref()
    }

    /// Passes `manifest` through every `readPackage` entry in order.
    pub async fn apply_read_package(&self, manifest: Value) -> AppResult<Value> {
        let mut manifest = manifest;
        for entry in &self.read_package {
            manifest = entry.call(manifest).await?;
        }
        Ok(manifest)
    }

    /// Passes `lockfile` through every `afterAllResolved` entry in order.
    pub async fn apply_after_all_resolved(&self, lockfile: Value) -> AppResult<Value> {
        let mut lockfile = lockfile;
        for entry in &self.after_all_resolved {
            lockfile = entry.call(lockfile).await?;
        }
        Ok(lockfile)
    }

    /// Offers `event` to every `filterLog` entry in order.
    ///
    /// Every entry sees the event; it is kept only if all of them accept it.
    pub fn accepts_log(&self, event: &LogEvent) -> bool {
        self.filter_log
            .iter()
            .fold(true, |keep, entry| entry.call(event) && keep)
    }

    /// Runs the `preResolution` hook, if one is declared.
    pub async fn run_pre_resolution(&self, ctx: &PreResolutionContext) -> AppResult<()> {
        match &self.pre_resolution {
            Some(hook) => hook.call(ctx).await,
            None => Ok(()),
        }
    }

    /// Checksum of the project hookfile, or `None` when none was loaded.
    pub async fn calculate_checksum(&self) -> AppResult<Option<String>> {
        match &self.checksum {
            Some(provider) => provider.calculate().await.map(Some),
            None => Ok(None),
        }
    }

    /// Lists every cooked entry, composable categories in invocation order.
    pub fn summary(&self) -> Vec<HookSummary> {
        let mut rows = Vec::new();
        for entry in &self.read_package {
            rows.push(entry_summary(HookCategory::ReadPackage, entry));
        }
        for entry in &self.after_all_resolved {
            rows.push(entry_summary(HookCategory::AfterAllResolved, entry));
        }
        for entry in &self.filter_log {
            rows.push(entry_summary(HookCategory::FilterLog, entry));
        }
        let globals = [
            (HookCategory::ImportPackage, self.import_package.is_some()),
            (HookCategory::PreResolution, self.pre_resolution.is_some()),
            (HookCategory::Fetchers, self.fetchers.is_some()),
        ];
        for (hook, present) in globals {
            if present {
                rows.push(HookSummary {
                    hook,
                    scope: HookScope::Global,
                    from: None,
                });
            }
        }
        rows
    }

    /// Returns whether no hook is present and no checksum provider exists.
    pub fn is_empty(&self) -> bool {
        self.summary().is_empty() && self.checksum.is_none()
    }
}

/// Categories a project hookfile declares but may not define.
fn ignored_in_project(declarations: &HookDeclarationSet) -> Vec<HookCategory> {
    declarations
        .declared()
        .into_iter()
        .filter(|c| !c.allowed_in(HookScope::Project))
        .collect()
}

fn entry_summary<H: ?Sized>(hook: HookCategory, entry: &Cooked<H>) -> HookSummary {
    HookSummary {
        hook,
        scope: entry.scope(),
        from: Some(entry.context().origin().to_string()),
    }
}

impl std::fmt::Debug for CookedHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookedHooks")
            .field("read_package", &self.read_package)
            .field("after_all_resolved", &self.after_all_resolved)
            .field("filter_log", &self.filter_log)
            .field("import_package", &self.import_package.is_some())
            .field("pre_resolution", &self.pre_resolution)
            .field("fetchers", &self.fetchers)
            .field("checksum", &self.checksum)
            .finish()
    }
}

/// Builds [`CookedHooks`] from loaded declaration sets.
#[derive(Clone)]
pub struct HookComposer {
    sink: Arc<dyn HookLogSink>,
    hasher: Arc<dyn ContentHasher>,
}

impl HookComposer {
    /// Creates a composer whose contexts log to `sink` and whose checksum
    /// provider hashes with `hasher`.
    pub fn new(sink: Arc<dyn HookLogSink>, hasher: Arc<dyn ContentHasher>) -> Self {
        Self { sink, hasher }
    }

    /// Merges the two declaration sets.
    pub fn compose(
        &self,
        project_root: &Path,
        global: Option<&HookDeclarationSet>,
        project: Option<&HookDeclarationSet>,
    ) -> CookedHooks {
        if global.is_none() && project.is_none() {
            return CookedHooks::empty();
        }

        let mut cooked = CookedHooks::empty();

        for scope in HookScope::ORDER {
            let declarations = match scope {
                HookScope::Global => global,
                HookScope::Project => project,
            };
            let Some(declarations) = declarations else {
                continue;
            };

            if let Some(hook) = &declarations.read_package {
                cooked.read_package.push(Cooked::new(
                    Arc::clone(hook),
                    scope,
                    self.context(declarations, project_root, HookCategory::ReadPackage),
                ));
            }
            if let Some(hook) = &declarations.after_all_resolved {
                cooked.after_all_resolved.push(Cooked::new(
                    Arc::clone(hook),
                    scope,
                    self.context(declarations, project_root, HookCategory::AfterAllResolved),
                ));
            }
            if let Some(hook) = &declarations.filter_log {
                cooked.filter_log.push(Cooked::new(
                    Arc::clone(hook),
                    scope,
                    self.context(declarations, project_root, HookCategory::FilterLog),
                ));
            }
        }

        if let Some(global) = global {
            cooked.import_package = global.import_package.clone();
            cooked.pre_resolution = global.pre_resolution.as_ref().map(|hook| CookedPreResolution {
                hook: Arc::clone(hook),
                logger: PreResolutionLogger::new(project_root, Arc::clone(&self.sink)),
            });
            cooked.fetchers = global.fetchers.clone();
        }

        if let Some(project) = project {
            let ignored = ignored_in_project(project);
            if !ignored.is_empty() {
                warn!(
                    hookfile = %project.origin().display(),
                    hooks = ?ignored,
                    "Project hookfile declares hooks that only a global hookfile may define; ignoring them"
                );
            }

            cooked.checksum = Some(ChecksumProvider::new(
                project.origin(),
                Arc::clone(&self.hasher),
            ));
        }

        debug!(
            read_package = cooked.read_package.len(),
            after_all_resolved = cooked.after_all_resolved.len(),
            filter_log = cooked.filter_log.len(),
            import_package = cooked.import_package.is_some(),
            pre_resolution = cooked.pre_resolution.is_some(),
            fetchers = cooked.fetchers.is_some(),
            "Hooks composed"
        );

        cooked
    }

    fn context(
        &self,
        declarations: &HookDeclarationSet,
        project_root: &Path,
        hook: HookCategory,
    ) -> HookContext {
        HookContext::new(
            declarations.origin(),
            project_root,
            hook,
            Arc::clone(&self.sink),
        )
    }
}

impl std::fmt::Debug for HookComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookComposer").finish()
    }
}
