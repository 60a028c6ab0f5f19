//! Hook traits and the declaration set a loaded hookfile produces.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use hookfile_core::result::AppResult;

use super::context::{HookContext, PreResolutionLogger};
use super::definitions::{
    FetchRequest, FetchResult, FetcherKind, HookCategory, ImportPackageOptions, LogEvent,
    PreResolutionContext,
};

/// Transforms a package manifest.
#[async_trait]
pub trait ReadPackageHook: Send + Sync {
    /// Returns the (possibly modified) manifest.
    async fn read_package(&self, manifest: Value, ctx: &HookContext) -> AppResult<Value>;
}

/// Transforms the resolved lockfile.
#[async_trait]
pub trait AfterAllResolvedHook: Send + Sync {
    /// Returns the (possibly modified) lockfile.
    async fn after_all_resolved(&self, lockfile: Value, ctx: &HookContext) -> AppResult<Value>;
}

/// Decides whether a log event is reported.
pub trait FilterLogHook: Send + Sync {
    /// Returns `true` to keep the event.
    fn filter_log(&self, event: &LogEvent, ctx: &HookContext) -> bool;
}

/// Imports a package from the store into a target directory.
#[async_trait]
pub trait ImportPackageHook: Send + Sync {
    /// Returns the import method used, or `None` if nothing was imported.
    async fn import_package(
        &self,
        to: &Path,
        opts: ImportPackageOptions,
    ) -> AppResult<Option<String>>;
}

/// Runs before resolution starts.
#[async_trait]
pub trait PreResolutionHook: Send + Sync {
    async fn pre_resolution(
        &self,
        ctx: &PreResolutionContext,
        logger: &PreResolutionLogger,
    ) -> AppResult<()>;
}

/// Fetches package contents for one resolution kind.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: FetchRequest) -> AppResult<FetchResult>;
}

/// Fetcher overrides keyed by resolution kind.
#[derive(Clone, Default)]
pub struct CustomFetchers {
    fetchers: HashMap<FetcherKind, Arc<dyn Fetcher>>,
}

impl CustomFetchers {
    /// Creates an empty set of overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the fetcher for `kind`.
    pub fn with(mut self, kind: FetcherKind, fetcher: impl Fetcher + 'static) -> Self {
        self.fetchers.insert(kind, Arc::new(fetcher));
        self
    }

    /// Returns the override for `kind`, if any.
    pub fn get(&self, kind: FetcherKind) -> Option<&Arc<dyn Fetcher>> {
        self.fetchers.get(&kind)
    }

    /// Returns the overridden kinds.
    pub fn kinds(&self) -> Vec<FetcherKind> {
        let mut kinds: Vec<FetcherKind> = self.fetchers.keys().copied().collect();
        kinds.sort_by_key(|k| k.as_str());
        kinds
    }

    pub fn is_empty(&self) -> bool {
        self.fetchers.is_empty()
    }
}

impl std::fmt::Debug for CustomFetchers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomFetchers")
            .field("kinds", &self.kinds())
            .finish()
    }
}

/// Everything one hookfile declares.
///
/// Each category has exactly one typed slot, so a declaration set can only
/// ever name known hooks.
#[derive(Clone, Default)]
pub struct HookDeclarationSet {
    origin: PathBuf,
    pub read_package: Option<Arc<dyn ReadPackageHook>>,
    pub after_all_resolved: Option<Arc<dyn AfterAllResolvedHook>>,
    pub filter_log: Option<Arc<dyn FilterLogHook>>,
    pub import_package: Option<Arc<dyn ImportPackageHook>>,
    pub pre_resolution: Option<Arc<dyn PreResolutionHook>>,
    pub fetchers: Option<CustomFetchers>,
}

impl HookDeclarationSet {
    /// Creates an empty declaration set for the hookfile at `origin`.
    pub fn new(origin: impl Into<PathBuf>) -> Self {
        Self {
            origin: origin.into(),
            ..Self::default()
        }
    }

    /// Path of the hookfile these declarations came from.
    pub fn origin(&self) -> &Path {
        &self.origin
    }

    /// Rebinds the declarations to another hookfile path.
    pub fn with_origin(mut self, origin: impl Into<PathBuf>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn with_read_package(mut self, hook: impl ReadPackageHook + 'static) -> Self {
        self.read_package = Some(Arc::new(hook));
        self
    }

    pub fn with_after_all_resolved(mut self, hook: impl AfterAllResolvedHook + 'static) -> Self {
        self.after_all_resolved = Some(Arc::new(hook));
        self
    }

    pub fn with_filter_log(mut self, hook: impl FilterLogHook + 'static) -> Self {
        self.filter_log = Some(Arc::new(hook));
        self
    }

    pub fn with_import_package(mut self, hook: impl ImportPackageHook + 'static) -> Self {
        self.import_package = Some(Arc::new(hook));
        self
    }

    pub fn with_pre_resolution(mut self, hook: impl PreResolutionHook + 'static) -> Self {
        self.pre_resolution = Some(Arc::new(hook));
        self
    }

    pub fn with_fetchers(mut self, fetchers: CustomFetchers) -> Self {
        self.fetchers = Some(fetchers);
        self
    }

    /// Returns whether `category` is declared.
    pub fn declares(&self, category: HookCategory) -> bool {
        match category {
            HookCategory::ReadPackage => self.read_package.is_some(),
            HookCategory::AfterAllResolved => self.after_all_resolved.is_some(),
            HookCategory::FilterLog => self.filter_log.is_some(),
            HookCategory::ImportPackage => self.import_package.is_some(),
            HookCategory::PreResolution => self.pre_resolution.is_some(),
            HookCategory::Fetchers => self.fetchers.is_some(),
        }
    }

    /// Returns the declared categories in presentation order.
    pub fn declared(&self) -> Vec<HookCategory> {
        HookCategory::ALL
            .into_iter()
            .filter(|c| self.declares(*c))
            .collect()
    }

    /// Returns whether no hook is declared.
    pub fn is_empty(&self) -> bool {
        self.declared().is_empty()
    }
}

impl std::fmt::Debug for HookDeclarationSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookDeclarationSet")
            .field("origin", &self.origin)
            .field("declared", &self.declared())
            .finish()
    }
}
