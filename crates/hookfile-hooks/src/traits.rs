//! Closure-based hook implementations for quick hook creation.
//!
//! Each adapter wraps a closure and implements the matching hook trait, so
//! hookfiles can declare hooks without a named type:
//!
//! ```rust,ignore
//! let hooks = HookDeclarationSet::new(path).with_read_package(read_package_fn(
//!     |mut pkg, ctx| async move {
//!         ctx.log("patched");
//!         pkg["patched"] = json!(true);
//!         Ok(pkg)
//!     },
//! ));
//! ```
//!
//! Async closures receive owned copies of their arguments so the returned
//! future does not borrow from the caller.

use std::future::Future;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;

use hookfile_core::result::AppResult;

use crate::hooks::context::{HookContext, PreResolutionLogger};
use crate::hooks::declarations::{
    AfterAllResolvedHook, Fetcher, FilterLogHook, ImportPackageHook, PreResolutionHook,
    ReadPackageHook,
};
use crate::hooks::definitions::{
    FetchRequest, FetchResult, ImportPackageOptions, LogEvent, PreResolutionContext,
};

/// `readPackage` hook backed by a closure.
pub struct ReadPackageFn<F>(F);

/// Wraps `f` as a `readPackage` hook.
pub fn read_package_fn<F, Fut>(f: F) -> ReadPackageFn<F>
where
    F: Fn(Value, HookContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AppResult<Value>> + Send + 'static,
{
    ReadPackageFn(f)
}

#[async_trait]
impl<F, Fut> ReadPackageHook for ReadPackageFn<F>
where
    F: Fn(Value, HookContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AppResult<Value>> + Send + 'static,
{
    async fn read_package(&self, manifest: Value, ctx: &HookContext) -> AppResult<Value> {
        (self.0)(manifest, ctx.clone()).await
    }
}

/// `afterAllResolved` hook backed by a closure.
pub struct AfterAllResolvedFn<F>(F);

/// Wraps `f` as an `afterAllResolved` hook.
pub fn after_all_resolved_fn<F, Fut>(f: F) -> AfterAllResolvedFn<F>
where
    F: Fn(Value, HookContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AppResult<Value>> + Send + 'static,
{
    AfterAllResolvedFn(f)
}

#[async_trait]
impl<F, Fut> AfterAllResolvedHook for AfterAllResolvedFn<F>
where
    F: Fn(Value, HookContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AppResult<Value>> + Send + 'static,
{
    async fn after_all_resolved(&self, lockfile: Value, ctx: &HookContext) -> AppResult<Value> {
        (self.0)(lockfile, ctx.clone()).await
    }
}

/// `filterLog` hook backed by a closure.
pub struct FilterLogFn<F>(F);

/// Wraps `f` as a `filterLog` hook.
pub fn filter_log_fn<F>(f: F) -> FilterLogFn<F>
where
    F: Fn(&LogEvent, &HookContext) -> bool + Send + Sync + 'static,
{
    FilterLogFn(f)
}

impl<F> FilterLogHook for FilterLogFn<F>
where
    F: Fn(&LogEvent, &HookContext) -> bool + Send + Sync + 'static,
{
    fn filter_log(&self, event: &LogEvent, ctx: &HookContext) -> bool {
        (self.0)(event, ctx)
    }
}

/// `importPackage` hook backed by a closure.
pub struct ImportPackageFn<F>(F);

/// Wraps `f` as an `importPackage` hook.
pub fn import_package_fn<F, Fut>(f: F) -> ImportPackageFn<F>
where
    F: Fn(PathBuf, ImportPackageOptions) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AppResult<Option<String>>> + Send + 'static,
{
    ImportPackageFn(f)
}

#[async_trait]
impl<F, Fut> ImportPackageHook for ImportPackageFn<F>
where
    F: Fn(PathBuf, ImportPackageOptions) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AppResult<Option<String>>> + Send + 'static,
{
    async fn import_package(
        &self,
        to: &Path,
        opts: ImportPackageOptions,
    ) -> AppResult<Option<String>> {
        (self.0)(to.to_path_buf(), opts).await
    }
}

/// `preResolution` hook backed by a closure.
pub struct PreResolutionFn<F>(F);

/// Wraps `f` as a `preResolution` hook.
pub fn pre_resolution_fn<F, Fut>(f: F) -> PreResolutionFn<F>
where
    F: Fn(PreResolutionContext, PreResolutionLogger) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AppResult<()>> + Send + 'static,
{
    PreResolutionFn(f)
}

#[async_trait]
impl<F, Fut> PreResolutionHook for PreResolutionFn<F>
where
    F: Fn(PreResolutionContext, PreResolutionLogger) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AppResult<()>> + Send + 'static,
{
    async fn pre_resolution(
        &self,
        ctx: &PreResolutionContext,
        logger: &PreResolutionLogger,
    ) -> AppResult<()> {
        (self.0)(ctx.clone(), logger.clone()).await
    }
}

/// Fetcher backed by a closure.
pub struct FetcherFn<F>(F);

/// Wraps `f` as a [`Fetcher`].
pub fn fetcher_fn<F, Fut>(f: F) -> FetcherFn<F>
where
    F: Fn(FetchRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AppResult<FetchResult>> + Send + 'static,
{
    FetcherFn(f)
}

#[async_trait]
impl<F, Fut> Fetcher for FetcherFn<F>
where
    F: Fn(FetchRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AppResult<FetchResult>> + Send + 'static,
{
    async fn fetch(&self, request: FetchRequest) -> AppResult<FetchResult> {
        (self.0)(request).await
    }
}
