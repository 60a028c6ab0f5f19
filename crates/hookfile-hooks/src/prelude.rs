//! Prelude for writing hookfiles: `use hookfile_hooks::prelude::*`.

pub use crate::hooks::context::{HookContext, PreResolutionLogger};
pub use crate::hooks::declarations::{
    AfterAllResolvedHook, CustomFetchers, Fetcher, FilterLogHook, HookDeclarationSet,
    ImportPackageHook, PreResolutionHook, ReadPackageHook,
};
pub use crate::hooks::definitions::{
    FetchRequest, FetchResult, FetcherKind, HookCategory, ImportPackageOptions, LogEvent,
    LogLevel, PreResolutionContext, ResolvedFrom,
};
pub use crate::traits::{
    after_all_resolved_fn, fetcher_fn, filter_log_fn, import_package_fn, pre_resolution_fn,
    read_package_fn,
};

pub use async_trait::async_trait;
pub use hookfile_core::error::AppError;
pub use hookfile_core::result::AppResult;
pub use serde_json::{Value, json};
