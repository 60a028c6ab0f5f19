//! Hookfile loaders.
//!
//! A loader turns a hookfile path into a [`HookDeclarationSet`]. `Ok(None)`
//! means no file exists at the path; whether that is an error is up to the
//! caller.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use hookfile_core::error::{AppError, ErrorKind};
use hookfile_core::result::AppResult;

use crate::hooks::declarations::HookDeclarationSet;

/// Loads the declarations of one hookfile.
///
/// The origin of a returned set is not trusted: [`crate::HookManager`]
/// rebinds it to the path it resolved.
#[async_trait]
pub trait HookLoader: Send + Sync + std::fmt::Debug {
    /// Loads the hookfile at `path` for the project at `project_root`.
    async fn load(&self, path: &Path, project_root: &Path)
    -> AppResult<Option<HookDeclarationSet>>;
}

/// Returns whether a hookfile exists at `path`.
pub async fn hookfile_exists(path: &Path) -> AppResult<bool> {
    tokio::fs::try_exists(path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Storage,
            format!("Failed to check hookfile '{}': {e}", path.display()),
            e,
        )
    })
}

/// Factory producing the declarations of a compiled-in hookfile. Receives
/// the project root.
pub type DeclarationFactory =
    Arc<dyn Fn(&Path) -> AppResult<HookDeclarationSet> + Send + Sync>;

/// Loader for hookfiles compiled into the host binary.
///
/// Declarations are registered per path. A file that exists but has no
/// registration loads as an empty declaration set.
#[derive(Default)]
pub struct StaticHookLoader {
    factories: RwLock<HashMap<PathBuf, DeclarationFactory>>,
}

impl StaticHookLoader {
    /// Creates a loader with no registrations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the declarations for the hookfile at `path`.
    pub async fn register<F>(&self, path: impl Into<PathBuf>, factory: F)
    where
        F: Fn(&Path) -> AppResult<HookDeclarationSet> + Send + Sync + 'static,
    {
        let path = path.into();
        info!(path = %path.display(), "Hookfile declarations registered");
        self.factories.write().await.insert(path, Arc::new(factory));
    }
}

#[async_trait]
impl HookLoader for StaticHookLoader {
    async fn load(
        &self,
        path: &Path,
        project_root: &Path,
    ) -> AppResult<Option<HookDeclarationSet>> {
        if !hookfile_exists(path).await? {
            debug!(path = %path.display(), "No hookfile found");
            return Ok(None);
        }

        let factory = self.factories.read().await.get(path).cloned();
        let declarations = match factory {
            Some(factory) => factory(project_root).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Plugin,
                    format!("Failed to load hookfile '{}': {}", path.display(), e.message),
                    e,
                )
            })?,
            None => HookDeclarationSet::default(),
        };
        let declarations = declarations.with_origin(path);

        info!(
            path = %path.display(),
            hooks = ?declarations.declared(),
            "Hookfile loaded"
        );

        Ok(Some(declarations))
    }
}

impl std::fmt::Debug for StaticHookLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticHookLoader").finish()
    }
}

/// Shared-library hookfile loader using `libloading` (feature-gated).
#[cfg(feature = "dynamic")]
pub mod dynamic_loader {
    use std::path::Path;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tracing::info;

    use hookfile_core::error::AppError;
    use hookfile_core::result::AppResult;

    use super::{HookLoader, hookfile_exists};
    use crate::hooks::declarations::HookDeclarationSet;

    /// Symbol every dynamic hookfile must export.
    pub const DECLARATIONS_SYMBOL: &[u8] = b"hookfile_declarations";

    /// Type of the declaration function exported by dynamic hookfiles.
    ///
    /// Dynamic hookfiles must export:
    /// `extern "C" fn hookfile_declarations() -> *mut HookDeclarationSet`
    /// returning a pointer obtained from `Box::into_raw`.
    pub type DeclareHooksFn = unsafe extern "C" fn() -> *mut HookDeclarationSet;

    /// Loads hookfiles from shared libraries (.so / .dll / .dylib).
    #[derive(Default)]
    pub struct DynamicHookLoader {
        /// Loaded libraries, kept alive as long as their hooks may run.
        libraries: Mutex<Vec<libloading::Library>>,
    }

    impl DynamicHookLoader {
        /// Creates a new dynamic loader.
        pub fn new() -> Self {
            Self::default()
        }

        /// Loads the declarations exported by the library at `path`.
        ///
        /// # Safety
        /// This runs arbitrary code from a shared library, which must have
        /// been built against the same version of this crate.
        unsafe fn load_library(&self, path: &Path) -> AppResult<HookDeclarationSet> {
            let lib = unsafe { libloading::Library::new(path) }.map_err(|e| {
                AppError::plugin(format!(
                    "Failed to load hookfile library '{}': {}",
                    path.display(),
                    e
                ))
            })?;

            let raw = {
                let declare: libloading::Symbol<DeclareHooksFn> =
                    unsafe { lib.get(DECLARATIONS_SYMBOL) }.map_err(|e| {
                        AppError::plugin(format!(
                            "Hookfile '{}' missing 'hookfile_declarations' symbol: {}",
                            path.display(),
                            e
                        ))
                    })?;
                unsafe { declare() }
            };

            if raw.is_null() {
                return Err(AppError::plugin(format!(
                    "Hookfile '{}' returned no declarations",
                    path.display()
                )));
            }
            let declarations = unsafe { Box::from_raw(raw) };

            self.libraries
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .push(lib);

            Ok(*declarations)
        }
    }

    #[async_trait]
    impl HookLoader for DynamicHookLoader {
        async fn load(
            &self,
            path: &Path,
            _project_root: &Path,
        ) -> AppResult<Option<HookDeclarationSet>> {
            if !hookfile_exists(path).await? {
                return Ok(None);
            }

            let declarations = unsafe { self.load_library(path) }?.with_origin(path);

            info!(
                path = %path.display(),
                hooks = ?declarations.declared(),
                "Dynamic hookfile loaded"
            );

            Ok(Some(declarations))
        }
    }

    impl std::fmt::Debug for DynamicHookLoader {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            let loaded = self
                .libraries
                .lock()
                .map(|libraries| libraries.len())
                .unwrap_or(0);
            f.debug_struct("DynamicHookLoader")
                .field("loaded_count", &loaded)
                .finish()
        }
    }
}

#[cfg(feature = "dynamic")]
pub use dynamic_loader::DynamicHookLoader;
