//! Hookfile path resolution.

use std::path::{Path, PathBuf};

/// File name of the project hookfile when no override is configured.
pub const DEFAULT_HOOKFILE_NAME: &str = ".hookfile";

/// Resolves `path` against `base`.
///
/// Absolute paths are returned unchanged and `~/` expands to the home
/// directory.
pub fn absolutize(path: &str, base: &Path) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }

    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Path of the project hookfile for `project_root`.
pub fn resolve_hookfile_path(project_root: &Path, override_path: Option<&str>) -> PathBuf {
    match override_path {
        Some(path) => absolutize(path, project_root),
        None => project_root.join(DEFAULT_HOOKFILE_NAME),
    }
}

/// Path of the configured global hookfile.
pub fn resolve_global_hookfile_path(project_root: &Path, configured: &str) -> PathBuf {
    absolutize(configured, project_root)
}
