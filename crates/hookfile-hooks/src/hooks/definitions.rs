//! Hook categories, scopes, and the typed payloads hooks operate on.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use hookfile_core::error::AppError;

/// The closed set of extension points a hookfile can customize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HookCategory {
    /// Transforms each package manifest as it is read.
    ReadPackage,
    /// Post-processes the lockfile once the whole graph is resolved.
    AfterAllResolved,
    /// Decides whether a log event reaches the reporter.
    FilterLog,
    /// Replaces the package import strategy.
    ImportPackage,
    /// Runs before resolution with access to both lockfiles.
    PreResolution,
    /// Replaces fetchers per resolution kind.
    Fetchers,
}

impl HookCategory {
    /// Every category, in presentation order.
    pub const ALL: [HookCategory; 6] = [
        Self::ReadPackage,
        Self::AfterAllResolved,
        Self::FilterLog,
        Self::ImportPackage,
        Self::PreResolution,
        Self::Fetchers,
    ];

    /// Returns the wire name of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReadPackage => "readPackage",
            Self::AfterAllResolved => "afterAllResolved",
            Self::FilterLog => "filterLog",
            Self::ImportPackage => "importPackage",
            Self::PreResolution => "preResolution",
            Self::Fetchers => "fetchers",
        }
    }

    /// Returns whether both scopes contribute to this category, in sequence.
    pub fn is_composable(&self) -> bool {
        matches!(
            self,
            Self::ReadPackage | Self::AfterAllResolved | Self::FilterLog
        )
    }

    /// Returns whether a hookfile of `scope` may define this category.
    ///
    /// Single-value categories affect install integrity and may only be
    /// defined by the global hookfile.
    pub fn allowed_in(&self, scope: HookScope) -> bool {
        self.is_composable() || scope == HookScope::Global
    }
}

impl std::fmt::Display for HookCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HookCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| AppError::plugin(format!("Unknown hook '{s}'")))
    }
}

/// Where a hookfile was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookScope {
    /// System-wide hookfile, trusted.
    Global,
    /// Repository-local hookfile.
    Project,
}

impl HookScope {
    /// Order in which scopes contribute to composable categories.
    pub const ORDER: [HookScope; 2] = [Self::Global, Self::Project];

    /// Returns the string name of this scope.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Project => "project",
        }
    }
}

impl std::fmt::Display for HookScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity of a [`LogEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// A log event emitted by the install pipeline and offered to `filterLog`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Logger name, e.g. `pnpm:progress`.
    pub name: String,
    /// Severity.
    pub level: LogLevel,
    /// Human-readable message, if any.
    #[serde(default)]
    pub message: Option<String>,
    /// Project the event belongs to.
    #[serde(default)]
    pub prefix: Option<String>,
    /// Remaining structured fields.
    #[serde(default)]
    pub data: Value,
}

impl LogEvent {
    /// Creates an event with no message or data.
    pub fn new(name: &str, level: LogLevel) -> Self {
        Self {
            name: name.to_string(),
            level,
            message: None,
            prefix: None,
            data: Value::Null,
        }
    }
}

/// Where a package being imported came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolvedFrom {
    Store,
    LocalDir,
    Remote,
}

/// Options handed to an `importPackage` hook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportPackageOptions {
    /// Relative file path inside the package → file in the store.
    pub files_map: HashMap<String, PathBuf>,
    /// Overwrite an existing target directory.
    pub force: bool,
    /// Origin of the package contents.
    pub resolved_from: ResolvedFrom,
    /// Keep an existing `node_modules` inside the target.
    #[serde(default)]
    pub keep_modules_dir: bool,
}

/// State handed to the `preResolution` hook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreResolutionContext {
    /// The lockfile the resolution should produce.
    pub wanted_lockfile: Value,
    /// The lockfile describing what is currently installed.
    pub current_lockfile: Value,
    pub exists_current_lockfile: bool,
    pub exists_non_empty_wanted_lockfile: bool,
    /// Directory containing the lockfile.
    pub lockfile_dir: PathBuf,
    /// Content-addressable store location.
    pub store_dir: PathBuf,
    /// Scope (or `default`) → registry URL.
    pub registries: HashMap<String, String>,
}

/// Resolution kinds a custom fetcher can take over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FetcherKind {
    LocalTarball,
    RemoteTarball,
    GitHostedTarball,
    Directory,
    Git,
}

impl FetcherKind {
    /// Returns the wire name of this fetcher kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LocalTarball => "localTarball",
            Self::RemoteTarball => "remoteTarball",
            Self::GitHostedTarball => "gitHostedTarball",
            Self::Directory => "directory",
            Self::Git => "git",
        }
    }
}

impl std::fmt::Display for FetcherKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single fetch request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchRequest {
    /// Resolution record from the lockfile.
    pub resolution: Value,
    /// Directory the package contents should land in.
    pub target_dir: PathBuf,
}

/// Outcome of a fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchResult {
    /// Relative file path → integrity.
    pub files_index: HashMap<String, String>,
    /// The package was linked from a local directory, not copied.
    pub local: bool,
}
