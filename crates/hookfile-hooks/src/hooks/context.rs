//! Execution contexts handed to hooks, and the sinks their log lines go to.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{debug, info, warn};

use super::definitions::HookCategory;

/// Severity of a [`HookLogRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HookLogLevel {
    Debug,
    Info,
    Warn,
}

/// A single log line emitted by a hook through its context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookLogRecord {
    /// Severity.
    pub level: HookLogLevel,
    /// Hookfile the line came from. Unset for the pre-resolution logger.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Category of the hook that logged.
    pub hook: HookCategory,
    /// The hook's message.
    pub message: String,
    /// Project root the hook ran for.
    pub prefix: String,
}

/// Destination for hook log records.
///
/// Implementations must accept concurrent `emit` calls.
pub trait HookLogSink: Send + Sync {
    /// Writes one record.
    fn emit(&self, record: HookLogRecord);
}

/// Sink forwarding every record to `tracing` under the `hookfile::hook` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl HookLogSink for TracingSink {
    fn emit(&self, record: HookLogRecord) {
        let from = record.from.as_deref();
        match record.level {
            HookLogLevel::Debug => debug!(
                target: "hookfile::hook",
                from = from,
                hook = %record.hook,
                prefix = %record.prefix,
                "{}",
                record.message
            ),
            HookLogLevel::Info => info!(
                target: "hookfile::hook",
                from = from,
                hook = %record.hook,
                prefix = %record.prefix,
                "{}",
                record.message
            ),
            HookLogLevel::Warn => warn!(
                target: "hookfile::hook",
                from = from,
                hook = %record.hook,
                prefix = %record.prefix,
                "{}",
                record.message
            ),
        }
    }
}

/// Sink that keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<HookLogRecord>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all records emitted so far.
    pub fn records(&self) -> Vec<HookLogRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Returns the number of records emitted so far.
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Returns whether nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HookLogSink for MemorySink {
    fn emit(&self, record: HookLogRecord) {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(record);
    }
}

/// Context bound to one hook from one hookfile.
///
/// Created once when the hook is cooked, then reused for every call.
#[derive(Clone)]
pub struct HookContext {
    from: String,
    hook: HookCategory,
    prefix: String,
    sink: Arc<dyn HookLogSink>,
}

impl HookContext {
    /// Creates a context for `hook` declared in the hookfile at `origin`.
    pub fn new(
        origin: &Path,
        project_root: &Path,
        hook: HookCategory,
        sink: Arc<dyn HookLogSink>,
    ) -> Self {
        Self {
            from: origin.display().to_string(),
            hook,
            prefix: project_root.display().to_string(),
            sink,
        }
    }

    /// Emits a debug record attributed to this hook.
    pub fn log(&self, message: &str) {
        self.sink.emit(HookLogRecord {
            level: HookLogLevel::Debug,
            from: Some(self.from.clone()),
            hook: self.hook,
            message: message.to_string(),
            prefix: self.prefix.clone(),
        });
    }

    /// Hookfile this context is bound to.
    pub fn origin(&self) -> &str {
        &self.from
    }
}

impl std::fmt::Debug for HookContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookContext")
            .field("from", &self.from)
            .field("hook", &self.hook)
            .field("prefix", &self.prefix)
            .finish()
    }
}

/// Logger handed to the `preResolution` hook.
#[derive(Clone)]
pub struct PreResolutionLogger {
    prefix: String,
    sink: Arc<dyn HookLogSink>,
}

impl PreResolutionLogger {
    /// Creates a logger for the project at `project_root`.
    pub fn new(project_root: &Path, sink: Arc<dyn HookLogSink>) -> Self {
        Self {
            prefix: project_root.display().to_string(),
            sink,
        }
    }

    /// Emits an info record.
    pub fn info(&self, message: &str) {
        self.emit(HookLogLevel::Info, message);
    }

    /// Emits a warning record.
    pub fn warn(&self, message: &str) {
        self.emit(HookLogLevel::Warn, message);
    }

    fn emit(&self, level: HookLogLevel, message: &str) {
        self.sink.emit(HookLogRecord {
            level,
            from: None,
            hook: HookCategory::PreResolution,
            message: message.to_string(),
            prefix: self.prefix.clone(),
        });
    }
}

impl std::fmt::Debug for PreResolutionLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreResolutionLogger")
            .field("prefix", &self.prefix)
            .finish()
    }
}
