//! Hook system: categories, declarations, execution contexts, and the composer.

pub mod composer;
pub mod context;
pub mod declarations;
pub mod definitions;

pub use composer::{Cooked, CookedHooks, CookedPreResolution, HookComposer, HookSummary};
pub use context::{
    HookContext, HookLogLevel, HookLogRecord, HookLogSink, MemorySink, PreResolutionLogger,
    TracingSink,
};
pub use declarations::{CustomFetchers, HookDeclarationSet};
pub use definitions::{HookCategory, HookScope, LogEvent, LogLevel, PreResolutionContext};
