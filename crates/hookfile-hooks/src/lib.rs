//! # hookfile-hooks
//!
//! Hook composition for the package manager's hookfiles. Provides:
//!
//! - The closed set of hook categories and their scoping rules
//! - Declaration sets produced by loading a global or project hookfile
//! - The composer merging both into one immutable `CookedHooks` bundle
//! - Per-hook execution contexts logging to an injectable sink
//! - A deferred checksum of the project hookfile for cache invalidation
//! - Static and (feature `dynamic`) shared-library loaders

pub mod checksum;
pub mod hooks;
pub mod loader;
pub mod manager;
pub mod paths;
pub mod prelude;
pub mod traits;

pub use checksum::{ChecksumProvider, ContentHasher, Sha256FileHasher};
pub use hooks::composer::{CookedHooks, HookComposer};
pub use hooks::context::{HookContext, HookLogSink, MemorySink, TracingSink};
pub use hooks::declarations::HookDeclarationSet;
pub use hooks::definitions::{HookCategory, HookScope};
pub use loader::{HookLoader, StaticHookLoader};
pub use manager::HookManager;
