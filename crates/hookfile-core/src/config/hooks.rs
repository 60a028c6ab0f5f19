//! Hookfile location configuration.

use serde::{Deserialize, Serialize};

/// Where to look for the global and project hookfiles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HooksConfig {
    /// Path to the global hookfile. Relative paths resolve against the
    /// project root. Unset means no global hookfile.
    #[serde(default)]
    pub global_hookfile: Option<String>,
    /// Override for the project hookfile path. Unset means
    /// `<project root>/.hookfile`.
    #[serde(default)]
    pub hookfile: Option<String>,
    /// Skip the project hookfile entirely.
    #[serde(default)]
    pub ignore_hookfile: bool,
}
