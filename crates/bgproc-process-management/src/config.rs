//! Immutable startup configuration for the lifecycle layer.

use bgproc_process::OsFamily;
use std::path::{Path, PathBuf};

/// Everything the lifecycle layer needs from its environment.
///
/// The OS family is detected once when the configuration is built and
/// never re-read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleConfig {
    /// Application root; PID records live under `<root>/.tmp/`.
    pub root_directory: PathBuf,
    pub os_family: OsFamily,
}

impl LifecycleConfig {
    /// Builds a configuration for the host OS family.
    pub fn new(root_directory: impl Into<PathBuf>) -> Self {
        Self::with_family(root_directory, OsFamily::detect())
    }

    pub fn with_family(root_directory: impl Into<PathBuf>, os_family: OsFamily) -> Self {
        Self {
            root_directory: root_directory.into(),
            os_family,
        }
    }

    pub fn root_directory(&self) -> &Path {
        &self.root_directory
    }
}
