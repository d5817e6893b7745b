//! Core domain types for managed background processes.

use crate::errors::{ProcessError, ProcessResult};
use std::fmt;
use std::path::{Path, PathBuf};

/// Characters a uid may not contain: path separators, NUL, and the quote
/// that delimits the Windows `start` title.
const FORBIDDEN_UID_CHARS: [char; 4] = ['/', '\\', '\0', '"'];

/// Caller-chosen logical identifier of a managed background process.
///
/// A uid is distinct from the OS PID: it names the process across manager
/// invocations, while the PID is whatever the OS assigned on the last
/// launch. The uid is used as a single path component and (on Windows) as a
/// quoted window title, so anything that would break either is rejected.
///
/// # Example
/// ```
/// use bgproc_common::ProcessUid;
///
/// let uid = ProcessUid::new("worker.1").unwrap();
/// assert_eq!(uid.as_str(), "worker.1");
/// assert!(ProcessUid::new("../etc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProcessUid(String);

impl ProcessUid {
    /// Creates a validated uid.
    pub fn new(uid: impl Into<String>) -> ProcessResult<Self> {
        let uid = uid.into();

        if uid.is_empty() {
            return Err(ProcessError::invalid_uid(uid, "uid cannot be empty"));
        }

        if uid == "." || uid == ".." {
            return Err(ProcessError::invalid_uid(uid, "uid cannot be a relative path"));
        }

        if let Some(c) = uid.chars().find(|c| FORBIDDEN_UID_CHARS.contains(c)) {
            return Err(ProcessError::invalid_uid(
                uid,
                format!("uid cannot contain {:?}", c),
            ));
        }

        Ok(Self(uid))
    }

    /// Returns the uid as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProcessUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything needed to launch one background process.
///
/// Handles are cheap, caller-constructed values; nothing about them is
/// persisted. `arguments` is a single string handed to the platform shell
/// verbatim, so shell quoting inside it is honoured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessHandle {
    pub uid: ProcessUid,
    pub executable: PathBuf,
    pub arguments: String,
}

impl ProcessHandle {
    pub fn new(uid: ProcessUid, executable: impl Into<PathBuf>, arguments: impl Into<String>) -> Self {
        Self {
            uid,
            executable: executable.into(),
            arguments: arguments.into(),
        }
    }
}

/// Returns the final path component of an executable, or the whole path
/// when it has none.
pub fn image_name(executable: &Path) -> String {
    executable
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| executable.to_string_lossy().into_owned())
}
