//! # bgproc Process File
//!
//! Durable uid -> PID mapping for bgproc.
//!
//! Every managed process owns a private directory under the application
//! root and a plain-text PID file inside it:
//!
//! ```text
//! <root>/.tmp/<uid>/           process-private temp directory
//! <root>/.tmp/<uid>/<uid>.pid  last known PID, decimal text
//! ```
//!
//! The PID file is the only cross-invocation record of which OS process
//! belongs to a uid. It is overwritten on every launch and may go stale
//! when the process dies without cleanup; staleness is detected by the
//! liveness probe, never here.

use bgproc_common::{ProcessError, ProcessResult, ProcessUid};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the directory, relative to the root, holding per-uid directories.
pub const TEMP_DIR_NAME: &str = ".tmp";

/// Extension of PID files.
pub const PID_FILE_EXTENSION: &str = "pid";

/// Resolved on-disk locations for one uid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PidPaths {
    pub temp_dir: PathBuf,
    pub pid_file: PathBuf,
}

impl PidPaths {
    /// Reads the recorded PID. See [`read_pid`].
    pub fn read(&self) -> Option<u32> {
        read_pid(&self.pid_file)
    }

    /// Records `pid` for this uid. See [`write_pid`].
    pub fn write(&self, pid: u32) -> ProcessResult<()> {
        write_pid(&self.pid_file, pid)
    }

    /// De-registers this uid. See [`delete_pid`].
    pub fn delete(&self) -> ProcessResult<()> {
        delete_pid(&self.pid_file)
    }

    /// Creates the temp directory (and parents) if it does not exist.
    pub fn ensure_temp_dir(&self) -> ProcessResult<()> {
        if self.temp_dir.is_dir() {
            return Ok(());
        }

        fs::create_dir_all(&self.temp_dir).map_err(|e| {
            ProcessError::pid_file(
                self.temp_dir.display().to_string(),
                format!("Failed to create directory: {}", e),
            )
        })?;

        debug!("Created temp directory {}", self.temp_dir.display());
        Ok(())
    }
}

/// Path resolution for PID files under an application root.
#[derive(Debug, Clone)]
pub struct PidFileStore {
    root: PathBuf,
}

impl PidFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves the temp directory and PID file for `uid`. Performs no I/O.
    pub fn resolve_paths(&self, uid: &ProcessUid) -> PidPaths {
        let temp_dir = self.root.join(TEMP_DIR_NAME).join(uid.as_str());
        let pid_file = temp_dir.join(format!("{}.{}", uid, PID_FILE_EXTENSION));

        PidPaths { temp_dir, pid_file }
    }
}

/// Reads a PID file.
///
/// This never fails: a missing file, empty content, or content that is not
/// a non-negative decimal integer once CR/LF are stripped all yield `None`.
pub fn read_pid<P: AsRef<Path>>(path: P) -> Option<u32> {
    let path = path.as_ref();

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            if e.kind() != ErrorKind::NotFound {
                debug!("Unreadable pid file {}: {}", path.display(), e);
            }
            return None;
        }
    };

    parse_pid(&content)
}

/// Parses PID file content. Only CR and LF are stripped; any other
/// surrounding text makes the record invalid.
pub fn parse_pid(content: &str) -> Option<u32> {
    let digits: String = content.chars().filter(|c| *c != '\r' && *c != '\n').collect();

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    digits.parse::<u32>().ok()
}

/// Writes `pid` to `path`, creating parent directories as needed and
/// replacing any previous content.
pub fn write_pid<P: AsRef<Path>>(path: P, pid: u32) -> ProcessResult<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ProcessError::pid_file(
                path.display().to_string(),
                format!("Failed to create directory {}: {}", parent.display(), e),
            )
        })?;
    }

    fs::write(path, pid.to_string()).map_err(|e| {
        ProcessError::pid_file(path.display().to_string(), format!("Failed to write: {}", e))
    })?;

    debug!("Recorded PID {} in {}", pid, path.display());
    Ok(())
}

/// Removes a PID file. Removing a file that does not exist is not an error.
pub fn delete_pid<P: AsRef<Path>>(path: P) -> ProcessResult<()> {
    let path = path.as_ref();

    match fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed pid file {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ProcessError::pid_file(
            path.display().to_string(),
            format!("Failed to delete: {}", e),
        )),
    }
}
