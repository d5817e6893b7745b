//! Error types for bgproc.
//!
//! Low-level operations (pid file I/O, launching through the OS shell,
//! signalling) return [`ProcessResult`]. The lifecycle layer above never
//! lets these escape: it folds them into sentinel outcomes, so callers of
//! `spawn`/`kill` only ever inspect return values.

use thiserror::Error;

/// Process-specific error types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    #[error("Invalid process uid '{uid}': {reason}")]
    InvalidUid { uid: String, reason: String },

    #[error("Process spawn failed: {id} - {reason}")]
    SpawnFailed { id: String, reason: String },

    #[error("Process stop failed: {id} - {reason}")]
    StopFailed { id: String, reason: String },

    #[error("Process discovery failed: {id} - {reason}")]
    DiscoveryFailed { id: String, reason: String },

    #[error("Pid file error: {path} - {reason}")]
    PidFile { path: String, reason: String },

    #[error("Unsupported platform: {family}")]
    UnsupportedPlatform { family: String },
}

impl ProcessError {
    pub fn invalid_uid(uid: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUid {
            uid: uid.into(),
            reason: reason.into(),
        }
    }

    pub fn spawn_failed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SpawnFailed {
            id: id.into(),
            reason: reason.into(),
        }
    }

    pub fn stop_failed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::StopFailed {
            id: id.into(),
            reason: reason.into(),
        }
    }

    pub fn discovery_failed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DiscoveryFailed {
            id: id.into(),
            reason: reason.into(),
        }
    }

    pub fn pid_file(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PidFile {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn unsupported_platform(family: impl Into<String>) -> Self {
        Self::UnsupportedPlatform {
            family: family.into(),
        }
    }
}

/// Result type for process operations.
pub type ProcessResult<T> = std::result::Result<T, ProcessError>;
