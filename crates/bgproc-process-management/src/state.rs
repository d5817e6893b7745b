//! Derived process state.

use std::fmt;

/// State of a uid, computed on demand and never persisted.
///
/// A positive PID record alone does not make a process `Running`: the
/// recorded PID must also pass the liveness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    /// No usable PID record exists for the uid.
    Unknown,
    /// The recorded PID is alive and runs the expected executable.
    Running,
    /// A PID is recorded but the process is gone or is something else.
    NotRunning,
}

impl ProcessState {
    pub fn is_running(&self) -> bool {
        matches!(self, ProcessState::Running)
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessState::Unknown => write!(f, "unknown"),
            ProcessState::Running => write!(f, "running"),
            ProcessState::NotRunning => write!(f, "not_running"),
        }
    }
}
