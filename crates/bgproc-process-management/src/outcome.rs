//! Spawn outcomes.
//!
//! `spawn` never fails with an error. It returns one of these values, and
//! [`SpawnOutcome::pid`] collapses it to the sentinel form callers of the
//! command layer use: a positive PID on success, [`NO_PID`] otherwise.

use std::fmt;
use thiserror::Error;

/// Sentinel for "no PID": failure or no-op.
pub const NO_PID: i64 = -1;

/// Why a spawn produced no process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpawnFailure {
    #[error("no launch strategy for platform '{family}'")]
    UnsupportedPlatform { family: String },

    #[error("invalid spawn request: {0}")]
    InvalidRequest(String),

    #[error("launch failed: {0}")]
    LaunchFailed(String),

    #[error("couldn't find the process PID after {attempts} attempts, the PID file does not exist")]
    DiscoveryTimeout { attempts: u32 },

    #[error("PID {pid} is not running the expected executable")]
    LivenessMismatch { pid: u32 },
}

/// Result of a spawn request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// A new process was launched and validated.
    Spawned(u32),
    /// The uid's recorded process is alive; nothing was launched.
    AlreadyRunning(u32),
    Failed(SpawnFailure),
}

impl SpawnOutcome {
    /// Sentinel form: the new PID on success, `-1` for everything else,
    /// including `AlreadyRunning`.
    pub fn pid(&self) -> i64 {
        match self {
            SpawnOutcome::Spawned(pid) => i64::from(*pid),
            _ => NO_PID,
        }
    }
}

impl fmt::Display for SpawnOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnOutcome::Spawned(pid) => write!(f, "spawned (PID {})", pid),
            SpawnOutcome::AlreadyRunning(pid) => write!(f, "already running (PID {})", pid),
            SpawnOutcome::Failed(failure) => write!(f, "{}", failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_pid() {
        assert_eq!(SpawnOutcome::Spawned(4821).pid(), 4821);
        assert_eq!(SpawnOutcome::AlreadyRunning(4821).pid(), NO_PID);
        assert_eq!(
            SpawnOutcome::Failed(SpawnFailure::DiscoveryTimeout { attempts: 10 }).pid(),
            NO_PID
        );
    }

    #[test]
    fn test_already_running_message_includes_pid() {
        let outcome = SpawnOutcome::AlreadyRunning(4821);
        assert!(outcome.to_string().contains("already running"));
        assert!(outcome.to_string().contains("4821"));
    }

    #[test]
    fn test_display() {
        assert_eq!(SpawnOutcome::Spawned(7).to_string(), "spawned (PID 7)");
        let outcome = SpawnOutcome::Failed(SpawnFailure::LivenessMismatch { pid: 7 });
        assert!(outcome.to_string().contains('7'));
    }
}
