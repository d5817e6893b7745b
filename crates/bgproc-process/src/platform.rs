//! OS family detection and the platform strategy seam.

use bgproc_common::{ProcessHandle, ProcessResult, ProcessUid};
use bgproc_process_file::PidPaths;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Process family of the host OS.
///
/// Detected once at startup and carried in the lifecycle configuration;
/// strategy selection never re-inspects the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsFamily {
    Windows,
    Posix,
    Unsupported,
}

impl OsFamily {
    /// Detects the family the current binary was built for.
    pub fn detect() -> Self {
        if cfg!(windows) {
            OsFamily::Windows
        } else if cfg!(unix) {
            OsFamily::Posix
        } else {
            OsFamily::Unsupported
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OsFamily::Windows => "windows",
            OsFamily::Posix => "posix",
            OsFamily::Unsupported => "unsupported",
        }
    }

    /// Joins separate arguments into the single argument string a launch
    /// takes, quoting each one so the family's shell splits it back into
    /// the same arguments.
    pub fn join_arguments<S: AsRef<str>>(&self, args: &[S]) -> String {
        let quote: fn(&str) -> String = match self {
            OsFamily::Windows => crate::cmdline::quote_argument,
            OsFamily::Posix | OsFamily::Unsupported => crate::ps::quote_argument,
        };

        args.iter()
            .map(|arg| quote(arg.as_ref()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// OS-specific launch, discovery, liveness and termination mechanics.
///
/// Implementations never own the launched process: once `launch` returns,
/// the child is detached and the only link back to it is the PID file.
pub trait PlatformStrategy: Send + Sync + fmt::Debug {
    /// Family this strategy serves.
    fn family(&self) -> OsFamily;

    /// Launches `handle` detached. On success the PID file at
    /// `paths.pid_file` is populated either before returning or shortly
    /// after, by the launched process itself.
    fn launch(&self, handle: &ProcessHandle, paths: &PidPaths) -> ProcessResult<()>;

    /// Lists the PIDs of processes carrying the identity of `uid`.
    fn enumerate_by_identity(&self, uid: &ProcessUid, paths: &PidPaths) -> ProcessResult<Vec<u32>>;

    /// Returns true if `pid` is running and looks like an instance of
    /// `executable`. Any probe failure counts as not alive.
    fn is_alive(&self, executable: &Path, pid: u32) -> bool;

    /// Forcibly terminates `pid`. The signal cannot be caught.
    fn terminate(&self, pid: u32) -> ProcessResult<()>;
}

/// Returns the strategy for `family`, or `None` when this build has no
/// strategy for it.
pub fn select_strategy(family: OsFamily) -> Option<Arc<dyn PlatformStrategy>> {
    match family {
        #[cfg(windows)]
        OsFamily::Windows => Some(Arc::new(crate::windows_strategy::WindowsStrategy::new())),
        #[cfg(unix)]
        OsFamily::Posix => Some(Arc::new(crate::posix_strategy::PosixStrategy::new())),
        _ => None,
    }
}
