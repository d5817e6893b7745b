//! Forced termination and de-registration.

use bgproc_common::ProcessUid;
use bgproc_process::PlatformStrategy;
use bgproc_process_file::PidFileStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Kills managed processes by uid.
#[derive(Debug, Clone)]
pub struct ProcessController {
    store: PidFileStore,
    strategy: Option<Arc<dyn PlatformStrategy>>,
}

impl ProcessController {
    pub fn new(store: PidFileStore, strategy: Option<Arc<dyn PlatformStrategy>>) -> Self {
        Self { store, strategy }
    }

    /// Kills the process recorded for `uid`.
    ///
    /// The PID record is removed first and unconditionally, so the uid is
    /// de-registered whatever happens to the OS process. Always returns
    /// true; the termination is not re-verified. A uid that cannot name a
    /// record has nothing to kill.
    pub fn kill(&self, uid: &str) -> bool {
        let uid = match ProcessUid::new(uid) {
            Ok(uid) => uid,
            Err(e) => {
                warn!("Cannot resolve a PID record for '{}': {}", uid, e);
                return true;
            }
        };

        let paths = self.store.resolve_paths(&uid);
        let recorded = paths.read();

        if let Err(e) = paths.delete() {
            warn!("Failed to remove PID record of {}: {}", uid, e);
        }

        let pid = match recorded.filter(|pid| *pid > 0) {
            Some(pid) => pid,
            None => {
                debug!("{} has no recorded PID, nothing to kill", uid);
                return true;
            }
        };

        match &self.strategy {
            Some(strategy) => match strategy.terminate(pid) {
                Ok(()) => info!("Killed {} (PID {})", uid, pid),
                Err(e) => warn!("Forced termination of {} (PID {}): {}", uid, pid, e),
            },
            None => warn!(
                "No termination strategy on this platform, {} (PID {}) was only de-registered",
                uid, pid
            ),
        }

        true
    }
}
