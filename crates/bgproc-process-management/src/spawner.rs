//! Spawn orchestration.
//!
//! [`ProcessSpawner`] is the service object commands hold to control
//! background processes. It sequences the PID record, the platform
//! strategy and the liveness probe:
//!
//! 1. resolve the uid's paths and create its temp directory
//! 2. if the recorded PID is alive, report "already running" and stop
//! 3. launch through the platform strategy
//! 4. re-read the PID record until it holds a positive PID (bounded)
//! 5. accept the PID only if it passes the liveness probe
//!
//! Check-then-launch is not atomic. Two spawners racing on one uid can
//! both see "not running" and both launch; the PID record ends up naming
//! whichever wrote last.

use crate::config::LifecycleConfig;
use crate::controller::ProcessController;
use crate::discovery::{discover_pid, DiscoveryPolicy};
use crate::outcome::{SpawnFailure, SpawnOutcome};
use crate::state::ProcessState;
use bgproc_common::{ProcessHandle, ProcessUid};
use bgproc_process::{select_strategy, OsFamily, PlatformStrategy};
use bgproc_process_file::PidFileStore;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct ProcessSpawner {
    store: PidFileStore,
    family: OsFamily,
    strategy: Option<Arc<dyn PlatformStrategy>>,
    controller: ProcessController,
    discovery: DiscoveryPolicy,
}

impl ProcessSpawner {
    /// Creates a spawner for the configured OS family. An unsupported
    /// family yields a spawner whose spawns all fail immediately.
    pub fn new(config: LifecycleConfig) -> Self {
        let strategy = select_strategy(config.os_family);
        if strategy.is_none() {
            warn!("No launch strategy for platform '{}'", config.os_family);
        }

        Self::build(PidFileStore::new(config.root_directory), config.os_family, strategy)
    }

    /// Creates a spawner around an explicit strategy.
    pub fn with_strategy(root_directory: impl AsRef<Path>, strategy: Arc<dyn PlatformStrategy>) -> Self {
        let family = strategy.family();
        Self::build(PidFileStore::new(root_directory.as_ref()), family, Some(strategy))
    }

    fn build(store: PidFileStore, family: OsFamily, strategy: Option<Arc<dyn PlatformStrategy>>) -> Self {
        let controller = ProcessController::new(store.clone(), strategy.clone());
        Self {
            store,
            family,
            strategy,
            controller,
            discovery: DiscoveryPolicy::DEFAULT,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_discovery_policy(mut self, discovery: DiscoveryPolicy) -> Self {
        self.discovery = discovery;
        self
    }

    pub fn store(&self) -> &PidFileStore {
        &self.store
    }

    pub fn family(&self) -> OsFamily {
        self.family
    }

    /// Spawns `executable` with `arguments` under `uid`.
    ///
    /// `arguments` is passed to the platform shell as one string.
    pub fn spawn(&self, uid: &str, executable: impl AsRef<Path>, arguments: &str) -> SpawnOutcome {
        let uid = match ProcessUid::new(uid) {
            Ok(uid) => uid,
            Err(e) => {
                warn!("Rejected spawn request: {}", e);
                return SpawnOutcome::Failed(SpawnFailure::InvalidRequest(e.to_string()));
            }
        };

        self.spawn_handle(&ProcessHandle::new(uid, executable.as_ref(), arguments))
    }

    pub fn spawn_handle(&self, handle: &ProcessHandle) -> SpawnOutcome {
        if handle.executable.as_os_str().is_empty() {
            warn!("Rejected spawn request for {}: empty executable", handle.uid);
            return SpawnOutcome::Failed(SpawnFailure::InvalidRequest(
                "executable path cannot be empty".to_string(),
            ));
        }

        let strategy = match &self.strategy {
            Some(strategy) => strategy,
            None => {
                warn!("Cannot spawn {}: unsupported platform '{}'", handle.uid, self.family);
                return SpawnOutcome::Failed(SpawnFailure::UnsupportedPlatform {
                    family: self.family.to_string(),
                });
            }
        };

        let paths = self.store.resolve_paths(&handle.uid);
        if let Err(e) = paths.ensure_temp_dir() {
            warn!("Cannot spawn {}: {}", handle.uid, e);
            return SpawnOutcome::Failed(SpawnFailure::LaunchFailed(e.to_string()));
        }

        if let Some(pid) = paths.read().filter(|pid| *pid > 0) {
            if strategy.is_alive(&handle.executable, pid) {
                info!("{} is already running (PID {})", handle.uid, pid);
                return SpawnOutcome::AlreadyRunning(pid);
            }

            // A stale record would be picked up by discovery before the new
            // process records itself.
            debug!("Discarding stale PID {} of {}", pid, handle.uid);
            if let Err(e) = paths.delete() {
                warn!("Cannot spawn {}: {}", handle.uid, e);
                return SpawnOutcome::Failed(SpawnFailure::LaunchFailed(e.to_string()));
            }
        }

        if let Err(e) = strategy.launch(handle, &paths) {
            warn!("Failed to launch {}: {}", handle.uid, e);
            return SpawnOutcome::Failed(SpawnFailure::LaunchFailed(e.to_string()));
        }

        let discovery = discover_pid(self.discovery, || paths.read());

        let pid = match discovery.pid {
            Some(pid) => pid,
            None => {
                warn!(
                    "Couldn't find the PID of {} after {} attempts, the PID file does not exist",
                    handle.uid, discovery.attempts
                );
                return SpawnOutcome::Failed(SpawnFailure::DiscoveryTimeout {
                    attempts: discovery.attempts,
                });
            }
        };

        if !strategy.is_alive(&handle.executable, pid) {
            warn!(
                "{} recorded PID {} but it is not a live {}",
                handle.uid,
                pid,
                handle.executable.display()
            );
            return SpawnOutcome::Failed(SpawnFailure::LivenessMismatch { pid });
        }

        info!("Spawned {} (PID {})", handle.uid, pid);
        SpawnOutcome::Spawned(pid)
    }

    /// Returns true if `pid` is a live instance of `executable`.
    pub fn is_alive(&self, executable: impl AsRef<Path>, pid: u32) -> bool {
        match &self.strategy {
            Some(strategy) => pid > 0 && strategy.is_alive(executable.as_ref(), pid),
            None => false,
        }
    }

    /// Returns the positive PID recorded for `uid`, if any. Says nothing
    /// about whether that process is alive.
    pub fn pid_of(&self, uid: &str) -> Option<u32> {
        let uid = ProcessUid::new(uid).ok()?;
        self.store.resolve_paths(&uid).read().filter(|pid| *pid > 0)
    }

    /// Derives the current state of `uid` from its record and a live probe.
    pub fn state(&self, uid: &str, executable: impl AsRef<Path>) -> ProcessState {
        match self.pid_of(uid) {
            None => ProcessState::Unknown,
            Some(pid) if self.is_alive(executable, pid) => ProcessState::Running,
            Some(_) => ProcessState::NotRunning,
        }
    }

    /// Kills the process recorded for `uid`. See [`ProcessController::kill`].
    pub fn kill(&self, uid: &str) -> bool {
        self.controller.kill(uid)
    }
}
