//! Scripted platform strategy for lifecycle tests.

use bgproc_common::{ProcessError, ProcessHandle, ProcessResult, ProcessUid};
use bgproc_process::{OsFamily, PlatformStrategy};
use bgproc_process_file::PidPaths;
use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

/// What a scripted launch does with the PID record.
#[derive(Debug, Clone, Copy)]
pub enum LaunchBehavior {
    /// Write the PID before returning, like the Windows strategy.
    WriteNow(u32),
    /// Write the PID from another thread after a delay, like the POSIX
    /// wrapper.
    WriteAfter(u32, Duration),
    /// Never write anything.
    Silent,
    /// Fail the launch.
    Fail,
}

#[derive(Debug)]
pub struct MockStrategy {
    behavior: LaunchBehavior,
    /// Executable name a live PID must match.
    image: String,
    alive: Mutex<HashSet<u32>>,
    pub launches: AtomicU32,
    pub terminated: Mutex<Vec<u32>>,
}

impl MockStrategy {
    pub fn new(behavior: LaunchBehavior) -> Self {
        Self {
            behavior,
            image: "myd".to_string(),
            alive: Mutex::new(HashSet::new()),
            launches: AtomicU32::new(0),
            terminated: Mutex::new(Vec::new()),
        }
    }

    /// Marks `pid` as a live instance of `myd`.
    pub fn set_alive(&self, pid: u32) {
        self.alive.lock().unwrap().insert(pid);
    }

    pub fn launch_count(&self) -> u32 {
        self.launches.load(Ordering::SeqCst)
    }

    pub fn terminated(&self) -> Vec<u32> {
        self.terminated.lock().unwrap().clone()
    }
}

impl PlatformStrategy for MockStrategy {
    fn family(&self) -> OsFamily {
        OsFamily::detect()
    }

    fn launch(&self, handle: &ProcessHandle, paths: &PidPaths) -> ProcessResult<()> {
        self.launches.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            LaunchBehavior::WriteNow(pid) => paths.write(pid),
            LaunchBehavior::WriteAfter(pid, delay) => {
                let paths = paths.clone();
                thread::spawn(move || {
                    thread::sleep(delay);
                    let _ = paths.write(pid);
                });
                Ok(())
            }
            LaunchBehavior::Silent => Ok(()),
            LaunchBehavior::Fail => Err(ProcessError::spawn_failed(
                handle.uid.as_str(),
                "scripted failure",
            )),
        }
    }

    fn enumerate_by_identity(&self, _uid: &ProcessUid, paths: &PidPaths) -> ProcessResult<Vec<u32>> {
        Ok(paths.read().into_iter().collect())
    }

    fn is_alive(&self, executable: &Path, pid: u32) -> bool {
        self.alive.lock().unwrap().contains(&pid)
            && executable.to_string_lossy().contains(&self.image)
    }

    fn terminate(&self, pid: u32) -> ProcessResult<()> {
        self.terminated.lock().unwrap().push(pid);
        self.alive.lock().unwrap().remove(&pid);
        Ok(())
    }
}
