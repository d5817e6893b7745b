//! POSIX launch strategy.
//!
//! The launch goes through two shells:
//!
//! ```text
//! sh -c 'sh -c "$1" &' sh '<wrapper>'
//!        wrapper: echo $$ > '<pid file>'; exec '<executable>' <args>
//! ```
//!
//! The outer shell backgrounds the wrapper and exits, so the wrapper is
//! re-parented and the manager never has to reap it. The wrapper writes its
//! own PID and then `exec`s the target, which keeps that PID. No discovery
//! step is needed: the PID file is populated by the process itself, shortly
//! after `launch` returns.

use crate::execute::{capture_output, run_detached_launcher};
use crate::platform::{OsFamily, PlatformStrategy};
use crate::ps;
use bgproc_common::{ProcessHandle, ProcessResult, ProcessUid};
use bgproc_process_file::PidPaths;
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::Command;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// How long `is_alive` waits for a freshly recorded wrapper to `exec`.
const EXEC_SETTLE_ATTEMPTS: usize = 5;
const EXEC_SETTLE_INTERVAL: Duration = Duration::from_millis(20);

/// Reads the full command line of `pid`, waiting briefly while it is
/// still the launch wrapper.
fn settled_command_line(pid: u32) -> Option<String> {
    let pid_arg = pid.to_string();

    for attempt in 1..=EXEC_SETTLE_ATTEMPTS {
        // -ww: never truncate the command line to the terminal width.
        let output = match capture_output("ps", &["-ww", "-p", &pid_arg, "-o", "args="]) {
            Ok(output) => output,
            Err(e) => {
                debug!("ps command-line query for PID {} failed: {}", pid, e);
                return None;
            }
        };

        if !ps::is_wrapper_command_line(&output) {
            return Some(output);
        }

        if attempt < EXEC_SETTLE_ATTEMPTS {
            thread::sleep(EXEC_SETTLE_INTERVAL);
        }
    }

    debug!("PID {} is still the launch wrapper", pid);
    None
}

#[derive(Debug, Default, Clone)]
pub struct PosixStrategy;

impl PosixStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformStrategy for PosixStrategy {
    fn family(&self) -> OsFamily {
        OsFamily::Posix
    }

    fn launch(&self, handle: &ProcessHandle, paths: &PidPaths) -> ProcessResult<()> {
        let script = ps::wrapper_script(&paths.pid_file, &handle.executable, &handle.arguments);
        debug!("Launching {} via wrapper: {}", handle.uid, script);

        let mut command = Command::new("sh");
        command
            .arg("-c")
            .arg(ps::DETACH_SCRIPT)
            .arg("sh")
            .arg(&script)
            // New process group: terminal signals aimed at the manager
            // must not reach the background process.
            .process_group(0);

        run_detached_launcher(&mut command, handle.uid.as_str())?;

        info!(
            "Launched {} ({}) in the background",
            handle.uid,
            handle.executable.display()
        );
        Ok(())
    }

    fn enumerate_by_identity(&self, _uid: &ProcessUid, paths: &PidPaths) -> ProcessResult<Vec<u32>> {
        // The wrapper records itself; the PID file is the identity.
        Ok(paths.read().filter(|pid| *pid > 0).into_iter().collect())
    }

    fn is_alive(&self, executable: &Path, pid: u32) -> bool {
        if pid == 0 {
            return false;
        }

        let pid_arg = pid.to_string();

        let pid_output = match capture_output("ps", &["-p", &pid_arg, "-o", "pid="]) {
            Ok(output) => output,
            Err(e) => {
                debug!("ps query for PID {} failed: {}", pid, e);
                return false;
            }
        };

        if !ps::pid_column_matches(&pid_output, pid) {
            debug!("PID {} not in process table", pid);
            return false;
        }

        let cmd_output = match settled_command_line(pid) {
            Some(output) => output,
            None => return false,
        };

        let executable = executable.to_string_lossy();
        let alive = ps::command_line_contains(&cmd_output, &executable);
        if !alive {
            debug!(
                "PID {} is running '{}', not '{}'",
                pid,
                cmd_output.trim(),
                executable
            );
        }
        alive
    }

    fn terminate(&self, pid: u32) -> ProcessResult<()> {
        crate::terminate::force_kill(pid)
    }
}
