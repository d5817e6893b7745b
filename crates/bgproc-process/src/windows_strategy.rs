//! Windows launch strategy.
//!
//! `start` does not report the PID of what it launches, so the child is
//! started under a window title equal to its uid and then looked up by that
//! title. The lookup happens right after `start` returns; exactly one
//! titled process must be found.

use crate::execute::{capture_output, run_detached_launcher};
use crate::platform::{OsFamily, PlatformStrategy};
use crate::tasklist;
use bgproc_common::{image_name, ProcessError, ProcessHandle, ProcessResult, ProcessUid};
use bgproc_process_file::PidPaths;
use std::os::windows::process::CommandExt;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

#[derive(Debug, Default, Clone)]
pub struct WindowsStrategy;

impl WindowsStrategy {
    pub fn new() -> Self {
        Self
    }
}

/// Builds the `cmd /C` tail that starts `handle` minimized under its uid.
fn start_command_line(handle: &ProcessHandle) -> String {
    let mut line = format!(
        "/C start \"{}\" /MIN \"{}\"",
        handle.uid,
        handle.executable.display()
    );

    let arguments = handle.arguments.trim();
    if !arguments.is_empty() {
        line.push(' ');
        line.push_str(arguments);
    }

    line
}

impl PlatformStrategy for WindowsStrategy {
    fn family(&self) -> OsFamily {
        OsFamily::Windows
    }

    fn launch(&self, handle: &ProcessHandle, paths: &PidPaths) -> ProcessResult<()> {
        let line = start_command_line(handle);
        debug!("Launching {}: cmd {}", handle.uid, line);

        let mut command = Command::new("cmd");
        command.raw_arg(&line);
        run_detached_launcher(&mut command, handle.uid.as_str())?;

        let pids = self.enumerate_by_identity(&handle.uid, paths)?;
        if pids.len() != 1 {
            return Err(ProcessError::discovery_failed(
                handle.uid.as_str(),
                format!(
                    "expected exactly one process titled '{}', found {}",
                    handle.uid,
                    pids.len()
                ),
            ));
        }

        let pid = pids[0];
        if pid == 0 {
            return Err(ProcessError::discovery_failed(
                handle.uid.as_str(),
                "titled process has no valid PID",
            ));
        }

        paths.write(pid)?;
        info!(
            "Launched {} ({}) as PID {}",
            handle.uid,
            handle.executable.display(),
            pid
        );
        Ok(())
    }

    fn enumerate_by_identity(&self, uid: &ProcessUid, _paths: &PidPaths) -> ProcessResult<Vec<u32>> {
        let filter = format!("WindowTitle eq {}", uid);
        let output = capture_output("tasklist", &["/fi", &filter, "/fo", "CSV", "/nh"])?;
        Ok(tasklist::pids(&output))
    }

    fn is_alive(&self, executable: &Path, pid: u32) -> bool {
        if pid == 0 {
            return false;
        }

        let filter = format!("PID eq {}", pid);
        match capture_output("tasklist", &["/fi", &filter, "/fo", "CSV", "/nh"]) {
            Ok(output) => tasklist::any_image_matches(&output, &image_name(executable)),
            Err(e) => {
                debug!("tasklist query for PID {} failed: {}", pid, e);
                false
            }
        }
    }

    fn terminate(&self, pid: u32) -> ProcessResult<()> {
        crate::terminate::force_kill(pid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_command_line() {
        let uid = ProcessUid::new("worker1").unwrap();
        let handle = ProcessHandle::new(uid, "C:\\Program Files\\myd.exe", "--flag");
        assert_eq!(
            start_command_line(&handle),
            "/C start \"worker1\" /MIN \"C:\\Program Files\\myd.exe\" --flag"
        );
    }
}
