//! Forced process termination.

use bgproc_common::{ProcessError, ProcessResult};

/// Force kill a process (SIGKILL on Unix, TerminateProcess on Windows).
///
/// The target gets no chance to clean up. Killing PID 0 is refused since
/// on Unix it would signal the caller's whole process group.
pub fn force_kill(pid: u32) -> ProcessResult<()> {
    if pid == 0 {
        return Err(ProcessError::stop_failed(
            pid.to_string(),
            "refusing to signal PID 0",
        ));
    }

    #[cfg(unix)]
    {
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        let raw = i32::try_from(pid)
            .map_err(|_| ProcessError::stop_failed(pid.to_string(), "PID out of range"))?;

        kill(Pid::from_raw(raw), Signal::SIGKILL)
            .map_err(|e| ProcessError::stop_failed(pid.to_string(), e.to_string()))
    }

    #[cfg(windows)]
    {
        use windows::Win32::Foundation::CloseHandle;
        use windows::Win32::System::Threading::{OpenProcess, TerminateProcess, PROCESS_TERMINATE};

        unsafe {
            let handle = match OpenProcess(PROCESS_TERMINATE, false, pid) {
                Ok(h) if !h.is_invalid() => h,
                _ => {
                    return Err(ProcessError::stop_failed(
                        pid.to_string(),
                        "Failed to open process for termination",
                    ));
                }
            };

            let result = TerminateProcess(handle, 1);
            let _ = CloseHandle(handle);

            result.map_err(|e| {
                ProcessError::stop_failed(pid.to_string(), format!("TerminateProcess failed: {}", e))
            })
        }
    }

    #[cfg(not(any(unix, windows)))]
    {
        Err(ProcessError::unsupported_platform(std::env::consts::OS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_force_kill_refuses_pid_zero() {
        let result = force_kill(0);
        assert!(matches!(result, Err(ProcessError::StopFailed { .. })));
    }

    #[test]
    #[cfg(unix)]
    fn test_force_kill_nonexistent_process() {
        // Beyond the default Linux pid_max, so nothing can hold it.
        let result = force_kill(i32::MAX as u32);
        assert!(result.is_err());
    }

    #[test]
    #[cfg(unix)]
    fn test_force_kill_out_of_range_pid() {
        assert!(force_kill(u32::MAX).is_err());
    }

    #[test]
    #[cfg(unix)]
    fn test_force_kill_child() {
        let mut child = std::process::Command::new("sleep").arg("30").spawn().unwrap();
        force_kill(child.id()).unwrap();

        let status = child.wait().unwrap();
        assert!(!status.success());
    }
}
