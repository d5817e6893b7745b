//! Process execution primitives.
//!
//! Thin wrappers over `std::process::Command` for running the short-lived
//! OS utilities (`sh`, `ps`, `cmd`, `tasklist`) the strategies rely on.

use bgproc_common::{ProcessError, ProcessResult};
use std::process::{Command, Stdio};
use tracing::debug;

/// Runs `program` with `args`, waits for it, and returns its standard output.
///
/// A non-zero exit status is not an error: process-table utilities exit
/// non-zero when nothing matches, and callers interpret the (empty) output.
/// Only a failure to start the utility is reported.
pub fn capture_output(program: &str, args: &[&str]) -> ProcessResult<String> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .map_err(|e| ProcessError::spawn_failed(program, e.to_string()))?;

    debug!("{} {:?} exited with {}", program, args, output.status);
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Runs a prepared command to completion with all standard streams closed,
/// failing if it cannot start or exits unsuccessfully.
pub fn run_detached_launcher(command: &mut Command, id: &str) -> ProcessResult<()> {
    let status = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| ProcessError::spawn_failed(id, e.to_string()))?;

    if !status.success() {
        return Err(ProcessError::spawn_failed(
            id,
            format!("launcher exited with {}", status),
        ));
    }

    Ok(())
}
