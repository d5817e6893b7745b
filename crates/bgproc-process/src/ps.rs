//! POSIX shell and `ps` text handling.
//!
//! Kept free of any OS calls so the parsing rules are testable on every
//! platform.

use std::path::Path;

/// Outer launcher script: backgrounds the wrapper passed as `$1` so the
/// wrapper is re-parented away from the manager once this shell exits.
pub const DETACH_SCRIPT: &str = "sh -c \"$1\" &";

/// Start of every wrapper script. Until the wrapper `exec`s, `ps` shows
/// `sh -c echo $$ > ...` as its command line.
pub const WRAPPER_PREFIX: &str = "echo $$ > ";

/// Quotes `s` for a POSIX shell using single quotes.
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// Quotes one argument for the wrapper script. Arguments made only of
/// characters the shell never interprets pass through unchanged.
pub fn quote_argument(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));

    if plain {
        arg.to_string()
    } else {
        shell_quote(arg)
    }
}

/// Builds the wrapper script that records its own PID and then replaces
/// itself with the target executable, keeping that PID.
///
/// `arguments` is appended unquoted so the shell splits it exactly as a
/// user typing it would.
pub fn wrapper_script(pid_file: &Path, executable: &Path, arguments: &str) -> String {
    let mut script = format!(
        "{}{}; exec {}",
        WRAPPER_PREFIX,
        shell_quote(&pid_file.to_string_lossy()),
        shell_quote(&executable.to_string_lossy()),
    );

    let arguments = arguments.trim();
    if !arguments.is_empty() {
        script.push(' ');
        script.push_str(arguments);
    }

    script
}

/// Checks `ps -p <pid> -o pid=` output: it must be exactly the PID once
/// surrounding whitespace is removed.
pub fn pid_column_matches(output: &str, pid: u32) -> bool {
    let trimmed = output.trim();
    !trimmed.is_empty() && trimmed == pid.to_string()
}

/// Checks `ps -p <pid> -o args=` output for the executable, by plain
/// substring containment.
pub fn command_line_contains(output: &str, executable: &str) -> bool {
    !executable.is_empty() && output.contains(executable)
}

/// True when `ps -o args=` output is a wrapper that has not yet replaced
/// itself with the target executable.
pub fn is_wrapper_command_line(output: &str) -> bool {
    output
        .trim()
        .split_once(' ')
        .and_then(|(_, rest)| rest.strip_prefix("-c "))
        .map_or(false, |script| script.starts_with(WRAPPER_PREFIX))
}
