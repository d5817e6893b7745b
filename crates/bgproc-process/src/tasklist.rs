//! Windows `tasklist /fo CSV /nh` output handling.
//!
//! A row looks like:
//!
//! ```text
//! "myd.exe","4821","Console","1","10,240 K"
//! ```
//!
//! When nothing matches the filter, tasklist prints an informational line
//! instead of rows.

/// Prefix of the line tasklist prints when no process matches a filter.
pub const NO_TASKS_MARKER: &str = "INFO: No tasks";

const COLUMN_SEPARATOR: &str = "\",\"";

/// One process row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TasklistRow {
    pub image_name: String,
    pub pid: Option<u32>,
}

/// Parses all process rows, skipping blank and informational lines.
pub fn parse_rows(output: &str) -> Vec<TasklistRow> {
    output
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| line.contains(COLUMN_SEPARATOR))
        .map(|line| {
            let mut columns = line.split(COLUMN_SEPARATOR);
            let image_name = columns
                .next()
                .unwrap_or_default()
                .trim()
                .trim_start_matches('"')
                .to_string();
            let pid = columns
                .next()
                .and_then(|column| column.trim_end_matches('"').trim().parse::<u32>().ok());

            TasklistRow { image_name, pid }
        })
        .collect()
}

/// Returns the PID column of every row. Rows with an unparsable PID
/// count as PID 0 so that callers expecting one valid row still see them.
pub fn pids(output: &str) -> Vec<u32> {
    parse_rows(output)
        .into_iter()
        .map(|row| row.pid.unwrap_or(0))
        .collect()
}

/// Decides liveness from `tasklist /fi "PID eq <pid>"` output.
///
/// Empty output or the no-tasks marker means not alive. Otherwise at least
/// one row's image name must contain `image_name`.
pub fn any_image_matches(output: &str, image_name: &str) -> bool {
    if output.trim().is_empty() || output.contains(NO_TASKS_MARKER) || image_name.is_empty() {
        return false;
    }

    parse_rows(output)
        .iter()
        .any(|row| row.image_name.contains(image_name))
}
