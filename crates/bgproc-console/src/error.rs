//! Console errors and their exit codes.

use thiserror::Error;

/// Exit code for a failure that carries no explicit code.
pub const MISSING_EXIT_CODE: i32 = i32::MIN;

/// Exit code for command-line usage errors.
pub const USAGE_EXIT_CODE: i32 = 2;

/// Result type alias for console operations.
pub type Result<T> = std::result::Result<T, ConsoleError>;

#[derive(Debug, Error)]
pub enum ConsoleError {
    /// `argv[1]` names no registered command.
    #[error("{name}: command not found")]
    CommandNotFound { name: String },

    /// Wrong arguments for a command.
    #[error("Usage: {0}")]
    Usage(String),

    /// A command failed, optionally with its own exit code.
    #[error("{message}")]
    Command { message: String, code: Option<i32> },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConsoleError {
    pub fn command_not_found(name: impl Into<String>) -> Self {
        Self::CommandNotFound { name: name.into() }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    /// A command failure without an exit code.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Command {
            message: message.into(),
            code: None,
        }
    }

    /// A command failure with an explicit exit code.
    pub fn with_code(message: impl Into<String>, code: i32) -> Self {
        Self::Command {
            message: message.into(),
            code: Some(code),
        }
    }

    /// Exit status reported for this error at the dispatch boundary.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConsoleError::Command { code: Some(code), .. } => *code,
            ConsoleError::Usage(_) => USAGE_EXIT_CODE,
            _ => MISSING_EXIT_CODE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ConsoleError::with_code("boom", 3).exit_code(), 3);
        assert_eq!(ConsoleError::failed("boom").exit_code(), i32::MIN);
        assert_eq!(ConsoleError::command_not_found("x").exit_code(), i32::MIN);
        assert_eq!(ConsoleError::usage("kill <uid>").exit_code(), USAGE_EXIT_CODE);

        let io: ConsoleError = std::io::Error::from(std::io::ErrorKind::NotFound).into();
        assert_eq!(io.exit_code(), MISSING_EXIT_CODE);
    }

    #[test]
    fn test_command_not_found_message() {
        let err = ConsoleError::command_not_found("frobnicate");
        assert_eq!(err.to_string(), "frobnicate: command not found");
    }
}
