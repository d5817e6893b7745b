//! # bgproc Console
//!
//! Command dispatch for bgproc console applications.
//!
//! A [`ConsoleContext`] owns the argument vector and the application root,
//! keeps a registry of named [`Command`] factories, and runs the command
//! selected by `argv[1]` (or the default one). Command failures are turned
//! into exit codes here and nowhere else.

pub mod command;
pub mod config;
pub mod context;
pub mod error;

// Re-export main types
pub use command::{Command, CommandFactory};
pub use config::ConsoleConfig;
pub use context::ConsoleContext;
pub use error::{ConsoleError, Result, MISSING_EXIT_CODE};
