//! # bgproc Process
//!
//! Low-level, OS-specific process operations for bgproc.
//!
//! This crate provides:
//! - OS family detection, done once at startup
//! - The [`PlatformStrategy`] trait and its Windows/POSIX variants
//! - Liveness probing based on process-table text output
//! - Forced process termination

pub mod cmdline;
pub mod execute;
pub mod platform;
pub mod ps;
pub mod tasklist;
pub mod terminate;

#[cfg(unix)]
pub mod posix_strategy;

#[cfg(windows)]
pub mod windows_strategy;

// Re-export main types
pub use platform::{select_strategy, OsFamily, PlatformStrategy};
pub use terminate::force_kill;

#[cfg(unix)]
pub use posix_strategy::PosixStrategy;

#[cfg(windows)]
pub use windows_strategy::WindowsStrategy;
