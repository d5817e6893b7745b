//! # bgproc Common
//!
//! Common types and errors shared across the bgproc crates.
//!
//! This crate provides the foundational pieces every other bgproc crate
//! builds upon: the process error type and the identifiers used to name
//! managed background processes.

pub mod errors;
pub mod types;

// Re-export commonly used items
pub use errors::{ProcessError, ProcessResult};
pub use types::{image_name, ProcessHandle, ProcessUid};
