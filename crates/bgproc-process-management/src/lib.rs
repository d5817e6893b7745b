//! # bgproc Process Management
//!
//! Lifecycle operations for detached background processes:
//! - [`ProcessSpawner`]: spawn with PID discovery and liveness validation
//! - [`ProcessController`]: forced termination and de-registration
//! - [`ProcessState`]: on-demand state derived from the PID record
//!
//! None of these operations return errors. Outcomes are values
//! ([`SpawnOutcome`], `bool`) that callers inspect.

pub mod config;
pub mod controller;
pub mod discovery;
pub mod outcome;
pub mod spawner;
pub mod state;

#[cfg(test)]
mod test_support;

// Re-export main types
pub use config::LifecycleConfig;
pub use controller::ProcessController;
pub use discovery::{discover_pid, Discovery, DiscoveryPolicy};
pub use outcome::{SpawnFailure, SpawnOutcome, NO_PID};
pub use spawner::ProcessSpawner;
pub use state::ProcessState;

pub use bgproc_process::OsFamily;
