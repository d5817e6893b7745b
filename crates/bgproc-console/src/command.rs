//! The command contract.

use crate::context::ConsoleContext;
use crate::error::Result;

/// A console application runnable by [`ConsoleContext`].
///
/// All hooks have defaults, so a command implements only what it needs.
/// Commands that control background processes hold a
/// `bgproc_process_management::ProcessSpawner` rather than inheriting
/// anything.
pub trait Command {
    /// Called before `run`. An error here skips `run`.
    fn on_init(&mut self, _ctx: &ConsoleContext) -> Result<()> {
        Ok(())
    }

    /// Runs the command and returns its exit status.
    fn run(&mut self, _ctx: &ConsoleContext) -> Result<i32> {
        Ok(0)
    }

    /// Always called last, even when `on_init` or `run` failed.
    fn on_finish(&mut self, _ctx: &ConsoleContext) {}
}

/// Builds a fresh command instance for one execution.
pub type CommandFactory = Box<dyn Fn(&ConsoleContext) -> Box<dyn Command>>;
