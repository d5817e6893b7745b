//! Built-in console commands.
//!
//! Each command owns a `ProcessSpawner` built for the context's root; none
//! of them share state.

use bgproc_console::{Command, ConsoleContext, ConsoleError, Result};
use bgproc_process_management::{
    LifecycleConfig, OsFamily, ProcessSpawner, ProcessState, SpawnOutcome,
};

/// LSB "program is not running" status.
const NOT_RUNNING_EXIT_CODE: i32 = 3;

pub fn register_all(ctx: &mut ConsoleContext, os_family: OsFamily) {
    ctx.register(
        "spawn",
        move |ctx| Box::new(SpawnCommand::new(spawner_for(ctx, os_family))) as Box<dyn Command>,
        false,
    );
    ctx.register(
        "status",
        move |ctx| Box::new(StatusCommand::new(spawner_for(ctx, os_family))) as Box<dyn Command>,
        false,
    );
    ctx.register(
        "kill",
        move |ctx| Box::new(KillCommand::new(spawner_for(ctx, os_family))) as Box<dyn Command>,
        false,
    );
}

fn spawner_for(ctx: &ConsoleContext, os_family: OsFamily) -> ProcessSpawner {
    ProcessSpawner::new(LifecycleConfig::with_family(ctx.root_directory(), os_family))
}

/// `spawn <uid> <executable> [args...]`
pub struct SpawnCommand {
    spawner: ProcessSpawner,
    request: Option<(String, String, String)>,
}

impl SpawnCommand {
    pub fn new(spawner: ProcessSpawner) -> Self {
        Self {
            spawner,
            request: None,
        }
    }
}

impl Command for SpawnCommand {
    fn on_init(&mut self, ctx: &ConsoleContext) -> Result<()> {
        let args = ctx.arguments();
        match (args.get(2), args.get(3)) {
            (Some(uid), Some(executable)) => {
                let rest = args.get(4..).unwrap_or_default();
                let arguments = self.spawner.family().join_arguments(rest);
                self.request = Some((uid.clone(), executable.clone(), arguments));
                Ok(())
            }
            _ => Err(ConsoleError::usage(format!(
                "{} spawn <uid> <executable> [args...]",
                ctx.program_name()
            ))),
        }
    }

    fn run(&mut self, _ctx: &ConsoleContext) -> Result<i32> {
        let (uid, executable, arguments) = match &self.request {
            Some(request) => request,
            None => return Err(ConsoleError::failed("spawn request was not initialized")),
        };

        match self.spawner.spawn(uid, executable, arguments) {
            SpawnOutcome::Failed(failure) => {
                Err(ConsoleError::with_code(format!("{}: {}", uid, failure), 1))
            }
            outcome => {
                println!("{} {}", uid, outcome);
                Ok(0)
            }
        }
    }
}

/// `status <uid> <executable>`
pub struct StatusCommand {
    spawner: ProcessSpawner,
}

impl StatusCommand {
    pub fn new(spawner: ProcessSpawner) -> Self {
        Self { spawner }
    }
}

impl Command for StatusCommand {
    fn run(&mut self, ctx: &ConsoleContext) -> Result<i32> {
        let args = ctx.arguments();
        let (uid, executable) = match (args.get(2), args.get(3)) {
            (Some(uid), Some(executable)) => (uid, executable),
            _ => {
                return Err(ConsoleError::usage(format!(
                    "{} status <uid> <executable>",
                    ctx.program_name()
                )))
            }
        };

        let state = self.spawner.state(uid, executable);
        match (state, self.spawner.pid_of(uid)) {
            (ProcessState::Running, Some(pid)) => println!("{}: {} (PID {})", uid, state, pid),
            (ProcessState::NotRunning, Some(pid)) => {
                println!("{}: {} (stale PID {})", uid, state, pid)
            }
            _ => println!("{}: {}", uid, state),
        }

        Ok(if state.is_running() { 0 } else { NOT_RUNNING_EXIT_CODE })
    }
}

/// `kill <uid>`
pub struct KillCommand {
    spawner: ProcessSpawner,
}

impl KillCommand {
    pub fn new(spawner: ProcessSpawner) -> Self {
        Self { spawner }
    }
}

impl Command for KillCommand {
    fn run(&mut self, ctx: &ConsoleContext) -> Result<i32> {
        let uid = match ctx.arguments().get(2) {
            Some(uid) => uid,
            None => {
                return Err(ConsoleError::usage(format!("{} kill <uid>", ctx.program_name())))
            }
        };

        self.spawner.kill(uid);
        println!("{} stopped", uid);
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn context(root: &std::path::Path, os_family: OsFamily, argv: &[&str]) -> ConsoleContext {
        let mut ctx = ConsoleContext::new(root, argv.iter().map(|s| s.to_string()).collect());
        register_all(&mut ctx, os_family);
        ctx
    }

    #[test]
    fn test_registers_all_commands() {
        let temp_dir = tempdir().unwrap();
        let ctx = context(temp_dir.path(), OsFamily::detect(), &["bgproc"]);
        assert_eq!(ctx.command_names(), vec!["kill", "spawn", "status"]);
    }

    #[test]
    fn test_spawn_usage_error() {
        let temp_dir = tempdir().unwrap();
        let ctx = context(temp_dir.path(), OsFamily::detect(), &["bgproc", "spawn", "worker1"]);
        assert_eq!(ctx.run().unwrap(), 2);
    }

    #[test]
    fn test_spawn_on_unsupported_platform_fails() {
        let temp_dir = tempdir().unwrap();
        let ctx = context(
            temp_dir.path(),
            OsFamily::Unsupported,
            &["bgproc", "spawn", "worker1", "/usr/bin/myd", "--flag"],
        );
        assert_eq!(ctx.run().unwrap(), 1);
        assert!(!temp_dir.path().join(".tmp").exists());
    }

    #[test]
    fn test_status_of_unknown_uid() {
        let temp_dir = tempdir().unwrap();
        let ctx = context(
            temp_dir.path(),
            OsFamily::detect(),
            &["bgproc", "status", "worker1", "/usr/bin/myd"],
        );
        assert_eq!(ctx.run().unwrap(), NOT_RUNNING_EXIT_CODE);
    }

    #[test]
    fn test_kill_removes_record() {
        let temp_dir = tempdir().unwrap();
        let pid_file = temp_dir.path().join(".tmp/worker1/worker1.pid");
        fs::create_dir_all(pid_file.parent().unwrap()).unwrap();
        fs::write(&pid_file, "garbage").unwrap();

        let ctx = context(temp_dir.path(), OsFamily::detect(), &["bgproc", "kill", "worker1"]);
        assert_eq!(ctx.run().unwrap(), 0);
        assert!(!pid_file.exists());
    }

    #[test]
    fn test_kill_usage_and_unresolvable_uid() {
        let temp_dir = tempdir().unwrap();

        let ctx = context(temp_dir.path(), OsFamily::detect(), &["bgproc", "kill"]);
        assert_eq!(ctx.run().unwrap(), 2);

        let ctx = context(temp_dir.path(), OsFamily::detect(), &["bgproc", "kill", "a/b"]);
        assert_eq!(ctx.run().unwrap(), 0);
    }

    #[test]
    fn test_spawn_quotes_each_argument() {
        let temp_dir = tempdir().unwrap();
        let ctx = context(
            temp_dir.path(),
            OsFamily::Posix,
            &["bgproc", "spawn", "w1", "sh", "-c", "echo $0; sleep 30", "a b"],
        );
        let mut command = SpawnCommand::new(spawner_for(&ctx, OsFamily::Posix));

        command.on_init(&ctx).unwrap();

        let (uid, executable, arguments) = command.request.unwrap();
        assert_eq!(uid, "w1");
        assert_eq!(executable, "sh");
        assert_eq!(arguments, "-c 'echo $0; sleep 30' 'a b'");
    }

    #[test]
    #[cfg(unix)]
    fn test_spawned_process_sees_original_arguments() {
        let ps_available = std::process::Command::new("ps")
            .args(["-p", "1", "-o", "pid="])
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false);
        if !ps_available {
            return;
        }

        let temp_dir = tempdir().unwrap();
        let out = temp_dir.path().join("out.txt");
        let script = format!("echo \"$0|$1\" > '{}'; while :; do sleep 1; done", out.display());
        let ctx = context(
            temp_dir.path(),
            OsFamily::Posix,
            &["bgproc", "spawn", "w1", "sh", "-c", &script, "a b", "c d"],
        );

        assert_eq!(ctx.run().unwrap(), 0);

        let mut content = String::new();
        for _ in 0..40 {
            content = fs::read_to_string(&out).unwrap_or_default();
            if content.ends_with('\n') {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(50));
        }

        let kill = context(temp_dir.path(), OsFamily::Posix, &["bgproc", "kill", "w1"]);
        assert_eq!(kill.run().unwrap(), 0);

        assert_eq!(content, "a b|c d\n");
    }
}
