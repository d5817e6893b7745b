//! End-to-end lifecycle against real processes on POSIX hosts.

#![cfg(unix)]

use bgproc_process_management::{LifecycleConfig, ProcessSpawner, ProcessState, SpawnOutcome};
use std::process::Command;
use tempfile::tempdir;

fn ps_available() -> bool {
    Command::new("ps")
        .args(["-p", "1", "-o", "pid="])
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

#[test]
fn test_spawn_is_idempotent_and_kill_deregisters() {
    if !ps_available() {
        return;
    }

    let temp_dir = tempdir().unwrap();
    let spawner = ProcessSpawner::new(LifecycleConfig::new(temp_dir.path()));

    let first = spawner.spawn("sleeper", "sleep", "30");
    let pid = match first {
        SpawnOutcome::Spawned(pid) => pid,
        other => panic!("expected a spawned process, got {:?}", other),
    };
    assert!(pid > 0);
    assert_eq!(spawner.state("sleeper", "sleep"), ProcessState::Running);

    let second = spawner.spawn("sleeper", "sleep", "30");
    assert_eq!(second, SpawnOutcome::AlreadyRunning(pid));
    assert_eq!(second.pid(), -1);

    assert!(spawner.kill("sleeper"));
    assert_eq!(spawner.pid_of("sleeper"), None);
    assert!(!temp_dir.path().join(".tmp/sleeper/sleeper.pid").exists());
}

#[test]
fn test_unknown_uid_is_not_running() {
    let temp_dir = tempdir().unwrap();
    let spawner = ProcessSpawner::new(LifecycleConfig::new(temp_dir.path()));

    assert_eq!(spawner.pid_of("never-spawned"), None);
    assert_eq!(spawner.state("never-spawned", "sleep"), ProcessState::Unknown);
    assert!(spawner.kill("never-spawned"));
}
