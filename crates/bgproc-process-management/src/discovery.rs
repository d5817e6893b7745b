//! Bounded PID discovery.
//!
//! Launching is asynchronous with respect to the PID record: on POSIX the
//! launched wrapper writes its own PID some time after the launcher
//! returns. Discovery re-reads the record a fixed number of times with a
//! fixed sleep between reads. The budget is a counter, not a deadline, and
//! there is no way to cancel it.

use std::thread;
use std::time::Duration;
use tracing::debug;

/// Retry budget for PID discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryPolicy {
    pub attempts: u32,
    pub interval: Duration,
}

impl DiscoveryPolicy {
    /// 10 probes, 500 ms apart.
    pub const DEFAULT: DiscoveryPolicy = DiscoveryPolicy {
        attempts: 10,
        interval: Duration::from_millis(500),
    };
}

impl Default for DiscoveryPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Result of a discovery run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discovery {
    /// First positive PID observed, if any.
    pub pid: Option<u32>,
    /// Number of probes performed.
    pub attempts: u32,
}

/// Calls `probe` until it yields a positive PID or the policy's attempts
/// are used up, sleeping `policy.interval` between probes (not after the
/// last one).
pub fn discover_pid<F>(policy: DiscoveryPolicy, mut probe: F) -> Discovery
where
    F: FnMut() -> Option<u32>,
{
    for attempt in 1..=policy.attempts {
        if let Some(pid) = probe().filter(|pid| *pid > 0) {
            debug!("Discovered PID {} on probe {}", pid, attempt);
            return Discovery {
                pid: Some(pid),
                attempts: attempt,
            };
        }

        if attempt < policy.attempts {
            thread::sleep(policy.interval);
        }
    }

    Discovery {
        pid: None,
        attempts: policy.attempts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast(attempts: u32) -> DiscoveryPolicy {
        DiscoveryPolicy {
            attempts,
            interval: Duration::from_millis(1),
        }
    }

    #[test]
    fn test_default_budget() {
        let policy = DiscoveryPolicy::default();
        assert_eq!(policy.attempts, 10);
        assert_eq!(policy.interval, Duration::from_millis(500));
    }

    #[test]
    fn test_stops_after_exactly_ten_probes() {
        let mut probes = 0;
        let discovery = discover_pid(fast(10), || {
            probes += 1;
            None
        });

        assert_eq!(probes, 10);
        assert_eq!(discovery, Discovery { pid: None, attempts: 10 });
    }

    #[test]
    fn test_finds_pid_after_third_probe() {
        let mut probes = 0;
        let discovery = discover_pid(fast(10), || {
            probes += 1;
            if probes > 3 { Some(4821) } else { None }
        });

        assert_eq!(discovery.pid, Some(4821));
        assert_eq!(discovery.attempts, 4);
        assert_eq!(probes, 4);
    }

    #[test]
    fn test_zero_is_not_a_pid() {
        let mut probes = 0;
        let discovery = discover_pid(fast(3), || {
            probes += 1;
            Some(0)
        });

        assert_eq!(discovery.pid, None);
        assert_eq!(probes, 3);
    }

    #[test]
    fn test_no_sleep_after_last_probe() {
        let policy = DiscoveryPolicy {
            attempts: 1,
            interval: Duration::from_secs(60),
        };
        let started = std::time::Instant::now();
        discover_pid(policy, || None);
        assert!(started.elapsed() < Duration::from_secs(30));
    }
}
