//! Memory-pressure signal behind a small capability trait.
//!
//! The analyzer only ever asks one question: "is memory critical right
//! now?". Keeping that question behind a trait lets tests inject a
//! deterministic answer and lets hosts swap in their own signal.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use sysinfo::{ProcessesToUpdate, System};

/// Source of the memory-pressure verdict.
pub trait ResourceMonitor: Send + Sync {
    /// Whether the process is under memory pressure. Implementations must
    /// fail open: when the signal cannot be read, report `false`.
    fn is_memory_critical(&self) -> bool;
}

/// A monitor that never reports pressure, for hosts that handle memory
/// themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMonitor;

impl ResourceMonitor for NoopMonitor {
    fn is_memory_critical(&self) -> bool {
        false
    }
}

const DEFAULT_THRESHOLD_MB: u64 = 100;
const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(250);

/// Samples the current process's resident memory and compares it against a
/// threshold. Verdicts are cached for a short interval so the check stays
/// cheap on hot paths.
#[derive(Debug)]
pub struct ProcessMemoryMonitor {
    threshold_mb: u64,
    sample_interval: Duration,
    state: Mutex<SampleState>,
}

#[derive(Debug)]
struct SampleState {
    system: System,
    sampled_at: Option<Instant>,
    verdict: bool,
}

impl ProcessMemoryMonitor {
    /// A monitor with the default 100 MB threshold.
    pub fn new() -> Self {
        Self {
            threshold_mb: DEFAULT_THRESHOLD_MB,
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
            state: Mutex::new(SampleState {
                system: System::new(),
                sampled_at: None,
                verdict: false,
            }),
        }
    }

    /// Sets the resident-memory threshold in megabytes.
    pub fn with_threshold_mb(mut self, threshold_mb: u64) -> Self {
        self.threshold_mb = threshold_mb;
        self
    }

    /// Sets how long a sampled verdict stays cached.
    pub fn with_sample_interval(mut self, interval: Duration) -> Self {
        self.sample_interval = interval;
        self
    }

    /// Current resident memory of this process in megabytes, or `None`
    /// when the process cannot be inspected.
    pub fn memory_usage_mb(&self) -> Option<u64> {
        let mut state = self.state.lock().expect("monitor lock");
        sample_resident_bytes(&mut state.system).map(|bytes| bytes / (1024 * 1024))
    }
}

impl Default for ProcessMemoryMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceMonitor for ProcessMemoryMonitor {
    fn is_memory_critical(&self) -> bool {
        let mut state = self.state.lock().expect("monitor lock");

        if let Some(sampled_at) = state.sampled_at {
            if sampled_at.elapsed() < self.sample_interval {
                return state.verdict;
            }
        }

        // Fail open: an uninspectable process reports no pressure.
        let verdict = match sample_resident_bytes(&mut state.system) {
            Some(bytes) => bytes / (1024 * 1024) > self.threshold_mb,
            None => false,
        };
        state.sampled_at = Some(Instant::now());
        state.verdict = verdict;
        verdict
    }
}

fn sample_resident_bytes(system: &mut System) -> Option<u64> {
    let pid = sysinfo::get_current_pid().ok()?;
    system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
    system.process(pid).map(|process| process.memory())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_monitor_never_reports_pressure() {
        assert!(!NoopMonitor.is_memory_critical());
    }

    #[test]
    fn test_generous_threshold_is_not_critical() {
        let monitor = ProcessMemoryMonitor::new().with_threshold_mb(u64::MAX);
        assert!(!monitor.is_memory_critical());
    }

    #[test]
    fn test_zero_threshold_is_critical() {
        // Any running test binary is resident above 0 MB.
        let monitor = ProcessMemoryMonitor::new()
            .with_threshold_mb(0)
            .with_sample_interval(Duration::ZERO);
        assert!(monitor.is_memory_critical());
    }

    #[test]
    fn test_verdict_is_stable_within_interval() {
        let monitor = ProcessMemoryMonitor::new()
            .with_threshold_mb(u64::MAX)
            .with_sample_interval(Duration::from_secs(3600));
        assert!(!monitor.is_memory_critical());
        assert!(!monitor.is_memory_critical());
    }

    #[test]
    fn test_memory_usage_is_reported() {
        let monitor = ProcessMemoryMonitor::new();
        let usage = monitor.memory_usage_mb();
        assert!(usage.is_some());
    }
}
