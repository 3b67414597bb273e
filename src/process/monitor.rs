//! Resident-memory monitoring using sysinfo.

use sysinfo::{Pid, System};

/// Monitors resident memory for a specific process by PID.
///
/// Wraps `sysinfo::System` and refreshes a single process at a time. The
/// monitor handles the case where the process exits between checks: a
/// refresh after exit simply yields no sample.
pub struct ProcessMonitor {
    system: System,
    pid: Pid,
    last_memory: Option<u64>,
}

impl ProcessMonitor {
    /// Creates a new ProcessMonitor for the given PID.
    ///
    /// No sample is available until `refresh()` is called.
    pub fn new(pid: u32) -> Self {
        Self {
            system: System::new(),
            pid: Pid::from_u32(pid),
            last_memory: None,
        }
    }

    /// Returns the PID being monitored.
    pub fn pid(&self) -> u32 {
        self.pid.as_u32()
    }

    /// Queries the OS for the tracked process's current resident memory.
    ///
    /// Call this on each poll tick. If the process no longer exists the
    /// stored sample is cleared rather than erroring; a vanished PID is the
    /// normal end of a measurement, not a failure.
    pub fn refresh(&mut self) {
        // Refresh only the process we're tracking, memory only
        self.system.refresh_processes_specifics(
            sysinfo::ProcessesToUpdate::Some(&[self.pid]),
            true,
            sysinfo::ProcessRefreshKind::nothing().with_memory(),
        );

        self.last_memory = self.system.process(self.pid).map(|p| p.memory());
    }

    /// Resident memory in bytes from the last `refresh()`.
    ///
    /// Returns `None` if `refresh()` has never been called or the process
    /// was gone at the last refresh.
    pub fn memory_bytes(&self) -> Option<u64> {
        self.last_memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_new_has_no_sample() {
        let monitor = ProcessMonitor::new(12345);
        assert_eq!(monitor.pid(), 12345);
        assert!(monitor.memory_bytes().is_none());
    }

    #[test]
    fn test_monitor_nonexistent_process() {
        // Use an extremely unlikely PID that shouldn't exist
        let mut monitor = ProcessMonitor::new(u32::MAX - 1);

        // Refresh should not panic for a nonexistent process
        monitor.refresh();
        assert!(monitor.memory_bytes().is_none());
    }

    #[test]
    fn test_monitor_current_process() {
        let mut monitor = ProcessMonitor::new(std::process::id());
        monitor.refresh();

        // The test process itself must report non-zero resident memory
        let memory = monitor.memory_bytes();
        assert!(memory.is_some());
        assert!(memory.unwrap() > 0);
    }

    #[test]
    fn test_monitor_refresh_is_repeatable() {
        let mut monitor = ProcessMonitor::new(std::process::id());

        monitor.refresh();
        let first = monitor.memory_bytes();
        monitor.refresh();
        let second = monitor.memory_bytes();

        assert!(first.is_some());
        assert!(second.is_some());
    }
}
