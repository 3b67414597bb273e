//! Sampling measurement of a single interpreter run.
//!
//! Spawns the interpreter as a child process, polls its resident memory on a
//! fixed interval until it exits, and reduces the run to (elapsed time, peak
//! memory). The child's stdout and stderr are discarded; nothing it prints
//! affects the measurement.

use crate::error::{LuabenchError, Result};
use crate::process::ProcessMonitor;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// One observation of a single process execution. Immutable once produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Wall-clock time from spawn to full reap.
    pub elapsed: Duration,
    /// Highest resident memory sample observed, in bytes.
    pub peak_memory_bytes: u64,
}

impl Measurement {
    /// Elapsed time in milliseconds.
    pub fn time_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    /// Peak memory in kilobytes.
    pub fn peak_kb(&self) -> f64 {
        self.peak_memory_bytes as f64 / 1024.0
    }
}

/// Seam between the benchmark driver and the real sampling monitor.
///
/// Tests substitute a double returning fixed values so the averaging and
/// driver logic can be exercised without spawning real processes.
pub trait Measure {
    /// Run `executable script` to completion and measure it.
    fn measure(&self, executable: &Path, script: &Path) -> Result<Measurement>;
}

/// The real process-sampling monitor.
///
/// Peak memory is a *sampled* maximum: it reflects the highest value seen at
/// any poll tick, so a spike between ticks can be missed. The poll interval
/// trades sampling resolution against polling overhead.
pub struct SamplingMonitor {
    poll_interval: Duration,
    timeout: Option<Duration>,
}

impl SamplingMonitor {
    /// Create a monitor polling at the given interval, with no timeout.
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            timeout: None,
        }
    }

    /// Set an optional per-trial timeout. A child still running when the
    /// timeout elapses is killed and the trial fails with a timeout error.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Measure for SamplingMonitor {
    fn measure(&self, executable: &Path, script: &Path) -> Result<Measurement> {
        let start = Instant::now();

        let mut child = Command::new(executable)
            .arg(script)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| LuabenchError::Launch {
                executable: executable.to_path_buf(),
                source,
            })?;

        let mut monitor = ProcessMonitor::new(child.id());
        let mut peak_memory = 0u64;

        while child.try_wait()?.is_none() {
            if let Some(timeout) = self.timeout {
                if start.elapsed() >= timeout {
                    child.kill()?;
                    child.wait()?;
                    return Err(LuabenchError::Timeout(timeout.as_secs()));
                }
            }

            // A PID that vanished between the liveness check and this
            // refresh yields no sample; the next try_wait ends the loop.
            monitor.refresh();
            if let Some(memory) = monitor.memory_bytes() {
                peak_memory = peak_memory.max(memory);
            }

            thread::sleep(self.poll_interval);
        }

        // Reap fully so teardown is included in the elapsed time and no
        // zombie is left behind.
        child.wait()?;
        let elapsed = start.elapsed();

        Ok(Measurement {
            elapsed,
            peak_memory_bytes: peak_memory,
        })
    }
}
