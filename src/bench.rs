//! Benchmark driver and averaging reducer.
//!
//! The driver walks the configured (size, interpreter) grid strictly
//! sequentially. Trials never overlap; concurrent runs would contend for CPU
//! and memory and skew both measured quantities.

use crate::config::BenchConfig;
use crate::error::{LuabenchError, Result};
use crate::output;
use crate::process::{Measure, SamplingMonitor};
use crate::results::ResultRow;
use crate::script;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Mean of a trial series for one (interpreter, size) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialAverage {
    pub time_ms: f64,
    pub peak_kb: f64,
}

/// Run `runs` sequential measurements and reduce them to arithmetic means.
///
/// Only the mean is computed; variance is the caller's concern.
pub fn average<M: Measure>(
    measure: &M,
    executable: &Path,
    script: &Path,
    runs: u32,
) -> Result<TrialAverage> {
    if runs == 0 {
        return Err(LuabenchError::Config(
            "run count must be at least 1".to_string(),
        ));
    }

    let mut total_time_ms = 0.0;
    let mut total_peak_kb = 0.0;
    for _ in 0..runs {
        let m = measure.measure(executable, script)?;
        total_time_ms += m.time_ms();
        total_peak_kb += m.peak_kb();
    }

    Ok(TrialAverage {
        time_ms: total_time_ms / runs as f64,
        peak_kb: total_peak_kb / runs as f64,
    })
}

/// Drives one full benchmark run over the configured grid.
///
/// For each input size: write the workload script, measure every interpreter
/// against it, then delete the script before moving to the next size. Rows
/// come out in exact (size, interpreter) iteration order, which the CSV
/// writer preserves.
pub struct BenchRunner<M: Measure> {
    config: BenchConfig,
    measure: M,
}

impl BenchRunner<SamplingMonitor> {
    /// Build a runner measuring with the real sampling monitor.
    pub fn new(config: BenchConfig) -> Self {
        let monitor = SamplingMonitor::new(config.poll_interval())
            .with_timeout(config.timeout_secs.map(Duration::from_secs));
        Self::with_measure(config, monitor)
    }
}

impl<M: Measure> BenchRunner<M> {
    /// Build a runner with a caller-supplied measurement backend.
    pub fn with_measure(config: BenchConfig, measure: M) -> Self {
        Self { config, measure }
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Execute the full grid and return one row per (interpreter, size).
    ///
    /// A launch or timeout failure aborts the whole run; there is no
    /// partial-failure recovery. A failed workload deletion surfaces as a
    /// cleanup error rather than being swallowed.
    pub fn run(&self) -> Result<Vec<ResultRow>> {
        fs::create_dir_all(&self.config.workload_dir)?;

        let total = self.config.sizes.len() * self.config.interpreters.len();
        let progress = output::trial_progress_bar(total as u64);
        let mut rows = Vec::with_capacity(total);

        for &n in &self.config.sizes {
            let script_path = script::write(&self.config.workload_dir, n)?;

            for interp in &self.config.interpreters {
                let avg = average(&self.measure, &interp.path, &script_path, self.config.runs)?;
                progress.suspend(|| {
                    output::print_result_row(&interp.name, n, avg.time_ms, avg.peak_kb);
                });
                rows.push(ResultRow {
                    interpreter: interp.name.clone(),
                    n,
                    time_ms: avg.time_ms,
                    peak_kb: avg.peak_kb,
                });
                progress.inc(1);
            }

            fs::remove_file(&script_path).map_err(|source| LuabenchError::Cleanup {
                path: script_path.clone(),
                source,
            })?;
        }

        progress.finish_and_clear();
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Interpreter;
    use crate::process::Measurement;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::path::PathBuf;
    use tempfile::tempdir;

    /// Measure double replaying a fixed queue of measurements.
    struct FakeMeasure {
        queue: RefCell<VecDeque<Measurement>>,
        calls: RefCell<Vec<PathBuf>>,
    }

    impl FakeMeasure {
        fn repeating(elapsed_ms: u64, peak_bytes: u64, count: usize) -> Self {
            let m = Measurement {
                elapsed: Duration::from_millis(elapsed_ms),
                peak_memory_bytes: peak_bytes,
            };
            Self {
                queue: RefCell::new(std::iter::repeat(m).take(count).collect()),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn from_series(series: &[(u64, u64)]) -> Self {
            Self {
                queue: RefCell::new(
                    series
                        .iter()
                        .map(|&(ms, bytes)| Measurement {
                            elapsed: Duration::from_millis(ms),
                            peak_memory_bytes: bytes,
                        })
                        .collect(),
                ),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Measure for FakeMeasure {
        fn measure(&self, executable: &Path, _script: &Path) -> Result<Measurement> {
            self.calls.borrow_mut().push(executable.to_path_buf());
            self.queue
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| LuabenchError::Config("fake measure exhausted".to_string()))
        }
    }

    struct FailingMeasure;

    impl Measure for FailingMeasure {
        fn measure(&self, executable: &Path, _script: &Path) -> Result<Measurement> {
            Err(LuabenchError::Launch {
                executable: executable.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        }
    }

    fn grid_config(workload_dir: &Path) -> BenchConfig {
        BenchConfig {
            runs: 1,
            sizes: vec![10, 50],
            workload_dir: workload_dir.to_path_buf(),
            interpreters: vec![
                Interpreter {
                    name: "lua".to_string(),
                    path: PathBuf::from("/fake/lua"),
                },
                Interpreter {
                    name: "gua".to_string(),
                    path: PathBuf::from("/fake/gua"),
                },
            ],
            ..BenchConfig::default()
        }
    }

    #[test]
    fn test_average_is_exact_arithmetic_mean() {
        let fake = FakeMeasure::from_series(&[(10, 1024), (20, 2048), (30, 6144)]);
        let avg = average(&fake, Path::new("/fake/lua"), Path::new("s.lua"), 3).unwrap();

        assert!((avg.time_ms - 20.0).abs() < 1e-9);
        assert!((avg.peak_kb - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_average_runs_sequentially_n_times() {
        let fake = FakeMeasure::repeating(5, 1024, 4);
        average(&fake, Path::new("/fake/lua"), Path::new("s.lua"), 4).unwrap();

        assert_eq!(fake.calls.borrow().len(), 4);
    }

    #[test]
    fn test_average_rejects_zero_runs() {
        let fake = FakeMeasure::repeating(5, 1024, 1);
        let result = average(&fake, Path::new("/fake/lua"), Path::new("s.lua"), 0);
        assert!(matches!(result, Err(LuabenchError::Config(_))));
    }

    #[test]
    fn test_average_propagates_launch_error() {
        let result = average(
            &FailingMeasure,
            Path::new("/fake/lua"),
            Path::new("s.lua"),
            3,
        );
        assert!(matches!(result, Err(LuabenchError::Launch { .. })));
    }

    #[test]
    fn test_runner_produces_full_grid_in_order() {
        let dir = tempdir().unwrap();
        let config = grid_config(dir.path());
        let fake = FakeMeasure::repeating(5, 1024, 4);

        let rows = BenchRunner::with_measure(config, fake).run().unwrap();

        assert_eq!(rows.len(), 4);
        let pairs: Vec<(&str, u64)> = rows
            .iter()
            .map(|r| (r.interpreter.as_str(), r.n))
            .collect();
        assert_eq!(
            pairs,
            vec![("lua", 10), ("gua", 10), ("lua", 50), ("gua", 50)]
        );
    }

    #[test]
    fn test_runner_grid_pairs_are_unique() {
        let dir = tempdir().unwrap();
        let config = grid_config(dir.path());
        let fake = FakeMeasure::repeating(5, 1024, 4);

        let rows = BenchRunner::with_measure(config, fake).run().unwrap();

        let mut pairs: Vec<(String, u64)> = rows
            .iter()
            .map(|r| (r.interpreter.clone(), r.n))
            .collect();
        pairs.sort();
        pairs.dedup();
        assert_eq!(pairs.len(), 4);
    }

    #[test]
    fn test_runner_deletes_workload_files() {
        let dir = tempdir().unwrap();
        let config = grid_config(dir.path());
        let fake = FakeMeasure::repeating(5, 1024, 4);

        BenchRunner::with_measure(config, fake).run().unwrap();

        assert!(!dir.path().join("script_10.lua").exists());
        assert!(!dir.path().join("script_50.lua").exists());
    }

    #[test]
    fn test_runner_respects_run_count() {
        let dir = tempdir().unwrap();
        let config = BenchConfig {
            runs: 3,
            sizes: vec![10],
            workload_dir: dir.path().to_path_buf(),
            interpreters: vec![Interpreter {
                name: "lua".to_string(),
                path: PathBuf::from("/fake/lua"),
            }],
            ..BenchConfig::default()
        };
        let fake = FakeMeasure::repeating(5, 1024, 3);

        let runner = BenchRunner::with_measure(config, fake);
        let rows = runner.run().unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(runner.measure.calls.borrow().len(), 3);
    }

    /// Measure double that replaces the workload file with a directory, so
    /// the driver's deletion attempt fails.
    struct UndeletableWorkloadMeasure;

    impl Measure for UndeletableWorkloadMeasure {
        fn measure(&self, _executable: &Path, script: &Path) -> Result<Measurement> {
            fs::remove_file(script)?;
            fs::create_dir(script)?;
            Ok(Measurement {
                elapsed: Duration::from_millis(1),
                peak_memory_bytes: 1024,
            })
        }
    }

    #[test]
    fn test_runner_surfaces_workload_deletion_failure() {
        let dir = tempdir().unwrap();
        let config = BenchConfig {
            runs: 1,
            sizes: vec![10],
            workload_dir: dir.path().to_path_buf(),
            interpreters: vec![Interpreter {
                name: "lua".to_string(),
                path: PathBuf::from("/fake/lua"),
            }],
            ..BenchConfig::default()
        };

        let result = BenchRunner::with_measure(config, UndeletableWorkloadMeasure).run();

        match result {
            Err(LuabenchError::Cleanup { path, .. }) => {
                assert_eq!(path, dir.path().join("script_10.lua"));
            }
            other => panic!("expected Cleanup error, got {:?}", other),
        }
    }

    #[test]
    fn test_runner_aborts_on_launch_failure() {
        let dir = tempdir().unwrap();
        let config = grid_config(dir.path());

        let result = BenchRunner::with_measure(config, FailingMeasure).run();
        assert!(matches!(result, Err(LuabenchError::Launch { .. })));
    }
}
